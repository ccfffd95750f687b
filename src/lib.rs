//! Grid Snake with edge wrapping, timed bonus food and live settings.
//!
//! [`Game`] owns all state and is driven by [`Game::advance`] (real time) or
//! [`Game::tick`] (one step). Drawing goes through the [`render::Surface`]
//! trait so the core never touches a graphics API.

pub mod color;
pub mod direction;
pub mod error;
pub mod food;
pub mod game;
pub mod geometry;
pub mod input;
pub mod render;
pub mod score;
pub mod settings;
pub mod snake;
pub mod timer;

pub use color::Rgb;
pub use direction::Direction;
pub use error::{GameError, Result};
pub use game::{Game, GameEvent, GameOverReport, Phase, TickOutcome};
pub use geometry::{Cell, Grid};
pub use input::InputOutcome;
pub use settings::Settings;
