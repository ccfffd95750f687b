//! Draws a game snapshot onto any 2D surface.

use crate::color::{Rgb, Rgba};
use crate::geometry::Cell;
use crate::settings::Settings;
use crate::snake::Snake;

pub const BACKGROUND: Rgb = Rgb::new(0x0d, 0x11, 0x17);
pub const BONUS_FOOD: Rgb = Rgb::new(0xff, 0xff, 0x00);
pub const BONUS_HIGHLIGHT: Rgba = Rgba::new(Rgb::new(0xff, 0xff, 0x00), 0.5);
/// Highlight radius as a fraction of the tile size.
pub const HIGHLIGHT_RADIUS: f32 = 0.45;

/// Minimal drawing backend.
pub trait Surface {
    type Error;

    fn fill_background(&mut self, side: i32, color: Rgb) -> Result<(), Self::Error>;

    fn fill_cell(&mut self, cell: Cell, tile: i32, color: Rgb) -> Result<(), Self::Error>;

    /// Filled circle centred on the cell.
    fn fill_highlight(&mut self, cell: Cell, tile: i32, radius: f32, color: Rgba) -> Result<(), Self::Error>;
}

/// Colours used for one frame.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Colors {
    pub accent: Rgb,
    pub body: Rgb,
    pub food: Rgb,
}

impl From<&Settings> for Colors {
    fn from(settings: &Settings) -> Self {
        Colors {
            accent: settings.accent_color,
            body: settings.body_color,
            food: settings.food_color,
        }
    }
}

/// Everything the renderer needs from the game.
#[derive(Clone, Copy, Debug)]
pub struct Scene<'a> {
    pub side: i32,
    pub tile: i32,
    pub snake: &'a Snake,
    pub food: Cell,
    pub bonus: Option<Cell>,
}

/// Background, normal food, bonus food with its glow, then the snake from
/// head to tail.
pub fn render<S: Surface>(scene: &Scene<'_>, palette: &Colors, surface: &mut S) -> Result<(), S::Error> {
    surface.fill_background(scene.side, BACKGROUND)?;
    surface.fill_cell(scene.food, scene.tile, palette.food)?;

    if let Some(bonus) = scene.bonus {
        surface.fill_cell(bonus, scene.tile, BONUS_FOOD)?;
        surface.fill_highlight(bonus, scene.tile, scene.tile as f32 * HIGHLIGHT_RADIUS, BONUS_HIGHLIGHT)?;
    }

    for (i, segment) in scene.snake.segments().enumerate() {
        let color = if i == 0 { palette.accent } else { palette.body };
        surface.fill_cell(segment, scene.tile, color)?;
    }
    Ok(())
}
