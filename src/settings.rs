use std::fs;
use std::path::Path;
use std::time::Duration;

use log::{info, warn};
use serde::{Deserialize, Serialize};

use crate::color::Rgb;
use crate::error::{GameError, Result};

pub const DEFAULT_TICK_MS: u64 = 150;
pub const DEFAULT_ACCENT: Rgb = Rgb::new(0x00, 0xff, 0x00);
pub const DEFAULT_BODY: Rgb = Rgb::new(0x00, 0xcc, 0x00);
pub const DEFAULT_FOOD: Rgb = Rgb::new(0xff, 0x4d, 0x4d);

/// Player-tunable speed and colours.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub tick_interval_ms: u64,
    pub accent_color: Rgb,
    pub body_color: Rgb,
    pub food_color: Rgb,
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            tick_interval_ms: DEFAULT_TICK_MS,
            accent_color: DEFAULT_ACCENT,
            body_color: DEFAULT_BODY,
            food_color: DEFAULT_FOOD,
        }
    }
}

impl Settings {
    pub fn tick_interval(&self) -> Duration {
        Duration::from_millis(self.tick_interval_ms)
    }

    pub fn validate(&self) -> Result<()> {
        if self.tick_interval_ms == 0 {
            return Err(GameError::InvalidSettings(
                "tick_interval_ms must be positive".to_string(),
            ));
        }
        Ok(())
    }

    pub fn with_speed(mut self, speed: Speed) -> Self {
        self.tick_interval_ms = speed.interval_ms();
        self
    }

    pub fn with_palette(mut self, palette: Palette) -> Self {
        let (accent, body, food) = palette.colors();
        self.accent_color = accent;
        self.body_color = body;
        self.food_color = food;
        self
    }

    /// Reads settings from a JSON file. A missing file yields the defaults.
    pub fn load(path: &Path) -> Result<Self> {
        let contents = match fs::read_to_string(path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                info!("no settings at {}, using defaults", path.display());
                return Ok(Settings::default());
            }
            Err(e) => return Err(e.into()),
        };
        let settings: Settings = serde_json::from_str(&contents)?;
        settings.validate()?;
        Ok(settings)
    }

    /// Like [`Settings::load`], but falls back to the defaults on any error.
    pub fn load_or_default(path: &Path) -> Self {
        Self::load(path).unwrap_or_else(|e| {
            warn!("failed to load settings from {}: {}", path.display(), e);
            Settings::default()
        })
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        let json = serde_json::to_string_pretty(self)?;
        fs::write(path, json)?;
        Ok(())
    }
}

#[derive(PartialEq, Eq, Clone, Copy, Debug, Serialize, Deserialize)]
pub enum Speed {
    Slow,
    Normal,
    Fast,
    Insane,
}

impl Speed {
    pub const ALL: [Speed; 4] = [Speed::Slow, Speed::Normal, Speed::Fast, Speed::Insane];

    pub fn interval_ms(self) -> u64 {
        match self {
            Speed::Slow => 200,
            Speed::Normal => 150,
            Speed::Fast => 100,
            Speed::Insane => 70,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Speed::Slow => "Slow",
            Speed::Normal => "Normal",
            Speed::Fast => "Fast",
            Speed::Insane => "Insane",
        }
    }

    /// Preset matching an interval exactly, if any.
    pub fn from_interval(ms: u64) -> Option<Speed> {
        Speed::ALL.into_iter().find(|s| s.interval_ms() == ms)
    }
}

#[derive(PartialEq, Eq, Clone, Copy, Debug, Serialize, Deserialize)]
pub enum Palette {
    Neon,
    Ocean,
    Ember,
    Mono,
}

impl Palette {
    pub const ALL: [Palette; 4] = [Palette::Neon, Palette::Ocean, Palette::Ember, Palette::Mono];

    /// Accent, body and food colours.
    pub fn colors(self) -> (Rgb, Rgb, Rgb) {
        match self {
            Palette::Neon => (DEFAULT_ACCENT, DEFAULT_BODY, DEFAULT_FOOD),
            Palette::Ocean => (
                Rgb::new(0x00, 0xe5, 0xff),
                Rgb::new(0x00, 0x8c, 0xba),
                Rgb::new(0xff, 0x9f, 0x1c),
            ),
            Palette::Ember => (
                Rgb::new(0xff, 0x8c, 0x00),
                Rgb::new(0xcc, 0x55, 0x00),
                Rgb::new(0x7f, 0xff, 0xd4),
            ),
            Palette::Mono => (
                Rgb::new(0xf0, 0xf0, 0xf0),
                Rgb::new(0xa0, 0xa0, 0xa0),
                Rgb::new(0xff, 0x4d, 0x4d),
            ),
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Palette::Neon => "Neon",
            Palette::Ocean => "Ocean",
            Palette::Ember => "Ember",
            Palette::Mono => "Mono",
        }
    }

    pub fn of(settings: &Settings) -> Option<Palette> {
        Palette::ALL.into_iter().find(|p| {
            p.colors() == (settings.accent_color, settings.body_color, settings.food_color)
        })
    }
}
