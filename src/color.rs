use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::GameError;

/// Opaque 8-bit RGB colour, written as `#rrggbb` in settings files.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Rgb { r, g, b }
    }

    /// Shifts every channel by `amount`, clamped to `0..=255`.
    pub fn adjust(self, amount: i16) -> Rgb {
        let shift = |c: u8| (c as i16 + amount).clamp(0, 255) as u8;
        Rgb::new(shift(self.r), shift(self.g), shift(self.b))
    }

    pub fn to_hex(self) -> String {
        self.to_string()
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

impl FromStr for Rgb {
    type Err = GameError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || GameError::InvalidColor(s.to_string());
        let hex = s.trim().strip_prefix('#').ok_or_else(invalid)?;
        if hex.len() != 6 || !hex.is_ascii() {
            return Err(invalid());
        }
        let channel = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).map_err(|_| invalid());
        Ok(Rgb::new(channel(0)?, channel(2)?, channel(4)?))
    }
}

impl TryFrom<String> for Rgb {
    type Error = GameError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Rgb> for String {
    fn from(value: Rgb) -> Self {
        value.to_hex()
    }
}

/// RGB colour with alpha, for translucent overlays.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Rgba {
    pub rgb: Rgb,
    pub alpha: f32,
}

impl Rgba {
    pub const fn new(rgb: Rgb, alpha: f32) -> Self {
        Rgba { rgb, alpha }
    }
}
