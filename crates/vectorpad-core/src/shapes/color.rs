//! 8-bit ARGB color used by shapes and the project format.

use peniko::Color;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Error returned when a `#AARRGGBB` string cannot be parsed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ColorParseError {
    #[error("expected 8 hex digits (#AARRGGBB), got {0:?}")]
    BadLength(String),
    #[error("invalid hex digit in color {0:?}")]
    BadDigit(String),
}

/// Serializable ARGB color, quantized to 8 bits per channel.
///
/// The text form is `#AARRGGBB`, which is also how colors are persisted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ArgbColor {
    pub a: u8,
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl ArgbColor {
    pub const BLACK: Self = Self::new(255, 0, 0, 0);
    pub const WHITE: Self = Self::new(255, 255, 255, 255);
    /// Fully transparent white, the "no fill" color.
    pub const TRANSPARENT: Self = Self::new(0, 255, 255, 255);

    pub const fn new(a: u8, r: u8, g: u8, b: u8) -> Self {
        Self { a, r, g, b }
    }

    /// Opaque color from RGB components.
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self::new(255, r, g, b)
    }

    pub fn is_transparent(&self) -> bool {
        self.a == 0
    }

    /// `#AARRGGBB` form.
    pub fn to_hex(&self) -> String {
        format!("#{:02X}{:02X}{:02X}{:02X}", self.a, self.r, self.g, self.b)
    }

    /// `#RRGGBB` form (alpha dropped), as used by SVG paint attributes.
    pub fn to_rgb_hex(&self) -> String {
        format!("#{:02X}{:02X}{:02X}", self.r, self.g, self.b)
    }

    /// Alpha as a fraction in [0, 1].
    pub fn opacity(&self) -> f64 {
        self.a as f64 / 255.0
    }

    /// Parse `#AARRGGBB` (the leading `#` is optional).
    pub fn from_hex(hex: &str) -> Result<Self, ColorParseError> {
        let digits = hex.trim().trim_start_matches('#');
        if digits.len() != 8 || !digits.is_ascii() {
            return Err(ColorParseError::BadLength(hex.to_string()));
        }
        if !digits.bytes().all(|b| b.is_ascii_hexdigit()) {
            return Err(ColorParseError::BadDigit(hex.to_string()));
        }
        let channel = |i: usize| {
            u8::from_str_radix(&digits[i..i + 2], 16)
                .map_err(|_| ColorParseError::BadDigit(hex.to_string()))
        };
        Ok(Self::new(channel(0)?, channel(2)?, channel(4)?, channel(6)?))
    }
}

impl Default for ArgbColor {
    fn default() -> Self {
        Self::BLACK
    }
}

impl fmt::Display for ArgbColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl FromStr for ArgbColor {
    type Err = ColorParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_hex(s)
    }
}

impl Serialize for ArgbColor {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_hex())
    }
}

impl<'de> Deserialize<'de> for ArgbColor {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let text = String::deserialize(deserializer)?;
        Self::from_hex(&text).map_err(serde::de::Error::custom)
    }
}

impl From<Color> for ArgbColor {
    fn from(color: Color) -> Self {
        let rgba = color.to_rgba8();
        Self::new(rgba.a, rgba.r, rgba.g, rgba.b)
    }
}

impl From<ArgbColor> for Color {
    fn from(color: ArgbColor) -> Self {
        Color::from_rgba8(color.r, color.g, color.b, color.a)
    }
}
