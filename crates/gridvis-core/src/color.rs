//! Colors and the paint-state color stack.
//!
//! Colors are 8-bit RGBA and travel through configuration files as
//! `#rrggbb` or `#rrggbbaa` strings.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// An 8-bit RGBA color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    pub const BLACK: Color = Color::from_rgb(0, 0, 0);
    pub const WHITE: Color = Color::from_rgb(255, 255, 255);
    pub const DARK_GRAY: Color = Color::from_rgb(64, 64, 64);
    pub const RED: Color = Color::from_rgb(255, 0, 0);
    pub const GREEN: Color = Color::from_rgb(0, 255, 0);
    pub const BLUE: Color = Color::from_rgb(0, 0, 255);
    /// Background a panel paints before its content.
    pub const PANEL_BACKGROUND: Color = Color::from_rgb(238, 238, 238);

    /// Opaque color from red, green and blue components (0-255).
    pub const fn from_rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    pub const fn from_rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Components as floats in `0.0..=1.0`, in RGBA order.
    pub fn to_f64_components(self) -> [f64; 4] {
        [
            f64::from(self.r) / 255.0,
            f64::from(self.g) / 255.0,
            f64::from(self.b) / 255.0,
            f64::from(self.a) / 255.0,
        ]
    }

    pub fn is_opaque(self) -> bool {
        self.a == 255
    }
}

impl Default for Color {
    fn default() -> Self {
        Self::BLACK
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_opaque() {
            write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
        } else {
            write!(
                f,
                "#{:02x}{:02x}{:02x}{:02x}",
                self.r, self.g, self.b, self.a
            )
        }
    }
}

/// Error returned when a color string cannot be parsed.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ColorParseError {
    /// The string does not start with `#`
    #[error("Color must start with '#': {0}")]
    MissingHash(String),

    /// The string has neither 6 nor 8 hex digits
    #[error("Color must have 6 or 8 hex digits: {0}")]
    InvalidLength(String),

    /// A digit pair is not valid hexadecimal
    #[error("Invalid hex digits in color: {0}")]
    InvalidHex(String),
}

impl FromStr for Color {
    type Err = ColorParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let digits = trimmed
            .strip_prefix('#')
            .ok_or_else(|| ColorParseError::MissingHash(s.to_string()))?;

        if digits.len() != 6 && digits.len() != 8 {
            return Err(ColorParseError::InvalidLength(s.to_string()));
        }
        if !digits.is_ascii() {
            return Err(ColorParseError::InvalidHex(s.to_string()));
        }

        let channel = |i: usize| {
            u8::from_str_radix(&digits[i..i + 2], 16)
                .map_err(|_| ColorParseError::InvalidHex(s.to_string()))
        };

        let a = if digits.len() == 8 { channel(6)? } else { 255 };
        Ok(Self::from_rgba(channel(0)?, channel(2)?, channel(4)?, a))
    }
}

impl TryFrom<String> for Color {
    type Error = ColorParseError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Color> for String {
    fn from(color: Color) -> Self {
        color.to_string()
    }
}

impl From<(u8, u8, u8)> for Color {
    fn from((r, g, b): (u8, u8, u8)) -> Self {
        Self::from_rgb(r, g, b)
    }
}

/// Last-in-first-out store of draw colors.
///
/// Every shape paint pushes the ambient color before switching and pops it
/// afterwards, so the ambient color survives any nesting depth.
#[derive(Debug, Clone, Default)]
pub struct ColorStack {
    stack: Vec<Color>,
}

impl ColorStack {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, color: Color) {
        self.stack.push(color);
    }

    pub fn pop(&mut self) -> Option<Color> {
        self.stack.pop()
    }
}
