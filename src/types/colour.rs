//! Colour type, palette constants and hex parsing.

use std::fmt;
use std::str::FromStr;

use image::Rgba;
use serde::{Deserialize, Serialize};

use crate::error::{KomaError, Result};

/// An RGBA colour value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Colour {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Colour {
    /// Create a new colour from RGBA components.
    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Create a new opaque colour from RGB components.
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    /// Black.
    pub const BLACK: Self = Self::rgb(0, 0, 0);

    /// Dark brown used for regular pieces.
    pub const ENGRAVE_FILL: Self = Self::rgb(40, 25, 15);

    /// Red used for promoted pieces.
    pub const PROMOTED_FILL: Self = Self::rgb(200, 30, 30);

    /// Parse a hex colour string.
    ///
    /// Supports formats:
    /// - `#RGB` (3 digits, expanded to 6)
    /// - `#RRGGBB` (6 digits)
    /// - `#RRGGBBAA` (8 digits)
    pub fn from_hex(s: &str) -> Result<Self> {
        let s = s.trim();
        let hex = s.strip_prefix('#').unwrap_or(s);

        if !hex.is_ascii() {
            return Err(invalid_hex(s));
        }

        match hex.len() {
            3 => {
                let mut digits = [0u8; 3];
                for (digit, c) in digits.iter_mut().zip(hex.chars()) {
                    *digit = parse_hex_digit(c)?;
                }
                let [r, g, b] = digits;
                Ok(Self::rgb(r << 4 | r, g << 4 | g, b << 4 | b))
            }
            6 => Ok(Self::rgb(
                parse_hex_byte(&hex[0..2])?,
                parse_hex_byte(&hex[2..4])?,
                parse_hex_byte(&hex[4..6])?,
            )),
            8 => Ok(Self::new(
                parse_hex_byte(&hex[0..2])?,
                parse_hex_byte(&hex[2..4])?,
                parse_hex_byte(&hex[4..6])?,
                parse_hex_byte(&hex[6..8])?,
            )),
            _ => Err(invalid_hex(s)),
        }
    }

    /// Convert to RGBA array.
    pub fn to_rgba(self) -> [u8; 4] {
        [self.r, self.g, self.b, self.a]
    }

    /// Check if the colour is fully opaque.
    pub fn is_opaque(self) -> bool {
        self.a == 255
    }

    /// Blend this colour over `dest` with an 8-bit weight.
    ///
    /// Every channel, alpha included, is interpolated linearly: weight 0
    /// keeps `dest`, 255 yields `self`.
    pub fn blend_over(self, dest: Rgba<u8>, weight: u8) -> Rgba<u8> {
        let w = u32::from(weight);
        let src = self.to_rgba();
        let mut out = dest;
        for (channel, s) in out.0.iter_mut().zip(src) {
            let d = u32::from(*channel);
            *channel = ((u32::from(s) * w + d * (255 - w) + 127) / 255) as u8;
        }
        out
    }
}

impl From<Colour> for Rgba<u8> {
    fn from(colour: Colour) -> Self {
        Rgba(colour.to_rgba())
    }
}

impl FromStr for Colour {
    type Err = KomaError;

    fn from_str(s: &str) -> Result<Self> {
        Self::from_hex(s)
    }
}

impl TryFrom<String> for Colour {
    type Error = KomaError;

    fn try_from(s: String) -> Result<Self> {
        Self::from_hex(&s)
    }
}

impl From<Colour> for String {
    fn from(colour: Colour) -> Self {
        colour.to_string()
    }
}

impl fmt::Display for Colour {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.a == 255 {
            write!(f, "#{:02X}{:02X}{:02X}", self.r, self.g, self.b)
        } else {
            write!(f, "#{:02X}{:02X}{:02X}{:02X}", self.r, self.g, self.b, self.a)
        }
    }
}

fn invalid_hex(s: &str) -> KomaError {
    KomaError::Config {
        message: format!("Invalid hex colour: {}", s),
        help: Some("Use #RGB, #RRGGBB, or #RRGGBBAA format".to_string()),
    }
}

fn parse_hex_digit(c: char) -> Result<u8> {
    c.to_digit(16)
        .map(|d| d as u8)
        .ok_or_else(|| KomaError::Config {
            message: format!("Invalid hex digit: {}", c),
            help: None,
        })
}

fn parse_hex_byte(s: &str) -> Result<u8> {
    u8::from_str_radix(s, 16).map_err(|_| KomaError::Config {
        message: format!("Invalid hex byte: {}", s),
        help: None,
    })
}
