use std::{fmt, ops::Index, str::FromStr};

use thiserror::Error;

/// An 8-bit RGBA color.
///
/// Colors are always in the non-linear sRGB color space and use non-premultiplied alpha.
#[derive(PartialEq, Eq, Clone, Copy)]
pub struct Color(pub(crate) [u8; 4]);

impl Color {
    /// Fully transparent black (all components are 0).
    pub const NONE: Self = Self([0, 0, 0, 0]);
    pub const BLACK: Self = Self([0, 0, 0, 255]);
    pub const WHITE: Self = Self([255, 255, 255, 255]);
    pub const RED: Self = Self([255, 0, 0, 255]);
    pub const GREEN: Self = Self([0, 255, 0, 255]);
    pub const BLUE: Self = Self([0, 0, 255, 255]);

    #[inline]
    pub const fn from_rgb8(r: u8, g: u8, b: u8) -> Self {
        Self([r, g, b, 255])
    }

    #[inline]
    pub const fn from_rgba8(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self([r, g, b, a])
    }

    /// Parses a CSS-style hex color.
    ///
    /// Accepts `rgb`, `rrggbb` and `rrggbbaa` digit forms, with or without a leading `#`. The
    /// 3-digit form expands each digit (`#f0a` is `#ff00aa`); the alpha channel defaults to 255
    /// when absent.
    pub fn from_hex(s: &str) -> Result<Self, ColorParseError> {
        let hex = s.strip_prefix('#').unwrap_or(s);
        let err = || ColorParseError(s.to_string());
        if !hex.bytes().all(|b| b.is_ascii_hexdigit()) {
            return Err(err());
        }

        let byte = |i: usize| u8::from_str_radix(&hex[i * 2..i * 2 + 2], 16).map_err(|_| err());
        match hex.len() {
            3 => {
                let nibble = |i: usize| u8::from_str_radix(&hex[i..i + 1], 16).map_err(|_| err());
                let (r, g, b) = (nibble(0)?, nibble(1)?, nibble(2)?);
                Ok(Self::from_rgb8(r * 17, g * 17, b * 17))
            }
            6 => Ok(Self::from_rgb8(byte(0)?, byte(1)?, byte(2)?)),
            8 => Ok(Self::from_rgba8(byte(0)?, byte(1)?, byte(2)?, byte(3)?)),
            _ => Err(err()),
        }
    }

    #[inline]
    pub fn r(&self) -> u8 {
        self.0[0]
    }

    #[inline]
    pub fn g(&self) -> u8 {
        self.0[1]
    }

    #[inline]
    pub fn b(&self) -> u8 {
        self.0[2]
    }

    #[inline]
    pub fn a(&self) -> u8 {
        self.0[3]
    }

    pub fn with_alpha(mut self, a: u8) -> Color {
        self.0[3] = a;
        self
    }

    /// Converts the channels to `f32` values in range 0.0 to 1.0 (still non-linear sRGB).
    #[inline]
    pub fn to_f32(self) -> [f32; 4] {
        self.0.map(|c| f32::from(c) / 255.0)
    }

    /// Converts `f32` channels back to 8-bit, clamping each to 0.0..=1.0 first.
    #[inline]
    pub fn from_f32(channels: [f32; 4]) -> Self {
        Self(channels.map(|c| (c.clamp(0.0, 1.0) * 255.0).round() as u8))
    }
}

impl fmt::Debug for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "#{:02x}{:02x}{:02x}{:02x}",
            self.r(),
            self.g(),
            self.b(),
            self.a(),
        )
    }
}

impl Index<usize> for Color {
    type Output = u8;

    #[inline]
    fn index(&self, index: usize) -> &u8 {
        &self.0[index]
    }
}

impl FromStr for Color {
    type Err = ColorParseError;

    fn from_str(s: &str) -> Result<Self, ColorParseError> {
        Self::from_hex(s)
    }
}

/// Returned when a string is not a parseable hex color.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("`{0}` is not a valid hex color")]
pub struct ColorParseError(String);
