//! Hex color parsing and luminance shading.
//!
//! Colors arrive from settings as `#rrggbb` (or bare `rrggbb`) strings.
//! Shading adds the same offset to every channel and clamps to a byte, which
//! is a cheap lighten/darken rather than a perceptual one.

use std::fmt;
use std::str::FromStr;

use crate::{ColorError, StyleResult};

/// An RGB color that remembers whether it was written with a `#`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct HexColor {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    /// Whether the textual form starts with `#`
    pub prefixed: bool,
}

impl HexColor {
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self {
            r,
            g,
            b,
            prefixed: true,
        }
    }

    /// Parses `#rrggbb` or `rrggbb`. Digits are case-insensitive.
    pub fn parse(input: &str) -> StyleResult<Self> {
        let (digits, prefixed) = match input.strip_prefix('#') {
            Some(rest) => (rest, true),
            None => (input, false),
        };

        if !digits.bytes().all(|b| b.is_ascii_hexdigit()) {
            return Err(ColorError::InvalidDigits(input.to_string()));
        }
        if digits.len() != 6 {
            return Err(ColorError::InvalidLength {
                input: input.to_string(),
                len: digits.len(),
            });
        }

        let value = u32::from_str_radix(digits, 16)
            .map_err(|_| ColorError::InvalidDigits(input.to_string()))?;

        Ok(Self {
            r: (value >> 16) as u8,
            g: (value >> 8) as u8,
            b: value as u8,
            prefixed,
        })
    }

    /// Adds `amount` to each channel, clamping to `0..=255`.
    pub fn shaded(self, amount: i32) -> Self {
        Self {
            r: adjust(self.r, amount),
            g: adjust(self.g, amount),
            b: adjust(self.b, amount),
            prefixed: self.prefixed,
        }
    }
}

impl fmt::Display for HexColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.prefixed {
            f.write_str("#")?;
        }
        write!(f, "{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

impl FromStr for HexColor {
    type Err = ColorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

fn adjust(channel: u8, amount: i32) -> u8 {
    (i32::from(channel) + amount).clamp(0, 255) as u8
}

/// Lightens (positive `amount`) or darkens (negative) a hex color string.
///
/// The output is six lowercase hex digits, prefixed with `#` exactly when
/// the input was.
///
/// # Preconditions
///
/// `hex` must be a valid six-digit color. Callers pass colors that were
/// already validated by [`ThemeConfig::sanitized`](crate::ThemeConfig::sanitized);
/// a malformed input is returned unchanged.
pub fn shade(hex: &str, amount: i32) -> String {
    match HexColor::parse(hex) {
        Ok(color) => color.shaded(amount).to_string(),
        Err(err) => {
            tracing::debug!(%err, "shade called with a malformed color");
            hex.to_string()
        }
    }
}
