//! Color value types
//!
//! [`RgbColor`] is the 8-bit sRGB triplet counted by extraction; [`Oklab`] and
//! [`Oklch`] are the double-precision perceptual coordinates derived from it.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::{AnalysisError, Result};

/// 8-bit sRGB color
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct RgbColor {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl RgbColor {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Pack into a 24-bit `0xRRGGBB` key
    pub const fn to_packed(self) -> u32 {
        ((self.r as u32) << 16) | ((self.g as u32) << 8) | self.b as u32
    }

    /// Unpack from a 24-bit `0xRRGGBB` key; bits above 24 are ignored
    pub const fn from_packed(value: u32) -> Self {
        Self {
            r: ((value >> 16) & 0xFF) as u8,
            g: ((value >> 8) & 0xFF) as u8,
            b: (value & 0xFF) as u8,
        }
    }

    /// Uppercase `#RRGGBB` representation
    pub fn to_hex(self) -> String {
        format!("#{:02X}{:02X}{:02X}", self.r, self.g, self.b)
    }

    /// Parse `#RRGGBB` or `RRGGBB`
    pub fn from_hex(hex: &str) -> Result<Self> {
        let digits = hex.strip_prefix('#').unwrap_or(hex);
        if digits.len() != 6 || !digits.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(AnalysisError::malformed(format!(
                "Invalid hex color '{}': expected 6 hex digits",
                hex
            )));
        }
        let value = u32::from_str_radix(digits, 16)
            .map_err(|e| AnalysisError::interchange(format!("Invalid hex color '{}'", hex), e))?;
        Ok(Self::from_packed(value))
    }

    /// Channels normalized to [0, 1]
    pub fn to_unit(self) -> [f64; 3] {
        [
            self.r as f64 / 255.0,
            self.g as f64 / 255.0,
            self.b as f64 / 255.0,
        ]
    }
}

impl fmt::Display for RgbColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02X}{:02X}{:02X}", self.r, self.g, self.b)
    }
}

impl FromStr for RgbColor {
    type Err = AnalysisError;

    fn from_str(s: &str) -> Result<Self> {
        Self::from_hex(s)
    }
}

impl From<[u8; 3]> for RgbColor {
    fn from([r, g, b]: [u8; 3]) -> Self {
        Self { r, g, b }
    }
}

impl From<image::Rgb<u8>> for RgbColor {
    fn from(pixel: image::Rgb<u8>) -> Self {
        let [r, g, b] = pixel.0;
        Self { r, g, b }
    }
}

impl From<palette::Srgb<u8>> for RgbColor {
    fn from(color: palette::Srgb<u8>) -> Self {
        Self::new(color.red, color.green, color.blue)
    }
}

impl From<RgbColor> for palette::Srgb<u8> {
    fn from(color: RgbColor) -> Self {
        palette::Srgb::new(color.r, color.g, color.b)
    }
}

/// OKLab color (Cartesian)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Oklab {
    /// Lightness, 0 = black, 1 = white for in-gamut colors
    pub l: f64,
    /// Green (-) to red (+)
    pub a: f64,
    /// Blue (-) to yellow (+)
    pub b: f64,
}

impl Oklab {
    pub const fn new(l: f64, a: f64, b: f64) -> Self {
        Self { l, a, b }
    }
}

impl From<Oklab> for palette::Oklab<f64> {
    fn from(lab: Oklab) -> Self {
        palette::Oklab::new(lab.l, lab.a, lab.b)
    }
}

impl From<palette::Oklab<f64>> for Oklab {
    fn from(lab: palette::Oklab<f64>) -> Self {
        Self::new(lab.l, lab.a, lab.b)
    }
}

/// OKLCH color (polar form of OKLab)
///
/// `c` is never negative and `h` is always in `[0, 360)`. `l` may overshoot
/// `[0, 1]` slightly because of rounding in the matrices.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Oklch {
    /// Lightness
    pub l: f64,
    /// Chroma
    pub c: f64,
    /// Hue in degrees
    pub h: f64,
}

impl Oklch {
    pub const fn new(l: f64, c: f64, h: f64) -> Self {
        Self { l, c, h }
    }

    /// L and C to 4 decimals, H to 2, with a hue that rounds up to 360
    /// folded back to 0
    pub fn rounded(self) -> Self {
        let h = round_to(self.h, 2);
        Self {
            l: round_to(self.l, 4),
            c: round_to(self.c, 4),
            h: if h >= 360.0 { 0.0 } else { h },
        }
    }
}

fn round_to(value: f64, places: i32) -> f64 {
    let scale = 10f64.powi(places);
    (value * scale).round() / scale
}
