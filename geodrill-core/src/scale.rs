//! Value-driven color scale for the choropleth.
//!
//! The range always includes zero and is at least `[0, 1]`, so an empty or
//! all-zero data set still yields a usable gradient.

use std::fmt;

use serde::{Deserialize, Serialize};

/// 24-bit color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rgb(pub u8, pub u8, pub u8);

impl Rgb {
    /// Parse `#rrggbb`.
    pub fn from_hex(hex: &str) -> Option<Self> {
        let hex = hex.strip_prefix('#')?;
        if hex.len() != 6 || !hex.is_ascii() {
            return None;
        }
        let channel = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).ok();
        Some(Rgb(channel(0)?, channel(2)?, channel(4)?))
    }

    pub fn to_hex(self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.0, self.1, self.2)
    }

    /// Linear blend; `t` is clamped to `[0, 1]`.
    pub fn lerp(self, other: Rgb, t: f64) -> Rgb {
        let t = t.clamp(0.0, 1.0);
        let mix = |a: u8, b: u8| (a as f64 + (b as f64 - a as f64) * t).round() as u8;
        Rgb(mix(self.0, other.0), mix(self.1, other.1), mix(self.2, other.2))
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

/// Light end of the in-range gradient.
pub const LOW_COLOR: Rgb = Rgb(0xb6, 0xf0, 0xb2);
/// Dark end of the in-range gradient.
pub const HIGH_COLOR: Rgb = Rgb(0x2e, 0xcc, 0x71);
/// Regions without data, or outside the scale.
pub const NO_DATA_COLOR: Rgb = Rgb(0xe6, 0xe6, 0xe6);
/// Emphasis color for the hovered/selected region.
pub const EMPHASIS_COLOR: Rgb = Rgb(0x2e, 0xcc, 0x71);

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ColorScale {
    pub min: f64,
    pub max: f64,
}

impl ColorScale {
    /// `min = min(0, lowest)`, `max = max(1, highest)`.
    ///
    /// Non-finite values are ignored.
    pub fn from_values(values: &[f64]) -> Self {
        let finite = values.iter().copied().filter(|v| v.is_finite());
        let (min, max) = finite.fold((0.0_f64, 1.0_f64), |(lo, hi), v| (lo.min(v), hi.max(v)));
        Self { min, max }
    }

    /// Position of `value` inside the range, or `None` when outside it.
    pub fn normalize(&self, value: f64) -> Option<f64> {
        if !value.is_finite() || value < self.min || value > self.max {
            return None;
        }
        Some((value - self.min) / (self.max - self.min))
    }

    /// Fill color for a region; `None` means the region has no data.
    pub fn color_for(&self, value: Option<f64>) -> Rgb {
        match value.and_then(|v| self.normalize(v)) {
            Some(t) => LOW_COLOR.lerp(HIGH_COLOR, t),
            None => NO_DATA_COLOR,
        }
    }
}
