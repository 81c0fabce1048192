//! ARGB color values and HSV conversion
//!
//! Colors are stored the way theme packages carry them: a single 32-bit
//! ARGB integer with alpha in the top byte. The text form used by `key=value`
//! theme entries is the signed decimal rendering of that integer, so
//! `0xFFFFFFFF` round-trips through `"-1"`.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

// =============================================================================
// Errors
// =============================================================================

/// Errors produced when parsing a color from text
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ColorParseError {
    /// The input was empty
    #[error("Empty color value")]
    Empty,

    /// The input is neither a decimal integer nor a hex literal
    #[error("Invalid color value: {0}")]
    Invalid(String),
}

// =============================================================================
// Color
// =============================================================================

/// A 32-bit ARGB color (8 bits per channel, alpha first)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Color(pub u32);

impl Color {
    /// Fully transparent black; also the "unset" marker for gradient stops
    pub const TRANSPARENT: Color = Color(0x0000_0000);
    /// Opaque black
    pub const BLACK: Color = Color(0xFF00_0000);
    /// Opaque white
    pub const WHITE: Color = Color(0xFFFF_FFFF);
    /// Returned for keys with no data anywhere in the table
    pub const MISSING: Color = Color(0xFFFF_0000);

    /// Build a color from its four channels
    pub const fn from_argb(a: u8, r: u8, g: u8, b: u8) -> Self {
        Color(((a as u32) << 24) | ((r as u32) << 16) | ((g as u32) << 8) | b as u32)
    }

    /// Alpha channel
    pub const fn alpha(self) -> u8 {
        (self.0 >> 24) as u8
    }

    /// Red channel
    pub const fn red(self) -> u8 {
        (self.0 >> 16) as u8
    }

    /// Green channel
    pub const fn green(self) -> u8 {
        (self.0 >> 8) as u8
    }

    /// Blue channel
    pub const fn blue(self) -> u8 {
        self.0 as u8
    }

    /// Same color with a different alpha
    pub const fn with_alpha(self, alpha: u8) -> Self {
        Color((self.0 & 0x00FF_FFFF) | ((alpha as u32) << 24))
    }

    /// Same color with alpha forced to 0xFF
    pub const fn opaque(self) -> Self {
        Color(self.0 | 0xFF00_0000)
    }

    /// Whether every bit is zero (an unset gradient stop)
    pub const fn is_zero(self) -> bool {
        self.0 == 0
    }

    /// Convert to hue/saturation/value
    pub fn to_hsv(self) -> Hsv {
        Hsv::from_rgb(self.red(), self.green(), self.blue())
    }

    /// Build an opaque-or-translucent color from HSV components
    pub fn from_hsv(alpha: u8, hsv: Hsv) -> Self {
        let (r, g, b) = hsv.to_rgb();
        Color::from_argb(alpha, r, g, b)
    }

    /// Parse `#RRGGBB` or `#AARRGGBB`
    pub fn parse_hex(hex: &str) -> Option<Self> {
        let hex = hex.trim_start_matches('#');
        match hex.len() {
            6 => u32::from_str_radix(hex, 16).ok().map(|rgb| Color(0xFF00_0000 | rgb)),
            8 => u32::from_str_radix(hex, 16).ok().map(Color),
            _ => None,
        }
    }

    /// Render as `#AARRGGBB`
    pub fn to_hex(self) -> String {
        format!("#{:08X}", self.0)
    }
}

impl From<u32> for Color {
    fn from(argb: u32) -> Self {
        Color(argb)
    }
}

impl From<Color> for u32 {
    fn from(color: Color) -> Self {
        color.0
    }
}

/// Signed decimal, matching how theme entries store ARGB integers
impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0 as i32)
    }
}

impl FromStr for Color {
    type Err = ColorParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.is_empty() {
            return Err(ColorParseError::Empty);
        }
        if s.starts_with('#') {
            return Color::parse_hex(s).ok_or_else(|| ColorParseError::Invalid(s.to_string()));
        }
        if let Ok(signed) = s.parse::<i32>() {
            return Ok(Color(signed as u32));
        }
        s.parse::<u32>().map(Color).map_err(|_| ColorParseError::Invalid(s.to_string()))
    }
}

// =============================================================================
// HSV
// =============================================================================

/// Hue (degrees, `[0, 360)`), saturation and value (`[0, 1]`)
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Hsv {
    /// Hue in degrees
    pub h: f32,
    /// Saturation
    pub s: f32,
    /// Value
    pub v: f32,
}

impl Hsv {
    /// Create a new HSV triple; hue is wrapped and the rest clamped
    pub fn new(h: f32, s: f32, v: f32) -> Self {
        Self {
            h: wrap_hue(h),
            s: s.clamp(0.0, 1.0),
            v: v.clamp(0.0, 1.0),
        }
    }

    /// Convert 8-bit RGB channels
    pub fn from_rgb(r: u8, g: u8, b: u8) -> Self {
        let r = r as f32 / 255.0;
        let g = g as f32 / 255.0;
        let b = b as f32 / 255.0;

        let max = r.max(g).max(b);
        let min = r.min(g).min(b);
        let delta = max - min;

        let s = if max > 0.0 { delta / max } else { 0.0 };
        let h = if delta <= 0.0 {
            0.0
        } else if max == r {
            60.0 * ((g - b) / delta)
        } else if max == g {
            60.0 * ((b - r) / delta + 2.0)
        } else {
            60.0 * ((r - g) / delta + 4.0)
        };

        Self { h: wrap_hue(h), s, v: max }
    }

    /// Convert back to 8-bit RGB channels
    pub fn to_rgb(self) -> (u8, u8, u8) {
        let h = wrap_hue(self.h);
        let s = self.s.clamp(0.0, 1.0);
        let v = self.v.clamp(0.0, 1.0);

        let c = v * s;
        let x = c * (1.0 - ((h / 60.0) % 2.0 - 1.0).abs());
        let m = v - c;

        let (r, g, b) = match (h / 60.0) as u32 {
            0 => (c, x, 0.0),
            1 => (x, c, 0.0),
            2 => (0.0, c, x),
            3 => (0.0, x, c),
            4 => (x, 0.0, c),
            _ => (c, 0.0, x),
        };

        (to_channel(r + m), to_channel(g + m), to_channel(b + m))
    }

    /// Shortest angular distance between two hues, in degrees
    pub fn hue_distance(self, other: Hsv) -> f32 {
        let diff = (self.h - other.h).abs() % 360.0;
        diff.min(360.0 - diff)
    }
}

impl From<Color> for Hsv {
    fn from(color: Color) -> Self {
        color.to_hsv()
    }
}

/// Wrap a hue into `[0, 360)`
pub fn wrap_hue(h: f32) -> f32 {
    let wrapped = h.rem_euclid(360.0);
    if wrapped >= 360.0 {
        0.0
    } else {
        wrapped
    }
}

fn to_channel(value: f32) -> u8 {
    (value.clamp(0.0, 1.0) * 255.0).round() as u8
}
