//! Colors
//! RGBA colors, categorical palettes and continuous color scales.

use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("invalid color literal `{0}` (expected #RRGGBB or #RRGGBBAA)")]
pub struct ColorParseError(String);

/// RGB color with a straight alpha in `0.0..=1.0`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: f64,
}

impl Color {
    pub const WHITE: Color = Color::rgb(255, 255, 255);
    pub const BLACK: Color = Color::rgb(0, 0, 0);
    pub const GRAY: Color = Color::hex(0x808080);
    pub const RED: Color = Color::hex(0xD62728);

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 1.0 }
    }

    /// Build from a `0xRRGGBB` literal.
    pub const fn hex(value: u32) -> Self {
        Self::rgb(
            ((value >> 16) & 0xFF) as u8,
            ((value >> 8) & 0xFF) as u8,
            (value & 0xFF) as u8,
        )
    }

    pub fn with_alpha(self, alpha: f64) -> Self {
        Self {
            a: alpha.clamp(0.0, 1.0),
            ..self
        }
    }

    /// Linear interpolation in RGB space, `t` clamped to `0..=1`.
    pub fn lerp(self, other: Color, t: f64) -> Self {
        let t = if t.is_nan() { 0.0 } else { t.clamp(0.0, 1.0) };
        let mix = |a: u8, b: u8| (a as f64 + (b as f64 - a as f64) * t).round() as u8;
        Self {
            r: mix(self.r, other.r),
            g: mix(self.g, other.g),
            b: mix(self.b, other.b),
            a: self.a + (other.a - self.a) * t,
        }
    }

    pub fn parse(literal: &str) -> Result<Self, ColorParseError> {
        let err = || ColorParseError(literal.to_string());
        let digits = literal.strip_prefix('#').ok_or_else(err)?;
        if !digits.is_ascii() || !(digits.len() == 6 || digits.len() == 8) {
            return Err(err());
        }
        let byte = |i: usize| u8::from_str_radix(&digits[i..i + 2], 16).map_err(|_| err());
        let alpha = if digits.len() == 8 { byte(6)? } else { 255 };
        Ok(Self {
            r: byte(0)?,
            g: byte(2)?,
            b: byte(4)?,
            a: alpha as f64 / 255.0,
        })
    }

    pub fn to_hex(&self) -> String {
        if self.a >= 1.0 {
            format!("#{:02X}{:02X}{:02X}", self.r, self.g, self.b)
        } else {
            let alpha = (self.a * 255.0).round() as u8;
            format!("#{:02X}{:02X}{:02X}{:02X}", self.r, self.g, self.b, alpha)
        }
    }
}

impl TryFrom<String> for Color {
    type Error = ColorParseError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Color::parse(&value)
    }
}

impl From<Color> for String {
    fn from(color: Color) -> Self {
        color.to_hex()
    }
}

/// Categorical palette; indices wrap around.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Palette(pub Vec<Color>);

impl Palette {
    pub fn new(colors: Vec<Color>) -> Self {
        Self(colors)
    }

    /// Six-step HUSL palette (seaborn's `husl`).
    pub fn husl() -> Self {
        Self(vec![
            Color::hex(0xF77189),
            Color::hex(0xBB9832),
            Color::hex(0x50B131),
            Color::hex(0x36ADA4),
            Color::hex(0x3BA3EC),
            Color::hex(0xE866F4),
        ])
    }

    pub fn from_hex(values: &[u32]) -> Self {
        Self(values.iter().map(|&v| Color::hex(v)).collect())
    }

    pub fn get(&self, index: usize) -> Color {
        if self.0.is_empty() {
            Color::GRAY
        } else {
            self.0[index % self.0.len()]
        }
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl Default for Palette {
    fn default() -> Self {
        Self::husl()
    }
}

impl From<Vec<Color>> for Palette {
    fn from(colors: Vec<Color>) -> Self {
        Self(colors)
    }
}

// ColorBrewer RdYlGn, 11 classes
const RD_YL_GN: [u32; 11] = [
    0xA50026, 0xD73027, 0xF46D43, 0xFDAE61, 0xFEE08B, 0xFFFFBF, 0xD9EF8B, 0xA6D96A, 0x66BD63,
    0x1A9850, 0x006837,
];

const VIRIDIS: [u32; 9] = [
    0x440154, 0x472C7A, 0x3B528B, 0x2C728E, 0x21918C, 0x28AE80, 0x5EC962, 0xADDC30, 0xFDE725,
];

/// Continuous color scale, piecewise-linear between fixed stops.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ColorScale {
    RdYlGn,
    Viridis,
}

impl ColorScale {
    fn stops(&self) -> &'static [u32] {
        match self {
            ColorScale::RdYlGn => &RD_YL_GN,
            ColorScale::Viridis => &VIRIDIS,
        }
    }

    /// Color at position `t` in `0..=1` (clamped).
    pub fn sample(&self, t: f64) -> Color {
        let stops = self.stops();
        let t = if t.is_nan() { 0.0 } else { t.clamp(0.0, 1.0) };
        let pos = t * (stops.len() - 1) as f64;
        let idx = (pos.floor() as usize).min(stops.len() - 2);
        Color::hex(stops[idx]).lerp(Color::hex(stops[idx + 1]), pos - idx as f64)
    }

    /// Color for `value` normalized over `domain`.
    pub fn map(&self, value: f64, domain: (f64, f64)) -> Color {
        let span = domain.1 - domain.0;
        if span.abs() < f64::EPSILON {
            return self.sample(0.5);
        }
        self.sample((value - domain.0) / span)
    }

    /// `count` evenly spaced colors between positions `from` and `to`.
    pub fn spread(&self, count: usize, from: f64, to: f64) -> Vec<Color> {
        match count {
            0 => Vec::new(),
            1 => vec![self.sample(from)],
            n => (0..n)
                .map(|i| self.sample(from + (to - from) * i as f64 / (n - 1) as f64))
                .collect(),
        }
    }
}
