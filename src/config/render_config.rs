//! Render Configuration
//! Fonts, theme, palette and raster settings shared by every render call.

use crate::charts::color::{Color, Palette};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("failed to read config {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("malformed config: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("invalid config: {0}")]
    Invalid(String),
}

/// Visual theme of figures and axes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Theme {
    /// Grey axes background with white grid lines, no spines.
    #[default]
    Seaborn,
    /// White axes background, light grey grid, black spines.
    Classic,
}

impl Theme {
    pub fn figure_background(&self) -> Color {
        Color::WHITE
    }

    pub fn axes_background(&self) -> Color {
        match self {
            Theme::Seaborn => Color::hex(0xEAEAF2),
            Theme::Classic => Color::WHITE,
        }
    }

    pub fn grid_color(&self) -> Color {
        match self {
            Theme::Seaborn => Color::WHITE,
            Theme::Classic => Color::hex(0xB0B0B0).with_alpha(0.6),
        }
    }

    pub fn text_color(&self) -> Color {
        Color::hex(0x262626)
    }

    /// Axes outline, if the theme draws one.
    pub fn spine_color(&self) -> Option<Color> {
        match self {
            Theme::Seaborn => None,
            Theme::Classic => Some(Color::BLACK),
        }
    }
}

/// Rendering environment, built once and passed to every render call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderConfig {
    /// Preferred families, first available wins.
    pub font_families: Vec<String>,
    /// Render negative numbers with U+2212 instead of `-`.
    pub unicode_minus: bool,
    pub theme: Theme,
    /// Colors for series without an explicit color.
    pub palette: Palette,
    pub dpi: u32,
    /// Crop the image to its drawn content.
    pub tight_bbox: bool,
    /// Padding kept around the content when cropping.
    pub pad_inches: f64,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            font_families: [
                "Microsoft YaHei",
                "SimHei",
                "SimSun",
                "Noto Sans CJK SC",
                "WenQuanYi Zen Hei",
                "PingFang SC",
                "Arial Unicode MS",
                "Hiragino Sans GB",
            ]
            .iter()
            .map(|s| s.to_string())
            .collect(),
            unicode_minus: false,
            theme: Theme::Seaborn,
            palette: Palette::husl(),
            dpi: 300,
            tight_bbox: true,
            pad_inches: 0.1,
        }
    }
}

impl RenderConfig {
    pub const MAX_DPI: u32 = 1200;

    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: RenderConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Load a JSON config file; missing keys keep their defaults.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let json = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json_str(&json)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.dpi == 0 || self.dpi > Self::MAX_DPI {
            return Err(ConfigError::Invalid(format!(
                "dpi must be within 1..={}, got {}",
                Self::MAX_DPI,
                self.dpi
            )));
        }
        if !(self.pad_inches >= 0.0 && self.pad_inches.is_finite()) {
            return Err(ConfigError::Invalid(format!(
                "pad_inches must be a non-negative number, got {}",
                self.pad_inches
            )));
        }
        if self.palette.is_empty() {
            return Err(ConfigError::Invalid("palette must not be empty".into()));
        }
        Ok(())
    }

    pub fn with_dpi(mut self, dpi: u32) -> Self {
        self.dpi = dpi;
        self
    }

    pub fn with_theme(mut self, theme: Theme) -> Self {
        self.theme = theme;
        self
    }

    pub fn with_tight_bbox(mut self, tight_bbox: bool) -> Self {
        self.tight_bbox = tight_bbox;
        self
    }

    /// Pixels per typographic point at this DPI.
    pub fn px_per_pt(&self) -> f64 {
        self.dpi as f64 / 72.0
    }

    pub fn pad_pixels(&self) -> u32 {
        (self.pad_inches * self.dpi as f64).round() as u32
    }
}
