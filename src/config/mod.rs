//! Config module - Rendering environment settings

mod fonts;
mod render_config;

pub use fonts::{is_family_available, resolve_font_family, FALLBACK_FAMILY};
pub use render_config::{ConfigError, RenderConfig, Theme};
