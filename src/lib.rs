//! Market Charts - static market-trend chart renderer
//!
//! Turns typed chart descriptions (line, bar, stacked bar, pie, bubble, radar
//! and timeline plots) into PNG files. Rendering is a pure, one-shot transform:
//! every call gets its own pixel buffer, and the rendering environment is an
//! explicit [`RenderConfig`] value rather than process-wide state.

pub mod charts;
pub mod config;
pub mod datasets;
pub mod error;
pub mod telemetry;

pub use charts::{render, ChartRenderer, ChartSpec, RenderedChart};
pub use config::RenderConfig;
pub use error::{RenderError, RenderResult};
