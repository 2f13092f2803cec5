//! Render Errors
//! Failure modes of a single chart render.

use crate::config::ConfigError;
use std::path::PathBuf;
use thiserror::Error;

pub type RenderResult<T> = Result<T, RenderError>;

#[derive(Error, Debug)]
pub enum RenderError {
    /// Empty or malformed chart data. Raised before anything is drawn.
    #[error("invalid series: {0}")]
    InvalidSeries(String),

    /// Output directory missing or unwritable.
    #[error("failed to write {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("rasterizer failure: {0}")]
    Backend(String),

    #[error(transparent)]
    Config(#[from] ConfigError),
}

impl RenderError {
    pub fn invalid(reason: impl Into<String>) -> Self {
        Self::InvalidSeries(reason.into())
    }

    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    pub fn backend(err: impl std::fmt::Display) -> Self {
        Self::Backend(err.to_string())
    }
}
