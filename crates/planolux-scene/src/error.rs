//! Error types for scene construction.

use std::path::PathBuf;

use planolux_trace::TraceError;
use thiserror::Error;

/// Errors that can occur while building or loading a scene.
#[derive(Error, Debug)]
pub enum SceneError {
    /// Scene file could not be read.
    #[error("cannot read {path}: {source}")]
    Io {
        /// File that failed.
        path: PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },

    /// Scene file is not valid TOML or has the wrong shape.
    #[error("invalid scene file: {0}")]
    Parse(#[from] toml::de::Error),

    /// Lens parameters do not describe a real lens.
    #[error("invalid lens: {0}")]
    InvalidLens(String),

    /// Polygon outline is degenerate.
    #[error("invalid polygon: {0}")]
    InvalidPolygon(String),

    /// Ray fan parameters are not usable.
    #[error("invalid ray fan: {0}")]
    InvalidFan(String),

    /// The assembled scene, seeds or settings were rejected by the tracer.
    #[error(transparent)]
    Trace(#[from] TraceError),
}

/// Result type for scene operations.
pub type Result<T> = std::result::Result<T, SceneError>;
