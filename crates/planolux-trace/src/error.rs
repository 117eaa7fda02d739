//! Error types for the tracer.

use planolux_math::MathError;
use thiserror::Error;

/// Errors that can occur while tracing.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum TraceError {
    /// A vector operation was undefined (zero-length direction or normal).
    #[error("domain error: {0}")]
    Domain(#[from] MathError),

    /// Invalid trace settings.
    #[error("invalid settings: {0}")]
    InvalidSettings(String),

    /// A surface in the scene is unusable.
    #[error("invalid surface {index}: {reason}")]
    InvalidScene {
        /// Position of the offending surface in the scene.
        index: usize,
        /// What is wrong with it.
        reason: String,
    },

    /// A seed ray is unusable.
    #[error("invalid seed ray {index}: {reason}")]
    InvalidRay {
        /// Position of the offending ray in the seed list.
        index: usize,
        /// What is wrong with it.
        reason: String,
    },
}

/// Result type for tracer operations.
pub type Result<T> = std::result::Result<T, TraceError>;
