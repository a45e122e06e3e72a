//! Error types for raycrate

use thiserror::Error;

/// Main error type for raycrate operations
#[derive(Error, Debug, Clone, PartialEq)]
pub enum Error {
    #[error("cannot normalize a zero-length vector")]
    DegenerateVector,

    #[error("viewport of {width}x{height} device pixels is too small to sample (need at least 2x2)")]
    DegenerateViewport { width: u32, height: u32 },

    #[error("Invalid viewport: {0}")]
    InvalidViewport(String),

    #[error("Invalid scene: {0}")]
    InvalidScene(String),

    #[error("render job panicked: {0}")]
    JobPanicked(String),

    #[error("Thread pool error: {0}")]
    ThreadPool(String),
}

/// Result type alias for raycrate operations
pub type Result<T> = std::result::Result<T, Error>;
