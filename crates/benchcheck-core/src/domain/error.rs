//! Domain-level error taxonomy for benchcheck.

use super::mode::BenchmarkMode;
use scene_digest::{ContentDigest, DigestError};

/// Validation errors. Every variant ends up as a terminal track status;
/// none of them is fatal to the process.
#[derive(Debug, thiserror::Error)]
pub enum ValidationError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("wrong reference image size: expected {expected} bytes, got {actual}")]
    SizeMismatch { expected: usize, actual: usize },

    #[error("unsupported benchmark mode: {0}")]
    UnsupportedMode(BenchmarkMode),

    #[error("no reference image configured for mode {mode}")]
    MissingReference { mode: BenchmarkMode },

    #[error("scene is not validated: {0}")]
    UnsupportedScene(String),

    #[error("scene identifier has no parent directory: {0}")]
    NoSceneDirectory(String),

    #[error("digest mismatch: expected {expected}, got {actual}")]
    DigestMismatch {
        expected: ContentDigest,
        actual: ContentDigest,
    },

    #[error("invalid frame buffer: {width}x{height}x3 needs {expected} bytes, got {actual}")]
    InvalidFrameBuffer {
        width: u32,
        height: u32,
        expected: usize,
        actual: usize,
    },

    #[error("image size {actual} does not match comparator size {expected}")]
    ImageSize { expected: usize, actual: usize },

    #[error("convergence test already produced a result; reset before reuse")]
    ComparatorExhausted,

    #[error("digest error: {0}")]
    Digest(#[from] DigestError),

    #[error("config error: {0}")]
    Config(#[from] serde_json::Error),
}

/// Result type for benchcheck domain operations.
pub type Result<T> = std::result::Result<T, ValidationError>;
