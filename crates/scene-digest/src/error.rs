//! Error types for scene-digest

use thiserror::Error;

/// Errors that can occur while collecting or hashing scene assets
#[derive(Error, Debug)]
pub enum DigestError {
    /// IO error while walking or reading scene files
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Digest string is not 64 hex characters
    #[error("invalid digest hex: {0}")]
    InvalidDigest(String),
}

impl From<walkdir::Error> for DigestError {
    fn from(err: walkdir::Error) -> Self {
        DigestError::Io(err.into())
    }
}
