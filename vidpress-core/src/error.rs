use thiserror::Error;

/// Custom error types for vidpress
#[derive(Error, Debug)]
pub enum CoreError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Unknown quality tier: {0} (expected 40-70)")]
    UnknownQuality(String),

    #[error("Encoder not found: {0}")]
    EncoderNotFound(String),

    #[error("Failed to spawn encoder: {0}")]
    EncoderSpawn(String),

    #[error("Invalid path: {0}")]
    InvalidPath(String),

    #[error("Transcode failed: {0}")]
    TranscodeFailed(String),
}

/// Result type for vidpress operations
pub type CoreResult<T> = std::result::Result<T, CoreError>;
