//! Folktale — application error types.

use thiserror::Error;

/// Startup and runtime errors for the check binary.
#[derive(Debug, Error)]
pub enum AppError {
    /// A required environment variable is missing or invalid.
    #[error("configuration error: {0}")]
    Config(String),

    /// Writing the report failed.
    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),

    /// The report could not be serialized.
    #[error("serialization error: {0}")]
    Serialize(#[from] serde_json::Error),
}
