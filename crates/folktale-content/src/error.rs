//! Content pipeline error types.
//!
//! None of these reach callers of `load_content`; they only travel far
//! enough to be logged and recorded as the fallback reason.

use folktale_core::error::FetchError;
use thiserror::Error;

/// Why a dataset could not be used.
#[derive(Debug, Error)]
pub enum ContentError {
    /// The resource could not be retrieved.
    #[error("fetch failed: {0}")]
    Fetch(#[from] FetchError),

    /// The body was not valid JSON for the expected shape.
    #[error("json decode failed: {0}")]
    Json(#[from] serde_json::Error),

    /// The body was not valid YAML for the expected shape.
    #[error("yaml decode failed: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// The body decoded but failed structural validation.
    #[error("validation failed: {0}")]
    Validation(String),
}
