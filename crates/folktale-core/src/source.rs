//! Resource source abstraction.

use async_trait::async_trait;

use crate::error::FetchError;

/// Port for fetching a raw resource body by its well-known name.
///
/// Implementations perform a single attempt. Retrying, timeouts and
/// fallbacks are the caller's concern.
#[async_trait]
pub trait ResourceSource: Send + Sync {
    /// Fetches the body of `resource`.
    async fn fetch(&self, resource: &str) -> Result<Vec<u8>, FetchError>;
}
