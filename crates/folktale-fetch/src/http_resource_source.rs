//! reqwest-backed `ResourceSource`.

use async_trait::async_trait;
use folktale_core::error::FetchError;
use folktale_core::source::ResourceSource;
use reqwest::Client;

/// Fetches resources with `GET {base_url}/{resource}`.
#[derive(Debug, Clone)]
pub struct HttpResourceSource {
    client: Client,
    base_url: String,
}

impl HttpResourceSource {
    /// Creates a source rooted at `base_url`. A trailing slash is ignored.
    #[must_use]
    pub fn new(base_url: &str) -> Self {
        Self::with_client(Client::new(), base_url)
    }

    /// Creates a source that reuses an existing client.
    #[must_use]
    pub fn with_client(client: Client, base_url: &str) -> Self {
        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_owned(),
        }
    }

    /// The URL `resource` is fetched from.
    #[must_use]
    pub fn url_for(&self, resource: &str) -> String {
        format!("{}/{}", self.base_url, resource.trim_start_matches('/'))
    }
}

#[async_trait]
impl ResourceSource for HttpResourceSource {
    async fn fetch(&self, resource: &str) -> Result<Vec<u8>, FetchError> {
        let url = self.url_for(resource);
        tracing::debug!(%url, "fetching resource");

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| FetchError::Transport(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            tracing::debug!(%url, status = status.as_u16(), "resource request failed");
            return Err(FetchError::Status(status.as_u16()));
        }

        let bytes = response
            .bytes()
            .await
            .map_err(|e| FetchError::Transport(e.to_string()))?;
        Ok(bytes.to_vec())
    }
}
