//! The loading pipeline.
//!
//! Fetches the story and UI datasets concurrently, validates each on its own
//! and substitutes the embedded copy of whichever one fails. The pipeline
//! always produces a playable `ContentRepository`.

use std::time::Duration;

use folktale_core::error::FetchError;
use folktale_core::source::ResourceSource;
use sha2::{Digest, Sha256};

use super::validation;
use crate::domain::embedded;
use crate::domain::repository::{ContentRepository, DatasetOrigin, Provenance};
use crate::error::ContentError;

/// Default name of the story/creature resource.
pub const DEFAULT_STORY_RESOURCE: &str = "story.json";

/// Default name of the UI-parameter resource.
pub const DEFAULT_UI_RESOURCE: &str = "ui-config.json";

/// Default per-fetch timeout.
pub const DEFAULT_FETCH_TIMEOUT: Duration = Duration::from_secs(5);

/// What to fetch and how long to wait for it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoaderSettings {
    /// Story/creature resource name.
    pub story_resource: String,
    /// UI-parameter resource name.
    pub ui_resource: String,
    /// Upper bound on each fetch. Expiry counts as a fetch failure.
    pub timeout: Duration,
}

impl Default for LoaderSettings {
    fn default() -> Self {
        Self {
            story_resource: DEFAULT_STORY_RESOURCE.to_owned(),
            ui_resource: DEFAULT_UI_RESOURCE.to_owned(),
            timeout: DEFAULT_FETCH_TIMEOUT,
        }
    }
}

/// SHA-256 hex digest identifying a fetched payload.
#[must_use]
pub fn version_hash(body: &[u8]) -> String {
    format!("{:x}", Sha256::digest(body))
}

async fn fetch_with_timeout(
    source: &dyn ResourceSource,
    resource: &str,
    timeout: Duration,
) -> Result<Vec<u8>, ContentError> {
    let body = tokio::time::timeout(timeout, source.fetch(resource))
        .await
        .map_err(|_| FetchError::Timeout(timeout))??;
    Ok(body)
}

async fn load_dataset<T>(
    source: &dyn ResourceSource,
    resource: &str,
    timeout: Duration,
    parse: fn(&str, &[u8]) -> Result<T, ContentError>,
) -> Result<(T, String), ContentError> {
    let body = fetch_with_timeout(source, resource, timeout).await?;
    let value = parse(resource, &body)?;
    Ok((value, version_hash(&body)))
}

/// Resolves one dataset: the remote copy if it loaded, the embedded one
/// otherwise.
fn settle<T>(
    dataset: &'static str,
    resource: &str,
    result: Result<(T, String), ContentError>,
    fallback: impl FnOnce() -> T,
) -> (T, DatasetOrigin) {
    match result {
        Ok((value, version_hash)) => {
            tracing::info!(dataset, resource, %version_hash, "loaded remote dataset");
            (
                value,
                DatasetOrigin::Remote {
                    resource: resource.to_owned(),
                    version_hash,
                },
            )
        }
        Err(err) => {
            tracing::warn!(dataset, resource, error = %err, "falling back to embedded dataset");
            (
                fallback(),
                DatasetOrigin::Embedded {
                    resource: resource.to_owned(),
                    reason: err.to_string(),
                },
            )
        }
    }
}

/// Loads both datasets and assembles the content repository.
///
/// Never fails: any fetch, decode or validation problem with a dataset is
/// logged and that dataset is replaced by its embedded default. The two
/// fetches run concurrently and do not affect each other.
pub async fn load_content(
    source: &dyn ResourceSource,
    settings: &LoaderSettings,
) -> ContentRepository {
    let (story, ui) = tokio::join!(
        load_dataset(
            source,
            &settings.story_resource,
            settings.timeout,
            validation::story_from_bytes,
        ),
        load_dataset(
            source,
            &settings.ui_resource,
            settings.timeout,
            validation::ui_from_bytes,
        ),
    );

    let (creatures, story_origin) =
        settle("story", &settings.story_resource, story, embedded::creatures);
    let (ui, ui_origin) = settle("ui", &settings.ui_resource, ui, embedded::ui_parameters);

    ContentRepository::new(
        creatures,
        ui,
        Provenance {
            story: story_origin,
            ui: ui_origin,
        },
    )
}
