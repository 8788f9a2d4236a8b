//! Environment configuration.

use std::time::Duration;

use folktale_content::LoaderSettings;
use folktale_content::application::loader::{DEFAULT_STORY_RESOURCE, DEFAULT_UI_RESOURCE};

use crate::error::AppError;

/// Base URL the datasets are fetched from.
pub const CONTENT_URL_VAR: &str = "FOLKTALE_CONTENT_URL";
/// Story resource name override.
pub const STORY_RESOURCE_VAR: &str = "FOLKTALE_STORY_RESOURCE";
/// UI resource name override.
pub const UI_RESOURCE_VAR: &str = "FOLKTALE_UI_RESOURCE";
/// Per-fetch timeout in milliseconds.
pub const FETCH_TIMEOUT_MS_VAR: &str = "FOLKTALE_FETCH_TIMEOUT_MS";
/// Seed for the autoplay rng.
pub const AUTOPLAY_SEED_VAR: &str = "FOLKTALE_AUTOPLAY_SEED";

const DEFAULT_FETCH_TIMEOUT_MS: u64 = 5000;

/// Startup configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    /// Base URL of the content server.
    pub content_url: String,
    /// Resource names and fetch timeout.
    pub loader: LoaderSettings,
    /// Fixed seed for outcome-text selection, if any.
    pub autoplay_seed: Option<u64>,
}

impl AppConfig {
    /// Reads configuration from the process environment.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Config` if `FOLKTALE_CONTENT_URL` is unset or a
    /// numeric variable does not parse.
    pub fn from_env() -> Result<Self, AppError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Reads configuration through `lookup`.
    ///
    /// # Errors
    ///
    /// Same as [`AppConfig::from_env`].
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, AppError> {
        let content_url = lookup(CONTENT_URL_VAR)
            .filter(|v| !v.trim().is_empty())
            .ok_or_else(|| {
                AppError::Config(format!("{CONTENT_URL_VAR} environment variable must be set"))
            })?;

        let timeout_ms = match lookup(FETCH_TIMEOUT_MS_VAR) {
            Some(raw) => raw.trim().parse::<u64>().map_err(|e| {
                AppError::Config(format!("{FETCH_TIMEOUT_MS_VAR} must be a valid u64: {e}"))
            })?,
            None => DEFAULT_FETCH_TIMEOUT_MS,
        };

        let autoplay_seed = lookup(AUTOPLAY_SEED_VAR)
            .map(|raw| {
                raw.trim().parse::<u64>().map_err(|e| {
                    AppError::Config(format!("{AUTOPLAY_SEED_VAR} must be a valid u64: {e}"))
                })
            })
            .transpose()?;

        Ok(Self {
            content_url,
            loader: LoaderSettings {
                story_resource: lookup(STORY_RESOURCE_VAR)
                    .unwrap_or_else(|| DEFAULT_STORY_RESOURCE.to_owned()),
                ui_resource: lookup(UI_RESOURCE_VAR)
                    .unwrap_or_else(|| DEFAULT_UI_RESOURCE.to_owned()),
                timeout: Duration::from_millis(timeout_ms),
            },
            autoplay_seed,
        })
    }
}
