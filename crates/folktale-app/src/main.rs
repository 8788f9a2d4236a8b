//! `folktale-check` entry point.
//!
//! Loads the content from the configured server, logs where each dataset
//! came from, autoplays every creature and prints a JSON report.

use std::error::Error;
use std::sync::Arc;

use folktale_app::config::AppConfig;
use folktale_app::playtest;
use folktale_content::load_content;
use folktale_core::clock::SystemClock;
use folktale_core::rng::{DeterministicRng, StdRngSource};
use folktale_fetch::HttpResourceSource;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    // Initialize tracing subscriber.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .json()
        .with_writer(std::io::stderr)
        .init();

    let config = AppConfig::from_env()?;
    tracing::info!(content_url = %config.content_url, "loading folktale content");

    let source = HttpResourceSource::new(&config.content_url);
    let content = Arc::new(load_content(&source, &config.loader).await);
    let provenance = content.provenance();
    tracing::info!(
        story_embedded = provenance.story.is_embedded(),
        ui_embedded = provenance.ui.is_embedded(),
        creatures = content.creatures().len(),
        "content ready"
    );

    let rng: Box<dyn DeterministicRng> = match config.autoplay_seed {
        Some(seed) => Box::new(StdRngSource::seeded(seed)),
        None => Box::new(StdRngSource::from_entropy()),
    };
    let report = playtest::autoplay(content, Arc::new(SystemClock), rng, Vec::new());

    playtest::write_report(&report, std::io::stdout().lock())?;
    Ok(())
}
