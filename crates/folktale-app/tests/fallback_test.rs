//! The pipeline always yields playable content, whatever the server does.

mod common;

use std::sync::Arc;

use folktale_app::playtest;
use folktale_content::{DatasetOrigin, LoaderSettings, load_content};
use folktale_core::error::FetchError;
use folktale_core::event::EventSink;
use folktale_session::{Outcome, Phase};
use folktale_test_support::{FailingResourceSource, MockRng, ScriptedResourceSource};

#[tokio::test]
async fn test_unreachable_server_falls_back_to_embedded_and_is_playable() {
    // Arrange
    let source = FailingResourceSource(FetchError::Transport("dns failure".into()));

    // Act
    let content = Arc::new(load_content(&source, &LoaderSettings::default()).await);
    let report = playtest::autoplay(content, common::fixed_clock(), Box::new(MockRng), Vec::new());

    // Assert
    assert!(report.provenance.story.is_embedded());
    assert!(report.provenance.ui.is_embedded());
    let ids: Vec<&str> = report
        .playthroughs
        .iter()
        .map(|p| p.creature_id.as_str())
        .collect();
    assert_eq!(ids, vec!["baba-yaga", "rusalka", "strigoi"]);
    assert!(report
        .playthroughs
        .iter()
        .all(|p| p.final_phase == Phase::End && p.outcome == Some(Outcome::Victory)));
}

#[tokio::test]
async fn test_invalid_story_keeps_remote_ui() {
    let content = common::load(Some(b"{\"creatures\": []}".to_vec()), Some(common::remote_ui())).await;

    assert!(content.provenance().story.is_embedded());
    assert!(matches!(
        content.provenance().ui,
        DatasetOrigin::Remote { .. }
    ));
    assert!(content.creature("baba-yaga").is_some());
    assert_eq!(
        content.ui().theme_for("kikimora").unwrap().theme_id,
        "spindle-corner"
    );
}

#[tokio::test]
async fn test_stalled_ui_fetch_times_out_and_story_still_loads() {
    let settings = LoaderSettings {
        timeout: std::time::Duration::from_millis(20),
        ..LoaderSettings::default()
    };
    let source = ScriptedResourceSource::new()
        .respond(&settings.story_resource, common::remote_story())
        .stall(&settings.ui_resource);

    let content = load_content(&source, &settings).await;

    assert!(!content.provenance().story.is_embedded());
    assert!(content.provenance().ui.is_embedded());
    assert_eq!(content.creatures().len(), 1);
}

#[tokio::test]
async fn test_autoplay_reports_every_remote_creature() {
    let content = common::load(Some(common::remote_story()), None).await;
    let sink = Arc::new(folktale_test_support::RecordingEventSink::new());

    let report = playtest::autoplay(
        content,
        common::fixed_clock(),
        Box::new(MockRng),
        vec![sink.clone() as Arc<dyn EventSink>],
    );

    assert_eq!(report.playthroughs.len(), 1);
    let playthrough = &report.playthroughs[0];
    assert_eq!(playthrough.outcome, Some(Outcome::Victory));
    assert_eq!(playthrough.correct_count, 3);
    assert_eq!(playthrough.events_published + 2, sink.events().len());
}
