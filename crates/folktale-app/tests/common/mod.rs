//! Shared test helpers for integration tests.
#![allow(dead_code)]

use std::sync::Arc;

use folktale_content::{ContentRepository, LoaderSettings, load_content};
use folktale_core::clock::Clock;
use folktale_session::GameEngine;
use folktale_test_support::{FixedClock, RecordingEventSink, ScriptedResourceSource, SequenceRng};
use serde_json::json;

/// Fixed timestamp used across all integration tests.
pub fn fixed_clock() -> Arc<dyn Clock> {
    Arc::new(FixedClock::standard())
}

/// A valid remote story dataset with one riddle creature whose correct
/// choice is always the second one.
pub fn remote_story() -> Vec<u8> {
    let level = |scene: &str, answer: &str| {
        json!({
            "scene": scene,
            "choices": [
                { "text": "Run", "correct": false, "consequence": "The mist follows." },
                { "text": "Stand still", "correct": true, "consequence": "The mist thins." }
            ],
            "riddle": { "prompt": format!("Say {answer}"), "hint": "Just say it.", "answer": answer }
        })
    };
    serde_json::to_vec(&json!({
        "creatures": [{
            "id": "kikimora",
            "name": "Kikimora",
            "story": ["Something spins in the corner at night.", "The thread is never yours."],
            "levels": [
                level("The spindle turns.", "thread"),
                level("The loom creaks.", "loom"),
                level("The door is barred.", "dawn")
            ],
            "mechanic": { "type": "riddle" },
            "victoryTexts": ["The spinning stops."],
            "defeatTexts": ["The spinning never stops."]
        }]
    }))
    .unwrap()
}

/// A valid remote UI dataset.
pub fn remote_ui() -> Vec<u8> {
    serde_json::to_vec(&json!({
        "creatures": {
            "kikimora": {
                "themeId": "spindle-corner",
                "entranceAnimation": "thread-drop",
                "idleAnimation": "spin",
                "entranceDurationMs": 900
            }
        },
        "intensity": {
            "calm": { "particleCount": 10, "particleSpeed": 0.2, "fogOpacity": 0.1, "fogColor": "#aaa" },
            "tense": { "particleCount": 20, "particleSpeed": 0.4, "fogOpacity": 0.3, "fogColor": "#777" },
            "critical": { "particleCount": 30, "particleSpeed": 0.8, "fogOpacity": 0.9, "fogColor": "#222" }
        }
    }))
    .unwrap()
}

/// Loads content from a scripted source serving the given bodies.
pub async fn load(story: Option<Vec<u8>>, ui: Option<Vec<u8>>) -> Arc<ContentRepository> {
    let settings = LoaderSettings::default();
    let mut source = ScriptedResourceSource::new();
    if let Some(body) = story {
        source = source.respond(&settings.story_resource, body);
    }
    if let Some(body) = ui {
        source = source.respond(&settings.ui_resource, body);
    }
    Arc::new(load_content(&source, &settings).await)
}

/// Engine over `content` with a recording sink attached.
pub fn engine(content: Arc<ContentRepository>) -> (GameEngine, Arc<RecordingEventSink>) {
    let sink = Arc::new(RecordingEventSink::new());
    let engine = GameEngine::new(content, fixed_clock(), Box::new(SequenceRng::new(vec![0; 8])))
        .with_sink(sink.clone());
    (engine, sink)
}

/// Drives `engine` from the intro to level 0 of `creature_id`.
pub fn enter_level_zero(engine: &mut GameEngine, creature_id: &str) {
    engine.acknowledge_intro();
    engine.select_creature(creature_id);
    engine.acknowledge_entrance();
    engine.acknowledge_close_up();
    while engine.phase() == folktale_session::Phase::Story {
        engine.advance_story();
    }
}
