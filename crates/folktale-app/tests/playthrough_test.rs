//! End-to-end playthroughs: pipeline, engine and event sinks together.

mod common;

use folktale_content::Intensity;
use folktale_rules::RiddleVerdict;
use folktale_session::{MechanicView, Outcome, Phase};

#[tokio::test]
async fn test_remote_creature_plays_to_victory() {
    // Arrange
    let content = common::load(Some(common::remote_story()), Some(common::remote_ui())).await;
    assert!(!content.provenance().story.is_embedded());
    let (mut engine, sink) = common::engine(content);

    // Act
    common::enter_level_zero(&mut engine, "kikimora");
    let (verdict, _) = engine.submit_riddle_answer(" THREAD ");
    for _ in 0..2 {
        engine.submit_choice(1);
        engine.complete_level_transition();
    }
    engine.submit_choice(1);

    // Assert
    assert_eq!(verdict, Some(RiddleVerdict::Correct));
    let view = engine.snapshot();
    assert_eq!(view.phase, Phase::End);
    assert_eq!(view.outcome, Some(Outcome::Victory));
    assert_eq!(view.correct_count, 3);
    assert_eq!(view.outcome_text.as_deref(), Some("The spinning stops."));
    assert_eq!(view.intensity, Some(Intensity::Critical));
    assert_eq!(view.effects.unwrap().fog_color, "#222");
    assert_eq!(
        view.creature.unwrap().theme.unwrap().theme_id,
        "spindle-corner"
    );

    let types = sink.event_types();
    assert_eq!(types.first().map(String::as_str), Some("session.intro_acknowledged"));
    assert_eq!(types.last().map(String::as_str), Some("session.game_ended"));
    let numbers: Vec<i64> = sink.events().iter().map(|e| e.sequence_number).collect();
    let expected: Vec<i64> = (1..=i64::try_from(numbers.len()).unwrap()).collect();
    assert_eq!(numbers, expected);
}

#[tokio::test]
async fn test_baba_yaga_scenario_on_embedded_content() {
    let content = common::load(None, None).await;
    let (mut engine, sink) = common::engine(content);
    common::enter_level_zero(&mut engine, "baba-yaga");

    engine.submit_choice(0);
    engine.complete_level_transition();
    engine.submit_choice(1);
    engine.complete_level_transition();
    engine.submit_choice(0);

    let view = engine.snapshot();
    assert_eq!(view.outcome, Some(Outcome::Victory));
    assert_eq!(view.correct_count, 2);
    let ended = sink
        .events()
        .into_iter()
        .find(|e| e.event_type == "session.game_ended")
        .unwrap();
    assert_eq!(ended.payload["GameEnded"]["outcome"], "victory");
    assert_eq!(ended.payload["GameEnded"]["correct_count"], 2);
}

#[tokio::test]
async fn test_restart_then_go_home() {
    let content = common::load(None, None).await;
    let (mut engine, sink) = common::engine(content);
    common::enter_level_zero(&mut engine, "rusalka");
    for _ in 0..2 {
        engine.submit_choice(1);
        engine.complete_level_transition();
    }
    engine.submit_choice(1);
    assert_eq!(engine.snapshot().outcome, Some(Outcome::Defeat));
    let first_session = engine.snapshot().session_id;

    engine.restart();
    let restarted = engine.snapshot();

    assert_eq!(restarted.phase, Phase::CharacterReveal);
    assert_eq!(restarted.creature.as_ref().unwrap().id, "rusalka");
    assert_ne!(restarted.session_id, first_session);
    assert_eq!(restarted.correct_count, 0);
    assert_eq!(restarted.outcome, None);
    assert!(matches!(
        restarted.mechanic,
        Some(MechanicView::Calmness { calmness_level: 100, .. })
    ));

    engine.go_home();
    let home = engine.snapshot();

    assert_eq!(home.phase, Phase::Select);
    assert!(home.creature.is_none());
    assert!(home.session_id.is_none());
    assert_eq!(
        sink.event_types()
            .iter()
            .filter(|t| *t == "session.calmness_changed")
            .count(),
        3
    );
}

#[tokio::test]
async fn test_rejected_triggers_publish_nothing() {
    let content = common::load(None, None).await;
    let (mut engine, sink) = common::engine(content);

    assert!(engine.advance_story().is_empty());
    assert!(engine.restart().is_empty());
    engine.acknowledge_intro();
    assert!(engine.select_creature("domovoi").is_empty());
    assert!(engine.acknowledge_close_up().is_empty());

    assert_eq!(sink.event_types(), vec!["session.intro_acknowledged"]);
    assert_eq!(engine.phase(), Phase::Select);
}
