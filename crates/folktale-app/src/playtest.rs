//! Autoplay runner.
//!
//! Plays every creature in the loaded content through the engine, always
//! taking the correct choice, answering each riddle and collecting a
//! revealing clue pair. Used to check that a content drop is playable end to
//! end.

use std::io::Write;
use std::sync::Arc;

use folktale_content::domain::model::Creature;
use folktale_content::{ContentRepository, Mechanic, Provenance};
use folktale_core::clock::Clock;
use folktale_core::event::EventSink;
use folktale_core::rng::DeterministicRng;
use folktale_rules::domain::deduction::REVEALING_PAIRS;
use folktale_session::{GameEngine, MechanicView, Outcome, Phase};
use serde::Serialize;

use crate::error::AppError;

/// Result of playing one creature.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlaythroughReport {
    /// Creature identifier.
    pub creature_id: String,
    /// Mechanic tag.
    pub mechanic: &'static str,
    /// Terminal phase reached. `end` unless the content is unplayable.
    pub final_phase: Phase,
    /// Victory or defeat, once ended.
    pub outcome: Option<Outcome>,
    /// Correct choices made.
    pub correct_count: usize,
    /// Outcome text shown.
    pub outcome_text: Option<String>,
    /// Mechanic state at the end.
    pub final_mechanic: Option<MechanicView>,
    /// Events published during the playthrough.
    pub events_published: usize,
}

/// Content provenance plus one report per creature.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CheckReport {
    /// Where each dataset came from.
    pub provenance: Provenance,
    /// One entry per creature, in content order.
    pub playthroughs: Vec<PlaythroughReport>,
}

/// Index of the first correct choice on `level_index`.
fn correct_choice(creature: &Creature, level_index: usize) -> usize {
    creature
        .level(level_index)
        .and_then(|l| l.choices.iter().position(|c| c.correct))
        .unwrap_or(0)
}

fn play_creature(engine: &mut GameEngine, creature: &Creature) -> PlaythroughReport {
    let mut events_published = 0;
    events_published += engine.select_creature(&creature.id).len();
    events_published += engine.acknowledge_entrance().len();
    events_published += engine.acknowledge_close_up().len();
    while engine.phase() == Phase::Story {
        events_published += engine.advance_story().len();
    }

    if matches!(creature.mechanic, Mechanic::Deduction) {
        let (first, second) = REVEALING_PAIRS[0];
        events_published += engine.toggle_clue(first).1.len();
        events_published += engine.toggle_clue(second).1.len();
    }

    while engine.phase() == Phase::Level {
        let level_index = engine.snapshot().level_index.unwrap_or_default();
        if let Some(riddle) = creature
            .level(level_index)
            .and_then(|l| l.riddle.as_ref())
            .filter(|_| matches!(creature.mechanic, Mechanic::Riddle))
        {
            events_published += engine.submit_riddle_answer(&riddle.answer).1.len();
        }

        let published = engine.submit_choice(correct_choice(creature, level_index));
        if published.is_empty() {
            break;
        }
        events_published += published.len();
        if engine.phase() == Phase::LevelTransition {
            events_published += engine.complete_level_transition().len();
        }
    }

    let snapshot = engine.snapshot();
    let report = PlaythroughReport {
        creature_id: creature.id.clone(),
        mechanic: creature.mechanic.tag(),
        final_phase: snapshot.phase,
        outcome: snapshot.outcome,
        correct_count: snapshot.correct_count,
        outcome_text: snapshot.outcome_text,
        final_mechanic: snapshot.mechanic,
        events_published,
    };
    tracing::info!(
        creature_id = %report.creature_id,
        outcome = ?report.outcome,
        correct_count = report.correct_count,
        "playthrough finished"
    );

    events_published += engine.go_home().len();
    tracing::debug!(creature_id = %report.creature_id, events_published, "returned home");
    report
}

/// Writes `report` as pretty JSON followed by a newline.
///
/// # Errors
///
/// Returns `AppError::Serialize` or `AppError::Io` if writing fails.
pub fn write_report(report: &CheckReport, mut out: impl Write) -> Result<(), AppError> {
    serde_json::to_writer_pretty(&mut out, report)?;
    writeln!(out)?;
    Ok(())
}

/// Plays every creature in `content` and reports the outcomes.
#[must_use]
pub fn autoplay(
    content: Arc<ContentRepository>,
    clock: Arc<dyn Clock>,
    rng: Box<dyn DeterministicRng>,
    sinks: Vec<Arc<dyn EventSink>>,
) -> CheckReport {
    let mut engine = sinks
        .into_iter()
        .fold(GameEngine::new(content, clock, rng), GameEngine::with_sink);
    let content = Arc::clone(engine.progression().content());
    engine.acknowledge_intro();

    let playthroughs = content
        .creatures()
        .iter()
        .map(|creature| play_creature(&mut engine, creature))
        .collect();

    CheckReport {
        provenance: content.provenance().clone(),
        playthroughs,
    }
}
