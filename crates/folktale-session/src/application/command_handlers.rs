//! The game engine: one method per player trigger.
//!
//! Each method runs the operation against the progression aggregate. A
//! rejected operation is logged and ignored. An accepted one has its events
//! drained, flattened into `PublishedEvent`s and delivered to every sink in
//! recording order before the method returns them.

use std::sync::Arc;

use folktale_content::ContentRepository;
use folktale_core::aggregate::AggregateRoot;
use folktale_core::clock::Clock;
use folktale_core::error::DomainError;
use folktale_core::event::{EventSink, PublishedEvent};
use folktale_core::rng::DeterministicRng;
use folktale_rules::{ClueToken, RiddleVerdict};
use uuid::Uuid;

use super::query_handlers::{self, GameSnapshot};
use crate::domain::aggregates::Progression;
use crate::domain::phase::Phase;

/// Owns a progression and its collaborators.
pub struct GameEngine {
    progression: Progression,
    clock: Arc<dyn Clock>,
    rng: Box<dyn DeterministicRng>,
    sinks: Vec<Arc<dyn EventSink>>,
}

impl std::fmt::Debug for GameEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GameEngine")
            .field("progression", &self.progression)
            .field("sinks", &self.sinks.len())
            .finish_non_exhaustive()
    }
}

impl GameEngine {
    /// Creates an engine at the intro, playing `content`.
    #[must_use]
    pub fn new(
        content: Arc<ContentRepository>,
        clock: Arc<dyn Clock>,
        rng: Box<dyn DeterministicRng>,
    ) -> Self {
        Self {
            progression: Progression::new(Uuid::new_v4(), content),
            clock,
            rng,
            sinks: Vec::new(),
        }
    }

    /// Adds a sink that receives every published event.
    #[must_use]
    pub fn with_sink(mut self, sink: Arc<dyn EventSink>) -> Self {
        self.sinks.push(sink);
        self
    }

    /// The current phase.
    #[must_use]
    pub fn phase(&self) -> Phase {
        self.progression.phase()
    }

    /// The underlying aggregate.
    #[must_use]
    pub fn progression(&self) -> &Progression {
        &self.progression
    }

    /// Everything observable about the game right now.
    #[must_use]
    pub fn snapshot(&self) -> GameSnapshot {
        query_handlers::snapshot(&self.progression)
    }

    /// Runs `operation`, publishing its events on success.
    fn execute<T>(
        &mut self,
        trigger: &'static str,
        operation: impl FnOnce(
            &mut Progression,
            &dyn Clock,
            &mut dyn DeterministicRng,
        ) -> Result<T, DomainError>,
    ) -> (Option<T>, Vec<PublishedEvent>) {
        let phase = self.progression.phase();
        match operation(&mut self.progression, self.clock.as_ref(), self.rng.as_mut()) {
            Ok(value) => {
                let published = self.publish();
                tracing::debug!(
                    trigger,
                    from = %phase,
                    to = %self.progression.phase(),
                    events = published.len(),
                    "trigger applied"
                );
                if phase != Phase::End && self.progression.phase() == Phase::End {
                    if let Some(session) = self.progression.session() {
                        tracing::info!(
                            creature_id = %session.creature_id,
                            outcome = ?session.outcome,
                            correct_count = session.correct_count,
                            "game ended"
                        );
                    }
                }
                (Some(value), published)
            }
            Err(err) => {
                tracing::warn!(trigger, phase = %phase, error = %err, "trigger ignored");
                (None, Vec::new())
            }
        }
    }

    fn publish(&mut self) -> Vec<PublishedEvent> {
        let published: Vec<PublishedEvent> = self
            .progression
            .drain_pending_events()
            .iter()
            .map(PublishedEvent::from_event)
            .collect();
        for event in &published {
            for sink in &self.sinks {
                sink.publish(event);
            }
        }
        published
    }

    /// Intro → Select.
    pub fn acknowledge_intro(&mut self) -> Vec<PublishedEvent> {
        self.execute("acknowledge_intro", |p, clock, _| p.acknowledge_intro(clock))
            .1
    }

    /// Select → `CharacterReveal` with a fresh session for `creature_id`.
    pub fn select_creature(&mut self, creature_id: &str) -> Vec<PublishedEvent> {
        self.execute("select_creature", |p, clock, _| {
            p.select_creature(creature_id, clock)
        })
        .1
    }

    /// Marks the entrance animation as seen.
    pub fn acknowledge_entrance(&mut self) -> Vec<PublishedEvent> {
        self.execute("acknowledge_entrance", |p, clock, _| {
            p.acknowledge_entrance(clock)
        })
        .1
    }

    /// Marks the close-up as seen and starts the story.
    pub fn acknowledge_close_up(&mut self) -> Vec<PublishedEvent> {
        self.execute("acknowledge_close_up", |p, clock, _| {
            p.acknowledge_close_up(clock)
        })
        .1
    }

    /// Shows the next story bubble.
    pub fn advance_story(&mut self) -> Vec<PublishedEvent> {
        self.execute("advance_story", |p, clock, _| p.advance_story(clock))
            .1
    }

    /// Resolves a level choice.
    pub fn submit_choice(&mut self, choice_index: usize) -> Vec<PublishedEvent> {
        self.execute("submit_choice", |p, clock, rng| {
            p.submit_choice(choice_index, clock, rng)
        })
        .1
    }

    /// LevelTransition → Level.
    pub fn complete_level_transition(&mut self) -> Vec<PublishedEvent> {
        self.execute("complete_level_transition", |p, clock, _| {
            p.complete_level_transition(clock)
        })
        .1
    }

    /// Checks a riddle answer. `None` if the trigger was ignored.
    pub fn submit_riddle_answer(
        &mut self,
        raw_input: &str,
    ) -> (Option<RiddleVerdict>, Vec<PublishedEvent>) {
        self.execute("submit_riddle_answer", |p, clock, _| {
            p.submit_riddle_answer(raw_input, clock)
        })
    }

    /// Toggles a clue token. `Some(true)` if it is now collected, `None` if
    /// the trigger was ignored.
    pub fn toggle_clue(&mut self, token: ClueToken) -> (Option<bool>, Vec<PublishedEvent>) {
        self.execute("toggle_clue", |p, clock, _| p.toggle_clue(token, clock))
    }

    /// End → `CharacterReveal` for the same creature.
    pub fn restart(&mut self) -> Vec<PublishedEvent> {
        self.execute("restart", |p, clock, _| p.restart(clock)).1
    }

    /// Any phase → Select.
    pub fn go_home(&mut self) -> Vec<PublishedEvent> {
        self.execute("go_home", |p, clock, _| {
            p.go_home(clock);
            Ok(())
        })
        .1
    }
}
