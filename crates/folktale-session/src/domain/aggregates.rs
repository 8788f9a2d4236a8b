//! The progression aggregate.
//!
//! Every accepted trigger records one or more events. Recording applies the
//! event immediately, so the state read back after an operation already
//! reflects it, and queues it for the engine to publish.

use std::sync::Arc;

use folktale_content::ContentRepository;
use folktale_content::domain::model::{Creature, FINAL_LEVEL_INDEX};
use folktale_core::aggregate::AggregateRoot;
use folktale_core::clock::Clock;
use folktale_core::error::DomainError;
use folktale_core::event::EventMetadata;
use folktale_core::rng::DeterministicRng;
use folktale_rules::domain::{deduction, riddle};
use folktale_rules::{CalmnessState, ClueToken, MechanicState, RiddleVerdict};
use serde::Serialize;
use uuid::Uuid;

use super::events::{
    CalmnessChanged, ChoiceSubmitted, CloseUpAcknowledged, ClueToggled, CreatureSelected,
    EntranceAcknowledged, GameEnded, IntroAcknowledged, LevelEntered, LevelTransitionStarted,
    Restarted, ReturnedHome, RiddleAnswered, SessionEvent, SessionEventKind, StoryAdvanced,
};
use super::phase::{Outcome, Phase};

/// Progress through one creature, from selection to outcome.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Session {
    /// Session identifier. A restart begins a new session.
    pub session_id: Uuid,
    /// The creature being played.
    pub creature_id: String,
    /// Current level, 0 to 2.
    pub level_index: usize,
    /// Correct choices so far, 0 to 3.
    pub correct_count: usize,
    /// Consequence text of the last choice.
    pub consequence: String,
    /// Whether the entrance animation has been acknowledged.
    pub entrance_seen: bool,
    /// Whether the close-up has been acknowledged.
    pub close_up_seen: bool,
    /// Story bubble currently shown.
    pub bubble_index: usize,
    /// The creature's mechanic state.
    pub mechanic: MechanicState,
    /// Level just finished while a transition is running.
    pub transition_from: Option<usize>,
    /// Set once the game has ended.
    pub outcome: Option<Outcome>,
    /// Outcome text variant picked at the end.
    pub outcome_text: Option<String>,
}

impl Session {
    fn new(session_id: Uuid, creature_id: String, mechanic: MechanicState) -> Self {
        Self {
            session_id,
            creature_id,
            level_index: 0,
            correct_count: 0,
            consequence: String::new(),
            entrance_seen: false,
            close_up_seen: false,
            bubble_index: 0,
            mechanic,
            transition_from: None,
            outcome: None,
            outcome_text: None,
        }
    }
}

/// The aggregate root for a player's progression.
#[derive(Debug)]
pub struct Progression {
    /// Aggregate identifier.
    pub id: Uuid,
    /// Current version (event count).
    pub(crate) version: i64,
    content: Arc<ContentRepository>,
    phase: Phase,
    session: Option<Session>,
    /// Events recorded but not yet drained.
    pending_events: Vec<SessionEvent>,
}

impl Progression {
    /// Creates a progression at the intro, playing `content`.
    #[must_use]
    pub fn new(id: Uuid, content: Arc<ContentRepository>) -> Self {
        Self {
            id,
            version: 0,
            content,
            phase: Phase::Intro,
            session: None,
            pending_events: Vec::new(),
        }
    }

    /// The current phase.
    #[must_use]
    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// The current session, absent before selection and after going home.
    #[must_use]
    pub fn session(&self) -> Option<&Session> {
        self.session.as_ref()
    }

    /// The content being played.
    #[must_use]
    pub fn content(&self) -> &Arc<ContentRepository> {
        &self.content
    }

    /// The creature of the current session.
    #[must_use]
    pub fn current_creature(&self) -> Option<&Creature> {
        self.session
            .as_ref()
            .and_then(|s| self.content.creature(&s.creature_id))
    }

    fn require_phase(&self, operation: &'static str, expected: Phase) -> Result<(), DomainError> {
        if self.phase == expected {
            Ok(())
        } else {
            Err(self.invalid_phase(operation))
        }
    }

    fn invalid_phase(&self, operation: &'static str) -> DomainError {
        DomainError::InvalidPhase {
            operation,
            phase: self.phase.to_string(),
        }
    }

    fn active_session(&self, operation: &'static str) -> Result<&Session, DomainError> {
        self.session
            .as_ref()
            .ok_or_else(|| self.invalid_phase(operation))
    }

    fn active_creature(&self, operation: &'static str) -> Result<&Creature, DomainError> {
        let session = self.active_session(operation)?;
        self.content
            .creature(&session.creature_id)
            .ok_or_else(|| DomainError::UnknownCreature(session.creature_id.clone()))
    }

    /// Applies the event and queues it.
    fn record(&mut self, kind: SessionEventKind, clock: &dyn Clock) {
        let event = SessionEvent {
            metadata: EventMetadata {
                event_id: Uuid::new_v4(),
                event_type: kind.event_type().to_owned(),
                aggregate_id: self.id,
                sequence_number: self.version + 1,
                occurred_at: clock.now(),
            },
            kind,
        };
        self.apply(&event);
        self.pending_events.push(event);
    }

    /// Leaves the intro for creature selection.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidPhase` outside `Intro`.
    pub fn acknowledge_intro(&mut self, clock: &dyn Clock) -> Result<(), DomainError> {
        self.require_phase("acknowledge_intro", Phase::Intro)?;
        self.record(SessionEventKind::IntroAcknowledged(IntroAcknowledged), clock);
        Ok(())
    }

    /// Starts a fresh session with `creature_id`.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidPhase` outside `Select` and
    /// `DomainError::UnknownCreature` if the content has no such creature.
    pub fn select_creature(
        &mut self,
        creature_id: &str,
        clock: &dyn Clock,
    ) -> Result<(), DomainError> {
        self.require_phase("select_creature", Phase::Select)?;
        let creature = self
            .content
            .creature(creature_id)
            .ok_or_else(|| DomainError::UnknownCreature(creature_id.to_owned()))?;
        let mechanic = MechanicState::initial_for(&creature.mechanic);

        self.record(
            SessionEventKind::CreatureSelected(CreatureSelected {
                session_id: Uuid::new_v4(),
                creature_id: creature_id.to_owned(),
                mechanic,
            }),
            clock,
        );
        Ok(())
    }

    /// Marks the entrance animation as seen.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidPhase` outside `CharacterReveal` and
    /// `DomainError::Validation` if the entrance was already acknowledged.
    pub fn acknowledge_entrance(&mut self, clock: &dyn Clock) -> Result<(), DomainError> {
        const OPERATION: &str = "acknowledge_entrance";
        self.require_phase(OPERATION, Phase::CharacterReveal)?;
        let session = self.active_session(OPERATION)?;
        if session.entrance_seen {
            return Err(DomainError::Validation(
                "entrance already acknowledged".to_owned(),
            ));
        }
        let creature_id = session.creature_id.clone();

        self.record(
            SessionEventKind::EntranceAcknowledged(EntranceAcknowledged { creature_id }),
            clock,
        );
        Ok(())
    }

    /// Marks the close-up as seen and begins the story.
    ///
    /// A creature without story lines goes straight to level 0.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidPhase` outside `CharacterReveal` and
    /// `DomainError::Validation` if the entrance has not been acknowledged.
    pub fn acknowledge_close_up(&mut self, clock: &dyn Clock) -> Result<(), DomainError> {
        const OPERATION: &str = "acknowledge_close_up";
        self.require_phase(OPERATION, Phase::CharacterReveal)?;
        if !self.active_session(OPERATION)?.entrance_seen {
            return Err(DomainError::Validation(
                "close-up requires the entrance to be acknowledged first".to_owned(),
            ));
        }
        let creature = self.active_creature(OPERATION)?;
        let creature_id = creature.id.clone();
        let story_is_empty = creature.story_len() == 0;

        self.record(
            SessionEventKind::CloseUpAcknowledged(CloseUpAcknowledged { creature_id }),
            clock,
        );
        if story_is_empty {
            self.record(
                SessionEventKind::LevelEntered(LevelEntered { level_index: 0 }),
                clock,
            );
        }
        Ok(())
    }

    /// Shows the next story bubble, entering level 0 after the last one.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidPhase` outside `Story`.
    pub fn advance_story(&mut self, clock: &dyn Clock) -> Result<(), DomainError> {
        const OPERATION: &str = "advance_story";
        self.require_phase(OPERATION, Phase::Story)?;
        let story_len = self.active_creature(OPERATION)?.story_len();
        let bubble_index = self.active_session(OPERATION)?.bubble_index + 1;

        self.record(
            SessionEventKind::StoryAdvanced(StoryAdvanced { bubble_index }),
            clock,
        );
        if bubble_index >= story_len {
            self.record(
                SessionEventKind::LevelEntered(LevelEntered { level_index: 0 }),
                clock,
            );
        }
        Ok(())
    }

    /// Resolves the choice at `choice_index` on the current level.
    ///
    /// Records the choice, moves the calmness meter on a miss for calmness
    /// creatures, then either starts a level transition (levels 0 and 1) or
    /// ends the game (level 2). The outcome text variant is drawn from `rng`.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidPhase` outside `Level` and
    /// `DomainError::ChoiceOutOfRange` for an index the level does not have.
    pub fn submit_choice(
        &mut self,
        choice_index: usize,
        clock: &dyn Clock,
        rng: &mut dyn DeterministicRng,
    ) -> Result<(), DomainError> {
        const OPERATION: &str = "submit_choice";
        self.require_phase(OPERATION, Phase::Level)?;
        let content = Arc::clone(&self.content);
        let session = self.active_session(OPERATION)?;
        let creature = content
            .creature(&session.creature_id)
            .ok_or_else(|| DomainError::UnknownCreature(session.creature_id.clone()))?;
        let level_index = session.level_index;
        let level = creature.level(level_index).ok_or_else(|| {
            DomainError::Validation(format!("creature has no level {level_index}"))
        })?;
        let choice = level
            .choice(choice_index)
            .ok_or(DomainError::ChoiceOutOfRange {
                index: choice_index,
                available: level.choices.len(),
            })?;

        let correct_count = session.correct_count + usize::from(choice.correct);
        let previous_mechanic = session.mechanic.clone();

        self.record(
            SessionEventKind::ChoiceSubmitted(ChoiceSubmitted {
                level_index,
                choice_index,
                correct: choice.correct,
                consequence: choice.consequence.clone(),
                correct_count,
            }),
            clock,
        );

        let calmness_move = match (
            choice.correct,
            &previous_mechanic,
            previous_mechanic.after_choice(level_index, false),
        ) {
            (false, MechanicState::Calmness(before), MechanicState::Calmness(after))
                if before.calmness_level != after.calmness_level =>
            {
                Some((before.calmness_level, after.calmness_level))
            }
            _ => None,
        };
        if let Some((previous, current)) = calmness_move {
            self.record(
                SessionEventKind::CalmnessChanged(CalmnessChanged {
                    level_index,
                    previous,
                    current,
                }),
                clock,
            );
        }

        if level_index >= FINAL_LEVEL_INDEX {
            let outcome = Outcome::from_correct_count(correct_count);
            let texts = match outcome {
                Outcome::Victory => &creature.victory_texts,
                Outcome::Defeat => &creature.defeat_texts,
            };
            let outcome_text = rng
                .pick_index(texts.len())
                .and_then(|i| texts.get(i))
                .cloned()
                .unwrap_or_default();

            self.record(
                SessionEventKind::GameEnded(GameEnded {
                    outcome,
                    correct_count,
                    outcome_text,
                }),
                clock,
            );
        } else {
            self.record(
                SessionEventKind::LevelTransitionStarted(LevelTransitionStarted {
                    from_level: level_index,
                }),
                clock,
            );
        }
        Ok(())
    }

    /// Ends the transition and enters the next level.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidPhase` outside `LevelTransition`.
    pub fn complete_level_transition(&mut self, clock: &dyn Clock) -> Result<(), DomainError> {
        const OPERATION: &str = "complete_level_transition";
        self.require_phase(OPERATION, Phase::LevelTransition)?;
        let level_index = self.active_session(OPERATION)?.level_index + 1;

        self.record(
            SessionEventKind::LevelEntered(LevelEntered { level_index }),
            clock,
        );
        Ok(())
    }

    /// Checks an answer to the current level's riddle.
    ///
    /// A miss reveals the hint; the choice still has to be made separately.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidPhase` outside `Level` and
    /// `DomainError::Validation` if the creature is not riddle-based or the
    /// level has no riddle.
    pub fn submit_riddle_answer(
        &mut self,
        raw_input: &str,
        clock: &dyn Clock,
    ) -> Result<RiddleVerdict, DomainError> {
        const OPERATION: &str = "submit_riddle_answer";
        self.require_phase(OPERATION, Phase::Level)?;
        let content = Arc::clone(&self.content);
        let session = self.active_session(OPERATION)?;
        let MechanicState::Riddle(state) = session.mechanic else {
            return Err(DomainError::Validation(format!(
                "creature mechanic is {}, not riddle",
                session.mechanic.tag()
            )));
        };
        let level_index = session.level_index;
        let puzzle = content
            .creature(&session.creature_id)
            .and_then(|c| c.level(level_index))
            .and_then(|l| l.riddle.as_ref())
            .ok_or_else(|| DomainError::Validation(format!("level {level_index} has no riddle")))?;

        let (next, verdict) = riddle::submit_answer(state, level_index, puzzle, raw_input);

        self.record(
            SessionEventKind::RiddleAnswered(RiddleAnswered {
                level_index,
                correct: verdict.is_correct(),
                hints_revealed: next.hints_revealed,
            }),
            clock,
        );
        Ok(verdict)
    }

    /// Toggles a clue token, returning whether it is now collected.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidPhase` outside `Level` and
    /// `DomainError::Validation` if the creature is not deduction-based.
    pub fn toggle_clue(&mut self, token: ClueToken, clock: &dyn Clock) -> Result<bool, DomainError> {
        const OPERATION: &str = "toggle_clue";
        self.require_phase(OPERATION, Phase::Level)?;
        let session = self.active_session(OPERATION)?;
        let MechanicState::Deduction(state) = &session.mechanic else {
            return Err(DomainError::Validation(format!(
                "creature mechanic is {}, not deduction",
                session.mechanic.tag()
            )));
        };

        let next = deduction::toggle_token(state, token);
        let collected = next.has(token);

        self.record(
            SessionEventKind::ClueToggled(ClueToggled {
                token,
                collected,
                revealed: deduction::is_revealed(&next),
            }),
            clock,
        );
        Ok(collected)
    }

    /// Replays the same creature from its reveal with a fresh session.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidPhase` outside `End`.
    pub fn restart(&mut self, clock: &dyn Clock) -> Result<(), DomainError> {
        const OPERATION: &str = "restart";
        self.require_phase(OPERATION, Phase::End)?;
        let creature = self.active_creature(OPERATION)?;
        let creature_id = creature.id.clone();
        let mechanic = MechanicState::initial_for(&creature.mechanic);

        self.record(
            SessionEventKind::Restarted(Restarted {
                session_id: Uuid::new_v4(),
                creature_id,
                mechanic,
            }),
            clock,
        );
        Ok(())
    }

    /// Returns to creature selection from any phase, discarding the session.
    pub fn go_home(&mut self, clock: &dyn Clock) {
        let from_phase = self.phase;
        self.record(
            SessionEventKind::ReturnedHome(ReturnedHome { from_phase }),
            clock,
        );
    }
}

impl AggregateRoot for Progression {
    type Event = SessionEvent;

    fn aggregate_id(&self) -> Uuid {
        self.id
    }

    fn version(&self) -> i64 {
        self.version
    }

    fn apply(&mut self, event: &Self::Event) {
        match &event.kind {
            SessionEventKind::IntroAcknowledged(_) => {
                self.phase = Phase::Select;
            }
            SessionEventKind::CreatureSelected(CreatureSelected {
                session_id,
                creature_id,
                mechanic,
            })
            | SessionEventKind::Restarted(Restarted {
                session_id,
                creature_id,
                mechanic,
            }) => {
                self.session = Some(Session::new(
                    *session_id,
                    creature_id.clone(),
                    mechanic.clone(),
                ));
                self.phase = Phase::CharacterReveal;
            }
            SessionEventKind::EntranceAcknowledged(_) => {
                if let Some(session) = self.session.as_mut() {
                    session.entrance_seen = true;
                }
            }
            SessionEventKind::CloseUpAcknowledged(_) => {
                if let Some(session) = self.session.as_mut() {
                    session.close_up_seen = true;
                    session.bubble_index = 0;
                }
                self.phase = Phase::Story;
            }
            SessionEventKind::StoryAdvanced(payload) => {
                if let Some(session) = self.session.as_mut() {
                    session.bubble_index = payload.bubble_index;
                }
            }
            SessionEventKind::LevelEntered(payload) => {
                if let Some(session) = self.session.as_mut() {
                    session.level_index = payload.level_index;
                    session.transition_from = None;
                }
                self.phase = Phase::Level;
            }
            SessionEventKind::ChoiceSubmitted(payload) => {
                if let Some(session) = self.session.as_mut() {
                    session.consequence.clone_from(&payload.consequence);
                    session.correct_count = payload.correct_count;
                }
            }
            SessionEventKind::CalmnessChanged(payload) => {
                if let Some(session) = self.session.as_mut() {
                    session.mechanic = MechanicState::Calmness(
                        CalmnessState::new(payload.current),
                    );
                }
            }
            SessionEventKind::RiddleAnswered(payload) => {
                if let Some(MechanicState::Riddle(state)) =
                    self.session.as_mut().map(|s| &mut s.mechanic)
                {
                    state.hints_revealed = payload.hints_revealed;
                    if !payload.correct {
                        state.missed_level = Some(payload.level_index);
                    }
                }
            }
            SessionEventKind::ClueToggled(payload) => {
                if let Some(MechanicState::Deduction(state)) =
                    self.session.as_mut().map(|s| &mut s.mechanic)
                {
                    if payload.collected {
                        state.tokens_collected.insert(payload.token);
                    } else {
                        state.tokens_collected.remove(&payload.token);
                    }
                }
            }
            SessionEventKind::LevelTransitionStarted(payload) => {
                if let Some(session) = self.session.as_mut() {
                    session.transition_from = Some(payload.from_level);
                }
                self.phase = Phase::LevelTransition;
            }
            SessionEventKind::GameEnded(payload) => {
                if let Some(session) = self.session.as_mut() {
                    session.outcome = Some(payload.outcome);
                    session.outcome_text = Some(payload.outcome_text.clone());
                }
                self.phase = Phase::End;
            }
            SessionEventKind::ReturnedHome(_) => {
                self.session = None;
                self.phase = Phase::Select;
            }
        }
        self.version += 1;
    }

    fn pending_events(&self) -> &[Self::Event] {
        &self.pending_events
    }

    fn drain_pending_events(&mut self) -> Vec<Self::Event> {
        std::mem::take(&mut self.pending_events)
    }
}
