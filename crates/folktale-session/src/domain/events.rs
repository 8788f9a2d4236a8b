//! Domain events for the phase and progression state machine.

use folktale_core::event::{DomainEvent, EventMetadata};
use folktale_rules::{ClueToken, MechanicState};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::phase::{Outcome, Phase};

/// Emitted when the player leaves the title screen.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IntroAcknowledged;

/// Emitted when a creature is chosen and a fresh session begins.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreatureSelected {
    /// The new session identifier.
    pub session_id: Uuid,
    /// The chosen creature.
    pub creature_id: String,
    /// The creature's default mechanic state.
    pub mechanic: MechanicState,
}

/// Emitted when the entrance animation has been seen.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntranceAcknowledged {
    /// The creature on screen.
    pub creature_id: String,
}

/// Emitted when the close-up has been seen; the story begins.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CloseUpAcknowledged {
    /// The creature on screen.
    pub creature_id: String,
}

/// Emitted when the player moves to the next story bubble.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoryAdvanced {
    /// Index of the bubble now shown.
    pub bubble_index: usize,
}

/// Emitted when a level begins.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LevelEntered {
    /// Index of the level entered.
    pub level_index: usize,
}

/// Emitted when a level choice is made.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChoiceSubmitted {
    /// Level the choice belongs to.
    pub level_index: usize,
    /// Position of the choice within the level.
    pub choice_index: usize,
    /// Whether it was the correct choice.
    pub correct: bool,
    /// The choice's consequence text.
    pub consequence: String,
    /// Correct choices so far, this one included.
    pub correct_count: usize,
}

/// Emitted when an incorrect choice moves the calmness meter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CalmnessChanged {
    /// Level the choice belongs to.
    pub level_index: usize,
    /// Meter before the choice.
    pub previous: u8,
    /// Meter after the choice.
    pub current: u8,
}

/// Emitted when a riddle answer is checked.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RiddleAnswered {
    /// Level whose riddle was answered.
    pub level_index: usize,
    /// Whether the answer matched.
    pub correct: bool,
    /// Wrong answers so far.
    pub hints_revealed: u32,
}

/// Emitted when a clue token is toggled.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClueToggled {
    /// The token toggled.
    pub token: ClueToken,
    /// Whether the token is now collected.
    pub collected: bool,
    /// Whether the collected set now reveals the creature.
    pub revealed: bool,
}

/// Emitted when levels 0 or 1 are finished.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LevelTransitionStarted {
    /// The level just finished.
    pub from_level: usize,
}

/// Emitted when the final level is finished.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameEnded {
    /// Victory or defeat.
    pub outcome: Outcome,
    /// Correct choices over the whole session.
    pub correct_count: usize,
    /// The outcome text variant shown.
    pub outcome_text: String,
}

/// Emitted when the same creature is replayed from its reveal.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Restarted {
    /// The new session identifier.
    pub session_id: Uuid,
    /// The replayed creature.
    pub creature_id: String,
    /// The creature's default mechanic state.
    pub mechanic: MechanicState,
}

/// Emitted when the player returns to creature selection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReturnedHome {
    /// Phase the player left.
    pub from_phase: Phase,
}

/// Event type identifier for [`IntroAcknowledged`].
pub const INTRO_ACKNOWLEDGED_EVENT_TYPE: &str = "session.intro_acknowledged";

/// Event type identifier for [`CreatureSelected`].
pub const CREATURE_SELECTED_EVENT_TYPE: &str = "session.creature_selected";

/// Event type identifier for [`EntranceAcknowledged`].
pub const ENTRANCE_ACKNOWLEDGED_EVENT_TYPE: &str = "session.entrance_acknowledged";

/// Event type identifier for [`CloseUpAcknowledged`].
pub const CLOSE_UP_ACKNOWLEDGED_EVENT_TYPE: &str = "session.close_up_acknowledged";

/// Event type identifier for [`StoryAdvanced`].
pub const STORY_ADVANCED_EVENT_TYPE: &str = "session.story_advanced";

/// Event type identifier for [`LevelEntered`].
pub const LEVEL_ENTERED_EVENT_TYPE: &str = "session.level_entered";

/// Event type identifier for [`ChoiceSubmitted`].
pub const CHOICE_SUBMITTED_EVENT_TYPE: &str = "session.choice_submitted";

/// Event type identifier for [`CalmnessChanged`].
pub const CALMNESS_CHANGED_EVENT_TYPE: &str = "session.calmness_changed";

/// Event type identifier for [`RiddleAnswered`].
pub const RIDDLE_ANSWERED_EVENT_TYPE: &str = "session.riddle_answered";

/// Event type identifier for [`ClueToggled`].
pub const CLUE_TOGGLED_EVENT_TYPE: &str = "session.clue_toggled";

/// Event type identifier for [`LevelTransitionStarted`].
pub const LEVEL_TRANSITION_STARTED_EVENT_TYPE: &str = "session.level_transition_started";

/// Event type identifier for [`GameEnded`].
pub const GAME_ENDED_EVENT_TYPE: &str = "session.game_ended";

/// Event type identifier for [`Restarted`].
pub const RESTARTED_EVENT_TYPE: &str = "session.restarted";

/// Event type identifier for [`ReturnedHome`].
pub const RETURNED_HOME_EVENT_TYPE: &str = "session.returned_home";

/// Event payload variants for the progression state machine.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum SessionEventKind {
    /// The intro was acknowledged.
    IntroAcknowledged(IntroAcknowledged),
    /// A creature was selected.
    CreatureSelected(CreatureSelected),
    /// The entrance was seen.
    EntranceAcknowledged(EntranceAcknowledged),
    /// The close-up was seen.
    CloseUpAcknowledged(CloseUpAcknowledged),
    /// The story moved forward one bubble.
    StoryAdvanced(StoryAdvanced),
    /// A level began.
    LevelEntered(LevelEntered),
    /// A level choice was made.
    ChoiceSubmitted(ChoiceSubmitted),
    /// The calmness meter moved.
    CalmnessChanged(CalmnessChanged),
    /// A riddle answer was checked.
    RiddleAnswered(RiddleAnswered),
    /// A clue token was toggled.
    ClueToggled(ClueToggled),
    /// A level transition started.
    LevelTransitionStarted(LevelTransitionStarted),
    /// The game ended.
    GameEnded(GameEnded),
    /// The creature is being replayed.
    Restarted(Restarted),
    /// The player went back to selection.
    ReturnedHome(ReturnedHome),
}

impl SessionEventKind {
    /// Dotted event name for this payload.
    #[must_use]
    pub fn event_type(&self) -> &'static str {
        match self {
            SessionEventKind::IntroAcknowledged(_) => INTRO_ACKNOWLEDGED_EVENT_TYPE,
            SessionEventKind::CreatureSelected(_) => CREATURE_SELECTED_EVENT_TYPE,
            SessionEventKind::EntranceAcknowledged(_) => ENTRANCE_ACKNOWLEDGED_EVENT_TYPE,
            SessionEventKind::CloseUpAcknowledged(_) => CLOSE_UP_ACKNOWLEDGED_EVENT_TYPE,
            SessionEventKind::StoryAdvanced(_) => STORY_ADVANCED_EVENT_TYPE,
            SessionEventKind::LevelEntered(_) => LEVEL_ENTERED_EVENT_TYPE,
            SessionEventKind::ChoiceSubmitted(_) => CHOICE_SUBMITTED_EVENT_TYPE,
            SessionEventKind::CalmnessChanged(_) => CALMNESS_CHANGED_EVENT_TYPE,
            SessionEventKind::RiddleAnswered(_) => RIDDLE_ANSWERED_EVENT_TYPE,
            SessionEventKind::ClueToggled(_) => CLUE_TOGGLED_EVENT_TYPE,
            SessionEventKind::LevelTransitionStarted(_) => LEVEL_TRANSITION_STARTED_EVENT_TYPE,
            SessionEventKind::GameEnded(_) => GAME_ENDED_EVENT_TYPE,
            SessionEventKind::Restarted(_) => RESTARTED_EVENT_TYPE,
            SessionEventKind::ReturnedHome(_) => RETURNED_HOME_EVENT_TYPE,
        }
    }
}

/// Domain event envelope for the progression state machine.
#[derive(Debug, Clone, PartialEq)]
pub struct SessionEvent {
    /// Event metadata.
    pub metadata: EventMetadata,
    /// Event-specific payload.
    pub kind: SessionEventKind,
}

impl DomainEvent for SessionEvent {
    fn event_type(&self) -> &'static str {
        self.kind.event_type()
    }

    fn to_payload(&self) -> serde_json::Value {
        // Serialization of derived Serialize types to Value is infallible.
        serde_json::to_value(&self.kind).expect("SessionEventKind serialization is infallible")
    }

    fn metadata(&self) -> &EventMetadata {
        &self.metadata
    }
}
