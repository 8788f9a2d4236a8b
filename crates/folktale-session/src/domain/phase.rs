//! Phases and terminal outcomes.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Number of correct choices needed to win.
pub const WINNING_THRESHOLD: usize = 2;

/// Top-level state of the game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Phase {
    /// Title and premise. Left once, never re-entered.
    Intro,
    /// Choosing a creature.
    Select,
    /// The creature's entrance and close-up.
    CharacterReveal,
    /// Story bubbles.
    Story,
    /// A level awaiting a choice.
    Level,
    /// Between two levels.
    LevelTransition,
    /// Outcome shown.
    End,
}

impl Phase {
    /// Name used in logs and errors.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Phase::Intro => "intro",
            Phase::Select => "select",
            Phase::CharacterReveal => "characterReveal",
            Phase::Story => "story",
            Phase::Level => "level",
            Phase::LevelTransition => "levelTransition",
            Phase::End => "end",
        }
    }
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// How a finished game ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Outcome {
    /// At least two of three choices were correct.
    Victory,
    /// Fewer than two correct choices.
    Defeat,
}

impl Outcome {
    /// Outcome for a finished game with `correct_count` correct choices.
    #[must_use]
    pub fn from_correct_count(correct_count: usize) -> Self {
        if correct_count >= WINNING_THRESHOLD {
            Outcome::Victory
        } else {
            Outcome::Defeat
        }
    }
}
