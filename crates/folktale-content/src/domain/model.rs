//! Creature, level and choice schema.
//!
//! These are the fully-populated shapes the pipeline hands out. Every field
//! is present; absent source data has already been replaced by a default.

use serde::{Deserialize, Serialize};

/// Number of levels every playable creature has.
pub const LEVELS_PER_CREATURE: usize = 3;

/// Number of choices every playable level offers.
pub const CHOICES_PER_LEVEL: usize = 2;

/// Index of the level whose choice decides the outcome.
pub const FINAL_LEVEL_INDEX: usize = LEVELS_PER_CREATURE - 1;

/// Highest calmness meter value, shared by the loader and the rule engine.
pub const MAX_CALMNESS: u8 = 100;

/// Starting value of the calmness meter when the descriptor does not say.
pub const DEFAULT_INITIAL_CALMNESS: u8 = MAX_CALMNESS;

/// One of the playable identities.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Creature {
    /// Stable identifier, e.g. `baba-yaga`.
    pub id: String,
    /// Display name.
    pub name: String,
    /// Story lines shown one bubble at a time before level 0.
    pub story: Vec<String>,
    /// The creature's levels, in play order.
    pub levels: Vec<Level>,
    /// Which rule set accompanies this creature.
    pub mechanic: Mechanic,
    /// Text variants for a won game.
    pub victory_texts: Vec<String>,
    /// Text variants for a lost game.
    pub defeat_texts: Vec<String>,
}

impl Creature {
    /// Returns the level at `index`, if any.
    #[must_use]
    pub fn level(&self, index: usize) -> Option<&Level> {
        self.levels.get(index)
    }

    /// Number of story bubbles before play starts.
    #[must_use]
    pub fn story_len(&self) -> usize {
        self.story.len()
    }
}

/// One narrative segment offering a binary choice.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Level {
    /// 0-based position within the creature's levels.
    pub index: usize,
    /// Scene text.
    pub scene: String,
    /// The choices on offer.
    pub choices: Vec<Choice>,
    /// Riddle attached to this level, for riddle creatures.
    pub riddle: Option<Riddle>,
}

impl Level {
    /// Returns the choice at `index`, if any.
    #[must_use]
    pub fn choice(&self, index: usize) -> Option<&Choice> {
        self.choices.get(index)
    }

    /// Number of choices flagged correct.
    #[must_use]
    pub fn correct_choice_count(&self) -> usize {
        self.choices.iter().filter(|c| c.correct).count()
    }
}

/// A selectable option on a level.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Choice {
    /// Display text.
    pub text: String,
    /// Whether picking this choice counts towards victory.
    pub correct: bool,
    /// Text shown after the choice is made.
    pub consequence: String,
}

/// Riddle payload of a level.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Riddle {
    /// The question asked.
    pub prompt: String,
    /// Hint revealed after a wrong answer.
    pub hint: String,
    /// Expected answer. Compared trimmed and lower-cased.
    pub answer: String,
}

/// Mechanic descriptor of a creature.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Mechanic {
    /// Answer riddles; wrong answers reveal hints.
    #[default]
    Riddle,
    /// A meter that drains on wrong choices.
    Calmness {
        /// Starting meter value.
        initial: u8,
    },
    /// Combine clue tokens to reveal the creature's nature.
    Deduction,
}

impl Mechanic {
    /// Short tag used in logs and snapshots.
    #[must_use]
    pub fn tag(&self) -> &'static str {
        match self {
            Mechanic::Riddle => "riddle",
            Mechanic::Calmness { .. } => "calmness",
            Mechanic::Deduction => "deduction",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn level_with(flags: &[bool]) -> Level {
        Level {
            index: 0,
            scene: String::new(),
            choices: flags
                .iter()
                .map(|correct| Choice {
                    text: String::new(),
                    correct: *correct,
                    consequence: String::new(),
                })
                .collect(),
            riddle: None,
        }
    }

    #[test]
    fn test_correct_choice_count_counts_flags() {
        assert_eq!(level_with(&[true, false]).correct_choice_count(), 1);
        assert_eq!(level_with(&[false, false]).correct_choice_count(), 0);
    }

    #[test]
    fn test_choice_out_of_range_is_none() {
        assert!(level_with(&[true, false]).choice(2).is_none());
    }

    #[test]
    fn test_mechanic_serializes_with_type_tag() {
        let json = serde_json::to_value(Mechanic::Calmness { initial: 80 }).unwrap();
        assert_eq!(json, serde_json::json!({ "type": "calmness", "initial": 80 }));
        assert_eq!(Mechanic::Deduction.tag(), "deduction");
    }
}
