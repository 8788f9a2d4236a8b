//! Riddle rule set.
//!
//! Answers are compared after trimming and lower-casing both sides. Every
//! wrong answer reveals one more hint; there is no attempt limit.

use folktale_content::Riddle;
use serde::{Deserialize, Serialize};

/// Riddle progress for the current session.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RiddleState {
    /// Number of wrong answers so far. Uncapped.
    pub hints_revealed: u32,
    /// Level of the most recent wrong answer.
    #[serde(default)]
    pub missed_level: Option<usize>,
}

impl RiddleState {
    /// Records a wrong answer on `level_index`.
    #[must_use]
    pub fn missed_on(self, level_index: usize) -> Self {
        Self {
            hints_revealed: self.hints_revealed.saturating_add(1),
            missed_level: Some(level_index),
        }
    }

    /// Whether the hint of the riddle on `level_index` has been earned.
    #[must_use]
    pub fn hint_visible_on(self, level_index: usize) -> bool {
        self.missed_level == Some(level_index)
    }
}

/// Result of one answer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "verdict", rename_all = "lowercase")]
pub enum RiddleVerdict {
    /// The answer matched the key.
    Correct,
    /// The answer did not match; the hint is now visible.
    Incorrect {
        /// The riddle's hint text.
        hint: String,
    },
}

impl RiddleVerdict {
    /// Returns `true` for `Correct`.
    #[must_use]
    pub fn is_correct(&self) -> bool {
        matches!(self, RiddleVerdict::Correct)
    }
}

/// Canonical form used for answer comparison.
#[must_use]
pub fn normalize_answer(raw: &str) -> String {
    raw.trim().to_lowercase()
}

/// Checks `raw_input` against the key of the riddle on `level_index`.
#[must_use]
pub fn submit_answer(
    state: RiddleState,
    level_index: usize,
    riddle: &Riddle,
    raw_input: &str,
) -> (RiddleState, RiddleVerdict) {
    if normalize_answer(raw_input) == normalize_answer(&riddle.answer) {
        tracing::debug!(hints_revealed = state.hints_revealed, "riddle answered correctly");
        return (state, RiddleVerdict::Correct);
    }

    let next = state.missed_on(level_index);
    tracing::debug!(hints_revealed = next.hints_revealed, "riddle answered incorrectly");
    (
        next,
        RiddleVerdict::Incorrect {
            hint: riddle.hint.clone(),
        },
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn riddle() -> Riddle {
        Riddle {
            prompt: "What runs but never walks?".to_owned(),
            hint: "You crossed one today.".to_owned(),
            answer: "A River".to_owned(),
        }
    }

    #[test]
    fn test_matching_answer_ignores_case_and_surrounding_space() {
        let state = RiddleState {
            hints_revealed: 2,
            missed_level: Some(0),
        };

        let (next, verdict) = submit_answer(state, 1, &riddle(), "  a RIVER\n");

        assert_eq!(verdict, RiddleVerdict::Correct);
        assert_eq!(next, state);
    }

    #[test]
    fn test_wrong_answer_reveals_hint_and_increments_count() {
        let (next, verdict) = submit_answer(RiddleState::default(), 0, &riddle(), "a road");

        assert_eq!(next.hints_revealed, 1);
        assert!(next.hint_visible_on(0));
        assert_eq!(
            verdict,
            RiddleVerdict::Incorrect {
                hint: "You crossed one today.".to_owned()
            }
        );
    }

    #[test]
    fn test_every_miss_increments_again() {
        let mut state = RiddleState::default();
        for _ in 0..5 {
            state = submit_answer(state, 0, &riddle(), "wind").0;
        }
        assert_eq!(state.hints_revealed, 5);

        let (after, verdict) = submit_answer(state, 0, &riddle(), "a river");
        assert!(verdict.is_correct());
        assert_eq!(after.hints_revealed, 5);
    }

    #[test]
    fn test_inner_whitespace_is_significant() {
        let (_, verdict) = submit_answer(RiddleState::default(), 0, &riddle(), "ariver");
        assert!(!verdict.is_correct());
    }

    #[test]
    fn test_hint_is_earned_only_on_the_missed_level() {
        let (missed, _) = submit_answer(RiddleState::default(), 0, &riddle(), "a road");
        assert!(missed.hint_visible_on(0));
        assert!(!missed.hint_visible_on(1));

        let (answered, verdict) = submit_answer(missed, 1, &riddle(), "a river");
        assert!(verdict.is_correct());
        assert!(!answered.hint_visible_on(1));
        assert_eq!(answered.hints_revealed, 1);

        let (missed_again, _) = submit_answer(answered, 1, &riddle(), "wind");
        assert!(missed_again.hint_visible_on(1));
        assert!(!missed_again.hint_visible_on(0));
        assert_eq!(missed_again.hints_revealed, 2);
    }
}
