//! Calmness rule set.
//!
//! A meter in `[0, 100]` that only wrong choices move, by a fixed amount per
//! level.

pub use folktale_content::domain::model::MAX_CALMNESS;
use serde::{Deserialize, Serialize};

/// Meter loss for a wrong choice, indexed by level.
pub const DECREMENTS: [u8; 3] = [25, 30, 35];

/// Meter value at or above which the creature is peaceful.
pub const PEACEFUL_THRESHOLD: u8 = 60;

/// Meter value at or above which the creature is merely sorrowful.
pub const SORROWFUL_THRESHOLD: u8 = 30;

/// Calmness meter for the current session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CalmnessState {
    /// Current meter value, always within `[0, 100]`.
    pub calmness_level: u8,
}

impl CalmnessState {
    /// Creates a meter at `initial`, clamped to the valid range.
    #[must_use]
    pub fn new(initial: u8) -> Self {
        Self {
            calmness_level: initial.min(MAX_CALMNESS),
        }
    }

    /// Presentation mood for the current value.
    #[must_use]
    pub fn mood(self) -> CalmnessMood {
        CalmnessMood::classify(self.calmness_level)
    }
}

impl Default for CalmnessState {
    fn default() -> Self {
        Self::new(MAX_CALMNESS)
    }
}

/// Applies the outcome of a choice at `level_index` to the meter.
///
/// Correct choices, and levels outside the decrement table, leave the meter
/// unchanged.
#[must_use]
pub fn apply_choice_outcome(
    state: CalmnessState,
    level_index: usize,
    is_correct: bool,
) -> CalmnessState {
    if is_correct {
        return state;
    }
    let Some(decrement) = DECREMENTS.get(level_index) else {
        return state;
    };
    let next = CalmnessState::new(state.calmness_level.saturating_sub(*decrement));
    tracing::debug!(
        level_index,
        from = state.calmness_level,
        to = next.calmness_level,
        "calmness decreased"
    );
    next
}

/// Mood band of the meter. Presentation only; the engine never branches on it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CalmnessMood {
    /// 60 and above.
    Peaceful,
    /// 30 to 59.
    Sorrowful,
    /// Below 30.
    Anguished,
}

impl CalmnessMood {
    /// Classifies a meter value.
    #[must_use]
    pub fn classify(calmness_level: u8) -> Self {
        if calmness_level >= PEACEFUL_THRESHOLD {
            CalmnessMood::Peaceful
        } else if calmness_level >= SORROWFUL_THRESHOLD {
            CalmnessMood::Sorrowful
        } else {
            CalmnessMood::Anguished
        }
    }
}
