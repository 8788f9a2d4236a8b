//! The tagged mechanic state and dispatch by creature mechanic.

use folktale_content::Mechanic;
use serde::{Deserialize, Serialize};

use super::calmness::{self, CalmnessState};
use super::deduction::DeductionState;
use super::riddle::RiddleState;

/// Per-session state of the creature's mechanic.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum MechanicState {
    /// Riddle progress.
    Riddle(RiddleState),
    /// Calmness meter.
    Calmness(CalmnessState),
    /// Collected clue tokens.
    Deduction(DeductionState),
}

impl MechanicState {
    /// Default state for a creature with `mechanic`.
    #[must_use]
    pub fn initial_for(mechanic: &Mechanic) -> Self {
        match mechanic {
            Mechanic::Riddle => MechanicState::Riddle(RiddleState::default()),
            Mechanic::Calmness { initial } => MechanicState::Calmness(CalmnessState::new(*initial)),
            Mechanic::Deduction => MechanicState::Deduction(DeductionState::default()),
        }
    }

    /// Short tag matching `Mechanic::tag`.
    #[must_use]
    pub fn tag(&self) -> &'static str {
        match self {
            MechanicState::Riddle(_) => "riddle",
            MechanicState::Calmness(_) => "calmness",
            MechanicState::Deduction(_) => "deduction",
        }
    }

    /// Side effect of a level choice on the mechanic.
    ///
    /// Only the calmness meter reacts to choices; the other mechanics are
    /// driven by their own inputs.
    #[must_use]
    pub fn after_choice(&self, level_index: usize, is_correct: bool) -> Self {
        match self {
            MechanicState::Calmness(state) => MechanicState::Calmness(
                calmness::apply_choice_outcome(*state, level_index, is_correct),
            ),
            MechanicState::Riddle(_) | MechanicState::Deduction(_) => self.clone(),
        }
    }
}
