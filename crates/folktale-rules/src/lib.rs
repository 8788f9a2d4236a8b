//! Folktale — Mechanic Rule Engine.
//!
//! Three independent rule sets, one per creature mechanic. Every rule is a
//! pure function from the current mechanic state and an input to the next
//! state; nothing here performs I/O or keeps hidden state.

pub mod domain;

pub use domain::calmness::{CalmnessMood, CalmnessState};
pub use domain::deduction::{ClueToken, DeductionState};
pub use domain::mechanic::MechanicState;
pub use domain::riddle::{RiddleState, RiddleVerdict};
