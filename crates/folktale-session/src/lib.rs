//! Folktale — Phase & Progression State Machine.
//!
//! Sequences a player through the intro, creature selection, the
//! character reveal, the story, three levels of choices and the outcome.
//! Every accepted trigger is recorded as a named event that collaborators
//! (audio, animation) can subscribe to.

pub mod application;
pub mod domain;

pub use application::command_handlers::GameEngine;
pub use application::query_handlers::{
    ChoiceView, CreatureView, GameSnapshot, LevelView, MechanicView,
};
pub use domain::aggregates::{Progression, Session};
pub use domain::events::{SessionEvent, SessionEventKind};
pub use domain::phase::{Outcome, Phase};
