//! The progression aggregate, its phases and its events.

pub mod aggregates;
pub mod events;
pub mod phase;
