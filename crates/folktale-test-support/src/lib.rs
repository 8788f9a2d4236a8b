//! Shared test doubles for the Folktale narrative engine.

mod clock;
mod rng;
mod sink;
mod source;

pub use clock::FixedClock;
pub use rng::{MockRng, SequenceRng};
pub use sink::RecordingEventSink;
pub use source::{FailingResourceSource, ScriptedResourceSource};
