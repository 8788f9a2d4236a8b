//! Event-recording state machine abstraction.

use uuid::Uuid;

use crate::event::DomainEvent;

/// A state machine whose every accepted operation is expressed as an event.
///
/// Operations validate against the current state first. An accepted
/// operation records an event, applies it immediately, and queues it until
/// the owner drains the queue for publication.
pub trait AggregateRoot: Send + Sync {
    /// The event type this state machine records.
    type Event: DomainEvent;

    /// Returns the state machine identifier.
    fn aggregate_id(&self) -> Uuid;

    /// Returns the number of events applied so far.
    fn version(&self) -> i64;

    /// Applies an event to the in-memory state.
    fn apply(&mut self, event: &Self::Event);

    /// Events recorded but not yet handed to the owner.
    fn pending_events(&self) -> &[Self::Event];

    /// Removes and returns all pending events in recording order.
    fn drain_pending_events(&mut self) -> Vec<Self::Event>;
}
