//! Domain event abstractions.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Metadata attached to every domain event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventMetadata {
    /// Unique event identifier.
    pub event_id: Uuid,
    /// Dotted event name, e.g. `session.choice_submitted`.
    pub event_type: String,
    /// State machine that recorded the event.
    pub aggregate_id: Uuid,
    /// Monotonically increasing position within the state machine's history.
    pub sequence_number: i64,
    /// Timestamp of event creation.
    pub occurred_at: DateTime<Utc>,
}

/// Trait that all domain events implement.
pub trait DomainEvent: Send + Sync + std::fmt::Debug {
    /// Returns the event type name.
    fn event_type(&self) -> &'static str;

    /// Serializes the event payload to JSON.
    fn to_payload(&self) -> serde_json::Value;

    /// Returns the metadata for this event.
    fn metadata(&self) -> &EventMetadata;
}

/// A domain event flattened for collaborators outside the engine
/// (audio, animation, analytics).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PublishedEvent {
    /// Unique event identifier.
    pub event_id: Uuid,
    /// State machine that recorded the event.
    pub aggregate_id: Uuid,
    /// Dotted event name.
    pub event_type: String,
    /// Serialized event payload.
    pub payload: serde_json::Value,
    /// Position within the state machine's history.
    pub sequence_number: i64,
    /// Timestamp of event creation.
    pub occurred_at: DateTime<Utc>,
}

impl PublishedEvent {
    /// Flattens a domain event.
    pub fn from_event<E: DomainEvent + ?Sized>(event: &E) -> Self {
        let meta = event.metadata();
        Self {
            event_id: meta.event_id,
            aggregate_id: meta.aggregate_id,
            event_type: event.event_type().to_owned(),
            payload: event.to_payload(),
            sequence_number: meta.sequence_number,
            occurred_at: meta.occurred_at,
        }
    }
}

/// Receiver of published events.
///
/// Sinks are called synchronously, in recording order, after an operation
/// has been fully applied. A sink must not call back into the engine.
pub trait EventSink: Send + Sync {
    /// Delivers one event.
    fn publish(&self, event: &PublishedEvent);
}
