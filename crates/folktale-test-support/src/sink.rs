//! Test sink — records every published event.

use std::sync::Mutex;

use folktale_core::event::{EventSink, PublishedEvent};

/// An event sink that keeps every event it receives, in order.
#[derive(Debug, Default)]
pub struct RecordingEventSink {
    received: Mutex<Vec<PublishedEvent>>,
}

impl RecordingEventSink {
    /// Creates an empty sink.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a snapshot of all events received so far.
    ///
    /// # Panics
    ///
    /// Panics if the internal mutex is poisoned.
    pub fn events(&self) -> Vec<PublishedEvent> {
        self.received.lock().unwrap().clone()
    }

    /// Returns the event type names received so far.
    ///
    /// # Panics
    ///
    /// Panics if the internal mutex is poisoned.
    pub fn event_types(&self) -> Vec<String> {
        self.received
            .lock()
            .unwrap()
            .iter()
            .map(|e| e.event_type.clone())
            .collect()
    }
}

impl EventSink for RecordingEventSink {
    fn publish(&self, event: &PublishedEvent) {
        self.received.lock().unwrap().push(event.clone());
    }
}
