//! Shared error types.

use std::time::Duration;

use thiserror::Error;

/// An operation the state machine refused.
///
/// Rejections never change state. The engine boundary logs them and treats
/// them as no-ops.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DomainError {
    /// The operation is not allowed in the current phase.
    #[error("{operation} is not allowed in phase {phase}")]
    InvalidPhase {
        /// The rejected operation.
        operation: &'static str,
        /// The phase the state machine was in.
        phase: String,
    },

    /// No creature with the given id exists in the loaded content.
    #[error("unknown creature: {0}")]
    UnknownCreature(String),

    /// The choice index does not address a choice of the current level.
    #[error("choice index {index} out of range ({available} available)")]
    ChoiceOutOfRange {
        /// The requested index.
        index: usize,
        /// Number of choices on the level.
        available: usize,
    },

    /// Any other precondition failure.
    #[error("validation error: {0}")]
    Validation(String),
}

/// Failure to retrieve a named resource.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FetchError {
    /// The transport failed before a response arrived.
    #[error("transport error: {0}")]
    Transport(String),

    /// The server answered with a non-success status.
    #[error("unexpected status {0}")]
    Status(u16),

    /// The fetch did not settle within the allowed time.
    #[error("timed out after {0:?}")]
    Timeout(Duration),

    /// The source has no resource under that name.
    #[error("resource not found: {0}")]
    NotFound(String),
}
