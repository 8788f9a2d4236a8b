//! Folktale Core — shared abstractions.
//!
//! This crate defines the traits and types that the content, rules and
//! session crates depend on: event recording, timekeeping, randomness, the
//! resource-source port and the shared error types. It contains no
//! infrastructure code.

pub mod aggregate;
pub mod clock;
pub mod error;
pub mod event;
pub mod rng;
pub mod source;
