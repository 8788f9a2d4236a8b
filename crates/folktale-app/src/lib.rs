//! Folktale — application wiring.
//!
//! Configuration, error types and the autoplay runner used by the
//! `folktale-check` binary and the integration tests.

pub mod config;
pub mod error;
pub mod playtest;
