//! Loading pipeline: fetch, decode, validate, default, fall back.

pub mod loader;
pub(crate) mod raw;
pub mod validation;
