//! Content schema and the embedded fallback dataset.

pub mod embedded;
pub mod model;
pub mod repository;
pub mod ui;
