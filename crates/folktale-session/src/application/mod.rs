//! Engine facade (commands) and read-only snapshots (queries).

pub mod command_handlers;
pub mod query_handlers;
