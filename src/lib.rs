//! Shared model, scheduler, and SQL formatter for diffing one PostgreSQL
//! catalog against another and planning a dependency-safe migration.
//! Catalog extraction, interactive apply, and migration file bookkeeping
//! are external collaborators this crate does not own.

pub mod diff;
pub mod format;
pub mod model;
pub mod schedule;
