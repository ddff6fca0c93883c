//! Shared data model consumed by the scheduler and produced by diff orchestration.

pub mod catalog;
pub mod change;
pub mod stable_id;

pub use catalog::{CatalogSnapshot, DependencyRow};
pub use change::{Change, Operation, ObjectType, Scope};
pub use stable_id::StableId;
