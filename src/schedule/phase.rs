//! Phase assignment: drop vs. create/alter.

use crate::model::change::{Change, Operation, Scope};
use crate::model::stable_id::StableId;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Phase {
    Drop,
    CreateAlter,
}

impl Phase {
    /// Per-change phase assignment:
    /// - `operation=drop` → drop
    /// - `operation=create` → create_alter
    /// - `operation=alter`, `scope=privilege` → create_alter
    /// - `operation=alter` and any id in `drops` is non-metadata → drop
    /// - otherwise `alter` → create_alter
    pub fn of(change: &dyn Change) -> Phase {
        match change.operation() {
            Operation::Drop => Phase::Drop,
            Operation::Create => Phase::CreateAlter,
            Operation::Alter => {
                if change.scope() == Scope::Privilege {
                    Phase::CreateAlter
                } else if change
                    .drops()
                    .iter()
                    .any(|id: &StableId| !id.is_metadata())
                {
                    Phase::Drop
                } else {
                    Phase::CreateAlter
                }
            }
        }
    }
}
