//! Catalog dependency rows. Extracting these from a live `pg_depend` is out
//! of scope here — this type is just the ordered list of rows the scheduler
//! consumes.

use crate::model::stable_id::StableId;

/// One row of `pg_depend`: `referenced` must exist before `dependent`.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct DependencyRow {
    pub dependent: StableId,
    pub referenced: StableId,
}

impl DependencyRow {
    pub fn new(dependent: StableId, referenced: StableId) -> Self {
        Self {
            dependent,
            referenced,
        }
    }
}

/// An ordered list of dependency rows for one side of the diff (`main` or
/// `branch`). Rows with either side prefixed `unknown:` are tolerated by the
/// scheduler, not rejected here — that filtering belongs at the consumer.
#[derive(Debug, Clone, Default)]
pub struct CatalogSnapshot {
    rows: Vec<DependencyRow>,
}

impl CatalogSnapshot {
    pub fn new(rows: Vec<DependencyRow>) -> Self {
        Self { rows }
    }

    pub fn rows(&self) -> &[DependencyRow] {
        &self.rows
    }

    pub fn push(&mut self, row: DependencyRow) {
        self.rows.push(row);
    }
}

impl FromIterator<DependencyRow> for CatalogSnapshot {
    fn from_iter<T: IntoIterator<Item = DependencyRow>>(iter: T) -> Self {
        Self {
            rows: iter.into_iter().collect(),
        }
    }
}
