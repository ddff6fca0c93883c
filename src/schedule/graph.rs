//! Per-phase graph data. Scoped to one scheduling pass and discarded
//! afterwards — nothing here outlives `schedule::run`.

use crate::model::change::Change;
use crate::model::stable_id::StableId;
use std::collections::{BTreeMap, BTreeSet};

pub struct GraphData {
    /// IDs each change brings into existence. In the drop phase this
    /// absorbs `drops` too, so dependency resolution works the same way in
    /// both phases.
    pub created_by: Vec<BTreeSet<StableId>>,
    pub requires_by: Vec<BTreeSet<StableId>>,
    pub producers_of: BTreeMap<StableId, BTreeSet<usize>>,
    pub consumers_of: BTreeMap<StableId, BTreeSet<usize>>,
}

impl GraphData {
    pub fn build_refs(changes: &[&dyn Change], absorb_drops: bool) -> Self {
        let mut created_by = Vec::with_capacity(changes.len());
        let mut requires_by = Vec::with_capacity(changes.len());

        for change in changes {
            let mut created = change.creates();
            if absorb_drops {
                created.extend(change.drops());
            }
            created_by.push(created);
            requires_by.push(change.requires());
        }

        let mut producers_of: BTreeMap<StableId, BTreeSet<usize>> = BTreeMap::new();
        for (idx, ids) in created_by.iter().enumerate() {
            for id in ids {
                producers_of.entry(id.clone()).or_default().insert(idx);
            }
        }

        let mut consumers_of: BTreeMap<StableId, BTreeSet<usize>> = BTreeMap::new();
        for (idx, ids) in requires_by.iter().enumerate() {
            for id in ids {
                consumers_of.entry(id.clone()).or_default().insert(idx);
            }
        }

        Self {
            created_by,
            requires_by,
            producers_of,
            consumers_of,
        }
    }

    pub fn producers(&self, id: &StableId) -> impl Iterator<Item = usize> + '_ {
        self.producers_of
            .get(id)
            .into_iter()
            .flat_map(|s| s.iter().copied())
    }

    pub fn consumers(&self, id: &StableId) -> impl Iterator<Item = usize> + '_ {
        self.consumers_of
            .get(id)
            .into_iter()
            .flat_map(|s| s.iter().copied())
    }

    /// Every change that requires or creates `id` — the target set for a
    /// catalog constraint.
    pub fn requires_or_creates(&self, id: &StableId) -> BTreeSet<usize> {
        let mut out: BTreeSet<usize> = self.producers_of.get(id).cloned().unwrap_or_default();
        out.extend(self.consumers_of.get(id).cloned().unwrap_or_default());
        out
    }
}
