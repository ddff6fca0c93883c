//! Optional stable pre-sort for readable migration scripts: groups changes
//! by a dependency-hierarchy rank on object type before the real
//! topological sort runs.
//!
//! This never affects correctness — `schedule::run`'s topological sort can
//! reorder anything here further — it only improves locality: changes to
//! the same schema/object end up near each other in the emitted script.

use crate::model::change::{Change, ObjectType};
use crate::model::stable_id::StableId;
use crate::schedule::phase::Phase;

/// Dependency-hierarchy ordering of object-type groups within a phase.
/// Reversed for the drop phase.
fn object_type_rank(object_type: ObjectType) -> u32 {
    use ObjectType::*;
    match object_type {
        Schema => 0,
        Extension => 1,
        Role => 2,
        Language => 3,
        Collation => 4,
        Domain => 5,
        Enum | CompositeType | Range => 6,
        Sequence => 7,
        Procedure => 8,
        Aggregate => 9,
        Table | Index | Trigger | RlsPolicy | Rule => 10,
        View => 11,
        MaterializedView => 12,
        EventTrigger => 13,
        Publication => 14,
        Subscription => 15,
        ForeignDataWrapper => 16,
        Server => 17,
        UserMapping => 18,
        ForeignTable => 19,
    }
}

/// Sub-entities group under their parent table/view's stable ID rather
/// than their own, by trimming the trailing `.name` component off IDs of
/// the shape `kind:schema.table.name`.
fn grouping_id(change: &dyn Change) -> Option<StableId> {
    let id = change
        .creates()
        .into_iter()
        .next()
        .or_else(|| change.drops().into_iter().next())?;
    let s = id.as_str();
    let is_sub_entity = matches!(
        change.object_type(),
        ObjectType::Index | ObjectType::Trigger | ObjectType::RlsPolicy | ObjectType::Rule
    );
    if !is_sub_entity {
        return Some(id);
    }
    let (kind, rest) = s.split_once(':')?;
    let mut parts: Vec<&str> = rest.rsplitn(2, '.').collect();
    if parts.len() != 2 {
        return Some(id);
    }
    // parts = [name, "schema.table"] after rsplitn(2, '.') on "schema.table.name"
    let schema_table = parts.pop().unwrap();
    let _ = kind;
    Some(StableId::new(format!("table:{schema_table}")))
}

fn scope_ordinal(scope: crate::model::change::Scope) -> u32 {
    use crate::model::change::Scope::*;
    match scope {
        Object => 0,
        Owner => 1,
        Privilege => 2,
        DefaultPrivilege => 3,
        Membership => 4,
        Comment => 5,
    }
}

/// Sort key: `(phase, schema, object-type-group, primary-stable-id,
/// scope-ordinal, original-index)`.
fn sort_key(
    phase: Phase,
    original_index: usize,
    change: &dyn Change,
) -> (u8, String, u32, String, u32, usize) {
    let phase_rank = match phase {
        Phase::Drop => 0u8,
        Phase::CreateAlter => 1u8,
    };

    let mut rank = object_type_rank(change.object_type());
    if phase == Phase::Drop {
        rank = u32::MAX - rank;
    }

    let group_id = grouping_id(change)
        .map(|id| id.to_string())
        .unwrap_or_default();

    let schema = group_id
        .split_once(':')
        .and_then(|(_, rest)| rest.split('.').next())
        .unwrap_or("")
        .to_string();

    (
        phase_rank,
        schema,
        rank,
        group_id,
        scope_ordinal(change.scope()),
        original_index,
    )
}

/// Stable pre-sort by the grouping key above. Purely cosmetic — run this
/// before `schedule::run` if you want locality-preserving output; skipping
/// it changes nothing about correctness.
pub fn presort(changes: &mut [(usize, Box<dyn Change>)]) {
    changes.sort_by(|(ia, a), (ib, b)| {
        let phase_a = Phase::of(a.as_ref());
        let phase_b = Phase::of(b.as_ref());
        let key_a = sort_key(phase_a, *ia, a.as_ref());
        let key_b = sort_key(phase_b, *ib, b.as_ref());
        key_a.cmp(&key_b)
    });
}
