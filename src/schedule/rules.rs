//! Closed rule sets used by the scheduler: custom ordering rules and
//! cycle-breaking filters.

use crate::model::change::{Change, Scope};
use crate::model::stable_id::StableId;
use crate::schedule::constraint::Constraint;

/// Result of a custom ordering rule applied to an ordered pair of changes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CustomOrder {
    ABeforeB,
    BBeforeA,
    None,
}

/// One custom rule: `fn(a, b) -> {a_before_b, b_before_a, none}`.
pub type CustomRule = fn(&dyn Change, &dyn Change) -> CustomOrder;

/// Default-privilege changes must run before any create that is not a role
/// or schema.
fn default_privilege_before_create(a: &dyn Change, b: &dyn Change) -> CustomOrder {
    use crate::model::change::{ObjectType, Operation};

    let is_default_privilege = |c: &dyn Change| c.scope() == Scope::DefaultPrivilege;
    let is_non_role_schema_create = |c: &dyn Change| {
        c.operation() == Operation::Create
            && !matches!(c.object_type(), ObjectType::Role | ObjectType::Schema)
    };

    if is_default_privilege(a) && is_non_role_schema_create(b) {
        CustomOrder::ABeforeB
    } else if is_default_privilege(b) && is_non_role_schema_create(a) {
        CustomOrder::BBeforeA
    } else {
        CustomOrder::None
    }
}

/// The closed list of custom rules evaluated for every change pair.
pub const CUSTOM_RULES: &[CustomRule] = &[default_privilege_before_create];

fn is_sequence_id(id: &StableId) -> bool {
    id.as_str().starts_with("sequence:")
}

fn is_table_or_column_id(id: &StableId) -> bool {
    let s = id.as_str();
    s.starts_with("table:") || s.starts_with("column:")
}

/// Sequence-ownership suppression, the only standard cycle-breaking rule:
/// when `pg_depend` says a sequence depends on a
/// table/column that also defaults from that sequence, discard the
/// ownership direction. A `Catalog` constraint whose `dependent_id` is a
/// sequence and whose `referenced_id` is a table/column is that ownership
/// edge (`OWNED BY`); the complementary default-value dependency has the
/// tags swapped and is left alone.
pub fn is_sequence_ownership_edge(constraint: &Constraint) -> bool {
    match constraint {
        Constraint::Catalog {
            dependent_id,
            referenced_id,
            ..
        } => is_sequence_id(dependent_id) && is_table_or_column_id(referenced_id),
        _ => false,
    }
}

/// Applies every registered cycle-breaking filter. Custom constraints are
/// never removed during cycle breaking.
pub fn should_break(constraint: &Constraint) -> bool {
    if constraint.is_custom() {
        return false;
    }
    is_sequence_ownership_edge(constraint)
}
