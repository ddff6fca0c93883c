//! The `Change` contract.
//!
//! A `Change` is an immutable record describing one DDL action. The
//! scheduler only ever touches the five getters plus `serialize`; it does
//! not care about the concrete kind producing them. We model it as a trait
//! object (`Box<dyn Change>`) rather than one giant enum: diff-orchestration
//! keeps growing the set of concrete change kinds independently of the
//! scheduler, and a flat enum covering all 25 object types would get
//! unwieldy fast.

use crate::format::FormatOptions;
use crate::model::stable_id::StableId;
use std::collections::BTreeSet;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub enum Operation {
    Create,
    Alter,
    Drop,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub enum ObjectType {
    Schema,
    Role,
    Extension,
    Table,
    View,
    MaterializedView,
    Index,
    Trigger,
    RlsPolicy,
    Rule,
    Procedure,
    Sequence,
    Domain,
    Enum,
    CompositeType,
    Range,
    Collation,
    Language,
    Publication,
    Subscription,
    ForeignDataWrapper,
    Server,
    UserMapping,
    ForeignTable,
    EventTrigger,
    Aggregate,
}

impl fmt::Display for ObjectType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{self:?}")
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub enum Scope {
    Object,
    Comment,
    Privilege,
    Membership,
    DefaultPrivilege,
    Owner,
}

/// One DDL action. Callers (diff-orchestration) must uphold the invariants
/// below before handing a `Change` to the scheduler.
pub trait Change: fmt::Debug {
    fn operation(&self) -> Operation;
    fn object_type(&self) -> ObjectType;
    fn scope(&self) -> Scope;

    /// Stable IDs this change brings into existence. Empty for pure alters.
    fn creates(&self) -> BTreeSet<StableId>;

    /// Stable IDs this change removes. Empty for pure creates.
    fn drops(&self) -> BTreeSet<StableId>;

    /// Stable IDs that must exist before this change runs. Never contains an
    /// ID this change itself creates.
    fn requires(&self) -> BTreeSet<StableId>;

    /// Render this change to raw DDL text. `options` is `None` when the
    /// caller does not intend to run the result through the formatter.
    fn serialize(&self, options: Option<&FormatOptions>) -> String;

    /// Veto an incoming catalog-dependency edge. Defaults to accepting every
    /// edge; concrete changes override this to break known false-positive
    /// cycles at the source, the same way the scheduler's own sequence-
    /// ownership rule does at the graph level, but for edges that never
    /// should have existed in the first place (e.g. a change that
    /// legitimately both creates and references the same cluster of
    /// objects).
    fn accepts_dependency(&self, _dependent: &StableId, _referenced: &StableId) -> bool {
        true
    }

    /// A short human label used in `CycleError` diagnostics: the object type
    /// plus a representative created ID, e.g. `Table(public.events)`.
    fn display_label(&self) -> String {
        let created = self.creates().iter().next().map(|id| id.to_string());
        match created {
            Some(id) => format!("{}({id})", self.object_type()),
            None => format!("{}(<alter>)", self.object_type()),
        }
    }
}
