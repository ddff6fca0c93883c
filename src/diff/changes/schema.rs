//! Schema create/drop.

use crate::diff::changes::util::{maybe_format, quote_ident};
use crate::format::FormatOptions;
use crate::model::change::{Change, ObjectType, Operation, Scope};
use crate::model::stable_id::StableId;
use std::collections::BTreeSet;

#[derive(Debug, Clone)]
pub enum SchemaChange {
    Create { name: String },
    Drop { name: String },
}

impl Change for SchemaChange {
    fn operation(&self) -> Operation {
        match self {
            SchemaChange::Create { .. } => Operation::Create,
            SchemaChange::Drop { .. } => Operation::Drop,
        }
    }

    fn object_type(&self) -> ObjectType {
        ObjectType::Schema
    }

    fn scope(&self) -> Scope {
        Scope::Object
    }

    fn creates(&self) -> BTreeSet<StableId> {
        match self {
            SchemaChange::Create { name } => BTreeSet::from([StableId::schema(name)]),
            SchemaChange::Drop { .. } => BTreeSet::new(),
        }
    }

    fn drops(&self) -> BTreeSet<StableId> {
        match self {
            SchemaChange::Drop { name } => BTreeSet::from([StableId::schema(name)]),
            SchemaChange::Create { .. } => BTreeSet::new(),
        }
    }

    fn requires(&self) -> BTreeSet<StableId> {
        BTreeSet::new()
    }

    fn serialize(&self, options: Option<&FormatOptions>) -> String {
        let raw = match self {
            SchemaChange::Create { name } => format!("CREATE SCHEMA {};", quote_ident(name)),
            SchemaChange::Drop { name } => format!("DROP SCHEMA {};", quote_ident(name)),
        };
        maybe_format(raw, options)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn create_schema_renders_and_creates_its_id() {
        let change = SchemaChange::Create { name: "app".into() };
        assert_eq!(change.serialize(None), "CREATE SCHEMA \"app\";");
        assert_eq!(change.creates(), BTreeSet::from([StableId::schema("app")]));
        assert!(change.requires().is_empty());
    }

    #[test]
    fn drop_schema_renders_and_drops_its_id() {
        let change = SchemaChange::Drop { name: "old".into() };
        assert_eq!(change.serialize(None), "DROP SCHEMA \"old\";");
        assert_eq!(change.drops(), BTreeSet::from([StableId::schema("old")]));
    }
}
