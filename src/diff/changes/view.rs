//! View create/drop/replace.

use crate::diff::changes::util::{maybe_format, qualified};
use crate::format::FormatOptions;
use crate::model::change::{Change, ObjectType, Operation, Scope};
use crate::model::stable_id::StableId;
use std::collections::BTreeSet;

#[derive(Debug, Clone)]
pub enum ViewChange {
    Create {
        schema: String,
        name: String,
        definition: String,
    },
    Drop {
        schema: String,
        name: String,
    },
    Replace {
        schema: String,
        name: String,
        definition: String,
    },
}

impl Change for ViewChange {
    fn operation(&self) -> Operation {
        match self {
            ViewChange::Create { .. } => Operation::Create,
            ViewChange::Drop { .. } => Operation::Drop,
            ViewChange::Replace { .. } => Operation::Alter,
        }
    }

    fn object_type(&self) -> ObjectType {
        ObjectType::View
    }

    fn scope(&self) -> Scope {
        Scope::Object
    }

    fn creates(&self) -> BTreeSet<StableId> {
        match self {
            ViewChange::Create { schema, name, .. } => BTreeSet::from([StableId::view(schema, name)]),
            _ => BTreeSet::new(),
        }
    }

    fn drops(&self) -> BTreeSet<StableId> {
        match self {
            ViewChange::Drop { schema, name } => BTreeSet::from([StableId::view(schema, name)]),
            _ => BTreeSet::new(),
        }
    }

    fn requires(&self) -> BTreeSet<StableId> {
        match self {
            ViewChange::Create { schema, .. } => BTreeSet::from([StableId::schema(schema)]),
            ViewChange::Drop { .. } => BTreeSet::new(),
            ViewChange::Replace { schema, name, .. } => BTreeSet::from([StableId::view(schema, name)]),
        }
    }

    fn serialize(&self, options: Option<&FormatOptions>) -> String {
        let raw = match self {
            ViewChange::Create { schema, name, definition } => format!(
                "CREATE VIEW {} AS\n{};",
                qualified(schema, name),
                definition.trim_end_matches(';')
            ),
            ViewChange::Drop { schema, name } => format!("DROP VIEW {};", qualified(schema, name)),
            ViewChange::Replace { schema, name, definition } => format!(
                "CREATE OR REPLACE VIEW {} AS\n{};",
                qualified(schema, name),
                definition.trim_end_matches(';')
            ),
        };
        maybe_format(raw, options)
    }
}
