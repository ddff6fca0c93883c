//! Extension create/drop. Version is deliberately omitted from
//! `CREATE EXTENSION` so the statement accepts whatever is already
//! installed.

use crate::diff::changes::util::maybe_format;
use crate::format::FormatOptions;
use crate::model::change::{Change, ObjectType, Operation, Scope};
use crate::model::stable_id::StableId;
use std::collections::BTreeSet;

#[derive(Debug, Clone)]
pub enum ExtensionChange {
    Create { name: String, schema: String },
    Drop { name: String },
}

impl Change for ExtensionChange {
    fn operation(&self) -> Operation {
        match self {
            ExtensionChange::Create { .. } => Operation::Create,
            ExtensionChange::Drop { .. } => Operation::Drop,
        }
    }

    fn object_type(&self) -> ObjectType {
        ObjectType::Extension
    }

    fn scope(&self) -> Scope {
        Scope::Object
    }

    fn creates(&self) -> BTreeSet<StableId> {
        match self {
            ExtensionChange::Create { name, .. } => BTreeSet::from([StableId::extension(name)]),
            ExtensionChange::Drop { .. } => BTreeSet::new(),
        }
    }

    fn drops(&self) -> BTreeSet<StableId> {
        match self {
            ExtensionChange::Drop { name } => BTreeSet::from([StableId::extension(name)]),
            ExtensionChange::Create { .. } => BTreeSet::new(),
        }
    }

    fn requires(&self) -> BTreeSet<StableId> {
        match self {
            ExtensionChange::Create { schema, .. } if schema != "public" => {
                BTreeSet::from([StableId::schema(schema)])
            }
            _ => BTreeSet::new(),
        }
    }

    fn serialize(&self, options: Option<&FormatOptions>) -> String {
        let raw = match self {
            ExtensionChange::Create { name, schema } => {
                let mut sql = format!("CREATE EXTENSION IF NOT EXISTS \"{name}\"");
                if schema != "public" {
                    sql.push_str(&format!(" SCHEMA \"{schema}\""));
                }
                sql.push(';');
                sql
            }
            ExtensionChange::Drop { name } => format!("DROP EXTENSION IF EXISTS \"{name}\";"),
        };
        maybe_format(raw, options)
    }
}
