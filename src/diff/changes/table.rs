//! Table create/drop. Column and primary-key shape is deliberately smaller
//! than a live-catalog table representation would need — extraction from a
//! live catalog is out of scope here, so these are the plain data diff-
//! orchestration would hand the scheduler.

use crate::diff::changes::util::{maybe_format, qualified, quote_ident};
use crate::format::FormatOptions;
use crate::model::change::{Change, ObjectType, Operation, Scope};
use crate::model::stable_id::StableId;
use std::collections::BTreeSet;

#[derive(Debug, Clone)]
pub struct ColumnDef {
    pub name: String,
    pub data_type: String,
    pub not_null: bool,
    pub default: Option<String>,
    pub generated: Option<String>,
}

#[derive(Debug, Clone)]
pub struct PrimaryKeyDef {
    pub name: String,
    pub columns: Vec<String>,
}

#[derive(Debug, Clone)]
pub enum TableChange {
    Create {
        schema: String,
        name: String,
        columns: Vec<ColumnDef>,
        primary_key: Option<PrimaryKeyDef>,
    },
    Drop {
        schema: String,
        name: String,
        columns: Vec<String>,
    },
}

fn render_column(column: &ColumnDef) -> String {
    let mut def = format!("    {} {}", quote_ident(&column.name), column.data_type);
    if let Some(expr) = &column.generated {
        def.push_str(&format!(" GENERATED ALWAYS AS ({expr}) STORED"));
    }
    if let Some(default) = &column.default {
        def.push_str(&format!(" DEFAULT {default}"));
    }
    if column.not_null {
        def.push_str(" NOT NULL");
    }
    def
}

impl Change for TableChange {
    fn operation(&self) -> Operation {
        match self {
            TableChange::Create { .. } => Operation::Create,
            TableChange::Drop { .. } => Operation::Drop,
        }
    }

    fn object_type(&self) -> ObjectType {
        ObjectType::Table
    }

    fn scope(&self) -> Scope {
        Scope::Object
    }

    fn creates(&self) -> BTreeSet<StableId> {
        match self {
            TableChange::Create { schema, name, columns, .. } => {
                let mut ids = BTreeSet::from([StableId::table(schema, name)]);
                ids.extend(columns.iter().map(|c| StableId::column(schema, name, &c.name)));
                ids
            }
            TableChange::Drop { .. } => BTreeSet::new(),
        }
    }

    fn drops(&self) -> BTreeSet<StableId> {
        match self {
            TableChange::Drop { schema, name, columns } => {
                let mut ids = BTreeSet::from([StableId::table(schema, name)]);
                ids.extend(columns.iter().map(|c| StableId::column(schema, name, c)));
                ids
            }
            TableChange::Create { .. } => BTreeSet::new(),
        }
    }

    fn requires(&self) -> BTreeSet<StableId> {
        match self {
            TableChange::Create { schema, .. } => BTreeSet::from([StableId::schema(schema)]),
            TableChange::Drop { .. } => BTreeSet::new(),
        }
    }

    fn serialize(&self, options: Option<&FormatOptions>) -> String {
        let raw = match self {
            TableChange::Create {
                schema,
                name,
                columns,
                primary_key,
            } => {
                let mut defs: Vec<String> = columns.iter().map(render_column).collect();
                if let Some(pk) = primary_key {
                    let cols = pk.columns.iter().map(|c| quote_ident(c)).collect::<Vec<_>>().join(", ");
                    defs.push(format!("    CONSTRAINT {} PRIMARY KEY ({cols})", quote_ident(&pk.name)));
                }
                format!("CREATE TABLE {} (\n{}\n);", qualified(schema, name), defs.join(",\n"))
            }
            TableChange::Drop { schema, name, .. } => format!("DROP TABLE {};", qualified(schema, name)),
        };
        maybe_format(raw, options)
    }
}
