//! Index create/drop.

use crate::diff::changes::util::{maybe_format, qualified, quote_ident};
use crate::format::FormatOptions;
use crate::model::change::{Change, ObjectType, Operation, Scope};
use crate::model::stable_id::StableId;
use std::collections::BTreeSet;

#[derive(Debug, Clone)]
pub struct IndexColumnDef {
    pub expression: String,
    pub collation: Option<String>,
    pub opclass: Option<String>,
    pub ordering: Option<String>,
    pub nulls_ordering: Option<String>,
}

#[derive(Debug, Clone)]
pub enum IndexChange {
    Create {
        schema: String,
        name: String,
        table_schema: String,
        table_name: String,
        index_type: String,
        is_unique: bool,
        columns: Vec<IndexColumnDef>,
        include_columns: Vec<String>,
        predicate: Option<String>,
    },
    Drop {
        schema: String,
        name: String,
        table_schema: String,
        table_name: String,
    },
}

fn render_column(col: &IndexColumnDef) -> String {
    let mut spec = col.expression.clone();
    if let Some(collation) = &col.collation {
        spec.push_str(&format!(" COLLATE {collation}"));
    }
    if let Some(opclass) = &col.opclass {
        spec.push_str(&format!(" {opclass}"));
    }
    if let Some(ordering) = &col.ordering {
        if ordering != "ASC" {
            spec.push_str(&format!(" {ordering}"));
        }
    }
    if let Some(nulls) = &col.nulls_ordering {
        if nulls != "NULLS LAST" {
            spec.push_str(&format!(" {nulls}"));
        }
    }
    spec
}

impl Change for IndexChange {
    fn operation(&self) -> Operation {
        match self {
            IndexChange::Create { .. } => Operation::Create,
            IndexChange::Drop { .. } => Operation::Drop,
        }
    }

    fn object_type(&self) -> ObjectType {
        ObjectType::Index
    }

    fn scope(&self) -> Scope {
        Scope::Object
    }

    fn creates(&self) -> BTreeSet<StableId> {
        match self {
            IndexChange::Create { schema, name, .. } => BTreeSet::from([StableId::index(schema, name)]),
            IndexChange::Drop { .. } => BTreeSet::new(),
        }
    }

    fn drops(&self) -> BTreeSet<StableId> {
        match self {
            IndexChange::Drop { schema, name, .. } => BTreeSet::from([StableId::index(schema, name)]),
            IndexChange::Create { .. } => BTreeSet::new(),
        }
    }

    fn requires(&self) -> BTreeSet<StableId> {
        match self {
            IndexChange::Create { table_schema, table_name, .. } => {
                BTreeSet::from([StableId::table(table_schema, table_name)])
            }
            IndexChange::Drop { table_schema, table_name, .. } => {
                BTreeSet::from([StableId::table(table_schema, table_name)])
            }
        }
    }

    fn serialize(&self, options: Option<&FormatOptions>) -> String {
        let raw = match self {
            IndexChange::Create {
                name,
                table_schema,
                table_name,
                index_type,
                is_unique,
                columns,
                include_columns,
                predicate,
                ..
            } => {
                let mut sql = String::from("CREATE ");
                if *is_unique {
                    sql.push_str("UNIQUE ");
                }
                sql.push_str("INDEX ");
                sql.push_str(&quote_ident(name));
                sql.push_str(" ON ");
                sql.push_str(&qualified(table_schema, table_name));
                sql.push_str(" USING ");
                sql.push_str(index_type);
                sql.push_str(" (");
                sql.push_str(&columns.iter().map(render_column).collect::<Vec<_>>().join(", "));
                sql.push(')');
                if !include_columns.is_empty() {
                    sql.push_str(" INCLUDE (");
                    sql.push_str(&include_columns.iter().map(|c| quote_ident(c)).collect::<Vec<_>>().join(", "));
                    sql.push(')');
                }
                if let Some(predicate) = predicate {
                    sql.push_str(&format!(" WHERE {predicate}"));
                }
                sql.push(';');
                sql
            }
            IndexChange::Drop { schema, name, .. } => format!("DROP INDEX {};", qualified(schema, name)),
        };
        maybe_format(raw, options)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn create_simple_btree_index_renders_using_clause_and_dependency() {
        let change = IndexChange::Create {
            schema: "public".into(),
            name: "idx_users_email".into(),
            table_schema: "public".into(),
            table_name: "users".into(),
            index_type: "btree".into(),
            is_unique: false,
            columns: vec![IndexColumnDef {
                expression: "email".into(),
                collation: None,
                opclass: None,
                ordering: Some("ASC".into()),
                nulls_ordering: Some("NULLS LAST".into()),
            }],
            include_columns: vec![],
            predicate: None,
        };
        assert_eq!(
            change.serialize(None),
            "CREATE INDEX \"idx_users_email\" ON \"public\".\"users\" USING btree (email);"
        );
        assert_eq!(change.requires(), BTreeSet::from([StableId::table("public", "users")]));
    }

    #[test]
    fn drop_index_requires_its_table() {
        let change = IndexChange::Drop {
            schema: "public".into(),
            name: "idx".into(),
            table_schema: "public".into(),
            table_name: "users".into(),
        };
        assert_eq!(change.serialize(None), "DROP INDEX \"public\".\"idx\";");
        assert_eq!(change.drops(), BTreeSet::from([StableId::index("public", "idx")]));
    }
}
