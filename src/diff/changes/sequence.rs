//! Sequence create/drop/ownership. The scheduler's sequence-ownership cycle
//! break (`schedule::rules::is_sequence_ownership_edge`) operates on the
//! catalog dependency rows, not on this type — `AlterOwnership::requires`
//! only states the ordinary "both ends must already exist" requirement.

use crate::diff::changes::util::{maybe_format, qualified, quote_ident};
use crate::format::FormatOptions;
use crate::model::change::{Change, ObjectType, Operation, Scope};
use crate::model::stable_id::StableId;
use std::collections::BTreeSet;

#[derive(Debug, Clone)]
pub enum SequenceChange {
    Create {
        schema: String,
        name: String,
        data_type: String,
        start_value: i64,
        min_value: i64,
        max_value: i64,
        increment: i64,
        cycle: bool,
    },
    Drop {
        schema: String,
        name: String,
    },
    AlterOwnership {
        schema: String,
        name: String,
        /// `None` means `OWNED BY NONE`.
        owned_by: Option<(String, String, String)>,
    },
}

impl Change for SequenceChange {
    fn operation(&self) -> Operation {
        match self {
            SequenceChange::Create { .. } => Operation::Create,
            SequenceChange::Drop { .. } => Operation::Drop,
            SequenceChange::AlterOwnership { .. } => Operation::Alter,
        }
    }

    fn object_type(&self) -> ObjectType {
        ObjectType::Sequence
    }

    fn scope(&self) -> Scope {
        Scope::Object
    }

    fn creates(&self) -> BTreeSet<StableId> {
        match self {
            SequenceChange::Create { schema, name, .. } => {
                BTreeSet::from([StableId::sequence(schema, name)])
            }
            _ => BTreeSet::new(),
        }
    }

    fn drops(&self) -> BTreeSet<StableId> {
        match self {
            SequenceChange::Drop { schema, name } => BTreeSet::from([StableId::sequence(schema, name)]),
            _ => BTreeSet::new(),
        }
    }

    fn requires(&self) -> BTreeSet<StableId> {
        match self {
            SequenceChange::Create { schema, .. } => BTreeSet::from([StableId::schema(schema)]),
            SequenceChange::Drop { .. } => BTreeSet::new(),
            SequenceChange::AlterOwnership { schema, name, owned_by } => {
                let mut ids = BTreeSet::from([StableId::sequence(schema, name)]);
                if let Some((s, t, c)) = owned_by {
                    ids.insert(StableId::column(s, t, c));
                }
                ids
            }
        }
    }

    fn serialize(&self, options: Option<&FormatOptions>) -> String {
        let raw = match self {
            SequenceChange::Create {
                schema,
                name,
                data_type,
                start_value,
                min_value,
                max_value,
                increment,
                cycle,
            } => format!(
                "CREATE SEQUENCE {} AS {} START {} MINVALUE {} MAXVALUE {} INCREMENT {}{};",
                qualified(schema, name),
                data_type,
                start_value,
                min_value,
                max_value,
                increment,
                if *cycle { " CYCLE" } else { " NO CYCLE" }
            ),
            SequenceChange::Drop { schema, name } => format!("DROP SEQUENCE {};", qualified(schema, name)),
            SequenceChange::AlterOwnership { schema, name, owned_by } => match owned_by {
                None => format!("ALTER SEQUENCE {} OWNED BY NONE;", qualified(schema, name)),
                Some((s, t, c)) => format!(
                    "ALTER SEQUENCE {} OWNED BY {}.{}.{};",
                    qualified(schema, name),
                    quote_ident(s),
                    quote_ident(t),
                    quote_ident(c)
                ),
            },
        };
        maybe_format(raw, options)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn create_sequence_renders_full_clause_set() {
        let change = SequenceChange::Create {
            schema: "public".into(),
            name: "orders_id_seq".into(),
            data_type: "bigint".into(),
            start_value: 1,
            min_value: 1,
            max_value: i64::MAX,
            increment: 1,
            cycle: false,
        };
        assert!(change.serialize(None).starts_with("CREATE SEQUENCE \"public\".\"orders_id_seq\""));
        assert_eq!(change.creates(), BTreeSet::from([StableId::sequence("public", "orders_id_seq")]));
    }

    #[test]
    fn alter_ownership_requires_sequence_and_owning_column() {
        let change = SequenceChange::AlterOwnership {
            schema: "public".into(),
            name: "orders_id_seq".into(),
            owned_by: Some(("public".into(), "orders".into(), "id".into())),
        };
        let reqs = change.requires();
        assert!(reqs.contains(&StableId::sequence("public", "orders_id_seq")));
        assert!(reqs.contains(&StableId::column("public", "orders", "id")));
        assert_eq!(
            change.serialize(None),
            "ALTER SEQUENCE \"public\".\"orders_id_seq\" OWNED BY \"public\".\"orders\".\"id\";"
        );
    }

    #[test]
    fn alter_ownership_none_has_no_column_requirement() {
        let change = SequenceChange::AlterOwnership {
            schema: "public".into(),
            name: "s".into(),
            owned_by: None,
        };
        assert_eq!(change.serialize(None), "ALTER SEQUENCE \"public\".\"s\" OWNED BY NONE;");
    }
}
