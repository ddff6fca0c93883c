//! Trigger create/drop. `CREATE TRIGGER` text is sourced straight from
//! `pg_get_triggerdef()` rather than rebuilt from components, so `Create`
//! carries that definition string verbatim instead of a struct of clauses.

use crate::diff::changes::util::{maybe_format, qualified, quote_ident};
use crate::format::FormatOptions;
use crate::model::change::{Change, ObjectType, Operation, Scope};
use crate::model::stable_id::StableId;
use std::collections::BTreeSet;

#[derive(Debug, Clone)]
pub enum TriggerChange {
    Create {
        schema: String,
        table: String,
        name: String,
        /// Verbatim `pg_get_triggerdef()` output, semicolon included.
        definition: String,
    },
    Drop {
        schema: String,
        table: String,
        name: String,
    },
}

impl Change for TriggerChange {
    fn operation(&self) -> Operation {
        match self {
            TriggerChange::Create { .. } => Operation::Create,
            TriggerChange::Drop { .. } => Operation::Drop,
        }
    }

    fn object_type(&self) -> ObjectType {
        ObjectType::Trigger
    }

    fn scope(&self) -> Scope {
        Scope::Object
    }

    fn creates(&self) -> BTreeSet<StableId> {
        match self {
            TriggerChange::Create { schema, table, name } => {
                BTreeSet::from([StableId::trigger(schema, table, name)])
            }
            TriggerChange::Drop { .. } => BTreeSet::new(),
        }
    }

    fn drops(&self) -> BTreeSet<StableId> {
        match self {
            TriggerChange::Drop { schema, table, name } => {
                BTreeSet::from([StableId::trigger(schema, table, name)])
            }
            TriggerChange::Create { .. } => BTreeSet::new(),
        }
    }

    fn requires(&self) -> BTreeSet<StableId> {
        match self {
            TriggerChange::Create { schema, table, .. } => BTreeSet::from([StableId::table(schema, table)]),
            TriggerChange::Drop { .. } => BTreeSet::new(),
        }
    }

    fn serialize(&self, options: Option<&FormatOptions>) -> String {
        let raw = match self {
            TriggerChange::Create { definition, .. } => {
                let trimmed = definition.trim_end();
                if trimmed.ends_with(';') {
                    trimmed.to_string()
                } else {
                    format!("{trimmed};")
                }
            }
            TriggerChange::Drop { schema, table, name } => {
                format!("DROP TRIGGER {} ON {};", quote_ident(name), qualified(schema, table))
            }
        };
        maybe_format(raw, options)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn create_trigger_embeds_definition_verbatim() {
        let change = TriggerChange::Create {
            schema: "public".into(),
            table: "orders".into(),
            name: "set_updated_at".into(),
            definition: "CREATE TRIGGER set_updated_at BEFORE UPDATE ON public.orders FOR EACH ROW EXECUTE FUNCTION touch_updated_at()".into(),
        };
        assert_eq!(
            change.serialize(None),
            "CREATE TRIGGER set_updated_at BEFORE UPDATE ON public.orders FOR EACH ROW EXECUTE FUNCTION touch_updated_at();"
        );
        assert_eq!(
            change.creates(),
            BTreeSet::from([StableId::trigger("public", "orders", "set_updated_at")])
        );
        assert_eq!(change.requires(), BTreeSet::from([StableId::table("public", "orders")]));
    }

    #[test]
    fn drop_trigger_renders_on_clause() {
        let change = TriggerChange::Drop {
            schema: "public".into(),
            table: "orders".into(),
            name: "set_updated_at".into(),
        };
        assert_eq!(
            change.serialize(None),
            "DROP TRIGGER \"set_updated_at\" ON \"public\".\"orders\";"
        );
    }
}
