//! The thin orchestration layer gluing a flat bag of `Change`s to the
//! scheduler and formatter. Diffing a catalog down to a
//! `Vec<Box<dyn Change>>` is left to the caller — `changes` holds the
//! concrete per-object-type implementations that `creates()`/`drops()`/
//! `requires()` are computed from.

pub mod changes;

use crate::format::FormatOptions;
use crate::model::catalog::CatalogSnapshot;
use crate::model::change::Change;
use crate::schedule::{self, CycleError};
use tracing::info;

/// Order `changes` and render each to SQL, in execution order.
///
/// `main` is the catalog the drop phase's dependency rows are resolved
/// against; `branch` is what the create/alter phase uses. `format_options`
/// is threaded through to every `Change::serialize` call; pass `None` to
/// get each change's raw, unformatted SQL.
pub fn plan(
    changes: Vec<Box<dyn Change>>,
    main: &CatalogSnapshot,
    branch: &CatalogSnapshot,
    format_options: Option<&FormatOptions>,
) -> Result<Vec<String>, CycleError> {
    info!(count = changes.len(), "planning migration");

    let mut indexed: Vec<(usize, Box<dyn Change>)> = changes.into_iter().enumerate().collect();
    schedule::presort(&mut indexed);
    let presorted: Vec<Box<dyn Change>> = indexed.into_iter().map(|(_, c)| c).collect();

    let ordered = schedule::run(presorted, main, branch)?;
    Ok(ordered.iter().map(|c| c.serialize(format_options)).collect())
}

/// Convenience wrapper over [`plan`] that joins the rendered statements
/// into one script, separated by blank lines.
pub fn plan_script(
    changes: Vec<Box<dyn Change>>,
    main: &CatalogSnapshot,
    branch: &CatalogSnapshot,
    format_options: Option<&FormatOptions>,
) -> Result<String, CycleError> {
    let statements = plan(changes, main, branch, format_options)?;
    Ok(statements.join("\n\n"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diff::changes::{SchemaChange, TableChange};
    use crate::model::catalog::DependencyRow;
    use crate::model::stable_id::StableId;

    #[test]
    fn plan_orders_and_renders_independent_schema_changes() {
        let changes: Vec<Box<dyn Change>> = vec![
            Box::new(SchemaChange::Create { name: "app".into() }),
            Box::new(SchemaChange::Drop { name: "old".into() }),
        ];
        let main = CatalogSnapshot::default();
        let branch = CatalogSnapshot::default();
        let rendered = plan(changes, &main, &branch, None).expect("no cycle");
        assert_eq!(rendered.len(), 2);
        assert!(rendered.iter().any(|s| s == "CREATE SCHEMA \"app\";"));
        assert!(rendered.iter().any(|s| s == "DROP SCHEMA \"old\";"));
    }

    #[test]
    fn plan_orders_table_create_after_its_schema() {
        let changes: Vec<Box<dyn Change>> = vec![
            Box::new(TableChange::Create {
                schema: "app".into(),
                name: "widgets".into(),
                columns: vec![],
                primary_key: None,
            }),
            Box::new(SchemaChange::Create { name: "app".into() }),
        ];
        let main = CatalogSnapshot::default();
        let branch = CatalogSnapshot::from_iter([DependencyRow::new(
            StableId::table("app", "widgets"),
            StableId::schema("app"),
        )]);
        let rendered = plan(changes, &main, &branch, None).expect("no cycle");
        let schema_pos = rendered.iter().position(|s| s.starts_with("CREATE SCHEMA")).unwrap();
        let table_pos = rendered.iter().position(|s| s.starts_with("CREATE TABLE")).unwrap();
        assert!(schema_pos < table_pos);
    }
}
