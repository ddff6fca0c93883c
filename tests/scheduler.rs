//! Integration coverage for the change scheduler: dependency safety,
//! stability, determinism, cycle breaking, and phase partitioning. No
//! database: catalogs are built by hand.

use pgmt_core::diff::changes::{ColumnDef, SchemaChange, SequenceChange, TableChange};
use pgmt_core::model::catalog::{CatalogSnapshot, DependencyRow};
use pgmt_core::model::change::Change;
use pgmt_core::model::stable_id::StableId;
use pgmt_core::schedule;

fn int_column(name: &str) -> ColumnDef {
    ColumnDef {
        name: name.into(),
        data_type: "integer".into(),
        not_null: true,
        default: None,
        generated: None,
    }
}

/// S2 / dependency safety: a table's create depends on its schema's create,
/// even with no catalog rows at all — the edge comes from `TableChange`'s
/// own `requires()`.
#[test]
fn table_create_runs_after_its_schema_create() {
    let changes: Vec<Box<dyn Change>> = vec![
        Box::new(TableChange::Create {
            schema: "app".into(),
            name: "widgets".into(),
            columns: vec![int_column("id")],
            primary_key: None,
        }),
        Box::new(SchemaChange::Create { name: "app".into() }),
    ];
    let main = CatalogSnapshot::default();
    let branch = CatalogSnapshot::default();
    let ordered = schedule::run(changes, &main, &branch).expect("no cycle");
    assert_eq!(ordered[0].object_type().to_string(), "Schema");
    assert_eq!(ordered[1].object_type().to_string(), "Table");
}

/// S3: a catalog row says the table depends on its schema. In the create
/// phase that orders schema before table; dropping the same two objects
/// inverts it — the table must drop before the schema it depends on.
#[test]
fn drop_phase_inverts_the_catalog_dependency_direction() {
    let changes: Vec<Box<dyn Change>> = vec![
        Box::new(SchemaChange::Drop { name: "app".into() }),
        Box::new(TableChange::Drop {
            schema: "app".into(),
            name: "widgets".into(),
            columns: vec!["id".into()],
        }),
    ];
    let main = CatalogSnapshot::from_iter([DependencyRow::new(
        StableId::table("app", "widgets"),
        StableId::schema("app"),
    )]);
    let branch = CatalogSnapshot::default();
    let ordered = schedule::run(changes, &main, &branch).expect("no cycle");
    assert_eq!(ordered[0].object_type().to_string(), "Table");
    assert_eq!(ordered[1].object_type().to_string(), "Schema");
}

/// S1: a sequence owns a column (`OWNED BY`, ownership edge) and that same
/// column defaults from the sequence (`nextval`, the complementary edge).
/// Taken together these form a two-node cycle; the scheduler's standard
/// sequence-ownership filter breaks the ownership direction and leaves the
/// default-value direction, so the sequence is created before the table.
#[test]
fn sequence_ownership_cycle_resolves_without_raising() {
    let seq_id = StableId::sequence("public", "orders_id_seq");
    let col_id = StableId::column("public", "orders", "id");

    let changes: Vec<Box<dyn Change>> = vec![
        Box::new(TableChange::Create {
            schema: "public".into(),
            name: "orders".into(),
            columns: vec![int_column("id")],
            primary_key: None,
        }),
        Box::new(SequenceChange::Create {
            schema: "public".into(),
            name: "orders_id_seq".into(),
            data_type: "bigint".into(),
            start_value: 1,
            min_value: 1,
            max_value: i64::MAX,
            increment: 1,
            cycle: false,
        }),
    ];

    let branch = CatalogSnapshot::from_iter([
        DependencyRow::new(seq_id.clone(), col_id.clone()),
        DependencyRow::new(col_id, seq_id),
    ]);
    let main = CatalogSnapshot::default();

    let ordered = schedule::run(changes, &main, &branch).expect("ownership cycle must not raise");
    assert_eq!(ordered[0].object_type().to_string(), "Sequence");
    assert_eq!(ordered[1].object_type().to_string(), "Table");
}

/// Cycle reporting: a genuine mutual dependency between two tables' columns
/// (neither end is a sequence) has no standard filter to break it, so the
/// scheduler reports the cycle with full provenance rather than guessing.
#[test]
fn unbreakable_cycle_is_reported_with_provenance() {
    let col_a = StableId::column("app", "a", "x");
    let col_b = StableId::column("app", "b", "y");

    let changes: Vec<Box<dyn Change>> = vec![
        Box::new(TableChange::Create {
            schema: "app".into(),
            name: "a".into(),
            columns: vec![int_column("x")],
            primary_key: None,
        }),
        Box::new(TableChange::Create {
            schema: "app".into(),
            name: "b".into(),
            columns: vec![int_column("y")],
            primary_key: None,
        }),
    ];

    let branch = CatalogSnapshot::from_iter([
        DependencyRow::new(col_a.clone(), col_b.clone()),
        DependencyRow::new(col_b, col_a),
    ]);
    let main = CatalogSnapshot::default();

    let err = schedule::run(changes, &main, &branch).expect_err("mutual column dependency must raise");
    assert_eq!(err.nodes.len(), 2);
    assert_eq!(err.edges.len(), 2);
    assert!(err.to_string().contains("unresolvable dependency cycle"));
}

/// Stability: changes with no dependency relationship between them keep
/// their input order.
#[test]
fn unconstrained_changes_preserve_input_order() {
    let changes: Vec<Box<dyn Change>> = vec![
        Box::new(SchemaChange::Create { name: "zzz".into() }),
        Box::new(SchemaChange::Create { name: "aaa".into() }),
        Box::new(SchemaChange::Create { name: "mmm".into() }),
    ];
    let catalog = CatalogSnapshot::default();
    let ordered = schedule::run(changes, &catalog, &catalog).expect("no cycle");
    let names: Vec<String> = ordered.iter().map(|c| c.creates().iter().next().unwrap().to_string()).collect();
    assert_eq!(names, vec!["schema:zzz", "schema:aaa", "schema:mmm"]);
}

/// Determinism: running the same input through the scheduler twice gives
/// byte-identical output order.
#[test]
fn scheduling_is_deterministic() {
    fn build() -> (Vec<Box<dyn Change>>, CatalogSnapshot, CatalogSnapshot) {
        let changes: Vec<Box<dyn Change>> = vec![
            Box::new(TableChange::Create {
                schema: "app".into(),
                name: "widgets".into(),
                columns: vec![int_column("id")],
                primary_key: None,
            }),
            Box::new(SchemaChange::Create { name: "app".into() }),
            Box::new(SchemaChange::Create { name: "other".into() }),
        ];
        (changes, CatalogSnapshot::default(), CatalogSnapshot::default())
    }

    let (c1, main1, branch1) = build();
    let (c2, main2, branch2) = build();
    let out1 = schedule::run(c1, &main1, &branch1).expect("no cycle");
    let out2 = schedule::run(c2, &main2, &branch2).expect("no cycle");
    let rendered1: Vec<String> = out1.iter().map(|c| c.serialize(None)).collect();
    let rendered2: Vec<String> = out2.iter().map(|c| c.serialize(None)).collect();
    assert_eq!(rendered1, rendered2);
}

/// Phase partition: every drop runs before every create/alter, regardless
/// of input interleaving.
#[test]
fn all_drops_precede_all_creates_and_alters() {
    let changes: Vec<Box<dyn Change>> = vec![
        Box::new(SchemaChange::Create { name: "new_app".into() }),
        Box::new(SchemaChange::Drop { name: "old_app".into() }),
        Box::new(TableChange::Create {
            schema: "new_app".into(),
            name: "widgets".into(),
            columns: vec![int_column("id")],
            primary_key: None,
        }),
        Box::new(TableChange::Drop {
            schema: "old_app".into(),
            name: "gadgets".into(),
            columns: vec!["id".into()],
        }),
    ];
    let catalog = CatalogSnapshot::default();
    let ordered = schedule::run(changes, &catalog, &catalog).expect("no cycle");
    let ops: Vec<_> = ordered.iter().map(|c| c.operation()).collect();
    let last_drop = ops.iter().rposition(|op| *op == pgmt_core::model::change::Operation::Drop);
    let first_create = ops.iter().position(|op| *op == pgmt_core::model::change::Operation::Create);
    assert!(last_drop.unwrap() < first_create.unwrap());
}
