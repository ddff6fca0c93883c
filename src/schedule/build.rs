//! Dependency-to-constraint lowering: the three constraint sources —
//! catalog rows, each change's own `requires`, and the closed list of
//! custom rules — all collapsed into `Constraint`s.

use crate::model::catalog::CatalogSnapshot;
use crate::model::change::Change;
use crate::schedule::constraint::Constraint;
use crate::schedule::graph::GraphData;
use crate::schedule::rules::{CustomOrder, CUSTOM_RULES};

/// Catalog-row constraints: for every `(dependent, referenced)` row, an
/// edge from every producer of `referenced` to every change that requires
/// or creates `dependent`, unless that change vetoes the edge via
/// `accepts_dependency`. Rows with either side prefixed `unknown:` are
/// discarded.
pub fn catalog_constraints(
    changes: &[&dyn Change],
    catalog: &CatalogSnapshot,
    graph: &GraphData,
) -> Vec<Constraint> {
    let mut out = Vec::new();
    for row in catalog.rows() {
        if row.dependent.is_unknown() || row.referenced.is_unknown() {
            continue;
        }
        for source in graph.producers(&row.referenced) {
            for target in graph.requires_or_creates(&row.dependent) {
                if source == target {
                    continue;
                }
                if !changes[target].accepts_dependency(&row.dependent, &row.referenced) {
                    continue;
                }
                out.push(Constraint::Catalog {
                    source_idx: source,
                    target_idx: target,
                    dependent_id: row.dependent.clone(),
                    referenced_id: row.referenced.clone(),
                });
            }
        }
    }
    out
}

/// Explicit `requires` constraints: for each change, for each ID it
/// requires, an edge from every producer of that ID to the change itself.
pub fn explicit_constraints(changes: &[&dyn Change], graph: &GraphData) -> Vec<Constraint> {
    let mut out = Vec::new();
    for (target, _change) in changes.iter().enumerate() {
        for id in &graph.requires_by[target] {
            for source in graph.producers(id) {
                if source == target {
                    continue;
                }
                let dependent_id = graph.created_by[target].iter().next().cloned();
                out.push(Constraint::Explicit {
                    source_idx: source,
                    target_idx: target,
                    dependent_id,
                    referenced_id: id.clone(),
                });
            }
        }
    }
    out
}

/// Custom-rule constraints, evaluated over every unordered pair of changes.
pub fn custom_constraints(changes: &[&dyn Change]) -> Vec<Constraint> {
    let mut out = Vec::new();
    for i in 0..changes.len() {
        for j in (i + 1)..changes.len() {
            for rule in CUSTOM_RULES {
                match rule(changes[i], changes[j]) {
                    CustomOrder::ABeforeB => out.push(Constraint::Custom {
                        source_idx: i,
                        target_idx: j,
                        description: None,
                    }),
                    CustomOrder::BBeforeA => out.push(Constraint::Custom {
                        source_idx: j,
                        target_idx: i,
                        description: None,
                    }),
                    CustomOrder::None => {}
                }
            }
        }
    }
    out
}
