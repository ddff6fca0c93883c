//! The change scheduler. Pure, synchronous, deterministic: no I/O, no
//! retries. Orders a heterogeneous set of DDL `Change`s into a
//! dependency-safe sequence via phased topological sort with iterative
//! cycle breaking.

mod build;
mod constraint;
mod cycle;
mod graph;
mod phase;
mod presort;
mod rules;
mod topo;

pub use constraint::{Constraint, Edge};
pub use cycle::{CycleError, CycleNode};
pub use phase::Phase;
pub use presort::presort;

use crate::model::catalog::CatalogSnapshot;
use crate::model::change::Change;
use graph::GraphData;
use std::collections::HashSet;
use tracing::{debug, warn};

/// Order `changes` into an execution-safe sequence. `main` is the catalog
/// snapshot the drop phase resolves dependencies against; `branch` is what
/// the create/alter phase uses.
pub fn run(
    changes: Vec<Box<dyn Change>>,
    main: &CatalogSnapshot,
    branch: &CatalogSnapshot,
) -> Result<Vec<Box<dyn Change>>, CycleError> {
    let drop_indices: Vec<usize> = (0..changes.len())
        .filter(|&i| Phase::of(changes[i].as_ref()) == Phase::Drop)
        .collect();
    let create_alter_indices: Vec<usize> = (0..changes.len())
        .filter(|&i| Phase::of(changes[i].as_ref()) == Phase::CreateAlter)
        .collect();

    debug!(
        drop = drop_indices.len(),
        create_alter = create_alter_indices.len(),
        "partitioned changes into phases"
    );

    let drop_order = schedule_phase(Phase::Drop, &drop_indices, &changes, main)?;
    let create_alter_order =
        schedule_phase(Phase::CreateAlter, &create_alter_indices, &changes, branch)?;

    let mut slots: Vec<Option<Box<dyn Change>>> = changes.into_iter().map(Some).collect();
    let mut out = Vec::with_capacity(slots.len());
    for idx in drop_order.into_iter().chain(create_alter_order) {
        out.push(slots[idx].take().expect("each global index visited once"));
    }
    Ok(out)
}

/// Run one phase end to end: build graph data, lower dependencies to
/// constraints and edges, break cycles iteratively, then stable-toposort.
/// Returns the phase's changes in order, as *global* indices into the
/// caller's original `changes` slice.
fn schedule_phase(
    phase: Phase,
    global_indices: &[usize],
    changes: &[Box<dyn Change>],
    catalog: &CatalogSnapshot,
) -> Result<Vec<usize>, CycleError> {
    let local: Vec<&dyn Change> = global_indices.iter().map(|&i| changes[i].as_ref()).collect();
    if local.is_empty() {
        return Ok(Vec::new());
    }

    let absorb_drops = phase == Phase::Drop;
    let graph = GraphData::build_refs(&local, absorb_drops);

    let mut constraints = build::catalog_constraints(&local, catalog, &graph);
    constraints.extend(build::explicit_constraints(&local, &graph));
    constraints.extend(build::custom_constraints(&local));

    let invert = phase == Phase::Drop;
    let mut edges: Vec<Edge> = constraints
        .into_iter()
        .map(|c| Edge::from_constraint(c, invert))
        .collect();

    let local_order = break_cycles_and_sort(local.len(), &mut edges, &local)?;

    Ok(local_order.into_iter().map(|i| global_indices[i]).collect())
}

/// Iterative cycle breaking followed by the stable topological sort and
/// length validation.
fn break_cycles_and_sort(
    node_count: usize,
    edges: &mut Vec<Edge>,
    local: &[&dyn Change],
) -> Result<Vec<usize>, CycleError> {
    dedupe(edges);

    let mut seen_signatures: HashSet<Vec<usize>> = HashSet::new();

    loop {
        let Some(raw_cycle) = cycle::find_cycle(node_count, edges) else {
            break;
        };

        let normalized = cycle::normalize_cycle(&raw_cycle);
        if !seen_signatures.insert(normalized.clone()) {
            let cycle_edges = cycle::edges_on_cycle(&normalized, edges);
            let nodes = normalized
                .iter()
                .map(|&idx| CycleNode::from_change(idx, local[idx]))
                .collect();
            return Err(CycleError {
                nodes,
                edges: cycle_edges,
            });
        }

        let cycle_edges = cycle::edges_on_cycle(&normalized, edges);
        let mut broke_any = false;
        for edge in &cycle_edges {
            if rules::should_break(&edge.constraint) {
                if let Some(pos) = edges.iter().position(|e| e == edge) {
                    edges.remove(pos);
                    broke_any = true;
                    warn!(
                        source = edge.source_idx,
                        target = edge.target_idx,
                        "broke cycle edge via sequence-ownership suppression"
                    );
                }
            }
        }

        if !broke_any {
            let nodes = normalized
                .iter()
                .map(|&idx| CycleNode::from_change(idx, local[idx]))
                .collect();
            return Err(CycleError {
                nodes,
                edges: cycle_edges,
            });
        }
    }

    let order = topo::stable_toposort(node_count, edges).ok_or_else(|| {
        // Should be unreachable: the loop above only exits once `find_cycle`
        // reports none remaining. Kept as a defensive diagnostic.
        let nodes = (0..node_count)
            .map(|idx| CycleNode::from_change(idx, local[idx]))
            .collect();
        CycleError {
            nodes,
            edges: edges.clone(),
        }
    })?;

    if order.len() != node_count {
        return Err(CycleError {
            nodes: (0..node_count)
                .map(|idx| CycleNode::from_change(idx, local[idx]))
                .collect(),
            edges: edges.clone(),
        });
    }

    Ok(order)
}

fn dedupe(edges: &mut Vec<Edge>) {
    let mut unique: Vec<Edge> = Vec::with_capacity(edges.len());
    for edge in edges.drain(..) {
        if !unique.contains(&edge) {
            unique.push(edge);
        }
    }
    *edges = unique;
}
