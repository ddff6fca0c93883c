//! Cycle detection and the `CycleError` diagnostic.

use crate::model::change::Change;
use crate::model::stable_id::StableId;
use crate::schedule::constraint::Edge;
use std::collections::BTreeMap;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Mark {
    Visiting,
    Visited,
}

/// DFS over the current edge set, tracking visiting/visited state. Returns
/// the node sequence of the first cycle found (in traversal order, not yet
/// rotated), or `None` if the graph is acyclic.
pub fn find_cycle(node_count: usize, edges: &[Edge]) -> Option<Vec<usize>> {
    let mut adjacency: BTreeMap<usize, Vec<usize>> = BTreeMap::new();
    for edge in edges {
        adjacency
            .entry(edge.source_idx)
            .or_default()
            .push(edge.target_idx);
    }

    let mut marks = vec![None; node_count];
    let mut stack: Vec<usize> = Vec::new();

    for start in 0..node_count {
        if marks[start].is_some() {
            continue;
        }
        if let Some(cycle) = dfs_visit(start, &adjacency, &mut marks, &mut stack) {
            return Some(cycle);
        }
    }
    None
}

fn dfs_visit(
    node: usize,
    adjacency: &BTreeMap<usize, Vec<usize>>,
    marks: &mut [Option<Mark>],
    stack: &mut Vec<usize>,
) -> Option<Vec<usize>> {
    marks[node] = Some(Mark::Visiting);
    stack.push(node);

    if let Some(neighbors) = adjacency.get(&node) {
        for &next in neighbors {
            match marks[next] {
                Some(Mark::Visiting) => {
                    let start = stack.iter().position(|&n| n == next).unwrap();
                    return Some(stack[start..].to_vec());
                }
                Some(Mark::Visited) => continue,
                None => {
                    if let Some(cycle) = dfs_visit(next, adjacency, marks, stack) {
                        return Some(cycle);
                    }
                }
            }
        }
    }

    stack.pop();
    marks[node] = Some(Mark::Visited);
    None
}

/// Rotate a cycle so its smallest node index leads, giving a canonical
/// signature used to detect "our filter did not break it" loops.
pub fn normalize_cycle(cycle: &[usize]) -> Vec<usize> {
    if cycle.is_empty() {
        return Vec::new();
    }
    let min_pos = cycle
        .iter()
        .enumerate()
        .min_by_key(|(_, &n)| n)
        .map(|(pos, _)| pos)
        .unwrap_or(0);
    let mut rotated = Vec::with_capacity(cycle.len());
    rotated.extend_from_slice(&cycle[min_pos..]);
    rotated.extend_from_slice(&cycle[..min_pos]);
    rotated
}

/// Edges of the cycle, in traversal order, matched against the full edge
/// list by consecutive node pairs.
pub fn edges_on_cycle(cycle: &[usize], edges: &[Edge]) -> Vec<Edge> {
    let mut out = Vec::new();
    for window in cycle.windows(2) {
        if let [from, to] = window {
            out.extend(
                edges
                    .iter()
                    .filter(|e| e.source_idx == *from && e.target_idx == *to)
                    .cloned(),
            );
        }
    }
    if let (Some(&last), Some(&first)) = (cycle.last(), cycle.first()) {
        out.extend(
            edges
                .iter()
                .filter(|e| e.source_idx == last && e.target_idx == first)
                .cloned(),
        );
    }
    out
}

/// One node of a reported cycle: its index within the phase's change list,
/// a human label, and the IDs it creates.
#[derive(Debug, Clone)]
pub struct CycleNode {
    pub index: usize,
    pub label: String,
    pub created: Vec<StableId>,
}

impl CycleNode {
    pub fn from_change(index: usize, change: &dyn Change) -> Self {
        Self {
            index,
            label: change.display_label(),
            created: change.creates().into_iter().collect(),
        }
    }
}

/// The scheduler's only observable failure mode: a dependency cycle that
/// could not be broken by the standard filters.
#[derive(Debug, Clone)]
pub struct CycleError {
    pub nodes: Vec<CycleNode>,
    pub edges: Vec<Edge>,
}

impl fmt::Display for CycleError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "unresolvable dependency cycle among {} changes:", self.nodes.len())?;
        for node in &self.nodes {
            let created = node
                .created
                .iter()
                .take(3)
                .map(|id| id.to_string())
                .collect::<Vec<_>>()
                .join(", ");
            writeln!(f, "  [{}] {} (creates: {})", node.index, node.label, created)?;
        }
        writeln!(f, "cycle edges:")?;
        for edge in &self.edges {
            writeln!(
                f,
                "  {} -> {} ({})",
                edge.source_idx,
                edge.target_idx,
                describe_constraint(&edge.constraint)
            )?;
        }
        Ok(())
    }
}

impl std::error::Error for CycleError {}

fn describe_constraint(constraint: &crate::schedule::constraint::Constraint) -> String {
    use crate::schedule::constraint::Constraint::*;
    match constraint {
        Catalog {
            dependent_id,
            referenced_id,
            ..
        } => format!("catalog: {dependent_id} requires {referenced_id}"),
        Explicit {
            dependent_id,
            referenced_id,
            ..
        } => match dependent_id {
            Some(dep) => format!("explicit: {dep} requires {referenced_id}"),
            None => format!("explicit: requires {referenced_id}"),
        },
        Custom { description, .. } => match description {
            Some(desc) => format!("custom: {desc}"),
            None => "custom rule".to_string(),
        },
    }
}
