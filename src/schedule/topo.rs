//! Stable topological sort: Kahn's algorithm with a min-heap tie-break on
//! original index. Given the same inputs this always returns the same
//! order, and where dependencies leave a choice, caller order wins.

use crate::schedule::constraint::Edge;
use std::cmp::Reverse;
use std::collections::BinaryHeap;

/// Returns the sorted node indices, or `None` if a cycle remains (callers
/// are expected to have already run cycle-breaking to exhaustion before
/// calling this).
pub fn stable_toposort(node_count: usize, edges: &[Edge]) -> Option<Vec<usize>> {
    let mut in_degree = vec![0usize; node_count];
    let mut adjacency: Vec<Vec<usize>> = vec![Vec::new(); node_count];
    for edge in edges {
        adjacency[edge.source_idx].push(edge.target_idx);
        in_degree[edge.target_idx] += 1;
    }

    let mut ready: BinaryHeap<Reverse<usize>> = (0..node_count)
        .filter(|&i| in_degree[i] == 0)
        .map(Reverse)
        .collect();

    let mut order = Vec::with_capacity(node_count);
    while let Some(Reverse(node)) = ready.pop() {
        order.push(node);
        for &next in &adjacency[node] {
            in_degree[next] -= 1;
            if in_degree[next] == 0 {
                ready.push(Reverse(next));
            }
        }
    }

    if order.len() == node_count {
        Some(order)
    } else {
        None
    }
}
