//! Built-in deterministic layered layout engine.
//!
//! Ranks nodes by longest path from the roots (nodes with no incoming
//! edges), then places each rank along the flow axis with nodes spread
//! across it in declaration order. Cycles are tolerated: any node left
//! unranked after the forward pass lands on a trailing rank, still in
//! declaration order, so output stays deterministic for any input graph.

use std::collections::{HashMap, VecDeque};

use super::{LayoutAlgorithm, LayoutEngine, LayoutError, LayoutParams, grid_positions};
use crate::graph::{Edge, Node, Position};

/// The default layout collaborator. Stateless.
#[derive(Debug, Clone, Copy, Default)]
pub struct LayeredEngine;

#[async_trait::async_trait]
impl LayoutEngine for LayeredEngine {
    async fn layout(
        &self,
        nodes: Vec<Node>,
        edges: &[Edge],
        params: &LayoutParams,
    ) -> Result<Vec<Node>, LayoutError> {
        match params.algorithm {
            LayoutAlgorithm::Grid => Ok(grid_positions(nodes)),
            LayoutAlgorithm::Tree => Ok(tree_positions(nodes, edges, params)),
        }
    }
}

fn tree_positions(mut nodes: Vec<Node>, edges: &[Edge], params: &LayoutParams) -> Vec<Node> {
    if nodes.is_empty() {
        return nodes;
    }

    let ranks = assign_ranks(&nodes, edges);
    let max_rank = ranks.iter().copied().max().unwrap_or(0);

    // Nodes per rank, in declaration order.
    let mut lanes: Vec<Vec<usize>> = vec![Vec::new(); max_rank + 1];
    for (idx, &rank) in ranks.iter().enumerate() {
        lanes[rank].push(idx);
    }

    let (across_gap, along_gap) = params.spacing.gaps();
    let reversed = params.direction.is_reversed();

    for (rank, lane) in lanes.iter().enumerate() {
        let effective_rank = if reversed { max_rank - rank } else { rank };
        #[allow(clippy::cast_precision_loss)]
        let along = effective_rank as f64 * along_gap;
        for (slot, &idx) in lane.iter().enumerate() {
            #[allow(clippy::cast_precision_loss)]
            let across = slot as f64 * across_gap;
            nodes[idx].position = if params.direction.is_vertical() {
                Position { x: across, y: along }
            } else {
                Position { x: along, y: across }
            };
        }
    }

    nodes
}

/// Longest-path ranking via a Kahn-style forward pass. Deterministic: the
/// worklist is seeded and drained in declaration order, and edges are
/// visited in document order.
fn assign_ranks(nodes: &[Node], edges: &[Edge]) -> Vec<usize> {
    let index: HashMap<&str, usize> = nodes
        .iter()
        .enumerate()
        .map(|(i, n)| (n.id.as_str(), i))
        .collect();

    let mut children: Vec<Vec<usize>> = vec![Vec::new(); nodes.len()];
    let mut indegree = vec![0_usize; nodes.len()];
    for edge in edges {
        // Self-loops contribute nothing to ranking.
        if edge.source == edge.target {
            continue;
        }
        if let (Some(&from), Some(&to)) = (index.get(edge.source.as_str()), index.get(edge.target.as_str())) {
            children[from].push(to);
            indegree[to] += 1;
        }
    }

    let mut ranks = vec![0_usize; nodes.len()];
    let mut ranked = vec![false; nodes.len()];
    let mut queue: VecDeque<usize> = (0..nodes.len()).filter(|&i| indegree[i] == 0).collect();

    while let Some(current) = queue.pop_front() {
        ranked[current] = true;
        for &child in &children[current] {
            ranks[child] = ranks[child].max(ranks[current] + 1);
            indegree[child] -= 1;
            if indegree[child] == 0 {
                queue.push_back(child);
            }
        }
    }

    // Cycle members never reach indegree zero; park them past the last
    // settled rank, keeping declaration order.
    let max_rank = ranks
        .iter()
        .zip(&ranked)
        .filter_map(|(&r, &done)| done.then_some(r))
        .max()
        .unwrap_or(0);
    for (idx, done) in ranked.iter().enumerate() {
        if !done {
            ranks[idx] = max_rank + 1;
        }
    }

    ranks
}

#[cfg(test)]
#[path = "layered_test.rs"]
mod tests;
