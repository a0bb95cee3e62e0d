//! Depth-first exploration.
//!
//! Nodes are marked when they are popped. A node can sit in the frontier more
//! than once; the first pop settles it and later copies are skipped, so its
//! route entry is never overwritten.

use super::SearchState;
use crate::graph::{Edge, NodeIndex, Traversable};

/// Drains a LIFO frontier from `source` until `target` is settled.
pub(super) fn explore<G>(state: &mut SearchState, source: NodeIndex, target: NodeIndex, graph: &G) -> bool
where
    G: Traversable + ?Sized,
{
    state.frontier.push_back(Edge::seed(source));

    while let Some(next) = state.frontier.pop_back() {
        let node = next.to_node();
        if !state.visited.try_visit(node) {
            continue;
        }
        state.settle(next);

        if node == target {
            return true;
        }

        for edge in graph.leading_edges(node) {
            if !state.visited.is_visited(edge.to_node()) {
                state.frontier.push_back(edge);
            }
        }
    }

    false
}
