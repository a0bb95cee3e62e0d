//! Breadth-first exploration.
//!
//! Nodes are marked when they are queued, so each node enters the frontier at
//! most once and the route table describes a shortest-by-edge-count tree.

use super::SearchState;
use crate::graph::{Edge, NodeIndex, Traversable};

/// Drains a FIFO frontier from `source` until `target` is settled.
pub(super) fn explore<G>(state: &mut SearchState, source: NodeIndex, target: NodeIndex, graph: &G) -> bool
where
    G: Traversable + ?Sized,
{
    state.frontier.push_back(Edge::seed(source));
    state.visited.mark(source);

    while let Some(next) = state.frontier.pop_front() {
        state.settle(next);

        let node = next.to_node();
        if node == target {
            return true;
        }

        for edge in graph.leading_edges(node) {
            if state.visited.try_visit(edge.to_node()) {
                state.frontier.push_back(edge);
            }
        }
    }

    false
}
