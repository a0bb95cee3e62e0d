//! Directed storage: edges live only in their source's bucket.
//!
//! Without a reverse index, dropping the edges that lead *into* a removed node
//! means scanning every bucket. Node removal is rare, so the O(V + E)
//! sweep is accepted in exchange for storing nothing extra.

use super::base::Graph;
use super::edge::{Edge, GraphEdge};
use super::kind::EdgeType;
use super::node::{GraphNode, NodeIndex};

impl<N: GraphNode, E: GraphEdge, Ty: EdgeType> Graph<N, E, Ty> {
    /// Drops every edge with a tombstoned endpoint.
    pub(super) fn remove_invalid_edges(&mut self) {
        let nodes = &self.nodes;
        let active = |index: NodeIndex| nodes.get(index.index()).is_some_and(GraphNode::is_active);

        for bucket in &mut self.buckets {
            bucket.retain(|edge| active(edge.from_node()) && active(edge.to_node()));
        }
    }

    /// Outgoing edges straight from the bucket, in insertion order.
    pub(super) fn bucket_leading_edges(&self, index: NodeIndex) -> Vec<Edge> {
        self.buckets
            .get(index.index())
            .map(|bucket| bucket.iter().map(GraphEdge::descriptor).collect())
            .unwrap_or_default()
    }
}
