//! Undirected storage: one canonical edge per unordered pair plus a mirror.
//!
//! Each connection `{u, v}` is stored once, oriented `min -> max`, in the
//! bucket of `min`. The mirror records `v` under `u` and `u` under `v`, so
//! traversal works from either side and removing a node only visits that
//! node's neighbors instead of every bucket.

use super::base::Graph;
use super::edge::{Edge, GraphEdge, DEFAULT_EDGE_COST};
use super::kind::EdgeType;
use super::node::{GraphNode, NodeIndex};

/// Per-node neighbor lists, recorded symmetrically.
#[derive(Debug, Clone, Default)]
pub(crate) struct MirrorIndex {
    neighbors: Vec<Vec<NodeIndex>>,
}

impl MirrorIndex {
    pub(crate) fn push_slot(&mut self) {
        self.neighbors.push(Vec::new());
    }

    pub(crate) fn clear(&mut self) {
        self.neighbors.clear();
    }

    pub(crate) fn neighbors(&self, index: NodeIndex) -> &[NodeIndex] {
        self.neighbors.get(index.index()).map_or(&[][..], Vec::as_slice)
    }

    pub(crate) fn link(&mut self, a: NodeIndex, b: NodeIndex) {
        if let Some(list) = self.neighbors.get_mut(a.index()) {
            list.push(b);
        }
        if a != b {
            if let Some(list) = self.neighbors.get_mut(b.index()) {
                list.push(a);
            }
        }
    }

    pub(crate) fn unlink(&mut self, a: NodeIndex, b: NodeIndex) {
        self.forget(a, b);
        if a != b {
            self.forget(b, a);
        }
    }

    /// Takes `index`'s neighbor list, leaving it empty.
    pub(crate) fn take(&mut self, index: NodeIndex) -> Vec<NodeIndex> {
        self.neighbors
            .get_mut(index.index())
            .map(std::mem::take)
            .unwrap_or_default()
    }

    /// Removes the first `neighbor` entry under `index`, keeping order.
    fn forget(&mut self, index: NodeIndex, neighbor: NodeIndex) {
        if let Some(list) = self.neighbors.get_mut(index.index()) {
            if let Some(pos) = list.iter().position(|&n| n == neighbor) {
                list.remove(pos);
            }
        }
    }
}

impl<N: GraphNode, E: GraphEdge, Ty: EdgeType> Graph<N, E, Ty> {
    /// Drops every connection of `id` using the mirror.
    pub(super) fn detach_mirrored(&mut self, id: NodeIndex) {
        for neighbor in self.mirror.take(id) {
            if neighbor != id {
                self.mirror.unlink(neighbor, id);
            }
            let (from, to) = Ty::canonical(id, neighbor);
            if let Some(bucket) = self.buckets.get_mut(from.index()) {
                if let Some(pos) = bucket.iter().position(|e| e.to_node() == to) {
                    bucket.remove(pos);
                }
            }
        }
    }

    /// One descriptor per neighbor, oriented away from `index`.
    pub(super) fn mirrored_leading_edges(&self, index: NodeIndex) -> Vec<Edge> {
        self.mirror
            .neighbors(index)
            .iter()
            .map(|&neighbor| {
                let (from, to) = Ty::canonical(index, neighbor);
                let cost = self.find_edge(from, to).map_or(DEFAULT_EDGE_COST, GraphEdge::cost);
                Edge::with_cost(index, neighbor, cost)
            })
            .collect()
    }
}
