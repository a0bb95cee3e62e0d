//! Index-stable graph containers.
//!
//! Graph implementations are organized by concern:
//! - `node` / `edge`: identities, node and edge kinds, typed construction parameters
//! - `kind`: direction tags and canonicalization
//! - `base`: the shared container and its lifecycle operations
//! - `directed` / `undirected`: the storage strategy behind each direction

mod base;
mod directed;
mod edge;
mod kind;
mod node;
mod undirected;

pub use base::{Graph, SparseDigraph, SparseGraph};
pub use edge::{approx_equal, Edge, EdgeParams, GraphEdge, DEFAULT_EDGE_COST, EDGE_COST_EPSILON};
pub use kind::{Directed, EdgeType, Undirected};
pub use node::{GraphNode, NavGraphNode, Node, NodeIndex, NodeParams, Position};

/// The traversal contract searches run against.
pub trait Traversable {
    /// Number of slots, including tombstoned ones.
    ///
    /// Every index a traversal can encounter is below this bound.
    fn node_count(&self) -> usize;

    /// Returns `true` if `index` names an active node.
    fn is_node_present(&self, index: NodeIndex) -> bool;

    /// Every connection leaving `index`, as value descriptors oriented away from it.
    ///
    /// Unknown or tombstoned indices yield an empty sequence.
    fn leading_edges(&self, index: NodeIndex) -> Vec<Edge>;
}
