//! # `sparse-graph` - Index-Stable Graphs with Reusable Path Search
//!
//! A mutable graph container whose node indices never move, plus a small
//! family of unweighted search strategies that compute a path (and optionally
//! the spanning tree they explored) between two node indices.
//!
//! ## Key Features
//!
//! - **Stable indices**: removing a node tombstones its slot instead of
//!   shifting the nodes after it. A tombstoned slot can later be reactivated.
//! - **Two storage strategies**: [`SparseDigraph`] stores one edge per ordered
//!   pair; [`SparseGraph`] stores one edge per unordered pair plus a mirrored
//!   neighbor index so node removal only touches the removed node's neighbors.
//! - **Errors as reported values**: malformed calls never panic. They are
//!   reported to a [`DiagnosticSink`] and return `Err`, `None` or `false`.
//! - **Reusable search state**: a [`GraphSearch`] owns its visited flags,
//!   route table and frontier and reuses them across runs.
//!
//! ## Architecture
//!
//! ### Core Abstractions
//!
//! 1. **Nodes and edges** ([`GraphNode`], [`GraphEdge`]):
//!    - Built from typed parameter structs ([`NodeParams`], [`EdgeParams`])
//!    - The node/edge type is the factory: the graph never guesses a layout
//!
//! 2. **Graphs** ([`Graph`]):
//!    - Generic over a direction tag ([`Directed`] / [`Undirected`])
//!    - Every `(from, to)` operation is canonicalized by the tag first
//!
//! 3. **Search** ([`GraphSearch`]):
//!    - Works over anything implementing [`Traversable`]
//!    - Strategy selected by [`SearchStrategy`] (breadth-first or depth-first)
//!
//! ## Example
//!
//! ```rust
//! use sparse_graph::{GraphSearch, NodeIndex, NodeParams, SparseGraph};
//!
//! let mut graph: SparseGraph = SparseGraph::new();
//! for i in 0..4 {
//!     graph.add_node(NodeParams::new(NodeIndex::new(i))).unwrap();
//! }
//! graph.add_edge((0, 1)).unwrap();
//! graph.add_edge((1, 2)).unwrap();
//! graph.add_edge((2, 3)).unwrap();
//!
//! let mut bfs = GraphSearch::bfs(graph.node_count());
//! let mut path = Vec::new();
//! let outcome = bfs.search_path(NodeIndex::new(0), NodeIndex::new(3), &graph, &mut path);
//!
//! assert!(outcome.is_success());
//! assert_eq!(path, [0, 1, 2, 3].map(NodeIndex::new));
//! ```

#![warn(missing_docs, clippy::all, clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]

pub mod diagnostics;
pub mod error;
pub mod graph;
pub mod search;

pub use diagnostics::{Diagnostic, DiagnosticSink, NullSink, RecordingSink, Reporter, TracingSink};
pub use error::GraphError;
pub use graph::{
    approx_equal, Directed, Edge, EdgeParams, EdgeType, Graph, GraphEdge, GraphNode, NavGraphNode,
    Node, NodeIndex, NodeParams, Position, SparseDigraph, SparseGraph, Traversable, Undirected,
    DEFAULT_EDGE_COST, EDGE_COST_EPSILON,
};
pub use search::{
    GraphSearch, SearchOutcome, SearchStrategy, Validation, VisitState, DEFAULT_SEARCH_CAPACITY,
};

// Compile-time assertions for memory layout
const _: () = {
    use core::mem;

    // Indices are thin wrappers around `usize`.
    assert!(mem::size_of::<NodeIndex>() == mem::size_of::<usize>());

    // Descriptors stay small enough to be passed around by value in frontiers.
    assert!(mem::size_of::<Edge>() <= mem::size_of::<usize>() * 3);
};
