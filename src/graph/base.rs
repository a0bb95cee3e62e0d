//! The shared graph container.
//!
//! Nodes live in a dense vector and are never physically removed: removal
//! tombstones the slot so every other index keeps its meaning. Edges are kept
//! in one bucket per node, keyed on the canonical source.
//!
//! ### Performance Characteristics
//! | Operation | Complexity | Notes |
//! |-----------|------------|-------|
//! | `add_node` | \(O(1)\) amortized | Appends or reactivates a slot |
//! | `remove_node` (directed) | \(O(n + m)\) | Scans every bucket |
//! | `remove_node` (undirected) | \(O(\text{degree}^2)\) | Walks the mirrored neighbor index |
//! | `add_edge` | \(O(\text{out-degree})\) | Checks for a duplicate first |
//! | `remove_edge` | \(O(\text{out-degree})\) | Linear scan of one bucket |
//! | `active_node_count` | \(O(n)\) | Not cached |
//! | `edge_count` | \(O(n)\) | Sums bucket lengths |

use std::marker::PhantomData;
use std::sync::Arc;

use super::edge::{Edge, EdgeParams, GraphEdge};
use super::kind::{Directed, EdgeType, Undirected};
use super::node::{GraphNode, Node, NodeIndex, NodeParams};
use super::undirected::MirrorIndex;
use super::Traversable;
use crate::diagnostics::{DiagnosticSink, Reporter};
use crate::error::GraphError;

/// An index-stable adjacency-list graph.
///
/// `N` and `E` are the stored node and edge kinds; `Ty` is the direction tag.
/// See [`SparseDigraph`] and [`SparseGraph`] for the two concrete flavours.
#[derive(Debug, Clone)]
pub struct Graph<N = Node, E = Edge, Ty = Directed> {
    pub(super) nodes: Vec<N>,
    /// Edges keyed on their canonical source.
    pub(super) buckets: Vec<Vec<E>>,
    /// Neighbor index; kept in lock-step with `nodes` for undirected graphs only.
    pub(super) mirror: MirrorIndex,
    pub(super) reporter: Reporter,
    _marker: PhantomData<Ty>,
}

/// Directed graph: one stored edge per ordered pair.
pub type SparseDigraph<N = Node, E = Edge> = Graph<N, E, Directed>;

/// Undirected graph: one stored edge per unordered pair plus a mirrored neighbor index.
pub type SparseGraph<N = Node, E = Edge> = Graph<N, E, Undirected>;

impl<N: GraphNode, E: GraphEdge, Ty: EdgeType> Graph<N, E, Ty> {
    /// Creates an empty graph reporting to a [`TracingSink`](crate::TracingSink).
    pub fn new() -> Self {
        Self::with_reporter(Reporter::tracing(Ty::NAME))
    }

    /// Creates an empty graph reporting to `sink`.
    pub fn with_sink(sink: Arc<dyn DiagnosticSink>) -> Self {
        Self::with_reporter(Reporter::new(Ty::NAME, sink))
    }

    /// Creates an empty graph with room for `capacity` nodes.
    pub fn with_capacity(capacity: usize) -> Self {
        let mut graph = Self::new();
        graph.nodes.reserve(capacity);
        graph.buckets.reserve(capacity);
        graph
    }

    fn with_reporter(reporter: Reporter) -> Self {
        Self {
            nodes: Vec::new(),
            buckets: Vec::new(),
            mirror: MirrorIndex::default(),
            reporter,
            _marker: PhantomData,
        }
    }

    /// Attributes every diagnostic of this graph to `owner`.
    #[must_use]
    pub fn attributed(mut self, owner: &'static str) -> Self {
        self.reporter = self.reporter.attributed_to(owner);
        self
    }

    /// Replaces the diagnostics sink.
    pub fn set_sink(&mut self, sink: Arc<dyn DiagnosticSink>) {
        self.reporter.set_sink(sink);
    }

    /// Returns `true` if the graph is directed.
    pub fn is_directed(&self) -> bool {
        Ty::is_directed()
    }

    /// Index the next appended node will receive.
    pub fn next_free_index(&self) -> NodeIndex {
        NodeIndex::new(self.nodes.len())
    }

    /// Adds a node, or reactivates a tombstoned slot.
    ///
    /// If `params.id` names an existing slot, that slot must be tombstoned; it
    /// is rebuilt in place and its index is returned. Any other valid id
    /// appends a new slot at [`next_free_index`](Self::next_free_index), and
    /// that index is returned (the stored id always equals the slot).
    ///
    /// # Errors
    /// - [`GraphError::InvalidIndex`] if `params.id` is the invalid sentinel.
    /// - [`GraphError::DuplicateId`] if the named slot is still active.
    pub fn add_node(&mut self, params: NodeParams<N::Payload>) -> Result<NodeIndex, GraphError> {
        let id = params.id;
        self.place_node("add_node", id, |index| N::from_params(NodeParams { id: index, ..params }))
    }

    /// Adds an already built node, or uses it to reactivate a tombstoned slot.
    ///
    /// Follows the same rules as [`add_node`](Self::add_node), keyed on
    /// `node.id()`. On append the node's id is rewritten to its slot.
    ///
    /// # Errors
    /// - [`GraphError::InvalidIndex`] if `node.id()` is the invalid sentinel.
    /// - [`GraphError::DuplicateId`] if the named slot is still active.
    pub fn insert_node(&mut self, mut node: N) -> Result<NodeIndex, GraphError> {
        let id = node.id();
        self.place_node("insert_node", id, |index| {
            node.set_id(index);
            node
        })
    }

    fn place_node(
        &mut self,
        operation: &'static str,
        id: NodeIndex,
        build: impl FnOnce(NodeIndex) -> N,
    ) -> Result<NodeIndex, GraphError> {
        if !id.is_valid() {
            return self.reporter.fail(operation, GraphError::InvalidIndex { index: id });
        }

        if let Some(slot) = self.nodes.get_mut(id.index()) {
            if slot.is_active() {
                return self.reporter.fail(operation, GraphError::DuplicateId { index: id });
            }
            *slot = build(id);
            return Ok(id);
        }

        let index = self.next_free_index();
        self.nodes.push(build(index));
        self.buckets.push(Vec::new());
        if !Ty::is_directed() {
            self.mirror.push_slot();
        }
        Ok(index)
    }

    /// Tombstones a node and drops every edge touching it.
    ///
    /// No other index changes meaning.
    ///
    /// # Errors
    /// [`GraphError::InvalidIndex`] if `id` is out of range.
    pub fn remove_node(&mut self, id: NodeIndex) -> Result<(), GraphError> {
        let Some(node) = self.nodes.get_mut(id.index()) else {
            return self.reporter.fail("remove_node", GraphError::InvalidIndex { index: id });
        };
        node.mark_invalid();

        if Ty::is_directed() {
            self.remove_invalid_edges();
        } else {
            self.detach_mirrored(id);
        }
        Ok(())
    }

    /// Adds an edge built from `params`.
    ///
    /// Accepts [`EdgeParams`] or `(from, to)` / `(from, to, cost)` tuples.
    ///
    /// # Errors
    /// - [`GraphError::InvalidIndex`] if an endpoint is out of range.
    /// - [`GraphError::InactiveEndpoint`] if an endpoint is tombstoned.
    /// - [`GraphError::DuplicateEdge`] if the canonical pair is already connected.
    pub fn add_edge(&mut self, params: impl Into<EdgeParams>) -> Result<(), GraphError> {
        let params = params.into();
        self.check_endpoints("add_edge", params.from, params.to)?;

        let (from, to) = Ty::canonical(params.from, params.to);
        if self.find_edge(from, to).is_some() {
            return self.reporter.fail("add_edge", GraphError::DuplicateEdge { from, to });
        }

        self.link(E::from_params(EdgeParams { from, to, ..params }));
        Ok(())
    }

    /// Adds an already built edge, reorienting it to canonical form if needed.
    ///
    /// # Errors
    /// Same as [`add_edge`](Self::add_edge).
    pub fn insert_edge(&mut self, mut edge: E) -> Result<(), GraphError> {
        let (from, to) = (edge.from_node(), edge.to_node());
        self.check_endpoints("insert_edge", from, to)?;

        let canonical = Ty::canonical(from, to);
        if canonical != (from, to) {
            edge.swap_endpoints();
        }
        let (from, to) = canonical;
        if self.find_edge(from, to).is_some() {
            return self.reporter.fail("insert_edge", GraphError::DuplicateEdge { from, to });
        }

        self.link(edge);
        Ok(())
    }

    /// Removes the edge stored for the pair.
    ///
    /// # Errors
    /// - [`GraphError::InvalidIndex`] if an endpoint is out of range.
    /// - [`GraphError::EdgeNotFound`] if no edge connects the pair.
    pub fn remove_edge(&mut self, from: NodeIndex, to: NodeIndex) -> Result<(), GraphError> {
        self.check_range("remove_edge", from, to)?;

        let (from, to) = Ty::canonical(from, to);
        let bucket = &mut self.buckets[from.index()];
        let Some(pos) = bucket.iter().position(|e| e.to_node() == to) else {
            return self.reporter.fail("remove_edge", GraphError::EdgeNotFound { from, to });
        };
        bucket.remove(pos);

        if !Ty::is_directed() {
            self.mirror.unlink(from, to);
        }
        Ok(())
    }

    /// Returns the node at `id`, or `None` if it is tombstoned.
    ///
    /// Out-of-range ids are reported as [`GraphError::InvalidIndex`].
    pub fn get_node(&self, id: NodeIndex) -> Option<&N> {
        let Some(node) = self.nodes.get(id.index()) else {
            self.reporter.report("get_node", &GraphError::InvalidIndex { index: id });
            return None;
        };
        node.is_active().then_some(node)
    }

    /// Mutable access to an active node's payload.
    pub fn get_node_mut(&mut self, id: NodeIndex) -> Option<&mut N> {
        let Some(node) = self.nodes.get_mut(id.index()) else {
            self.reporter.report("get_node_mut", &GraphError::InvalidIndex { index: id });
            return None;
        };
        node.is_active().then_some(node)
    }

    /// Returns the edge stored for the pair.
    ///
    /// Invalid endpoints and misses are reported.
    pub fn get_edge(&self, from: NodeIndex, to: NodeIndex) -> Option<&E> {
        self.check_endpoints("get_edge", from, to).ok()?;

        let (from, to) = Ty::canonical(from, to);
        let edge = self.find_edge(from, to);
        if edge.is_none() {
            self.reporter.report("get_edge", &GraphError::EdgeNotFound { from, to });
        }
        edge
    }

    /// Updates the cost of the edge stored for the pair.
    ///
    /// # Errors
    /// - [`GraphError::InvalidIndex`] if an endpoint is out of range.
    /// - [`GraphError::EdgeNotFound`] if no edge connects the pair.
    pub fn set_edge_cost(&mut self, from: NodeIndex, to: NodeIndex, cost: f32) -> Result<(), GraphError> {
        self.check_range("set_edge_cost", from, to)?;

        let (from, to) = Ty::canonical(from, to);
        match self.buckets[from.index()].iter_mut().find(|e| e.to_node() == to) {
            Some(edge) => {
                edge.set_cost(cost);
                Ok(())
            }
            None => self.reporter.fail("set_edge_cost", GraphError::EdgeNotFound { from, to }),
        }
    }

    /// Returns `true` if both endpoints are active and connected.
    pub fn is_edge_present(&self, from: NodeIndex, to: NodeIndex) -> bool {
        if !self.is_node_present(from) || !self.is_node_present(to) {
            return false;
        }
        let (from, to) = Ty::canonical(from, to);
        self.find_edge(from, to).is_some()
    }

    /// Returns `true` if `id` is in range and not tombstoned.
    pub fn is_node_present(&self, id: NodeIndex) -> bool {
        self.nodes.get(id.index()).is_some_and(GraphNode::is_active)
    }

    /// Number of slots, active or tombstoned.
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Number of active nodes.
    pub fn active_node_count(&self) -> usize {
        self.nodes.iter().filter(|n| n.is_active()).count()
    }

    /// Number of tombstoned slots.
    pub fn inactive_node_count(&self) -> usize {
        self.node_count() - self.active_node_count()
    }

    /// Number of stored edges (one per connection in undirected graphs).
    pub fn edge_count(&self) -> usize {
        self.buckets.iter().map(Vec::len).sum()
    }

    /// Returns `true` if the graph has no slots at all.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Drops every node and edge and restarts indexing at zero.
    pub fn clear(&mut self) {
        self.buckets.clear();
        self.nodes.clear();
        self.mirror.clear();
    }

    /// Iterates over active nodes in index order.
    pub fn nodes(&self) -> impl Iterator<Item = &N> + '_ {
        self.nodes.iter().filter(|n| n.is_active())
    }

    /// Iterates over every stored edge, in canonical form.
    pub fn edges(&self) -> impl Iterator<Item = &E> + '_ {
        self.buckets.iter().flatten()
    }

    pub(super) fn find_edge(&self, from: NodeIndex, to: NodeIndex) -> Option<&E> {
        self.buckets.get(from.index())?.iter().find(|e| e.to_node() == to)
    }

    fn link(&mut self, edge: E) {
        let (from, to) = (edge.from_node(), edge.to_node());
        self.buckets[from.index()].push(edge);
        if !Ty::is_directed() {
            self.mirror.link(from, to);
        }
    }

    fn check_range(&self, operation: &'static str, from: NodeIndex, to: NodeIndex) -> Result<(), GraphError> {
        for index in [from, to] {
            if index.index() >= self.nodes.len() {
                return self.reporter.fail(operation, GraphError::InvalidIndex { index });
            }
        }
        Ok(())
    }

    fn check_endpoints(&self, operation: &'static str, from: NodeIndex, to: NodeIndex) -> Result<(), GraphError> {
        self.check_range(operation, from, to)?;
        if !self.nodes[from.index()].is_active() || !self.nodes[to.index()].is_active() {
            return self.reporter.fail(operation, GraphError::InactiveEndpoint { from, to });
        }
        Ok(())
    }
}

impl<N: GraphNode, E: GraphEdge, Ty: EdgeType> Default for Graph<N, E, Ty> {
    fn default() -> Self {
        Self::new()
    }
}

impl<N: GraphNode, E: GraphEdge, Ty: EdgeType> Traversable for Graph<N, E, Ty> {
    fn node_count(&self) -> usize {
        self.nodes.len()
    }

    fn is_node_present(&self, index: NodeIndex) -> bool {
        Graph::is_node_present(self, index)
    }

    fn leading_edges(&self, index: NodeIndex) -> Vec<Edge> {
        if Ty::is_directed() {
            self.bucket_leading_edges(index)
        } else {
            self.mirrored_leading_edges(index)
        }
    }
}

impl<N: GraphNode, E: GraphEdge> Graph<N, E, Undirected> {
    /// Neighbors of `index` in insertion order (empty for unknown indices).
    pub fn neighbors(&self, index: NodeIndex) -> &[NodeIndex] {
        self.mirror.neighbors(index)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diagnostics::RecordingSink;
    use crate::graph::{NavGraphNode, Position};

    fn n(i: usize) -> NodeIndex {
        NodeIndex::new(i)
    }

    fn digraph_with(count: usize) -> (SparseDigraph, Arc<RecordingSink>) {
        let sink = Arc::new(RecordingSink::new());
        let mut graph: SparseDigraph = SparseDigraph::with_sink(sink.clone());
        for i in 0..count {
            assert_eq!(graph.add_node(NodeParams::new(n(i))), Ok(n(i)));
        }
        (graph, sink)
    }

    #[test]
    fn append_assigns_increasing_indices() {
        let (mut graph, sink) = digraph_with(3);
        assert_eq!(graph.next_free_index(), n(3));

        // Ids past the end append at the next free slot.
        assert_eq!(graph.add_node(NodeParams::new(n(10))), Ok(n(3)));
        assert_eq!(graph.get_node(n(3)).map(GraphNode::id), Some(n(3)));
        assert_eq!(graph.next_free_index(), n(4));
        assert!(sink.is_empty());
    }

    #[test]
    fn invalid_and_duplicate_ids_are_rejected() {
        let (mut graph, sink) = digraph_with(2);

        assert_eq!(
            graph.add_node(NodeParams::new(NodeIndex::INVALID)),
            Err(GraphError::InvalidIndex {
                index: NodeIndex::INVALID
            })
        );
        assert_eq!(
            graph.add_node(NodeParams::new(n(1))),
            Err(GraphError::DuplicateId { index: n(1) })
        );
        assert_eq!(graph.node_count(), 2);
        assert_eq!(sink.len(), 2);
    }

    #[test]
    fn reactivation_returns_reused_index() {
        let (mut graph, _sink) = digraph_with(3);
        graph.remove_node(n(1)).unwrap();
        assert_eq!(graph.active_node_count(), 2);
        assert_eq!(graph.inactive_node_count(), 1);

        // The reactivated slot's own index comes back, not the next free one.
        assert_eq!(graph.add_node(NodeParams::new(n(1))), Ok(n(1)));
        assert_eq!(graph.node_count(), 3);
        assert_eq!(graph.active_node_count(), 3);
        assert_eq!(graph.next_free_index(), n(3));
    }

    #[test]
    fn insert_node_appends_and_reactivates() {
        let (mut graph, sink) = digraph_with(2);

        // Append: the requested id only means "past the end".
        let appended = Node::from_params(NodeParams::new(n(40)));
        assert_eq!(graph.insert_node(appended), Ok(n(2)));
        assert_eq!(graph.get_node(n(2)).map(GraphNode::id), Some(n(2)));
        assert_eq!(graph.next_free_index(), n(3));

        // Reactivate: the built node replaces the tombstone in place.
        graph.remove_node(n(1)).unwrap();
        let revived = Node::from_params(NodeParams::new(n(1)));
        assert_eq!(graph.insert_node(revived), Ok(n(1)));
        assert!(graph.is_node_present(n(1)));
        assert_eq!(graph.node_count(), 3);
        assert!(sink.is_empty());

        assert_eq!(
            graph.insert_node(Node::from_params(NodeParams::new(n(0)))),
            Err(GraphError::DuplicateId { index: n(0) })
        );
        assert_eq!(
            graph.insert_node(Node::default()),
            Err(GraphError::InvalidIndex {
                index: NodeIndex::INVALID
            })
        );
        assert_eq!(graph.node_count(), 3);
        assert_eq!(sink.entries()[0].operation, "insert_node");
        assert_eq!(sink.len(), 2);
    }

    #[test]
    fn insert_node_keeps_payload() {
        let mut graph: SparseGraph<NavGraphNode> = SparseGraph::new();
        let built = NavGraphNode::from_params(NodeParams::with_payload(n(0), Position::new(1.5, -2.0)));
        let idx = graph.insert_node(built).unwrap();
        assert_eq!(graph.get_node(idx).map(NavGraphNode::position), Some(Position::new(1.5, -2.0)));
    }

    #[test]
    fn edges_require_active_endpoints() {
        let (mut graph, sink) = digraph_with(3);
        graph.remove_node(n(2)).unwrap();

        assert_eq!(graph.add_edge((0, 5)), Err(GraphError::InvalidIndex { index: n(5) }));
        assert_eq!(
            graph.add_edge((0, 2)),
            Err(GraphError::InactiveEndpoint { from: n(0), to: n(2) })
        );
        assert_eq!(graph.edge_count(), 0);
        assert_eq!(sink.len(), 2);
    }

    #[test]
    fn duplicate_edges_are_rejected() {
        let (mut graph, _sink) = digraph_with(2);
        graph.add_edge((0, 1, 2.5)).unwrap();

        assert_eq!(
            graph.add_edge((0, 1)),
            Err(GraphError::DuplicateEdge { from: n(0), to: n(1) })
        );
        assert_eq!(
            graph.insert_edge(Edge::new(n(0), n(1))),
            Err(GraphError::DuplicateEdge { from: n(0), to: n(1) })
        );
        assert_eq!(graph.edge_count(), 1);

        // Opposite direction is a different ordered pair.
        graph.add_edge((1, 0)).unwrap();
        assert_eq!(graph.edge_count(), 2);
    }

    #[test]
    fn edge_cost_lookup_and_update() {
        let (mut graph, sink) = digraph_with(3);
        graph.add_edge((0, 1)).unwrap();

        assert_eq!(graph.get_edge(n(0), n(1)).map(GraphEdge::cost), Some(1.0));
        graph.set_edge_cost(n(0), n(1), 4.0).unwrap();
        assert!(graph
            .get_edge(n(0), n(1))
            .unwrap()
            .approx_eq(&Edge::with_cost(n(0), n(1), 4.0)));

        assert!(graph.get_edge(n(1), n(0)).is_none());
        assert_eq!(
            sink.last_error(),
            Some(GraphError::EdgeNotFound { from: n(1), to: n(0) })
        );
        assert_eq!(
            graph.set_edge_cost(n(0), n(9), 1.0),
            Err(GraphError::InvalidIndex { index: n(9) })
        );
        assert_eq!(
            graph.set_edge_cost(n(0), n(2), 1.0),
            Err(GraphError::EdgeNotFound { from: n(0), to: n(2) })
        );
    }

    #[test]
    fn remove_edge_reports_misses() {
        let (mut graph, _sink) = digraph_with(2);
        graph.add_edge((0, 1)).unwrap();

        graph.remove_edge(n(0), n(1)).unwrap();
        assert!(!graph.is_edge_present(n(0), n(1)));
        assert_eq!(
            graph.remove_edge(n(0), n(1)),
            Err(GraphError::EdgeNotFound { from: n(0), to: n(1) })
        );
        assert_eq!(
            graph.remove_edge(n(3), n(1)),
            Err(GraphError::InvalidIndex { index: n(3) })
        );
    }

    #[test]
    fn get_node_misses_never_panic() {
        let (mut graph, sink) = digraph_with(2);
        graph.remove_node(n(0)).unwrap();

        assert!(graph.get_node(n(0)).is_none());
        assert!(sink.is_empty());
        assert!(graph.get_node(NodeIndex::INVALID).is_none());
        assert!(graph.get_node(n(7)).is_none());
        assert_eq!(sink.len(), 2);
        assert_eq!(
            graph.remove_node(n(7)),
            Err(GraphError::InvalidIndex { index: n(7) })
        );
    }

    #[test]
    fn clear_restarts_indexing() {
        let (mut graph, _sink) = digraph_with(4);
        graph.add_edge((0, 1)).unwrap();
        graph.clear();

        assert!(graph.is_empty());
        assert_eq!(graph.edge_count(), 0);
        assert_eq!(graph.add_node(NodeParams::new(n(0))), Ok(n(0)));
    }

    #[test]
    fn nav_payload_is_carried_through() {
        let mut graph: SparseGraph<NavGraphNode> = SparseGraph::new();
        let idx = graph
            .add_node(NodeParams::with_payload(n(0), Position::new(3.0, 4.0)))
            .unwrap();
        graph
            .get_node_mut(idx)
            .unwrap()
            .set_position(Position::new(5.0, 6.0));

        assert_eq!(graph.get_node(idx).unwrap().position(), Position::new(5.0, 6.0));
        assert_eq!(graph.nodes().count(), 1);
    }
}
