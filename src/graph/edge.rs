//! Edge kinds and the value-type edge descriptor.

use num_traits::Float;

use super::node::NodeIndex;

/// Tolerance used when comparing edge costs.
pub const EDGE_COST_EPSILON: f32 = 1e-4;

/// Cost assigned when the caller does not give one.
pub const DEFAULT_EDGE_COST: f32 = 1.0;

/// Returns `true` if `a` and `b` differ by strictly less than `epsilon`.
#[inline]
pub fn approx_equal<T: Float>(a: T, b: T, epsilon: T) -> bool {
    (a - b).abs() < epsilon
}

/// Parameters for building an edge.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EdgeParams {
    /// Source node.
    pub from: NodeIndex,
    /// Target node.
    pub to: NodeIndex,
    /// Traversal cost.
    pub cost: f32,
}

impl EdgeParams {
    /// Parameters with [`DEFAULT_EDGE_COST`].
    pub const fn new(from: NodeIndex, to: NodeIndex) -> Self {
        Self {
            from,
            to,
            cost: DEFAULT_EDGE_COST,
        }
    }

    /// Overrides the cost.
    #[must_use]
    pub const fn with_cost(mut self, cost: f32) -> Self {
        self.cost = cost;
        self
    }
}

impl From<(NodeIndex, NodeIndex)> for EdgeParams {
    fn from((from, to): (NodeIndex, NodeIndex)) -> Self {
        Self::new(from, to)
    }
}

impl From<(NodeIndex, NodeIndex, f32)> for EdgeParams {
    fn from((from, to, cost): (NodeIndex, NodeIndex, f32)) -> Self {
        Self::new(from, to).with_cost(cost)
    }
}

impl From<(usize, usize)> for EdgeParams {
    fn from((from, to): (usize, usize)) -> Self {
        Self::new(NodeIndex::new(from), NodeIndex::new(to))
    }
}

impl From<(usize, usize, f32)> for EdgeParams {
    fn from((from, to, cost): (usize, usize, f32)) -> Self {
        Self::new(NodeIndex::new(from), NodeIndex::new(to)).with_cost(cost)
    }
}

/// An edge kind storable in a [`Graph`](crate::Graph).
pub trait GraphEdge {
    /// Builds an edge from its parameters.
    fn from_params(params: EdgeParams) -> Self;

    /// Source node.
    fn from_node(&self) -> NodeIndex;

    /// Target node.
    fn to_node(&self) -> NodeIndex;

    /// Traversal cost.
    fn cost(&self) -> f32;

    /// Updates the traversal cost.
    fn set_cost(&mut self, cost: f32);

    /// Swaps source and target.
    fn swap_endpoints(&mut self);

    /// Value-type copy of the connection.
    fn descriptor(&self) -> Edge {
        Edge::with_cost(self.from_node(), self.to_node(), self.cost())
    }
}

/// A directed connection with a cost.
///
/// Used both as the default stored edge and as the lightweight descriptor
/// handed out by traversals. Compare with [`Edge::approx_eq`]; costs are
/// floats, so there is no `PartialEq`.
#[derive(Debug, Clone, Copy)]
pub struct Edge {
    from: NodeIndex,
    to: NodeIndex,
    cost: f32,
}

impl Edge {
    /// Edge with [`DEFAULT_EDGE_COST`].
    pub const fn new(from: NodeIndex, to: NodeIndex) -> Self {
        Self::with_cost(from, to, DEFAULT_EDGE_COST)
    }

    /// Edge with an explicit cost.
    pub const fn with_cost(from: NodeIndex, to: NodeIndex, cost: f32) -> Self {
        Self { from, to, cost }
    }

    /// Zero-cost self-loop used to seed both BFS and DFS frontiers.
    ///
    /// The seed only records the source as its own parent and is never
    /// copied into a spanning tree, so its cost is never observed.
    pub(crate) const fn seed(at: NodeIndex) -> Self {
        Self::with_cost(at, at, 0.0)
    }

    /// Source node.
    #[inline(always)]
    pub const fn from_node(&self) -> NodeIndex {
        self.from
    }

    /// Target node.
    #[inline(always)]
    pub const fn to_node(&self) -> NodeIndex {
        self.to
    }

    /// Traversal cost.
    #[inline(always)]
    pub const fn cost(&self) -> f32 {
        self.cost
    }

    /// `(from, to)` pair.
    pub const fn endpoints(&self) -> (NodeIndex, NodeIndex) {
        (self.from, self.to)
    }

    /// Same endpoints and costs within [`EDGE_COST_EPSILON`].
    pub fn approx_eq(&self, other: &Edge) -> bool {
        self.from == other.from
            && self.to == other.to
            && approx_equal(self.cost, other.cost, EDGE_COST_EPSILON)
    }
}

impl GraphEdge for Edge {
    fn from_params(params: EdgeParams) -> Self {
        Self::with_cost(params.from, params.to, params.cost)
    }

    fn from_node(&self) -> NodeIndex {
        self.from
    }

    fn to_node(&self) -> NodeIndex {
        self.to
    }

    fn cost(&self) -> f32 {
        self.cost
    }

    fn set_cost(&mut self, cost: f32) {
        self.cost = cost;
    }

    fn swap_endpoints(&mut self) {
        core::mem::swap(&mut self.from, &mut self.to);
    }

    fn descriptor(&self) -> Edge {
        *self
    }
}
