//! Node identities and node kinds.

use std::fmt;

/// A stable node index.
///
/// Indices are handed out by [`Graph::add_node`](crate::Graph::add_node) and
/// never renumbered. [`NodeIndex::INVALID`] marks a tombstoned slot.
#[repr(transparent)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct NodeIndex(usize);

impl NodeIndex {
    /// The "logically absent" sentinel.
    pub const INVALID: NodeIndex = NodeIndex(usize::MAX);

    /// Wraps a raw slot index.
    #[inline(always)]
    pub const fn new(index: usize) -> Self {
        Self(index)
    }

    /// Raw slot index.
    #[inline(always)]
    pub const fn index(self) -> usize {
        self.0
    }

    /// Returns `true` unless this is the sentinel.
    #[inline(always)]
    pub const fn is_valid(self) -> bool {
        self.0 != usize::MAX
    }
}

impl From<usize> for NodeIndex {
    fn from(index: usize) -> Self {
        Self(index)
    }
}

impl fmt::Display for NodeIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_valid() {
            write!(f, "{}", self.0)
        } else {
            f.write_str("INVALID")
        }
    }
}

/// Parameters for building or reactivating a node.
///
/// `id` below the graph's current size names a tombstoned slot to reactivate;
/// anything else appends a new slot.
#[derive(Debug, Clone, PartialEq)]
pub struct NodeParams<P> {
    /// Requested slot.
    pub id: NodeIndex,
    /// Kind-specific payload.
    pub payload: P,
}

impl<P: Default> NodeParams<P> {
    /// Parameters with a default payload.
    pub fn new(id: NodeIndex) -> Self {
        Self {
            id,
            payload: P::default(),
        }
    }
}

impl<P> NodeParams<P> {
    /// Parameters with an explicit payload.
    pub fn with_payload(id: NodeIndex, payload: P) -> Self {
        Self { id, payload }
    }
}

/// A node kind storable in a [`Graph`](crate::Graph).
///
/// `from_params` is the factory the graph uses for both fresh slots and
/// reactivated ones.
pub trait GraphNode {
    /// Data attached to the node. Opaque to the graph and to searches.
    type Payload;

    /// Builds a node from its parameters.
    fn from_params(params: NodeParams<Self::Payload>) -> Self;

    /// Current id; [`NodeIndex::INVALID`] once tombstoned.
    fn id(&self) -> NodeIndex;

    /// Overwrites the id; the graph uses it to pin a node to its slot.
    fn set_id(&mut self, id: NodeIndex);

    /// Tombstones the node.
    fn mark_invalid(&mut self) {
        self.set_id(NodeIndex::INVALID);
    }

    /// Returns `true` if the node has not been tombstoned.
    fn is_active(&self) -> bool {
        self.id().is_valid()
    }
}

/// A plain node carrying only its identity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Node {
    id: NodeIndex,
}

impl Default for Node {
    fn default() -> Self {
        Self {
            id: NodeIndex::INVALID,
        }
    }
}

impl GraphNode for Node {
    type Payload = ();

    fn from_params(params: NodeParams<()>) -> Self {
        Self { id: params.id }
    }

    fn id(&self) -> NodeIndex {
        self.id
    }

    fn set_id(&mut self, id: NodeIndex) {
        self.id = id;
    }
}

/// A 2D position attached to navigation nodes.
#[derive(Debug, Default, Clone, Copy, PartialEq)]
pub struct Position {
    /// Horizontal coordinate.
    pub x: f32,
    /// Vertical coordinate.
    pub y: f32,
}

impl Position {
    /// Creates a position.
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

/// A node for navigation graphs, positioned in 2D space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NavGraphNode {
    id: NodeIndex,
    position: Position,
}

impl NavGraphNode {
    /// Position of the node.
    pub fn position(&self) -> Position {
        self.position
    }

    /// Moves the node.
    pub fn set_position(&mut self, position: Position) {
        self.position = position;
    }
}

impl Default for NavGraphNode {
    fn default() -> Self {
        Self {
            id: NodeIndex::INVALID,
            position: Position::default(),
        }
    }
}

impl GraphNode for NavGraphNode {
    type Payload = Position;

    fn from_params(params: NodeParams<Position>) -> Self {
        Self {
            id: params.id,
            position: params.payload,
        }
    }

    fn id(&self) -> NodeIndex {
        self.id
    }

    fn set_id(&mut self, id: NodeIndex) {
        self.id = id;
    }
}
