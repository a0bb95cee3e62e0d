//! Direction tags.
//!
//! A graph's direction is fixed at the type level. The tag decides how a
//! `(from, to)` pair is canonicalized before any lookup, insertion, removal or
//! cost update, and whether the mirrored neighbor index is maintained.

use super::node::NodeIndex;

mod sealed {
    pub trait Sealed {}
    impl Sealed for super::Directed {}
    impl Sealed for super::Undirected {}
}

/// Marker trait for graph edge directionality.
pub trait EdgeType: sealed::Sealed {
    /// Component name used in diagnostics.
    const NAME: &'static str;

    /// Returns true if the graph is directed.
    fn is_directed() -> bool;

    /// Canonical storage order of a pair.
    fn canonical(from: NodeIndex, to: NodeIndex) -> (NodeIndex, NodeIndex);
}

/// Marker for directed graphs: one edge per ordered pair.
#[derive(Debug, Clone, Copy, Default)]
pub struct Directed;

/// Marker for undirected graphs: one edge per unordered pair, stored `from <= to`.
#[derive(Debug, Clone, Copy, Default)]
pub struct Undirected;

impl EdgeType for Directed {
    const NAME: &'static str = "SparseDigraph";

    #[inline(always)]
    fn is_directed() -> bool {
        true
    }

    #[inline(always)]
    fn canonical(from: NodeIndex, to: NodeIndex) -> (NodeIndex, NodeIndex) {
        (from, to)
    }
}

impl EdgeType for Undirected {
    const NAME: &'static str = "SparseGraph";

    #[inline(always)]
    fn is_directed() -> bool {
        false
    }

    #[inline(always)]
    fn canonical(from: NodeIndex, to: NodeIndex) -> (NodeIndex, NodeIndex) {
        if from > to {
            (to, from)
        } else {
            (from, to)
        }
    }
}
