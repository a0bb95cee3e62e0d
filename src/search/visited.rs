//! Per-run working tables for searches.
//!
//! - `VisitedFlags`: one [`VisitState`] per slot
//! - `RouteTable`: one predecessor per slot
//!
//! Both are sized from the search's capacity hint, grow when a larger graph is
//! searched, and are reset (never reallocated) between runs.

use crate::graph::NodeIndex;

/// Whether a node has been reached during the current run.
///
/// Transitions only `Unvisited -> Visited` within one run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum VisitState {
    /// Not reached yet.
    #[default]
    Unvisited,
    /// Reached (queued for BFS, expanded for DFS).
    Visited,
}

/// A per-node visited flag vector.
#[derive(Debug, Clone, Default)]
pub(crate) struct VisitedFlags {
    flags: Vec<VisitState>,
}

impl VisitedFlags {
    pub(crate) fn new(len: usize) -> Self {
        Self {
            flags: vec![VisitState::Unvisited; len],
        }
    }

    #[inline(always)]
    pub(crate) fn len(&self) -> usize {
        self.flags.len()
    }

    /// Clears every flag and grows to at least `len` slots.
    pub(crate) fn reset(&mut self, len: usize) {
        self.flags.fill(VisitState::Unvisited);
        if self.flags.len() < len {
            self.flags.resize(len, VisitState::Unvisited);
        }
    }

    /// Out-of-range indices read as visited so they are never expanded.
    #[inline(always)]
    pub(crate) fn is_visited(&self, index: NodeIndex) -> bool {
        self.flags
            .get(index.index())
            .map_or(true, |&state| state == VisitState::Visited)
    }

    #[inline(always)]
    pub(crate) fn mark(&mut self, index: NodeIndex) {
        if let Some(state) = self.flags.get_mut(index.index()) {
            *state = VisitState::Visited;
        }
    }

    /// Marks `index` and returns `true` iff it was unvisited.
    #[inline(always)]
    pub(crate) fn try_visit(&mut self, index: NodeIndex) -> bool {
        match self.flags.get_mut(index.index()) {
            Some(state @ VisitState::Unvisited) => {
                *state = VisitState::Visited;
                true
            }
            _ => false,
        }
    }

    pub(crate) fn state(&self, index: NodeIndex) -> Option<VisitState> {
        self.flags.get(index.index()).copied()
    }
}

/// Predecessor of each node on the path being explored.
#[derive(Debug, Clone, Default)]
pub(crate) struct RouteTable {
    parents: Vec<NodeIndex>,
}

impl RouteTable {
    pub(crate) fn new(len: usize) -> Self {
        Self {
            parents: vec![NodeIndex::INVALID; len],
        }
    }

    /// Forgets every parent and grows to at least `len` slots.
    pub(crate) fn reset(&mut self, len: usize) {
        self.parents.fill(NodeIndex::INVALID);
        if self.parents.len() < len {
            self.parents.resize(len, NodeIndex::INVALID);
        }
    }

    #[inline(always)]
    pub(crate) fn set(&mut self, node: NodeIndex, parent: NodeIndex) {
        if let Some(slot) = self.parents.get_mut(node.index()) {
            *slot = parent;
        }
    }

    /// Parent of `node`, or `None` if it has none.
    #[inline(always)]
    pub(crate) fn parent(&self, node: NodeIndex) -> Option<NodeIndex> {
        self.parents
            .get(node.index())
            .copied()
            .filter(|parent| parent.is_valid())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn n(i: usize) -> NodeIndex {
        NodeIndex::new(i)
    }

    #[test]
    fn flags_reset_and_grow() {
        let mut flags = VisitedFlags::new(2);
        assert!(flags.try_visit(n(1)));
        assert!(!flags.try_visit(n(1)));
        assert!(flags.is_visited(n(1)));
        assert!(flags.is_visited(n(5)));

        flags.reset(4);
        assert_eq!(flags.len(), 4);
        assert_eq!(flags.state(n(1)), Some(VisitState::Unvisited));
        flags.mark(n(3));
        assert_eq!(flags.state(n(3)), Some(VisitState::Visited));
    }

    #[test]
    fn route_table_parents() {
        let mut route = RouteTable::new(3);
        assert_eq!(route.parent(n(2)), None);
        route.set(n(2), n(0));
        assert_eq!(route.parent(n(2)), Some(n(0)));

        route.reset(3);
        assert_eq!(route.parent(n(2)), None);
        assert_eq!(route.parent(NodeIndex::INVALID), None);
    }
}
