//! Unweighted path search over any [`Traversable`] graph.
//!
//! A [`GraphSearch`] owns its working state (visited flags, route table,
//! frontier) and reuses it across runs. Each run goes through the same steps:
//!
//! 1. **Validate**: sentinel or absent endpoints fail immediately; `source == target`
//!    succeeds immediately without traversal.
//! 2. **Reset**: clear visited flags and the route table.
//! 3. **Explore**: the selected [`SearchStrategy`] drains its frontier until the
//!    target is reached or nothing is left.
//! 4. **Reconstruct** (optional): walk the route table back from the target.
//!
//! The three entry points ([`search`](GraphSearch::search),
//! [`search_path`](GraphSearch::search_path),
//! [`search_with_tree`](GraphSearch::search_with_tree)) share one exploration
//! loop and differ only in what they hand back.

mod bfs;
mod dfs;
mod visited;

use std::collections::VecDeque;
use std::sync::Arc;

use crate::diagnostics::{DiagnosticSink, Reporter};
use crate::error::GraphError;
use crate::graph::{Edge, NodeIndex, Traversable};

pub use visited::VisitState;
use visited::{RouteTable, VisitedFlags};

/// Capacity hint used by [`GraphSearch::default`].
pub const DEFAULT_SEARCH_CAPACITY: usize = 64;

/// Frontier discipline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SearchStrategy {
    /// FIFO frontier; nodes are marked when queued. Finds a path with the
    /// fewest edges.
    #[default]
    BreadthFirst,
    /// LIFO frontier; nodes are marked when expanded. Finds *a* path.
    DepthFirst,
}

/// Result of validating a pair of endpoints.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Validation {
    /// An endpoint is the sentinel or absent from the graph.
    Invalid,
    /// `source == target`.
    Trivial,
    /// A traversal is needed.
    Valid,
}

/// How a search run ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchOutcome {
    /// Rejected during validation.
    Invalid,
    /// Source and target are the same node; nothing was traversed.
    Trivial,
    /// The target was reached.
    Found,
    /// The frontier ran dry without reaching the target.
    Exhausted,
}

impl SearchOutcome {
    /// `true` for [`Trivial`](Self::Trivial) and [`Found`](Self::Found).
    pub fn is_success(self) -> bool {
        matches!(self, Self::Trivial | Self::Found)
    }
}

/// Working state shared by the exploration loops.
#[derive(Debug, Clone, Default)]
pub(crate) struct SearchState {
    pub(crate) visited: VisitedFlags,
    pub(crate) route: RouteTable,
    pub(crate) frontier: VecDeque<Edge>,
    /// Spanning-tree scratch; only handed to callers on success.
    pub(crate) tree: Vec<Edge>,
    pub(crate) record_tree: bool,
}

impl SearchState {
    fn with_capacity(capacity: usize) -> Self {
        Self {
            visited: VisitedFlags::new(capacity),
            route: RouteTable::new(capacity),
            frontier: VecDeque::with_capacity(capacity),
            tree: Vec::new(),
            record_tree: false,
        }
    }

    fn reset(&mut self, node_count: usize) {
        self.visited.reset(node_count);
        self.route.reset(node_count);
        self.frontier.clear();
        self.tree.clear();
    }

    /// Takes `edge` into the route table and, if requested, the spanning tree.
    #[inline]
    pub(crate) fn settle(&mut self, edge: Edge) {
        self.route.set(edge.to_node(), edge.from_node());
        // The seed is the only self-loop that ever leaves the frontier.
        if self.record_tree && edge.from_node() != edge.to_node() {
            self.tree.push(edge);
        }
    }
}

/// A reusable BFS/DFS path search.
///
/// ```rust
/// use sparse_graph::{GraphSearch, NodeIndex, NodeParams, SearchOutcome, SparseDigraph};
///
/// let mut graph: SparseDigraph = SparseDigraph::new();
/// for i in 0..3 {
///     graph.add_node(NodeParams::new(NodeIndex::new(i))).unwrap();
/// }
/// graph.add_edge((0, 1)).unwrap();
///
/// let mut dfs = GraphSearch::dfs(graph.node_count());
/// assert_eq!(dfs.search(NodeIndex::new(0), NodeIndex::new(1), &graph), SearchOutcome::Found);
/// assert_eq!(dfs.search(NodeIndex::new(0), NodeIndex::new(2), &graph), SearchOutcome::Exhausted);
/// ```
#[derive(Debug, Clone)]
pub struct GraphSearch {
    strategy: SearchStrategy,
    state: SearchState,
    reporter: Reporter,
}

impl GraphSearch {
    /// Creates a search whose working state is pre-sized for `capacity` nodes.
    ///
    /// The state grows on demand when a larger graph is searched.
    pub fn new(strategy: SearchStrategy, capacity: usize) -> Self {
        Self {
            strategy,
            state: SearchState::with_capacity(capacity),
            reporter: Reporter::tracing("GraphSearch"),
        }
    }

    /// Breadth-first search.
    pub fn bfs(capacity: usize) -> Self {
        Self::new(SearchStrategy::BreadthFirst, capacity)
    }

    /// Depth-first search.
    pub fn dfs(capacity: usize) -> Self {
        Self::new(SearchStrategy::DepthFirst, capacity)
    }

    /// Reports rejected searches to `sink`.
    #[must_use]
    pub fn with_sink(mut self, sink: Arc<dyn DiagnosticSink>) -> Self {
        self.reporter.set_sink(sink);
        self
    }

    /// Selected strategy.
    pub fn strategy(&self) -> SearchStrategy {
        self.strategy
    }

    /// Number of nodes the working state currently covers.
    pub fn capacity(&self) -> usize {
        self.state.visited.len()
    }

    /// Checks the endpoints before any traversal.
    ///
    /// Invalid endpoints are reported as [`GraphError::InvalidSearchEndpoints`].
    pub fn validate<G>(&self, source: NodeIndex, target: NodeIndex, graph: &G) -> Validation
    where
        G: Traversable + ?Sized,
    {
        let present = |index: NodeIndex| index.is_valid() && graph.is_node_present(index);
        if !present(source) || !present(target) {
            self.reporter.report(
                "validate",
                &GraphError::InvalidSearchEndpoints {
                    origin: source,
                    target,
                },
            );
            return Validation::Invalid;
        }
        if source == target {
            return Validation::Trivial;
        }
        Validation::Valid
    }

    /// Clears visited flags, route table and frontier, growing them to `node_count`.
    pub fn reset(&mut self, node_count: usize) {
        self.state.reset(node_count);
    }

    /// Path existence only.
    pub fn search<G>(&mut self, source: NodeIndex, target: NodeIndex, graph: &G) -> SearchOutcome
    where
        G: Traversable + ?Sized,
    {
        self.run(source, target, graph, false)
    }

    /// Path existence plus the path itself, `source` first.
    ///
    /// `path` is overwritten on success (a single node for trivial searches) and
    /// left untouched otherwise.
    pub fn search_path<G>(
        &mut self,
        source: NodeIndex,
        target: NodeIndex,
        graph: &G,
        path: &mut Vec<NodeIndex>,
    ) -> SearchOutcome
    where
        G: Traversable + ?Sized,
    {
        let outcome = self.run(source, target, graph, false);
        self.write_path(outcome, source, target, path);
        outcome
    }

    /// Path existence, the path, and every edge the run settled.
    ///
    /// The spanning tree excludes the seed self-loop and is listed in the
    /// order edges were settled. Both outputs are left untouched on failure.
    pub fn search_with_tree<G>(
        &mut self,
        source: NodeIndex,
        target: NodeIndex,
        graph: &G,
        path: &mut Vec<NodeIndex>,
        spanning_tree: &mut Vec<Edge>,
    ) -> SearchOutcome
    where
        G: Traversable + ?Sized,
    {
        let outcome = self.run(source, target, graph, true);
        self.write_path(outcome, source, target, path);
        match outcome {
            SearchOutcome::Found => {
                spanning_tree.clear();
                spanning_tree.extend_from_slice(&self.state.tree);
            }
            // Nothing was explored; the scratch still holds the previous run.
            SearchOutcome::Trivial => spanning_tree.clear(),
            SearchOutcome::Invalid | SearchOutcome::Exhausted => {}
        }
        outcome
    }

    /// Rebuilds the path of the last run by walking the route table back from `target`.
    ///
    /// Returns `false` (leaving `path` empty) if `target` was not reached from `source`.
    pub fn target_path(&self, source: NodeIndex, target: NodeIndex, path: &mut Vec<NodeIndex>) -> bool {
        path.clear();
        path.push(target);

        let mut node = target;
        while node != source {
            match self.state.route.parent(node) {
                // A well-formed route has at most one entry per slot.
                Some(parent) if path.len() <= self.capacity() => {
                    node = parent;
                    path.push(node);
                }
                _ => {
                    path.clear();
                    return false;
                }
            }
        }

        path.reverse();
        true
    }

    /// Predecessor of `node` in the last run.
    ///
    /// The source is its own parent (it was reached through the seed).
    pub fn parent_of(&self, node: NodeIndex) -> Option<NodeIndex> {
        self.state.route.parent(node)
    }

    /// Visit state of `node` after the last run.
    pub fn visit_state(&self, node: NodeIndex) -> Option<VisitState> {
        self.state.visited.state(node)
    }

    fn run<G>(&mut self, source: NodeIndex, target: NodeIndex, graph: &G, record_tree: bool) -> SearchOutcome
    where
        G: Traversable + ?Sized,
    {
        match self.validate(source, target, graph) {
            Validation::Invalid => return SearchOutcome::Invalid,
            Validation::Trivial => return SearchOutcome::Trivial,
            Validation::Valid => {}
        }

        self.reset(graph.node_count());
        self.state.record_tree = record_tree;

        let found = match self.strategy {
            SearchStrategy::BreadthFirst => bfs::explore(&mut self.state, source, target, graph),
            SearchStrategy::DepthFirst => dfs::explore(&mut self.state, source, target, graph),
        };
        let outcome = if found {
            SearchOutcome::Found
        } else {
            SearchOutcome::Exhausted
        };

        #[cfg(feature = "tracing")]
        tracing::debug!(
            strategy = ?self.strategy,
            source = source.index(),
            target = target.index(),
            outcome = ?outcome,
            "search finished"
        );

        outcome
    }

    fn write_path(&self, outcome: SearchOutcome, source: NodeIndex, target: NodeIndex, path: &mut Vec<NodeIndex>) {
        match outcome {
            SearchOutcome::Found => {
                self.target_path(source, target, path);
            }
            SearchOutcome::Trivial => {
                path.clear();
                path.push(source);
            }
            SearchOutcome::Invalid | SearchOutcome::Exhausted => {}
        }
    }
}

impl Default for GraphSearch {
    fn default() -> Self {
        Self::new(SearchStrategy::default(), DEFAULT_SEARCH_CAPACITY)
    }
}
