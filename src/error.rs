//! Error kinds reported by graph and search operations.
//!
//! None of these escalate: every fallible operation reports the error to the
//! owning [`Reporter`](crate::Reporter) and then returns it (or `None`/`false`)
//! without mutating the graph.

use thiserror::Error;

use crate::graph::NodeIndex;

/// A rejected graph or search operation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GraphError {
    /// The index is out of range or equal to [`NodeIndex::INVALID`].
    #[error("invalid node index: {index}")]
    InvalidIndex {
        /// The offending index.
        index: NodeIndex,
    },

    /// Reactivation was attempted on a slot that is still active.
    #[error("node {index} is already active")]
    DuplicateId {
        /// The slot the caller tried to reuse.
        index: NodeIndex,
    },

    /// An edge references a tombstoned node.
    #[error("edge {from} -> {to} has an inactive endpoint")]
    InactiveEndpoint {
        /// Edge source.
        from: NodeIndex,
        /// Edge target.
        to: NodeIndex,
    },

    /// The edge already exists under the graph's canonical form.
    #[error("edge {from} -> {to} already exists")]
    DuplicateEdge {
        /// Canonical source.
        from: NodeIndex,
        /// Canonical target.
        to: NodeIndex,
    },

    /// No edge is stored for the pair.
    #[error("no edge between {from} and {to}")]
    EdgeNotFound {
        /// Canonical source.
        from: NodeIndex,
        /// Canonical target.
        to: NodeIndex,
    },

    /// A search endpoint is the invalid sentinel or absent from the graph.
    #[error("invalid search endpoints: origin {origin}, target {target}")]
    InvalidSearchEndpoints {
        /// Requested search origin.
        origin: NodeIndex,
        /// Requested target.
        target: NodeIndex,
    },
}
