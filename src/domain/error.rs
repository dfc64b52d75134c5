//! Error types for graph construction and mutation.
//!
//! Decomposition itself never fails once a graph exists, so these are the
//! only domain-level failures.

use thiserror::Error;

/// Result type for graph operations
pub type GraphResult<T> = Result<T, GraphError>;

/// Errors raised while building a [`DirectedGraph`](crate::domain::graph::DirectedGraph)
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum GraphError {
    /// The requested node count is negative
    #[error("invalid node count: {node_count}")]
    InvalidSize {
        /// The rejected node count
        node_count: i64,
    },

    /// An edge endpoint lies outside `[0, node_count)`
    #[error("node {node} is out of range for a graph with {node_count} nodes")]
    OutOfRange {
        /// The offending endpoint
        node: i64,
        /// Number of nodes in the graph
        node_count: usize,
    },
}

impl GraphError {
    /// Creates an invalid size error
    pub fn invalid_size(node_count: i64) -> Self {
        Self::InvalidSize { node_count }
    }

    /// Creates an out of range error
    pub fn out_of_range(node: i64, node_count: usize) -> Self {
        Self::OutOfRange { node, node_count }
    }
}
