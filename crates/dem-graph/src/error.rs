//! Graph-specific error types.

use dem_core::{DemError, EdgeId, NodeId};

/// Structural errors found while validating a graph assembled from parts.
#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum GraphError {
    /// A node id lies outside the grid the graph claims to cover.
    #[error("Node {node} is outside the {rows}x{cols} grid")]
    NodeOutsideGrid {
        node: NodeId,
        rows: usize,
        cols: usize,
    },

    /// Nodes are not listed in strictly ascending id order.
    #[error("Node {node} is out of order (previous node {previous})")]
    NodeOrder { node: NodeId, previous: NodeId },

    /// A node's row/col disagrees with its id.
    #[error("Node {node} stores ({row}, {col}) but its id maps elsewhere")]
    CoordinateMismatch { node: NodeId, row: u32, col: u32 },

    /// A node carries a NaN or infinite elevation.
    #[error("Node {node} has non-finite elevation {value}")]
    NonFiniteElevation { node: NodeId, value: f64 },

    /// An edge refers to a node that doesn't exist.
    #[error("Edge {edge} refers to non-existent node {node}")]
    InvalidNodeRef { edge: EdgeId, node: NodeId },

    /// An edge connects a node to itself.
    #[error("Edge {edge} is a self loop on node {node}")]
    SelfLoop { edge: EdgeId, node: NodeId },

    /// An edge's endpoints are not 4-adjacent grid cells.
    #[error("Edge {edge} connects non-adjacent cells {a} and {b}")]
    NotAdjacent { edge: EdgeId, a: NodeId, b: NodeId },

    /// The same unordered pair appears twice.
    #[error("Edge {edge} duplicates the pair {{{a}, {b}}}")]
    DuplicateEdge { edge: EdgeId, a: NodeId, b: NodeId },

    /// An edge weight disagrees with its endpoints' elevation difference.
    #[error("Edge {edge} has weight {actual} but endpoints differ by {expected}")]
    WeightMismatch {
        edge: EdgeId,
        expected: f64,
        actual: f64,
    },

    /// Adjacency list is inconsistent (edge in node's list but edge doesn't touch node).
    #[error("Edge {edge} in node {node}'s adjacency list but doesn't touch that node")]
    InconsistentAdjacency { edge: EdgeId, node: NodeId },
}

impl From<GraphError> for DemError {
    fn from(err: GraphError) -> Self {
        DemError::Invariant {
            what: err.to_string(),
        }
    }
}
