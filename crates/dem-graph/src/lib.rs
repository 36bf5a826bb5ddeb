//! dem-graph: elevation grid to terrain graph.
//!
//! Provides:
//! - Grid coordinate indexing (row, col) <-> NodeId
//! - Deterministic graph construction from an elevation array
//! - Structural validation for graphs assembled from parts
//! - Degree, elevation and connectivity analysis
//! - Bounded, reproducible subgraph sampling
//!
//! # Example
//!
//! ```
//! use dem_core::ElevationArray;
//! use dem_graph::{GraphBuilder, analyzer};
//!
//! let dem = ElevationArray::from_rows(vec![vec![1.0, 2.0], vec![4.0, 8.0]]).unwrap();
//! let graph = GraphBuilder::new().build(&dem).unwrap();
//!
//! assert_eq!(graph.node_count(), 4);
//! assert_eq!(graph.edge_count(), 4);
//! assert!(analyzer::is_connected(&graph));
//! ```

pub mod analyzer;
pub mod builder;
pub mod error;
pub mod export;
pub mod graph;
pub mod grid;
pub mod sampler;
pub(crate) mod validate;

// Re-exports for ergonomics
pub use analyzer::{ConnectedComponent, DegreeStats, GraphSummary};
pub use builder::{BuildOptions, GraphBuilder, SizeCap, build};
pub use error::GraphError;
pub use graph::{Edge, Graph, Node};
pub use grid::GridIndex;
pub use sampler::{induced_subgraph, sample};
