//! Persisted data types.

use dem_core::{DemError, DemResult, GRID_SPACING, NodeId, Tolerances, nearly_equal};
use dem_graph::{Edge, Graph, GraphSummary, GridIndex, Node, SizeCap};
use serde::{Deserialize, Serialize};

use crate::{IoError, IoResult};

/// Current on-disk graph layout.
pub const GRAPH_FORMAT_VERSION: u32 = 1;

/// A full graph as written to JSON.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoredGraph {
    pub version: u32,
    pub rows: usize,
    pub cols: usize,
    pub nodes: Vec<Node>,
    pub edges: Vec<StoredEdge>,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StoredEdge {
    pub source: NodeId,
    pub target: NodeId,
    pub weight: f64,
    pub distance: f64,
}

impl From<&Graph> for StoredGraph {
    fn from(graph: &Graph) -> Self {
        Self {
            version: GRAPH_FORMAT_VERSION,
            rows: graph.grid().rows(),
            cols: graph.grid().cols(),
            nodes: graph.nodes().to_vec(),
            edges: graph
                .edges()
                .iter()
                .map(|e| StoredEdge {
                    source: e.a,
                    target: e.b,
                    weight: e.weight,
                    distance: e.distance(),
                })
                .collect(),
        }
    }
}

impl StoredGraph {
    /// Validate and rebuild the in-memory graph.
    pub fn into_graph(self) -> IoResult<Graph> {
        if self.version != GRAPH_FORMAT_VERSION {
            return Err(IoError::UnsupportedVersion {
                version: self.version,
            });
        }
        Ok(self.rebuild()?)
    }

    fn rebuild(self) -> DemResult<Graph> {
        let grid = GridIndex::new(self.rows, self.cols)?;
        if let Some(e) = self
            .edges
            .iter()
            .find(|e| !nearly_equal(e.distance, GRID_SPACING, Tolerances::default()))
        {
            return Err(DemError::Invariant {
                what: format!(
                    "edge {}-{} has distance {}, expected {GRID_SPACING}",
                    e.source, e.target, e.distance
                ),
            });
        }
        let edges = self
            .edges
            .into_iter()
            .map(|e| Edge::new(e.source, e.target, e.weight))
            .collect();
        Graph::from_parts(grid, self.nodes, edges)
    }
}

/// Description of one build, written next to its outputs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GraphManifest {
    pub name: String,
    /// Content hash of the built graph.
    pub fingerprint: String,
    pub created_at: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub size_cap: Option<SizeCap>,
    pub summary: GraphSummary,
    /// Files written for this build, relative to the store root.
    #[serde(default)]
    pub outputs: Vec<String>,
}
