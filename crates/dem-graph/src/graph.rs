//! Core graph data structures.

use dem_core::{DemResult, EdgeId, Elevation, GRID_SPACING, NodeId, Real};

use crate::grid::GridIndex;
use crate::validate;

/// One grid cell.
///
/// Nodes are created once at build time and never mutated.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Node {
    pub id: NodeId,
    pub row: u32,
    pub col: u32,
    /// Copied verbatim from the source array.
    pub elevation: Elevation,
}

impl Node {
    /// `(x, y) = (col, -row)`, for plotting only.
    pub fn display_position(&self) -> (i64, i64) {
        (i64::from(self.col), -i64::from(self.row))
    }
}

/// Undirected edge between two 4-adjacent cells.
///
/// Endpoints are stored canonically with `a < b`.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Edge {
    pub a: NodeId,
    pub b: NodeId,
    /// Absolute elevation difference between the endpoints.
    pub weight: Real,
}

impl Edge {
    /// Create an edge, ordering the endpoints.
    pub fn new(u: NodeId, v: NodeId, weight: Real) -> Self {
        if u <= v {
            Self { a: u, b: v, weight }
        } else {
            Self { a: v, b: u, weight }
        }
    }

    /// Travel distance between the endpoints (unit grid spacing).
    pub fn distance(&self) -> Real {
        GRID_SPACING
    }

    pub fn endpoints(&self) -> (NodeId, NodeId) {
        (self.a, self.b)
    }

    /// The endpoint opposite `node`, if `node` is an endpoint.
    pub fn other(&self, node: NodeId) -> Option<NodeId> {
        if node == self.a {
            Some(self.b)
        } else if node == self.b {
            Some(self.a)
        } else {
            None
        }
    }

    pub fn touches(&self, node: NodeId) -> bool {
        self.a == node || self.b == node
    }
}

/// The terrain graph: an immutable collection of nodes and edges.
///
/// The graph stores:
/// - All nodes in ascending id order, and all edges in insertion order.
/// - Compact adjacency: for each node, which edges are incident.
///
/// Node ids keep their grid meaning; a sampled subgraph holds a subset of
/// the ids of the grid it came from.
#[derive(Debug, Clone)]
pub struct Graph {
    pub(crate) grid: GridIndex,
    pub(crate) nodes: Vec<Node>,
    pub(crate) edges: Vec<Edge>,

    /// Offsets for node->edge adjacency: node at position i has its edges in
    /// node_edges[node_edge_offsets[i]..node_edge_offsets[i+1]].
    pub(crate) node_edge_offsets: Vec<usize>,

    /// Flat list of incident edge IDs (grouped by node position, each group in edge order).
    pub(crate) node_edges: Vec<EdgeId>,
}

impl Graph {
    /// Assemble a graph from externally produced parts (e.g. a persisted
    /// graph), validating every structural invariant the builder guarantees.
    ///
    /// Edges are canonicalized (`a < b`) before validation.
    pub fn from_parts(grid: GridIndex, nodes: Vec<Node>, edges: Vec<Edge>) -> DemResult<Self> {
        let edges: Vec<Edge> = edges
            .into_iter()
            .map(|e| Edge::new(e.a, e.b, e.weight))
            .collect();

        validate::validate_nodes(&grid, &nodes)?;
        validate::validate_edges(&grid, &nodes, &edges)?;

        let graph = Self::assemble(grid, nodes, edges);
        validate::validate_adjacency(&graph)?;
        Ok(graph)
    }

    /// Build adjacency for parts already known to be consistent.
    pub(crate) fn assemble(grid: GridIndex, nodes: Vec<Node>, edges: Vec<Edge>) -> Self {
        let (node_edge_offsets, node_edges) = build_adjacency(&nodes, &edges);
        Self {
            grid,
            nodes,
            edges,
            node_edge_offsets,
            node_edges,
        }
    }

    /// Dimensions of the grid the ids refer to.
    pub fn grid(&self) -> GridIndex {
        self.grid
    }

    /// Return all nodes, in ascending id order.
    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    /// Return all edges.
    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Position of a node in [`nodes`](Self::nodes).
    pub fn position(&self, id: NodeId) -> Option<usize> {
        position_of(&self.nodes, id)
    }

    pub fn contains(&self, id: NodeId) -> bool {
        self.position(id).is_some()
    }

    /// Get a node by ID (returns None if not in this graph).
    pub fn node(&self, id: NodeId) -> Option<&Node> {
        self.position(id).map(|pos| &self.nodes[pos])
    }

    /// Edge IDs incident to a node (empty if the node is absent).
    pub fn incident_edges(&self, id: NodeId) -> &[EdgeId] {
        match self.position(id) {
            Some(pos) => self.incident_at(pos),
            None => &[],
        }
    }

    /// Number of incident edges.
    pub fn degree(&self, id: NodeId) -> usize {
        self.incident_edges(id).len()
    }

    /// Nodes sharing an edge with `id`.
    pub fn neighbors(&self, id: NodeId) -> impl Iterator<Item = NodeId> + '_ {
        self.incident_edges(id)
            .iter()
            .filter_map(move |&e| self.edges[e.index() as usize].other(id))
    }

    /// The edge joining `u` and `v`, if any.
    pub fn edge_between(&self, u: NodeId, v: NodeId) -> Option<&Edge> {
        self.incident_edges(u)
            .iter()
            .map(|&e| &self.edges[e.index() as usize])
            .find(|edge| edge.other(u) == Some(v))
    }

    pub(crate) fn incident_at(&self, pos: usize) -> &[EdgeId] {
        let start = self.node_edge_offsets[pos];
        let end = self.node_edge_offsets[pos + 1];
        &self.node_edges[start..end]
    }
}

/// Locate `id` in a node list sorted by id.
///
/// Graphs built from a full grid store node `i` at position `i`, which is
/// checked first.
pub(crate) fn position_of(nodes: &[Node], id: NodeId) -> Option<usize> {
    let idx = id.index() as usize;
    if nodes.get(idx).is_some_and(|n| n.id == id) {
        return Some(idx);
    }
    nodes.binary_search_by_key(&id, |n| n.id).ok()
}

/// Build compact adjacency lists: for each node, collect its incident edges.
///
/// Counting sort over node positions; edges whose endpoints are absent are skipped
/// (validation reports those before this runs).
pub(crate) fn build_adjacency(nodes: &[Node], edges: &[Edge]) -> (Vec<usize>, Vec<EdgeId>) {
    let mut endpoints = Vec::with_capacity(edges.len());
    let mut degree = vec![0usize; nodes.len()];
    for edge in edges {
        let pa = position_of(nodes, edge.a);
        let pb = position_of(nodes, edge.b);
        if let (Some(pa), Some(pb)) = (pa, pb) {
            degree[pa] += 1;
            degree[pb] += 1;
            endpoints.push(Some((pa, pb)));
        } else {
            endpoints.push(None);
        }
    }

    let mut offsets = Vec::with_capacity(nodes.len() + 1);
    offsets.push(0);
    for d in &degree {
        let last = offsets[offsets.len() - 1];
        offsets.push(last + d);
    }

    let total = offsets[nodes.len()];
    let mut flat = vec![EdgeId::from_index(0); total];
    let mut cursor: Vec<usize> = offsets[..nodes.len()].to_vec();
    for (i, slot) in endpoints.into_iter().enumerate() {
        if let Some((pa, pb)) = slot {
            let eid = EdgeId::from_index(i as u32);
            flat[cursor[pa]] = eid;
            cursor[pa] += 1;
            flat[cursor[pb]] = eid;
            cursor[pb] += 1;
        }
    }

    (offsets, flat)
}
