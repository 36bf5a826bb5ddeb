//! Read-only structural analysis of a built graph.
//!
//! Nothing is cached: every call recomputes from the graph's edge set.
//! Traversals run over node positions with a flat visited array, so
//! component discovery is linear in nodes + edges.

use std::collections::VecDeque;

use dem_core::{DemError, DemResult, Elevation, NodeId};

use crate::graph::Graph;

/// Incident-edge counts over all nodes.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DegreeStats {
    pub average_degree: f64,
    pub min_degree: usize,
    pub max_degree: usize,
}

/// A maximal set of mutually reachable nodes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConnectedComponent {
    nodes: Vec<NodeId>,
}

impl ConnectedComponent {
    /// Member ids in discovery order.
    pub fn nodes(&self) -> &[NodeId] {
        &self.nodes
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn contains(&self, id: NodeId) -> bool {
        self.nodes.contains(&id)
    }
}

/// Everything the reporting layer prints about a graph.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GraphSummary {
    pub rows: usize,
    pub cols: usize,
    pub node_count: usize,
    pub edge_count: usize,
    pub degree: DegreeStats,
    pub elevation_min: Elevation,
    pub elevation_max: Elevation,
    pub is_connected: bool,
    pub component_count: usize,
    pub largest_component_size: usize,
}

/// Degree statistics. The average is `2 * edges / nodes`.
pub fn degree_stats(graph: &Graph) -> DemResult<DegreeStats> {
    if graph.is_empty() {
        return Err(DemError::EmptyGraph {
            what: "degree_stats",
        });
    }

    let mut total = 0usize;
    let mut min_degree = usize::MAX;
    let mut max_degree = 0usize;
    for pos in 0..graph.node_count() {
        let d = graph.incident_at(pos).len();
        total += d;
        min_degree = min_degree.min(d);
        max_degree = max_degree.max(d);
    }

    Ok(DegreeStats {
        average_degree: total as f64 / graph.node_count() as f64,
        min_degree,
        max_degree,
    })
}

/// `(min, max)` over all node elevations.
pub fn elevation_range(graph: &Graph) -> DemResult<(Elevation, Elevation)> {
    let mut elevations = graph.nodes().iter().map(|n| n.elevation);
    let first = elevations.next().ok_or(DemError::EmptyGraph {
        what: "elevation_range",
    })?;
    Ok(elevations.fold((first, first), |(lo, hi), e| (lo.min(e), hi.max(e))))
}

/// True iff a single component spans every node.
///
/// An empty graph has no components and is not connected.
pub fn is_connected(graph: &Graph) -> bool {
    if graph.is_empty() {
        return false;
    }
    let mut labeler = Labeler::new(graph);
    labeler.flood(0, 0) == graph.node_count()
}

/// Partition the nodes into connected components.
///
/// Components come out in order of their lowest node id; members in
/// breadth-first discovery order.
pub fn connected_components(graph: &Graph) -> Vec<ConnectedComponent> {
    let labels = label_components(graph);
    let mut components: Vec<ConnectedComponent> = labels
        .sizes
        .iter()
        .map(|&size| ConnectedComponent {
            nodes: Vec::with_capacity(size),
        })
        .collect();
    for &pos in &labels.order {
        let label = labels.label[pos] as usize;
        components[label].nodes.push(graph.nodes[pos].id);
    }
    components
}

/// Number of nodes in the biggest component (0 for an empty graph).
pub fn largest_component_size(graph: &Graph) -> usize {
    label_components(graph)
        .sizes
        .into_iter()
        .max()
        .unwrap_or(0)
}

/// Number of connected components.
pub fn component_count(graph: &Graph) -> usize {
    label_components(graph).sizes.len()
}

/// Bundle every statistic for reporting.
pub fn summarize(graph: &Graph) -> DemResult<GraphSummary> {
    let degree = degree_stats(graph)?;
    let (elevation_min, elevation_max) = elevation_range(graph)?;
    let labels = label_components(graph);
    let component_count = labels.sizes.len();
    let largest_component_size = labels.sizes.iter().copied().max().unwrap_or(0);

    Ok(GraphSummary {
        rows: graph.grid().rows(),
        cols: graph.grid().cols(),
        node_count: graph.node_count(),
        edge_count: graph.edge_count(),
        degree,
        elevation_min,
        elevation_max,
        is_connected: component_count == 1,
        component_count,
        largest_component_size,
    })
}

struct Labels {
    /// Component label per node position.
    label: Vec<u32>,
    /// Node count per label.
    sizes: Vec<usize>,
    /// Node positions in discovery order.
    order: Vec<usize>,
}

fn label_components(graph: &Graph) -> Labels {
    let mut labeler = Labeler::new(graph);
    let mut sizes = Vec::new();
    for start in 0..graph.node_count() {
        if labeler.label[start] == UNVISITED {
            let label = sizes.len() as u32;
            sizes.push(labeler.flood(start, label));
        }
    }
    Labels {
        label: labeler.label,
        sizes,
        order: labeler.order,
    }
}

const UNVISITED: u32 = u32::MAX;

/// Breadth-first flood fill over node positions.
struct Labeler<'g> {
    graph: &'g Graph,
    label: Vec<u32>,
    queue: VecDeque<usize>,
    order: Vec<usize>,
}

impl<'g> Labeler<'g> {
    fn new(graph: &'g Graph) -> Self {
        Self {
            graph,
            label: vec![UNVISITED; graph.node_count()],
            queue: VecDeque::with_capacity(graph.node_count()),
            order: Vec::with_capacity(graph.node_count()),
        }
    }

    /// Label everything reachable from `start`; returns the count reached.
    fn flood(&mut self, start: usize, label: u32) -> usize {
        let graph = self.graph;
        let mut reached = 0;
        self.label[start] = label;
        self.queue.push_back(start);

        while let Some(pos) = self.queue.pop_front() {
            reached += 1;
            self.order.push(pos);
            let id = graph.nodes[pos].id;
            for &eid in graph.incident_at(pos) {
                let edge = &graph.edges[eid.index() as usize];
                let Some(next) = edge.other(id).and_then(|n| graph.position(n)) else {
                    continue;
                };
                if self.label[next] == UNVISITED {
                    self.label[next] = label;
                    self.queue.push_back(next);
                }
            }
        }
        reached
    }
}
