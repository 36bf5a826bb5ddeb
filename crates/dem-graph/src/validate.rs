//! Graph validation logic.

use std::collections::HashSet;

use dem_core::{EdgeId, NodeId, Tolerances, elevation_delta, nearly_equal};

use crate::error::GraphError;
use crate::graph::{Edge, Graph, Node, position_of};
use crate::grid::GridIndex;

/// Nodes must be inside the grid, strictly ascending, and agree with their id.
pub(crate) fn validate_nodes(grid: &GridIndex, nodes: &[Node]) -> Result<(), GraphError> {
    let mut previous: Option<NodeId> = None;
    for node in nodes {
        let (row, col) = grid
            .to_coords(node.id)
            .map_err(|_| GraphError::NodeOutsideGrid {
                node: node.id,
                rows: grid.rows(),
                cols: grid.cols(),
            })?;

        if let Some(prev) = previous {
            if node.id <= prev {
                return Err(GraphError::NodeOrder {
                    node: node.id,
                    previous: prev,
                });
            }
        }
        previous = Some(node.id);

        if row != node.row as usize || col != node.col as usize {
            return Err(GraphError::CoordinateMismatch {
                node: node.id,
                row: node.row,
                col: node.col,
            });
        }

        if !node.elevation.is_finite() {
            return Err(GraphError::NonFiniteElevation {
                node: node.id,
                value: node.elevation,
            });
        }
    }
    Ok(())
}

/// Edges must join two present, distinct, 4-adjacent nodes exactly once,
/// weighted by their elevation difference.
pub(crate) fn validate_edges(
    grid: &GridIndex,
    nodes: &[Node],
    edges: &[Edge],
) -> Result<(), GraphError> {
    let tol = Tolerances::default();
    let mut seen: HashSet<(NodeId, NodeId)> = HashSet::with_capacity(edges.len());

    for (i, edge) in edges.iter().enumerate() {
        let eid = EdgeId::from_index(i as u32);

        let pa = position_of(nodes, edge.a).ok_or(GraphError::InvalidNodeRef {
            edge: eid,
            node: edge.a,
        })?;
        let pb = position_of(nodes, edge.b).ok_or(GraphError::InvalidNodeRef {
            edge: eid,
            node: edge.b,
        })?;

        if edge.a == edge.b {
            return Err(GraphError::SelfLoop {
                edge: eid,
                node: edge.a,
            });
        }

        if !grid.are_adjacent(edge.a, edge.b) {
            return Err(GraphError::NotAdjacent {
                edge: eid,
                a: edge.a,
                b: edge.b,
            });
        }

        if !seen.insert((edge.a, edge.b)) {
            return Err(GraphError::DuplicateEdge {
                edge: eid,
                a: edge.a,
                b: edge.b,
            });
        }

        let expected = elevation_delta(nodes[pa].elevation, nodes[pb].elevation);
        if !nearly_equal(edge.weight, expected, tol) {
            return Err(GraphError::WeightMismatch {
                edge: eid,
                expected,
                actual: edge.weight,
            });
        }
    }
    Ok(())
}

/// Validate adjacency lists for consistency.
pub(crate) fn validate_adjacency(graph: &Graph) -> Result<(), GraphError> {
    if graph.node_edge_offsets.len() != graph.nodes.len() + 1 {
        return Err(GraphError::InconsistentAdjacency {
            edge: EdgeId::from_index(0),
            node: graph.nodes.first().map_or(NodeId::from_index(0), |n| n.id),
        });
    }

    // Each edge must be listed under exactly its two endpoints
    let mut listed = vec![0u8; graph.edges.len()];
    for (pos, node) in graph.nodes.iter().enumerate() {
        for &eid in graph.incident_at(pos) {
            let edge = graph
                .edges
                .get(eid.index() as usize)
                .ok_or(GraphError::InconsistentAdjacency {
                    edge: eid,
                    node: node.id,
                })?;
            if !edge.touches(node.id) {
                return Err(GraphError::InconsistentAdjacency {
                    edge: eid,
                    node: node.id,
                });
            }
            listed[eid.index() as usize] += 1;
        }
    }

    for (i, &count) in listed.iter().enumerate() {
        if count != 2 {
            let edge = &graph.edges[i];
            return Err(GraphError::InconsistentAdjacency {
                edge: EdgeId::from_index(i as u32),
                node: edge.a,
            });
        }
    }

    Ok(())
}
