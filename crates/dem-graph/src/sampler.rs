//! Size-bounded induced subgraphs for export and plotting.

use dem_core::{EdgeId, NodeId};
use tracing::debug;

use crate::graph::{Graph, Node};

/// The first `n` nodes in ascending id order plus every edge between them.
///
/// `n` is clamped to the node count. The selection is deterministic: the
/// same graph and `n` always give the same subgraph.
pub fn sample(graph: &Graph, n: usize) -> Graph {
    let count = n.min(graph.node_count());
    debug!(requested = n, count, "sampling graph prefix");
    induced_from_positions(graph, (0..count).collect())
}

/// The given nodes plus every edge of `graph` joining two of them.
///
/// Ids absent from `graph` are ignored. Ids keep their grid meaning.
pub fn induced_subgraph<I>(graph: &Graph, ids: I) -> Graph
where
    I: IntoIterator<Item = NodeId>,
{
    let mut positions: Vec<usize> = ids
        .into_iter()
        .filter_map(|id| graph.position(id))
        .collect();
    positions.sort_unstable();
    positions.dedup();
    induced_from_positions(graph, positions)
}

/// `positions` must be sorted and unique.
fn induced_from_positions(graph: &Graph, positions: Vec<usize>) -> Graph {
    let selected = |id: NodeId| {
        graph
            .position(id)
            .is_some_and(|p| positions.binary_search(&p).is_ok())
    };

    // an edge is collected once, from its lower endpoint
    let mut kept: Vec<EdgeId> = Vec::new();
    for &pos in &positions {
        let id = graph.nodes[pos].id;
        for &eid in graph.incident_at(pos) {
            let edge = &graph.edges[eid.index() as usize];
            if edge.a == id && selected(edge.b) {
                kept.push(eid);
            }
        }
    }
    kept.sort_unstable();

    let nodes: Vec<Node> = positions.iter().map(|&p| graph.nodes[p]).collect();
    let edges = kept
        .into_iter()
        .map(|eid| graph.edges[eid.index() as usize])
        .collect();

    Graph::assemble(graph.grid, nodes, edges)
}
