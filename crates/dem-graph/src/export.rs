//! Conversion into `petgraph` for routing consumers, and Graphviz output.

use petgraph::dot::{Config, Dot};
use petgraph::graph::{NodeIndex, UnGraph};

use crate::graph::{Edge, Graph, Node};

/// Copy the graph into a `petgraph` undirected graph.
///
/// Node `i` of [`Graph::nodes`] becomes `NodeIndex::new(i)`; edges keep
/// their order, so `EdgeIndex::new(k)` is edge `k`.
pub fn to_petgraph(graph: &Graph) -> UnGraph<Node, Edge> {
    let mut out = UnGraph::with_capacity(graph.node_count(), graph.edge_count());
    for node in graph.nodes() {
        out.add_node(*node);
    }
    for edge in graph.edges() {
        // endpoints of a built or validated graph are always present
        if let (Some(a), Some(b)) = (graph.position(edge.a), graph.position(edge.b)) {
            out.add_edge(NodeIndex::new(a), NodeIndex::new(b), *edge);
        }
    }
    out
}

/// Render the graph in Graphviz DOT.
///
/// Nodes are labeled `row,col: elevation`, edges with their weight.
pub fn to_dot(graph: &Graph) -> String {
    let pg = to_petgraph(graph);
    format!(
        "{:?}",
        Dot::with_attr_getters(
            &pg,
            &[Config::NodeNoLabel, Config::EdgeNoLabel],
            &|_, edge| format!("label = \"{}\" ", edge.weight().weight),
            &|_, (_, node)| format!(
                "label = \"{},{}: {}\" ",
                node.row, node.col, node.elevation
            ),
        )
    )
}
