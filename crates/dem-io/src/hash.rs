//! Content-based hashing for built graphs.

use dem_graph::Graph;
use sha2::{Digest, Sha256};

/// SHA-256 over grid shape, node elevations and edge list.
///
/// Two builds from the same array and cap produce the same fingerprint.
pub fn graph_fingerprint(graph: &Graph) -> String {
    let mut hasher = Sha256::new();

    hasher.update((graph.grid().rows() as u64).to_le_bytes());
    hasher.update((graph.grid().cols() as u64).to_le_bytes());

    for node in graph.nodes() {
        hasher.update(node.id.index().to_le_bytes());
        hasher.update(node.elevation.to_bits().to_le_bytes());
    }
    for edge in graph.edges() {
        hasher.update(edge.a.index().to_le_bytes());
        hasher.update(edge.b.index().to_le_bytes());
        hasher.update(edge.weight.to_bits().to_le_bytes());
    }

    let result = hasher.finalize();
    format!("{:x}", result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use dem_core::ElevationArray;
    use dem_graph::{GraphBuilder, sample};

    fn dem(values: Vec<Vec<f64>>) -> ElevationArray {
        ElevationArray::from_rows(values).unwrap()
    }

    #[test]
    fn hash_stability() {
        let array = dem(vec![vec![1.0, 2.0], vec![3.0, 4.0]]);
        let first = GraphBuilder::new().build(&array).unwrap();
        let second = GraphBuilder::new().parallel(true).build(&array).unwrap();
        assert_eq!(graph_fingerprint(&first), graph_fingerprint(&second));
        assert_eq!(graph_fingerprint(&first).len(), 64);
    }

    #[test]
    fn hash_differs_for_different_inputs() {
        let a = GraphBuilder::new()
            .build(&dem(vec![vec![1.0, 2.0], vec![3.0, 4.0]]))
            .unwrap();
        let b = GraphBuilder::new()
            .build(&dem(vec![vec![1.0, 2.0], vec![3.0, 5.0]]))
            .unwrap();
        assert_ne!(graph_fingerprint(&a), graph_fingerprint(&b));
        assert_ne!(graph_fingerprint(&a), graph_fingerprint(&sample(&a, 3)));
    }
}
