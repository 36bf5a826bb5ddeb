//! Integration tests for dem-graph.

use dem_core::{DemError, ElevationArray, NodeId};
use dem_graph::{Edge, Graph, GraphBuilder, GridIndex, SizeCap, analyzer, build, sample};

fn dem(rows: Vec<Vec<f64>>) -> ElevationArray {
    ElevationArray::from_rows(rows).unwrap()
}

fn id(i: u32) -> NodeId {
    NodeId::from_index(i)
}

#[test]
fn three_by_three_scenario() {
    let graph = build(
        &dem(vec![
            vec![1.0, 2.0, 3.0],
            vec![4.0, 5.0, 6.0],
            vec![7.0, 8.0, 9.0],
        ]),
        None,
    )
    .unwrap();

    assert_eq!(graph.node_count(), 9);
    assert_eq!(graph.edge_count(), 12);

    let stats = analyzer::degree_stats(&graph).unwrap();
    assert!((stats.average_degree - 24.0 / 9.0).abs() < 1e-12);
    assert_eq!(stats.min_degree, 2);
    assert_eq!(stats.max_degree, 4);

    assert_eq!(analyzer::elevation_range(&graph).unwrap(), (1.0, 9.0));
    assert!(analyzer::is_connected(&graph));
    assert_eq!(analyzer::connected_components(&graph).len(), 1);
    assert_eq!(analyzer::largest_component_size(&graph), 9);
}

#[test]
fn single_row_scenario() {
    let graph = build(&dem(vec![vec![10.0, 10.0, 20.0, 10.0, 10.0]]), None).unwrap();

    assert_eq!(graph.node_count(), 5);
    assert_eq!(graph.edge_count(), 4);

    let weights: Vec<f64> = graph.edges().iter().map(|e| e.weight).collect();
    assert_eq!(weights, vec![0.0, 10.0, 10.0, 0.0]);

    // both neighbors of the 20-valued cell see a weight-10 edge to it
    for neighbor in [id(1), id(3)] {
        let edge = graph.edge_between(neighbor, id(2)).unwrap();
        assert_eq!(edge.weight, 10.0);
    }
    let around_peak: Vec<NodeId> = graph.neighbors(id(2)).collect();
    assert_eq!(around_peak, vec![id(1), id(3)]);
}

#[test]
fn size_cap_scenario() {
    let rows: Vec<Vec<f64>> = (0..5)
        .map(|r| (0..5).map(|c| (r * 5 + c) as f64).collect())
        .collect();
    let capped = build(&dem(rows), Some(SizeCap::new(2, 2))).unwrap();

    assert_eq!(capped.node_count(), 4);
    assert_eq!(capped.edge_count(), 4);
    assert_eq!(capped.grid().cols(), 2);

    // ids are renumbered over the 2x2 grid, so (1, 0) is id 2
    let corner = capped.node(id(2)).unwrap();
    assert_eq!((corner.row, corner.col), (1, 0));
    assert_eq!(corner.elevation, 5.0);

    // discarded cells do not matter
    let other: Vec<Vec<f64>> = (0..5)
        .map(|r| {
            (0..5)
                .map(|c| if r < 2 && c < 2 { (r * 5 + c) as f64 } else { -999.0 })
                .collect()
        })
        .collect();
    let capped_other = build(&dem(other), Some(SizeCap::new(2, 2))).unwrap();
    assert_eq!(capped.nodes(), capped_other.nodes());
    assert_eq!(capped.edges(), capped_other.edges());
}

#[test]
fn one_by_one_grid() {
    let graph = build(&dem(vec![vec![42.0]]), None).unwrap();
    assert_eq!(graph.node_count(), 1);
    assert_eq!(graph.edge_count(), 0);
    assert!(analyzer::is_connected(&graph));
    let comps = analyzer::connected_components(&graph);
    assert_eq!(comps.len(), 1);
    assert_eq!(comps[0].len(), 1);
    assert_eq!(analyzer::degree_stats(&graph).unwrap().average_degree, 0.0);
}

#[test]
fn node_attributes_follow_grid() {
    let graph = GraphBuilder::new()
        .build(&dem(vec![vec![1.0, 2.0], vec![3.0, 4.0], vec![5.0, 6.0]]))
        .unwrap();
    let grid = graph.grid();
    for node in graph.nodes() {
        let (row, col) = grid.to_coords(node.id).unwrap();
        assert_eq!((node.row as usize, node.col as usize), (row, col));
        assert_eq!(node.elevation, (row * 2 + col + 1) as f64);
        assert_eq!(
            node.display_position(),
            (col as i64, -(row as i64))
        );
    }
}

#[test]
fn no_data_sentinel_is_an_ordinary_elevation() {
    let graph = build(&dem(vec![vec![-32768.0, 100.0]]), None).unwrap();
    assert_eq!(graph.edges()[0].weight, 32868.0);
    assert_eq!(analyzer::elevation_range(&graph).unwrap(), (-32768.0, 100.0));
}

#[test]
fn sample_preserves_source_edges() {
    let rows: Vec<Vec<f64>> = (0..6)
        .map(|r| (0..4).map(|c| ((r * 3 + c * 5) % 11) as f64).collect())
        .collect();
    let graph = build(&dem(rows), None).unwrap();
    let sub = sample(&graph, 10);

    assert_eq!(sub.node_count(), 10);
    for edge in sub.edges() {
        assert!(sub.contains(edge.a) && sub.contains(edge.b));
        let original = graph.edge_between(edge.a, edge.b).unwrap();
        assert_eq!(original, edge);
    }
    // rows 0 and 1 plus cells (2,0), (2,1)
    let horizontal = 3 + 3 + 1;
    let vertical = 4 + 2;
    assert_eq!(sub.edge_count(), horizontal + vertical);
}

#[test]
fn connectivity_of_subgraphs() {
    // a 5-node prefix of a 2x4 grid is row 0 plus (1,0), hanging off (0,0)
    let graph = build(&dem(vec![vec![0.0; 4], vec![0.0; 4]]), None).unwrap();
    let sub = sample(&graph, 5);
    assert!(analyzer::is_connected(&sub));

    let sparse = dem_graph::induced_subgraph(&graph, [id(0), id(2), id(7)]);
    assert!(!analyzer::is_connected(&sparse));
    assert_eq!(analyzer::connected_components(&sparse).len(), 3);
    assert_eq!(analyzer::largest_component_size(&sparse), 1);
}

#[test]
fn from_parts_rebuilds_an_equal_graph() {
    let graph = build(&dem(vec![vec![3.0, 1.0, 4.0], vec![1.0, 5.0, 9.0]]), None).unwrap();

    // reversed endpoints are canonicalized
    let edges: Vec<Edge> = graph
        .edges()
        .iter()
        .map(|e| Edge {
            a: e.b,
            b: e.a,
            weight: e.weight,
        })
        .collect();
    let rebuilt = Graph::from_parts(graph.grid(), graph.nodes().to_vec(), edges).unwrap();

    assert_eq!(rebuilt.nodes(), graph.nodes());
    assert_eq!(rebuilt.edges(), graph.edges());
    for node in graph.nodes() {
        assert_eq!(rebuilt.incident_edges(node.id), graph.incident_edges(node.id));
    }
}

#[test]
fn from_parts_reports_invariant_errors() {
    let graph = build(&dem(vec![vec![0.0, 1.0], vec![2.0, 3.0]]), None).unwrap();
    let mut edges = graph.edges().to_vec();
    edges.push(Edge::new(id(0), id(3), 3.0));

    let err = Graph::from_parts(graph.grid(), graph.nodes().to_vec(), edges).unwrap_err();
    match err {
        DemError::Invariant { what } => assert!(what.contains("non-adjacent")),
        other => panic!("unexpected error: {other:?}"),
    }
}

#[test]
fn grid_index_contract() {
    let grid = GridIndex::new(2, 3).unwrap();
    assert_eq!(grid.to_id(1, 2).unwrap(), id(5));
    assert!(matches!(
        grid.to_id(2, 0),
        Err(DemError::OutOfBounds { .. })
    ));
    assert_eq!(grid.neighbors(0, 0).count(), 2);
    assert_eq!(grid.neighbors(0, 1).count(), 3);
}

#[test]
fn builds_are_repeatable() {
    let rows: Vec<Vec<f64>> = (0..9)
        .map(|r| (0..7).map(|c| ((r * c) % 5) as f64 * 1.5).collect())
        .collect();
    let array = dem(rows);
    let first = build(&array, None).unwrap();
    let second = build(&array, None).unwrap();
    assert_eq!(first.nodes(), second.nodes());
    assert_eq!(first.edges(), second.edges());
}
