use dem_core::ElevationArray;
use dem_graph::{GraphBuilder, SizeCap, analyzer, sample};
use dem_io::*;

fn terrain() -> ElevationArray {
    ElevationArray::from_rows(vec![
        vec![120.0, 125.0, 131.0, 140.0],
        vec![118.0, 122.0, -32768.0, 138.0],
        vec![117.0, 119.0, 126.0, 133.0],
    ])
    .unwrap()
}

#[test]
fn save_and_load_graph() {
    let temp_dir = std::env::temp_dir().join("dem_io_test_graph");
    let _ = std::fs::remove_dir_all(&temp_dir);

    let store = GraphStore::new(temp_dir.clone()).unwrap();
    let graph = GraphBuilder::new().build(&terrain()).unwrap();

    store.save_graph("tile", &graph).unwrap();
    assert!(store.graph_path("tile").exists());

    let loaded = store.load_graph("tile").unwrap();
    assert_eq!(loaded.nodes(), graph.nodes());
    assert_eq!(loaded.edges(), graph.edges());
    assert_eq!(loaded.grid(), graph.grid());
    assert_eq!(graph_fingerprint(&loaded), graph_fingerprint(&graph));
}

#[test]
fn load_rejects_tampered_graph() {
    let temp_dir = std::env::temp_dir().join("dem_io_test_tampered");
    let _ = std::fs::remove_dir_all(&temp_dir);

    let store = GraphStore::new(temp_dir.clone()).unwrap();
    let graph = GraphBuilder::new().build(&terrain()).unwrap();
    let mut stored = StoredGraph::from(&graph);
    stored.edges[0].weight += 1.0;
    std::fs::write(
        store.graph_path("bad"),
        serde_json::to_string(&stored).unwrap(),
    )
    .unwrap();

    assert!(matches!(store.load_graph("bad"), Err(IoError::Graph(_))));

    let mut stored = StoredGraph::from(&graph);
    stored.edges[3].distance = 2.0;
    assert!(matches!(stored.into_graph(), Err(IoError::Graph(_))));
    assert!(matches!(
        store.load_graph("missing"),
        Err(IoError::NotFound { .. })
    ));
}

#[test]
fn sample_written_as_graphml() {
    let temp_dir = std::env::temp_dir().join("dem_io_test_sample");
    let _ = std::fs::remove_dir_all(&temp_dir);

    let store = GraphStore::new(temp_dir.clone()).unwrap();
    let graph = GraphBuilder::new().build(&terrain()).unwrap();
    let path = store.save_sample("tile", &sample(&graph, 5)).unwrap();

    let xml = std::fs::read_to_string(path).unwrap();
    assert_eq!(xml.matches("<node id=").count(), 5);
    // row 0 (3 edges) plus (1,0) hanging off (0,0)
    assert_eq!(xml.matches("<edge ").count(), 4);
}

#[test]
fn manifest_and_summary_round_trip() {
    let temp_dir = std::env::temp_dir().join("dem_io_test_manifest");
    let _ = std::fs::remove_dir_all(&temp_dir);

    let store = GraphStore::new(temp_dir.clone()).unwrap();
    let graph = GraphBuilder::new()
        .size_cap(2, 3)
        .build(&terrain())
        .unwrap();
    let summary = analyzer::summarize(&graph).unwrap();
    store.save_summary("capped", &summary).unwrap();

    let manifest = GraphManifest {
        name: "capped".to_string(),
        fingerprint: graph_fingerprint(&graph),
        created_at: "2026-02-25T12:00:00Z".to_string(),
        source: Some("tile.hgt".to_string()),
        size_cap: Some(SizeCap::new(2, 3)),
        summary: summary.clone(),
        outputs: vec!["capped.summary.json".to_string()],
    };
    store.save_manifest(&manifest).unwrap();

    assert_eq!(store.load_manifest("capped").unwrap(), manifest);
    let loaded = store.load_summary("capped").unwrap();
    assert_eq!(loaded, summary);
    assert_eq!(loaded.node_count, 6);
    assert_eq!(loaded.edge_count, 7);
    assert_eq!(loaded.elevation_min, -32768.0);

    let all = store.list_manifests().unwrap();
    assert_eq!(all, vec![manifest]);
}

#[test]
fn list_manifests_skips_unreadable_entries() {
    let temp_dir = std::env::temp_dir().join("dem_io_test_corrupt_manifest");
    let _ = std::fs::remove_dir_all(&temp_dir);

    let store = GraphStore::new(temp_dir.clone()).unwrap();
    let graph = GraphBuilder::new().build(&terrain()).unwrap();
    let manifest = GraphManifest {
        name: "good".to_string(),
        fingerprint: graph_fingerprint(&graph),
        created_at: "2026-02-25T12:00:00Z".to_string(),
        source: None,
        size_cap: None,
        summary: analyzer::summarize(&graph).unwrap(),
        outputs: vec![],
    };
    store.save_manifest(&manifest).unwrap();
    std::fs::write(store.manifest_path("broken"), "{ not json").unwrap();

    assert!(matches!(
        store.load_manifest("broken"),
        Err(IoError::Json(_))
    ));
    assert_eq!(store.list_manifests().unwrap(), vec![manifest]);
}

#[test]
fn load_raster_from_disk() {
    let temp_dir = std::env::temp_dir().join("dem_io_test_raster");
    let _ = std::fs::remove_dir_all(&temp_dir);
    std::fs::create_dir_all(&temp_dir).unwrap();

    let samples: Vec<i16> = (0..9).map(|v| v * 10).collect();
    let path = temp_dir.join("tile.hgt");
    let bytes: Vec<u8> = samples.iter().flat_map(|v| v.to_be_bytes()).collect();
    std::fs::write(&path, bytes).unwrap();

    let dem = raster::load_hgt(&path).unwrap();
    assert_eq!((dem.rows(), dem.cols()), (3, 3));

    let graph = GraphBuilder::new().build(&dem).unwrap();
    assert_eq!(graph.edge_count(), 12);
    assert_eq!(analyzer::elevation_range(&graph).unwrap(), (0.0, 80.0));
}
