use hgpeel_graph::{
    canonical_hash, graph_from_bytes, graph_from_json, graph_to_bytes, graph_to_json,
    CompactionPolicy, Hypergraph, HypergraphConfig,
};

mod common;

#[test]
fn json_snapshot_restores_peeled_state() {
    let mut graph: Hypergraph<String, u32> = Hypergraph::from_edges(
        common::default_edges()
            .into_iter()
            .map(|(id, members)| (id, members.into_iter().map(String::from).collect::<Vec<_>>())),
    )
    .unwrap();
    graph.remove_vertex(&"TH".to_string());
    let hash = canonical_hash(&graph).unwrap();

    let json = graph_to_json(&graph).unwrap();
    let restored: Hypergraph<String, u32> = graph_from_json(&json).unwrap();

    assert_eq!(canonical_hash(&restored).unwrap(), hash);
    assert_eq!(restored.nodes(), graph.nodes());
    assert_eq!(restored.dead_edge_count(), 3);
    assert_eq!(restored.arena_len(), graph.arena_len());
    assert_eq!(restored.get_edge_by_id(&0).unwrap_err().code(), "unknown-edge");
    for vertex in graph.nodes() {
        assert_eq!(restored.degree(&vertex), graph.degree(&vertex));
        assert_eq!(
            restored.precomputed_lower_bound(&vertex),
            graph.precomputed_lower_bound(&vertex)
        );
    }
    // The snapshot keeps the pre-peeling neighbourhoods.
    assert_eq!(restored.init_neighbor_len(&"FN".to_string()).unwrap(), 3);
}

#[test]
fn binary_snapshot_gives_workers_independent_copies() {
    let graph = common::default_graph();
    let bytes = graph_to_bytes(&graph).unwrap();

    let mut first: Hypergraph<String, u32> = graph_from_bytes(&bytes).unwrap();
    let second: Hypergraph<String, u32> = graph_from_bytes(&bytes).unwrap();
    first.remove_vertex(&"JV".to_string());

    assert_eq!(first.degree(&"JU".to_string()), 0);
    assert_eq!(second.degree(&"JU".to_string()), 2);
    assert_eq!(graph.degree(&"JU"), 2);
}

#[test]
fn snapshot_keeps_configuration() {
    let config = HypergraphConfig {
        init_cache: false,
        compaction: CompactionPolicy::DeadFraction { threshold: 0.5 },
    };
    let graph: Hypergraph<u32, u32> =
        Hypergraph::with_config([(0, vec![1, 2]), (1, vec![2, 3])], config).unwrap();
    let restored: Hypergraph<u32, u32> =
        graph_from_bytes(&graph_to_bytes(&graph).unwrap()).unwrap();
    assert_eq!(restored.config(), &config);
    assert_eq!(
        restored.init_neighbor_len(&2).unwrap_err().code(),
        "cache-disabled"
    );
}

#[test]
fn corrupt_snapshots_are_rejected() {
    let graph: Hypergraph<u32, u32> = Hypergraph::from_edges([(0, vec![1, 2])]).unwrap();
    let json = graph_to_json(&graph).unwrap();

    let mut value: serde_json::Value = serde_json::from_str(&json).unwrap();
    value["edges"][0]["end"] = serde_json::json!(9);
    let err = graph_from_json::<u32, u32>(&value.to_string()).unwrap_err();
    assert_eq!(err.code(), "corrupt-snapshot");
    assert_eq!(err.info().context.get("end"), Some(&"9".to_string()));

    let mut value: serde_json::Value = serde_json::from_str(&json).unwrap();
    value["incidence"][0][1] = serde_json::json!([5]);
    let err = graph_from_json::<u32, u32>(&value.to_string()).unwrap_err();
    assert_eq!(err.code(), "corrupt-snapshot");

    let mut value: serde_json::Value = serde_json::from_str(&json).unwrap();
    value["incidence"][0][1] = serde_json::json!([]);
    let err = graph_from_json::<u32, u32>(&value.to_string()).unwrap_err();
    assert_eq!(err.code(), "corrupt-snapshot");
    assert_eq!(err.info().context.get("vertex"), Some(&"1".to_string()));
    assert_eq!(err.info().context.get("edge"), Some(&"0".to_string()));

    let err = graph_from_json::<u32, u32>("{").unwrap_err();
    assert_eq!(err.code(), "deserialize-json");
    let err = graph_from_bytes::<u32, u32>(&[1, 2, 3]).unwrap_err();
    assert_eq!(err.code(), "deserialize-bytes");
}
