use std::collections::BTreeSet;

use hgpeel_graph::{canonical_hash, Hypergraph, PeelableHypergraph};

mod common;

#[test]
fn full_peeling_takes_one_call_per_vertex() {
    let mut graph: Hypergraph<char, u32> =
        Hypergraph::from_edges([(0, vec!['A', 'B']), (1, vec!['B', 'C', 'D'])]).unwrap();
    let vertex_count = graph.num_vertices();

    let trace = common::peel(&mut graph);
    assert_eq!(trace.len(), vertex_count);
    assert_eq!(trace, vec![('A', 1), ('B', 1), ('C', 0), ('D', 0)]);
    assert_eq!(graph.num_vertices(), 0);
    assert_eq!(graph.num_edges(), 0);

    let cores = common::core_numbers(&trace);
    assert!(cores.values().all(|core| *core == 1));
}

#[test]
fn peeling_default_graph_matches_manual_trace() {
    let mut graph = common::default_graph();
    let vertex_count = graph.num_vertices();
    let trace = common::peel(&mut graph);
    assert_eq!(trace.len(), vertex_count);
    assert_eq!(
        trace,
        vec![
            ("BR", 1),
            ("CC", 0),
            ("CN", 0),
            ("CH", 1),
            ("JU", 0),
            ("BM", 1),
            ("JA", 0),
            ("FN", 1),
            ("JV", 1),
            ("MA", 1),
            ("MP", 1),
            ("GP", 1),
            ("TH", 0),
        ]
    );
    // The big edge dies with its first leaf, so nothing survives past k = 1.
    let cores = common::core_numbers(&trace);
    assert!(cores.values().all(|core| *core == 1));
}

#[test]
fn dense_triangle_forms_a_three_core() {
    let mut graph: Hypergraph<char, u32> = Hypergraph::from_edges([
        (0, vec!['a', 'b', 'c']),
        (1, vec!['a', 'b']),
        (2, vec!['b', 'c']),
        (3, vec!['a', 'c']),
        (4, vec!['c', 'd']),
    ])
    .unwrap();
    let trace = common::peel(&mut graph);
    assert_eq!(trace, vec![('d', 1), ('a', 3), ('b', 1), ('c', 0)]);

    let cores = common::core_numbers(&trace);
    assert_eq!(cores[&'d'], 1);
    assert_eq!(cores[&'a'], 3);
    assert_eq!(cores[&'b'], 3);
    assert_eq!(cores[&'c'], 3);
}

#[test]
fn peeling_through_the_trait_object() {
    let mut graph = common::default_graph();
    let dynamic: &mut dyn PeelableHypergraph<Vertex = &'static str> = &mut graph;
    assert_eq!(dynamic.num_vertices(), 13);
    dynamic.remove_vertex(&"GP");
    assert_eq!(dynamic.degree(&"MA"), 0);
    assert_eq!(dynamic.neighbors_iterator(&"MA").count(), 0);
    assert_eq!(dynamic.precomputed_lower_bound(&"MA"), Some(1));
}

#[test]
fn strong_subgraph_equals_repeated_removal() {
    let graph = common::default_graph();
    let drop: BTreeSet<&str> = ["TH", "JA"].into_iter().collect();
    let keep: Vec<&str> = graph
        .node_iterator()
        .copied()
        .filter(|v| !drop.contains(v))
        .collect();

    let induced = graph.strong_subgraph(keep.iter()).unwrap();
    let mut peeled = graph.deep_copy();
    for vertex in &drop {
        peeled.remove_vertex(vertex);
    }

    let induced_edges: BTreeSet<u32> = induced.edge_ids().copied().collect();
    let peeled_edges: BTreeSet<u32> = peeled.edge_ids().copied().collect();
    assert_eq!(induced_edges, peeled_edges);
    assert_eq!(induced_edges, BTreeSet::from([3, 4, 6, 7]));
    for vertex in induced.node_iterator() {
        assert_eq!(induced.degree(vertex), peeled.degree(vertex));
    }
    // The sub-hypergraph is freshly packed.
    assert_eq!(induced.dead_edge_count(), 0);
    assert_eq!(induced.arena_len(), 4 + 7 + 2 + 2);
}

#[test]
fn compaction_preserves_logical_state() {
    let mut graph = common::default_graph();
    graph.remove_vertex(&"JV");
    graph.remove_vertex(&"FN");
    let hash = canonical_hash(&graph).unwrap();
    let edges = graph.edges();
    let arena_before = graph.arena_len();

    let reclaimed = graph.compact();
    assert_eq!(reclaimed, 2 + 2 + 3 + 4 + 7);
    assert_eq!(graph.arena_len(), arena_before - reclaimed);
    assert_eq!(graph.dead_edge_count(), 0);
    assert_eq!(graph.edges(), edges);
    assert_eq!(canonical_hash(&graph).unwrap(), hash);
    assert_eq!(graph.compact(), 0);

    // Peeling keeps working on the packed arena.
    graph.remove_vertex(&"GP");
    assert_eq!(graph.num_edges(), 0);
}

#[test]
fn trait_view_keeps_isolated_vertices_until_removed() {
    let mut graph: Hypergraph<char, u32> =
        Hypergraph::from_edges([(0, vec!['A', 'B']), (1, vec!['B', 'C', 'D'])]).unwrap();
    let dynamic: &mut dyn PeelableHypergraph<Vertex = char> = &mut graph;
    dynamic.remove_vertex(&'B');

    let remaining: Vec<char> = dynamic.node_iterator().copied().collect();
    assert_eq!(remaining.len(), 3);
    assert_eq!(dynamic.num_vertices(), 3);
    assert!(remaining.iter().all(|v| dynamic.degree(v) == 0));

    dynamic.remove_vertex(&'C');
    assert_eq!(dynamic.num_vertices(), 2);
}
