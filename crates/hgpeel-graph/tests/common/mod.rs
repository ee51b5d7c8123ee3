#![allow(dead_code)]

use std::collections::{BTreeMap, BTreeSet};

use hgpeel_graph::{Hypergraph, PeelableHypergraph};

/// Toy co-authorship hypergraph used across tests.
pub fn default_edges() -> Vec<(u32, Vec<&'static str>)> {
    vec![
        (0, vec!["FN", "TH"]),
        (1, vec!["TH", "JV"]),
        (2, vec!["BM", "FN", "JA"]),
        (3, vec!["JV", "JU", "CH", "BM"]),
        (4, vec!["JU", "CH", "BR", "CN", "CC", "JV", "BM"]),
        (5, vec!["TH", "GP"]),
        (6, vec!["GP", "MP"]),
        (7, vec!["MA", "GP"]),
    ]
}

pub fn default_graph() -> Hypergraph<&'static str, u32> {
    Hypergraph::from_edges(default_edges()).expect("default graph builds")
}

/// Repeatedly removes a minimum-degree vertex (ties broken by label) and
/// records `(vertex, degree at removal)` until the graph is empty.
pub fn peel<H>(graph: &mut H) -> Vec<(H::Vertex, usize)>
where
    H: PeelableHypergraph,
    H::Vertex: Ord,
{
    let mut trace = Vec::new();
    loop {
        let next = graph
            .node_iterator()
            .map(|v| (graph.degree(v), v.clone()))
            .min();
        let Some((degree, vertex)) = next else {
            break;
        };
        graph.remove_vertex(&vertex);
        trace.push((vertex, degree));
    }
    trace
}

/// Core numbers read off a peeling trace as the running maximum degree.
pub fn core_numbers<V: Ord + Clone>(trace: &[(V, usize)]) -> BTreeMap<V, usize> {
    let mut current = 0;
    trace
        .iter()
        .map(|(vertex, degree)| {
            current = current.max(*degree);
            (vertex.clone(), current)
        })
        .collect()
}

/// Edges of the default dataset that survive after removing `removed`:
/// exactly those with no member in `removed`.
pub fn surviving_edges<V: Ord + Clone, E: Ord + Clone>(
    edges: &[(E, Vec<V>)],
    removed: &BTreeSet<V>,
) -> BTreeMap<V, BTreeSet<E>> {
    let mut incidence: BTreeMap<V, BTreeSet<E>> = BTreeMap::new();
    for (id, members) in edges {
        if members.iter().any(|v| removed.contains(v)) {
            continue;
        }
        for member in members {
            incidence.entry(member.clone()).or_default().insert(id.clone());
        }
    }
    incidence
}
