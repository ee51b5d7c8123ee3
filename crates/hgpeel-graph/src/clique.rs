//! Pairwise (2-section) expansion of live hyperedges, for callers that reduce
//! hypergraph peeling to ordinary graph core decomposition.

use std::collections::BTreeSet;

use hgpeel_core::{EdgeLabel, VertexLabel};

use crate::hypergraph::Hypergraph;

/// Yields every unordered pair of distinct members of every live hyperedge.
///
/// Pairs shared by several hyperedges are yielded once per hyperedge.
pub fn clique_pairs<V, E>(graph: &Hypergraph<V, E>) -> impl Iterator<Item = (&V, &V)> + '_
where
    V: VertexLabel,
    E: EdgeLabel,
{
    graph.edge_iterator().flat_map(|members| {
        members.iter().enumerate().flat_map(move |(idx, a)| {
            members[idx + 1..]
                .iter()
                .filter(move |b| *b != a)
                .map(move |b| (a, b))
        })
    })
}

/// Returns the deduplicated edge set of the 2-section, each pair as `(min, max)`.
pub fn clique_edge_set<V, E>(graph: &Hypergraph<V, E>) -> BTreeSet<(V, V)>
where
    V: VertexLabel + Ord,
    E: EdgeLabel,
{
    clique_pairs(graph)
        .map(|(a, b)| {
            if a <= b {
                (a.clone(), b.clone())
            } else {
                (b.clone(), a.clone())
            }
        })
        .collect()
}
