use hgpeel_core::{EdgeLabel, VertexLabel};

use crate::store::EdgeStore;
use crate::{FxHashMap, FxHashSet};

/// Neighbourhood snapshot of the hypergraph as it was constructed.
///
/// Never refreshed after peeling; the lower bound is a pruning heuristic for
/// decomposition algorithms, not a live value.
#[derive(Debug, Clone)]
pub(crate) struct InitNeighborhood<V> {
    neighbors: FxHashMap<V, FxHashSet<V>>,
    lower_bounds: FxHashMap<V, usize>,
}

impl<V: VertexLabel> InitNeighborhood<V> {
    pub(crate) fn new() -> Self {
        Self {
            neighbors: FxHashMap::default(),
            lower_bounds: FxHashMap::default(),
        }
    }

    /// Unions the members of one edge, minus `vertex` itself, into its set.
    pub(crate) fn absorb(&mut self, vertex: &V, members: &[V]) {
        let set = self.neighbors.entry(vertex.clone()).or_default();
        set.extend(members.iter().filter(|u| *u != vertex).cloned());
    }

    /// Computes `min(|N(v)|, min_{u in N(v)} |N(u)| - 1)` for every vertex with
    /// at least one neighbour.
    pub(crate) fn finalize(&mut self) {
        let mut lower_bounds = FxHashMap::default();
        for (vertex, set) in &self.neighbors {
            let bound = set
                .iter()
                .filter_map(|u| self.neighbors.get(u))
                .map(|other| other.len().saturating_sub(1))
                .min();
            if let Some(bound) = bound {
                lower_bounds.insert(vertex.clone(), bound.min(set.len()));
            }
        }
        self.lower_bounds = lower_bounds;
    }

    pub(crate) fn neighbors(&self, vertex: &V) -> Option<&FxHashSet<V>> {
        self.neighbors.get(vertex)
    }

    pub(crate) fn lower_bound(&self, vertex: &V) -> Option<usize> {
        self.lower_bounds.get(vertex).copied()
    }

    pub(crate) fn entries(&self) -> impl Iterator<Item = (&V, &FxHashSet<V>)> + '_ {
        self.neighbors.iter()
    }

    pub(crate) fn from_sets(neighbors: FxHashMap<V, FxHashSet<V>>) -> Self {
        let mut cache = Self {
            neighbors,
            lower_bounds: FxHashMap::default(),
        };
        cache.finalize();
        cache
    }
}

/// Traversal-based neighbour iterator returned by
/// [`Hypergraph::neighbors_iterator`](crate::Hypergraph::neighbors_iterator).
///
/// Walks every edge incident on the centre vertex and yields each co-occurring
/// vertex once. Costs `O(degree * max edge size)`.
pub struct Neighbors<'a, V, E> {
    center: &'a V,
    store: &'a EdgeStore<V, E>,
    edges: Option<indexmap::set::Iter<'a, E>>,
    current: std::slice::Iter<'a, V>,
    visited: FxHashSet<&'a V>,
}

impl<'a, V: VertexLabel, E: EdgeLabel> Neighbors<'a, V, E> {
    pub(crate) fn new(
        center: &'a V,
        store: &'a EdgeStore<V, E>,
        edges: Option<indexmap::set::Iter<'a, E>>,
    ) -> Self {
        Self {
            center,
            store,
            edges,
            current: <&[V]>::default().iter(),
            visited: FxHashSet::default(),
        }
    }
}

impl<'a, V: VertexLabel, E: EdgeLabel> Iterator for Neighbors<'a, V, E> {
    type Item = &'a V;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            for candidate in self.current.by_ref() {
                if candidate != self.center && self.visited.insert(candidate) {
                    return Some(candidate);
                }
            }
            let edge = self.edges.as_mut()?.next()?;
            self.current = self.store.members(edge).unwrap_or(&[]).iter();
        }
    }
}

impl<V, E> std::fmt::Debug for Neighbors<'_, V, E> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Neighbors")
            .field("visited", &self.visited.len())
            .finish_non_exhaustive()
    }
}
