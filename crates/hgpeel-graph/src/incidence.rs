use hgpeel_core::{EdgeLabel, VertexLabel};

use crate::{FxHashMap, FxIndexMap, FxIndexSet};

/// Vertex -> incident edge ids.
///
/// A vertex keeps its (possibly empty) entry until it is removed itself, so a
/// neighbour isolated by a removal is still listed with degree zero.
#[derive(Debug, Clone)]
pub(crate) struct IncidenceIndex<V, E> {
    sets: FxIndexMap<V, FxIndexSet<E>>,
}

impl<V: VertexLabel, E: EdgeLabel> IncidenceIndex<V, E> {
    pub(crate) fn new() -> Self {
        Self {
            sets: FxIndexMap::default(),
        }
    }

    /// Records `edge` on `vertex` and returns the new incidence size.
    pub(crate) fn attach(&mut self, vertex: V, edge: E) -> usize {
        let set = self.sets.entry(vertex).or_default();
        set.insert(edge);
        set.len()
    }

    /// Ensures `vertex` has an entry, possibly empty.
    pub(crate) fn touch(&mut self, vertex: V) {
        self.sets.entry(vertex).or_default();
    }

    pub(crate) fn get(&self, vertex: &V) -> Option<&FxIndexSet<E>> {
        self.sets.get(vertex)
    }

    pub(crate) fn contains(&self, vertex: &V) -> bool {
        self.sets.contains_key(vertex)
    }

    /// Removes every id in `edges` from `vertex` and returns the remaining size.
    pub(crate) fn strip(&mut self, vertex: &V, edges: &FxIndexSet<E>) -> usize {
        match self.sets.get_mut(vertex) {
            Some(set) => {
                if edges.len() < set.len() {
                    for edge in edges {
                        set.swap_remove(edge);
                    }
                } else {
                    set.retain(|edge| !edges.contains(edge));
                }
                set.len()
            }
            None => 0,
        }
    }

    pub(crate) fn remove(&mut self, vertex: &V) -> Option<FxIndexSet<E>> {
        self.sets.swap_remove(vertex)
    }

    pub(crate) fn vertices(&self) -> impl Iterator<Item = &V> + '_ {
        self.sets.keys()
    }

    pub(crate) fn entries(&self) -> impl Iterator<Item = (&V, &FxIndexSet<E>)> + '_ {
        self.sets.iter()
    }

    pub(crate) fn len(&self) -> usize {
        self.sets.len()
    }
}

/// Vertex -> current degree. Mirrors the incidence sizes after every mutation.
#[derive(Debug, Clone)]
pub(crate) struct DegreeTable<V> {
    degrees: FxHashMap<V, usize>,
}

impl<V: VertexLabel> DegreeTable<V> {
    pub(crate) fn new() -> Self {
        Self {
            degrees: FxHashMap::default(),
        }
    }

    pub(crate) fn get(&self, vertex: &V) -> usize {
        self.degrees.get(vertex).copied().unwrap_or(0)
    }

    pub(crate) fn set(&mut self, vertex: V, degree: usize) {
        self.degrees.insert(vertex, degree);
    }

    pub(crate) fn remove(&mut self, vertex: &V) -> Option<usize> {
        self.degrees.remove(vertex)
    }

    pub(crate) fn rebuild<E: EdgeLabel>(incidence: &IncidenceIndex<V, E>) -> Self {
        let degrees = incidence
            .entries()
            .map(|(vertex, set)| (vertex.clone(), set.len()))
            .collect();
        Self { degrees }
    }
}
