use hgpeel_core::{EdgeLabel, VertexLabel};

use crate::FxIndexMap;

/// Half-open window into the shared vertex arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct EdgeRange {
    pub(crate) start: usize,
    pub(crate) end: usize,
    pub(crate) alive: bool,
}

impl EdgeRange {
    pub(crate) fn len(&self) -> usize {
        self.end - self.start
    }
}

/// Flat arena of vertex ids plus the `edge id -> range` table.
///
/// Ranges are never moved by the removal transform; an edge that vanishes
/// only flips its `alive` flag. Space is reclaimed by [`EdgeStore::compact`].
#[derive(Debug, Clone)]
pub(crate) struct EdgeStore<V, E> {
    vertices: Vec<V>,
    ranges: FxIndexMap<E, EdgeRange>,
    dead_edges: usize,
    dead_slots: usize,
}

impl<V: VertexLabel, E: EdgeLabel> EdgeStore<V, E> {
    pub(crate) fn new() -> Self {
        Self {
            vertices: Vec::new(),
            ranges: FxIndexMap::default(),
            dead_edges: 0,
            dead_slots: 0,
        }
    }

    /// Appends `members` as edge `id` and returns its range, or `None` when
    /// `members` is empty (nothing is recorded in that case).
    ///
    /// A dead range under the same id is replaced; its old slots stay counted
    /// as dead until compaction. Callers reject live duplicates first.
    pub(crate) fn push<I>(&mut self, id: E, members: I) -> Option<EdgeRange>
    where
        I: IntoIterator<Item = V>,
    {
        let start = self.vertices.len();
        self.vertices.extend(members);
        if self.vertices.len() == start {
            return None;
        }
        let range = EdgeRange {
            start,
            end: self.vertices.len(),
            alive: true,
        };
        if let Some(previous) = self.ranges.insert(id, range) {
            if !previous.alive {
                self.dead_edges -= 1;
            }
        }
        Some(range)
    }

    pub(crate) fn arena_len(&self) -> usize {
        self.vertices.len()
    }

    pub(crate) fn is_live(&self, id: &E) -> bool {
        self.ranges.get(id).is_some_and(|range| range.alive)
    }

    pub(crate) fn slice(&self, range: EdgeRange) -> &[V] {
        &self.vertices[range.start..range.end]
    }

    /// Returns the members of a live edge.
    pub(crate) fn live(&self, id: &E) -> Option<&[V]> {
        self.ranges
            .get(id)
            .filter(|range| range.alive)
            .map(|range| self.slice(*range))
    }

    /// Returns the members of an edge whether or not it is still live.
    pub(crate) fn members(&self, id: &E) -> Option<&[V]> {
        self.ranges.get(id).map(|range| self.slice(*range))
    }

    /// Flags the edge as dead. Returns `false` when it already was.
    pub(crate) fn mark_dead(&mut self, id: &E) -> bool {
        match self.ranges.get_mut(id) {
            Some(range) if range.alive => {
                range.alive = false;
                self.dead_edges += 1;
                self.dead_slots += range.len();
                true
            }
            _ => false,
        }
    }

    pub(crate) fn live_ids(&self) -> impl Iterator<Item = &E> + '_ {
        self.ranges
            .iter()
            .filter(|(_, range)| range.alive)
            .map(|(id, _)| id)
    }

    pub(crate) fn live_edges(&self) -> impl Iterator<Item = (&E, &[V])> + '_ {
        self.ranges
            .iter()
            .filter(|(_, range)| range.alive)
            .map(|(id, range)| (id, self.slice(*range)))
    }

    pub(crate) fn live_count(&self) -> usize {
        self.ranges.len() - self.dead_edges
    }

    pub(crate) fn dead_count(&self) -> usize {
        self.dead_edges
    }

    /// Fraction of the arena held by dead ranges.
    pub(crate) fn dead_fraction(&self) -> f64 {
        if self.vertices.is_empty() {
            0.0
        } else {
            self.dead_slots as f64 / self.vertices.len() as f64
        }
    }

    /// Rewrites the arena without dead ranges, preserving live edge order.
    /// Returns the number of arena slots reclaimed.
    pub(crate) fn compact(&mut self) -> usize {
        if self.dead_slots == 0 {
            return 0;
        }
        let before = self.vertices.len();
        let old = std::mem::take(&mut self.vertices);
        let mut vertices = Vec::with_capacity(before - self.dead_slots);
        self.ranges.retain(|_, range| range.alive);
        for range in self.ranges.values_mut() {
            let start = vertices.len();
            vertices.extend_from_slice(&old[range.start..range.end]);
            range.start = start;
            range.end = vertices.len();
        }
        vertices.shrink_to_fit();
        self.vertices = vertices;
        self.dead_edges = 0;
        self.dead_slots = 0;
        before - self.vertices.len()
    }

    /// Every stored range in insertion order, dead ones included.
    pub(crate) fn raw_ranges(&self) -> impl Iterator<Item = (&E, EdgeRange)> + '_ {
        self.ranges.iter().map(|(id, range)| (id, *range))
    }

    pub(crate) fn raw_vertices(&self) -> &[V] {
        &self.vertices
    }

    /// Rebuilds a store from snapshot parts. Ranges must already be validated.
    pub(crate) fn from_raw_parts(vertices: Vec<V>, ranges: FxIndexMap<E, EdgeRange>) -> Self {
        let dead_edges = ranges.values().filter(|range| !range.alive).count();
        let live_slots: usize = ranges
            .values()
            .filter(|range| range.alive)
            .map(EdgeRange::len)
            .sum();
        let dead_slots = vertices.len().saturating_sub(live_slots);
        Self {
            vertices,
            ranges,
            dead_edges,
            dead_slots,
        }
    }
}
