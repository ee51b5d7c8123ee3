use hgpeel_core::{
    errors::{ErrorInfo, HgError},
    EdgeLabel, PeelableHypergraph, RemovalReport, VertexLabel,
};
use tracing::{debug, trace};

use crate::flags::HypergraphConfig;
use crate::incidence::{DegreeTable, IncidenceIndex};
use crate::neighborhood::{InitNeighborhood, Neighbors};
use crate::store::EdgeStore;
use crate::{FxHashSet, FxIndexSet};

/// Compressed undirected hypergraph with a vertex-removal transform.
///
/// Hyperedges live in one flat arena of vertex ids addressed by
/// `(start, end)` ranges. Vertex-centric queries go through a separate
/// incidence index and degree table, which the removal transform keeps exact.
/// The arena itself is append-only until [`Hypergraph::compact`] runs.
#[derive(Debug, Clone)]
pub struct Hypergraph<V, E> {
    config: HypergraphConfig,
    store: EdgeStore<V, E>,
    incidence: IncidenceIndex<V, E>,
    degrees: DegreeTable<V>,
    init: Option<InitNeighborhood<V>>,
}

impl<V: VertexLabel, E: EdgeLabel> Hypergraph<V, E> {
    /// Creates an empty hypergraph with the provided configuration.
    pub fn new(config: HypergraphConfig) -> Self {
        Self {
            config,
            store: EdgeStore::new(),
            incidence: IncidenceIndex::new(),
            degrees: DegreeTable::new(),
            init: config.init_cache.then(InitNeighborhood::new),
        }
    }

    /// Builds a hypergraph from `edge id -> members` pairs with the default
    /// configuration.
    pub fn from_edges<I, M>(edges: I) -> Result<Self, HgError>
    where
        I: IntoIterator<Item = (E, M)>,
        M: IntoIterator<Item = V>,
    {
        Self::with_config(edges, HypergraphConfig::default())
    }

    /// Builds a hypergraph from `edge id -> members` pairs.
    ///
    /// One pass appends every edge to the arena while filling the incidence
    /// index, the degree table and the initial neighbour sets; a second pass
    /// over vertices derives the precomputed lower bounds.
    pub fn with_config<I, M>(edges: I, config: HypergraphConfig) -> Result<Self, HgError>
    where
        I: IntoIterator<Item = (E, M)>,
        M: IntoIterator<Item = V>,
    {
        config.validate()?;
        let mut graph = Self::new(config);
        for (id, members) in edges {
            let range = graph.append(id, members)?;
            if let Some(init) = graph.init.as_mut() {
                let members = graph.store.slice(range);
                for vertex in members {
                    init.absorb(vertex, members);
                }
            }
        }
        if let Some(init) = graph.init.as_mut() {
            init.finalize();
        }
        debug!(
            vertices = graph.num_vertices(),
            edges = graph.num_edges(),
            arena = graph.store.arena_len(),
            "hypergraph constructed"
        );
        Ok(graph)
    }

    /// Returns the configuration used by this graph.
    pub fn config(&self) -> &HypergraphConfig {
        &self.config
    }

    /// Adds a single hyperedge.
    ///
    /// The id may belong to an edge already stripped by a removal; only live
    /// ids are rejected, whether or not the arena has been compacted.
    ///
    /// Only the arena, incidence index and degree table are updated; the
    /// initial neighbourhood cache keeps describing the bulk-built graph.
    pub fn add_edge<M>(&mut self, id: E, members: M) -> Result<(), HgError>
    where
        M: IntoIterator<Item = V>,
    {
        self.append(id, members).map(|_| ())
    }

    fn append<M>(&mut self, id: E, members: M) -> Result<crate::store::EdgeRange, HgError>
    where
        M: IntoIterator<Item = V>,
    {
        if self.store.is_live(&id) {
            return Err(HgError::Validation(
                ErrorInfo::new("duplicate-edge", "edge id is already in use")
                    .with_context("edge", format!("{id:?}")),
            ));
        }
        let Some(range) = self.store.push(id.clone(), members) else {
            return Err(HgError::Validation(
                ErrorInfo::new("invalid-edge", "hyperedges require at least one vertex")
                    .with_context("edge", format!("{id:?}")),
            ));
        };
        for vertex in self.store.slice(range) {
            let degree = self.incidence.attach(vertex.clone(), id.clone());
            self.degrees.set(vertex.clone(), degree);
        }
        Ok(range)
    }

    /// Returns the current degree of `vertex`, or zero if it is unknown.
    pub fn degree(&self, vertex: &V) -> usize {
        self.degrees.get(vertex)
    }

    /// Returns the members of a live hyperedge in their original order.
    pub fn get_edge_by_id(&self, id: &E) -> Result<&[V], HgError> {
        self.store.live(id).ok_or_else(|| {
            HgError::Graph(
                ErrorInfo::new("unknown-edge", "edge does not exist")
                    .with_context("edge", format!("{id:?}")),
            )
        })
    }

    /// Returns the dimension (arity minus one) of a live hyperedge.
    pub fn dim(&self, id: &E) -> Result<usize, HgError> {
        Ok(self.get_edge_by_id(id)?.len() - 1)
    }

    /// Iterates over the ids of live hyperedges in insertion order.
    pub fn edge_ids(&self) -> impl Iterator<Item = &E> + '_ {
        self.store.live_ids()
    }

    /// Iterates over the members of every live hyperedge in insertion order.
    pub fn edge_iterator(&self) -> impl Iterator<Item = &[V]> + '_ {
        self.store.live_edges().map(|(_, members)| members)
    }

    /// Iterates over `(id, members)` for every live hyperedge.
    pub fn edges_with_ids(&self) -> impl Iterator<Item = (&E, &[V])> + '_ {
        self.store.live_edges()
    }

    /// Iterates over every vertex still held by the graph.
    pub fn node_iterator(&self) -> impl Iterator<Item = &V> + '_ {
        self.incidence.vertices()
    }

    /// Collects [`Hypergraph::node_iterator`].
    pub fn nodes(&self) -> Vec<V> {
        self.node_iterator().cloned().collect()
    }

    /// Collects [`Hypergraph::edge_iterator`].
    pub fn edges(&self) -> Vec<Vec<V>> {
        self.edge_iterator().map(<[V]>::to_vec).collect()
    }

    /// Number of vertices still held by the graph, isolated ones included.
    pub fn num_vertices(&self) -> usize {
        self.incidence.len()
    }

    /// Number of live hyperedges.
    pub fn num_edges(&self) -> usize {
        self.store.live_count()
    }

    /// Returns whether `vertex` still has an incidence entry.
    pub fn contains_vertex(&self, vertex: &V) -> bool {
        self.incidence.contains(vertex)
    }

    /// Iterates over the ids of edges currently incident on `vertex`.
    pub fn incident_edges(&self, vertex: &V) -> impl Iterator<Item = &E> + '_ {
        self.incidence.get(vertex).into_iter().flatten()
    }

    /// Yields each current neighbour of `vertex` once, never `vertex` itself.
    ///
    /// Computed by traversal over the incident edges, so it always reflects
    /// the peeled state.
    pub fn neighbors_iterator<'a>(&'a self, vertex: &'a V) -> Neighbors<'a, V, E> {
        Neighbors::new(
            vertex,
            &self.store,
            self.incidence.get(vertex).map(|set| set.iter()),
        )
    }

    /// Collects [`Hypergraph::neighbors_iterator`].
    pub fn neighbors(&self, vertex: &V) -> Vec<V> {
        self.neighbors_iterator(vertex).cloned().collect()
    }

    /// Number of current neighbours of `vertex`.
    pub fn number_of_neighbors(&self, vertex: &V) -> usize {
        self.neighbors_iterator(vertex).count()
    }

    fn init_cache(&self) -> Result<&InitNeighborhood<V>, HgError> {
        self.init.as_ref().ok_or_else(|| {
            HgError::Graph(
                ErrorInfo::new(
                    "cache-disabled",
                    "initial neighbourhood cache was not built",
                )
                .with_hint("enable `init_cache` in the configuration"),
            )
        })
    }

    fn init_set(&self, vertex: &V) -> Result<&FxHashSet<V>, HgError> {
        self.init_cache()?.neighbors(vertex).ok_or_else(|| {
            HgError::Graph(
                ErrorInfo::new("unknown-vertex", "vertex was not part of the bulk-built graph")
                    .with_context("vertex", format!("{vertex:?}")),
            )
        })
    }

    /// Neighbours of `vertex` in the graph as it was bulk-built.
    pub fn init_neighbors(&self, vertex: &V) -> Result<impl Iterator<Item = &V> + '_, HgError> {
        Ok(self.init_set(vertex)?.iter())
    }

    /// Neighbourhood size of `vertex` in the graph as it was bulk-built.
    pub fn init_neighbor_len(&self, vertex: &V) -> Result<usize, HgError> {
        Ok(self.init_set(vertex)?.len())
    }

    /// Static lower bound `min(|N(v)|, min_{u in N(v)} |N(u)| - 1)` over the
    /// bulk-built graph.
    ///
    /// `None` when `vertex` had no neighbours, is unknown, or the cache is
    /// disabled.
    pub fn precomputed_lower_bound(&self, vertex: &V) -> Option<usize> {
        self.init.as_ref()?.lower_bound(vertex)
    }

    /// Removes `vertex` and turns the graph into the sub-hypergraph strongly
    /// induced by the remaining vertices.
    ///
    /// Every edge containing `vertex` disappears from the incidence sets of
    /// all its other members and is flagged dead in the arena. Removing a
    /// vertex that is no longer present is a no-op.
    pub fn remove_vertex(&mut self, vertex: &V) -> RemovalReport {
        let neighbours: Vec<V> = self.neighbors_iterator(vertex).cloned().collect();
        let stripped: FxIndexSet<E> = self.incidence.remove(vertex).unwrap_or_default();
        let was_present = self.degrees.remove(vertex).is_some() || !stripped.is_empty();
        debug!(
            vertex = ?vertex,
            incident = stripped.len(),
            neighbours = neighbours.len(),
            "removing vertex"
        );

        for neighbour in &neighbours {
            let degree = self.incidence.strip(neighbour, &stripped);
            self.degrees.set(neighbour.clone(), degree);
            trace!(neighbour = ?neighbour, degree, "stripped incident edges");
        }
        for edge in &stripped {
            self.store.mark_dead(edge);
        }

        if self.config.compaction.should_compact(self.store.dead_fraction()) {
            self.compact();
        }

        RemovalReport {
            was_present,
            edges_stripped: stripped.len(),
            neighbors_touched: neighbours.len(),
        }
    }

    /// Returns an independently owned copy of the whole structure.
    ///
    /// Peeling is destructive, so every worker needs its own copy.
    pub fn deep_copy(&self) -> Self {
        self.clone()
    }

    /// Builds a new compact hypergraph holding exactly the live edges whose
    /// members all lie in `vertices`.
    pub fn strong_subgraph<'a, I>(&self, vertices: I) -> Result<Self, HgError>
    where
        I: IntoIterator<Item = &'a V>,
        V: 'a,
    {
        let keep: FxHashSet<&V> = vertices.into_iter().collect();
        let edges = self
            .store
            .live_edges()
            .filter(|(_, members)| members.iter().all(|v| keep.contains(v)))
            .map(|(id, members)| (id.clone(), members.to_vec()));
        Self::with_config(edges, self.config)
    }

    /// Rewrites the arena without dead edge ranges. Returns the number of
    /// arena slots reclaimed.
    pub fn compact(&mut self) -> usize {
        let dead = self.store.dead_count();
        let reclaimed = self.store.compact();
        if reclaimed > 0 {
            debug!(dead_edges = dead, reclaimed, "compacted edge arena");
        }
        reclaimed
    }

    /// Number of vertex slots in the arena, dead ranges included.
    pub fn arena_len(&self) -> usize {
        self.store.arena_len()
    }

    /// Number of edges stripped by removals but not yet compacted away.
    pub fn dead_edge_count(&self) -> usize {
        self.store.dead_count()
    }

    pub(crate) fn store(&self) -> &EdgeStore<V, E> {
        &self.store
    }

    pub(crate) fn incidence(&self) -> &IncidenceIndex<V, E> {
        &self.incidence
    }

    pub(crate) fn init(&self) -> Option<&InitNeighborhood<V>> {
        self.init.as_ref()
    }

    pub(crate) fn from_parts(
        config: HypergraphConfig,
        store: EdgeStore<V, E>,
        incidence: IncidenceIndex<V, E>,
        init: Option<InitNeighborhood<V>>,
    ) -> Self {
        let degrees = DegreeTable::rebuild(&incidence);
        Self {
            config,
            store,
            incidence,
            degrees,
            init,
        }
    }
}

impl<V: VertexLabel, E: EdgeLabel> Default for Hypergraph<V, E> {
    fn default() -> Self {
        Self::new(HypergraphConfig::default())
    }
}

impl<V: VertexLabel, E: EdgeLabel> PeelableHypergraph for Hypergraph<V, E> {
    type Vertex = V;

    fn node_iterator(&self) -> Box<dyn Iterator<Item = &V> + '_> {
        Box::new(Hypergraph::node_iterator(self))
    }

    fn degree(&self, vertex: &V) -> usize {
        Hypergraph::degree(self, vertex)
    }

    fn neighbors_iterator<'a>(&'a self, vertex: &'a V) -> Box<dyn Iterator<Item = &'a V> + 'a> {
        Box::new(Hypergraph::neighbors_iterator(self, vertex))
    }

    fn remove_vertex(&mut self, vertex: &V) -> RemovalReport {
        Hypergraph::remove_vertex(self, vertex)
    }

    fn precomputed_lower_bound(&self, vertex: &V) -> Option<usize> {
        Hypergraph::precomputed_lower_bound(self, vertex)
    }

    fn num_vertices(&self) -> usize {
        Hypergraph::num_vertices(self)
    }
}
