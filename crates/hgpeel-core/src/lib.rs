#![deny(missing_docs)]
#![doc = "Core contracts for compressed hypergraphs that support vertex peeling."]

use std::fmt::Debug;
use std::hash::Hash;

pub mod errors;

pub use errors::{ErrorInfo, HgError};

/// Bounds required of an opaque vertex label.
///
/// Labels carry identity only. Ordering is deliberately not required so that
/// string and integer labels are interchangeable with hash-only types.
pub trait VertexLabel: Clone + Eq + Hash + Debug {}

impl<T> VertexLabel for T where T: Clone + Eq + Hash + Debug {}

/// Bounds required of an opaque hyperedge key.
pub trait EdgeLabel: Clone + Eq + Hash + Debug {}

impl<T> EdgeLabel for T where T: Clone + Eq + Hash + Debug {}

/// Summary of a single vertex-removal transform.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RemovalReport {
    /// Whether the vertex held any bookkeeping before the call.
    pub was_present: bool,
    /// Number of hyperedges that vanished with the vertex.
    pub edges_stripped: usize,
    /// Number of neighbours whose incidence sets were rewritten.
    pub neighbors_touched: usize,
}

/// Vertex-centric contract consumed by peeling decompositions.
///
/// Implementations answer degree and neighbourhood queries against the
/// current (possibly peeled) state and mutate themselves destructively on
/// [`PeelableHypergraph::remove_vertex`].
pub trait PeelableHypergraph {
    /// Vertex label type.
    type Vertex: VertexLabel;

    /// Returns an iterator over every vertex not yet removed, including
    /// isolated ones whose degree has dropped to zero.
    fn node_iterator(&self) -> Box<dyn Iterator<Item = &Self::Vertex> + '_>;

    /// Returns the current degree of `vertex`, zero when it is unknown.
    fn degree(&self, vertex: &Self::Vertex) -> usize;

    /// Returns each current neighbour of `vertex` exactly once.
    fn neighbors_iterator<'a>(
        &'a self,
        vertex: &'a Self::Vertex,
    ) -> Box<dyn Iterator<Item = &'a Self::Vertex> + 'a>;

    /// Removes `vertex`, leaving the sub-hypergraph strongly induced by the rest.
    fn remove_vertex(&mut self, vertex: &Self::Vertex) -> RemovalReport;

    /// Static neighbourhood-size lower bound computed before any peeling.
    fn precomputed_lower_bound(&self, vertex: &Self::Vertex) -> Option<usize>;

    /// Returns the number of vertices not yet removed, isolated ones included.
    fn num_vertices(&self) -> usize {
        self.node_iterator().count()
    }
}
