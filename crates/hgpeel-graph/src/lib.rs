#![deny(missing_docs)]

//! Compressed hypergraph with vertex-centric queries and an in-place
//! vertex-removal transform, the substrate for core-number peeling.
//!
//! Hyperedges are stored in a flat vertex arena addressed by per-edge ranges.
//! An incidence index and a degree table answer vertex-centric queries, and a
//! neighbourhood snapshot taken at construction provides static lower bounds
//! for pruning.

mod clique;
mod flags;
mod generators;
mod hash;
mod hypergraph;
mod incidence;
mod neighborhood;
mod serialization;
mod store;

use indexmap::{IndexMap, IndexSet};
use rustc_hash::FxBuildHasher;

pub(crate) type FxIndexMap<K, V> = IndexMap<K, V, FxBuildHasher>;
pub(crate) type FxIndexSet<T> = IndexSet<T, FxBuildHasher>;
pub(crate) use rustc_hash::{FxHashMap, FxHashSet};

pub use clique::{clique_edge_set, clique_pairs};
pub use flags::{CompactionPolicy, HypergraphConfig};
pub use generators::{gen_uniform, gen_uniform_with_config};
pub use hash::canonical_hash;
pub use hgpeel_core::{HgError, PeelableHypergraph, RemovalReport};
pub use hypergraph::Hypergraph;
pub use neighborhood::Neighbors;

/// Re-export serialization helpers for worker dispatch.
pub use serialization::{graph_from_bytes, graph_from_json, graph_to_bytes, graph_to_json};
