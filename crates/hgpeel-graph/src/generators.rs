use hgpeel_core::errors::{ErrorInfo, HgError};
use rand::seq::index::sample;
use rand::Rng;

use crate::flags::HypergraphConfig;
use crate::hypergraph::Hypergraph;

/// Generates a random `arity`-uniform hypergraph over vertices `0..n_vertices`.
///
/// Edge `i` gets id `i` and `arity` distinct vertices drawn uniformly. The
/// same seed always produces the same graph.
pub fn gen_uniform<R: Rng + ?Sized>(
    n_vertices: usize,
    n_edges: usize,
    arity: usize,
    rng: &mut R,
) -> Result<Hypergraph<u64, u64>, HgError> {
    gen_uniform_with_config(n_vertices, n_edges, arity, HypergraphConfig::default(), rng)
}

/// [`gen_uniform`] with an explicit configuration.
pub fn gen_uniform_with_config<R: Rng + ?Sized>(
    n_vertices: usize,
    n_edges: usize,
    arity: usize,
    config: HypergraphConfig,
    rng: &mut R,
) -> Result<Hypergraph<u64, u64>, HgError> {
    if arity == 0 || arity > n_vertices {
        return Err(HgError::Validation(
            ErrorInfo::new(
                "invalid-arity",
                "arity must lie between one and the number of vertices",
            )
            .with_context("arity", arity.to_string())
            .with_context("vertices", n_vertices.to_string()),
        ));
    }
    let edges: Vec<(u64, Vec<u64>)> = (0..n_edges)
        .map(|idx| {
            let members = sample(&mut *rng, n_vertices, arity)
                .into_iter()
                .map(|v| v as u64)
                .collect();
            (idx as u64, members)
        })
        .collect();
    Hypergraph::with_config(edges, config)
}
