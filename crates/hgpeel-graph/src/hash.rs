use hgpeel_core::errors::{ErrorInfo, HgError};
use hgpeel_core::{EdgeLabel, VertexLabel};
use serde::Serialize;
use sha2::{Digest, Sha256};

use crate::hypergraph::Hypergraph;

/// Computes the canonical structural hash of the graph's logical state.
///
/// Covers the live edges (sorted by id, members in stored order) and the
/// vertex/degree table (sorted by vertex). Arena layout, dead ranges and the
/// static neighbourhood cache do not contribute, so compaction leaves the
/// hash unchanged while every effective removal changes it.
pub fn canonical_hash<V, E>(graph: &Hypergraph<V, E>) -> Result<String, HgError>
where
    V: VertexLabel + Ord + Serialize,
    E: EdgeLabel + Ord + Serialize,
{
    let mut hasher = Sha256::new();

    let mut edges: Vec<(&E, &[V])> = graph.edges_with_ids().collect();
    edges.sort_by(|a, b| a.0.cmp(b.0));
    hasher.update(b"edges");
    hasher.update((edges.len() as u64).to_le_bytes());
    for (id, members) in edges {
        update_label(id, &mut hasher)?;
        hasher.update((members.len() as u64).to_le_bytes());
        for member in members {
            update_label(member, &mut hasher)?;
        }
    }

    let mut vertices: Vec<&V> = graph.node_iterator().collect();
    vertices.sort();
    hasher.update(b"vertices");
    hasher.update((vertices.len() as u64).to_le_bytes());
    for vertex in vertices {
        update_label(vertex, &mut hasher)?;
        hasher.update((graph.degree(vertex) as u64).to_le_bytes());
    }

    Ok(format!("{:x}", hasher.finalize()))
}

fn update_label<T: Serialize>(label: &T, hasher: &mut Sha256) -> Result<(), HgError> {
    let bytes = bincode::serialize(label)
        .map_err(|err| HgError::Serde(ErrorInfo::new("encode-label", err.to_string())))?;
    hasher.update((bytes.len() as u64).to_le_bytes());
    hasher.update(&bytes);
    Ok(())
}
