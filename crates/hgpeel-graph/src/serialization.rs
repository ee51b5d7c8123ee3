use hgpeel_core::errors::{ErrorInfo, HgError};
use hgpeel_core::{EdgeLabel, VertexLabel};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::flags::HypergraphConfig;
use crate::hypergraph::Hypergraph;
use crate::incidence::IncidenceIndex;
use crate::neighborhood::InitNeighborhood;
use crate::store::{EdgeRange, EdgeStore};
use crate::{FxHashMap, FxHashSet, FxIndexMap};

/// Serializes the full graph state to a compact binary snapshot using `bincode`.
///
/// The snapshot is what a worker process receives in place of a deep copy.
pub fn graph_to_bytes<V, E>(graph: &Hypergraph<V, E>) -> Result<Vec<u8>, HgError>
where
    V: VertexLabel + Serialize,
    E: EdgeLabel + Serialize,
{
    let serializable = SerializableGraph::from_graph(graph);
    bincode::serialize(&serializable)
        .map_err(|err| HgError::Serde(ErrorInfo::new("serialize-bytes", err.to_string())))
}

/// Restores a graph from its binary snapshot.
pub fn graph_from_bytes<V, E>(bytes: &[u8]) -> Result<Hypergraph<V, E>, HgError>
where
    V: VertexLabel + DeserializeOwned,
    E: EdgeLabel + DeserializeOwned,
{
    let serializable: SerializableGraph<V, E> = bincode::deserialize(bytes)
        .map_err(|err| HgError::Serde(ErrorInfo::new("deserialize-bytes", err.to_string())))?;
    serializable.into_graph()
}

/// Serializes the full graph state to a JSON string.
pub fn graph_to_json<V, E>(graph: &Hypergraph<V, E>) -> Result<String, HgError>
where
    V: VertexLabel + Serialize,
    E: EdgeLabel + Serialize,
{
    let serializable = SerializableGraph::from_graph(graph);
    serde_json::to_string_pretty(&serializable)
        .map_err(|err| HgError::Serde(ErrorInfo::new("serialize-json", err.to_string())))
}

/// Restores a graph from a JSON string.
pub fn graph_from_json<V, E>(json: &str) -> Result<Hypergraph<V, E>, HgError>
where
    V: VertexLabel + DeserializeOwned,
    E: EdgeLabel + DeserializeOwned,
{
    let serializable: SerializableGraph<V, E> = serde_json::from_str(json)
        .map_err(|err| HgError::Serde(ErrorInfo::new("deserialize-json", err.to_string())))?;
    serializable.into_graph()
}

#[derive(Debug, Serialize, Deserialize)]
struct SerializableGraph<V, E> {
    config: HypergraphConfig,
    arena: Vec<V>,
    edges: Vec<SerializableEdge<E>>,
    incidence: Vec<(V, Vec<E>)>,
    init_neighbors: Option<Vec<(V, Vec<V>)>>,
}

#[derive(Debug, Serialize, Deserialize)]
struct SerializableEdge<E> {
    id: E,
    start: usize,
    end: usize,
    alive: bool,
}

impl<V: VertexLabel, E: EdgeLabel> SerializableGraph<V, E> {
    fn from_graph(graph: &Hypergraph<V, E>) -> Self {
        let store = graph.store();
        let edges = store
            .raw_ranges()
            .map(|(id, range)| SerializableEdge {
                id: id.clone(),
                start: range.start,
                end: range.end,
                alive: range.alive,
            })
            .collect();
        let incidence = graph
            .incidence()
            .entries()
            .map(|(vertex, set)| (vertex.clone(), set.iter().cloned().collect()))
            .collect();
        let init_neighbors = graph.init().map(|init| {
            init.entries()
                .map(|(vertex, set)| (vertex.clone(), set.iter().cloned().collect()))
                .collect()
        });
        Self {
            config: *graph.config(),
            arena: store.raw_vertices().to_vec(),
            edges,
            incidence,
            init_neighbors,
        }
    }

    fn into_graph(self) -> Result<Hypergraph<V, E>, HgError> {
        self.config.validate()?;

        let mut ranges: FxIndexMap<E, EdgeRange> = FxIndexMap::default();
        for edge in self.edges {
            if edge.start >= edge.end || edge.end > self.arena.len() {
                return Err(corrupt("edge range lies outside the arena")
                    .with_context("edge", format!("{:?}", edge.id))
                    .with_context("start", edge.start)
                    .with_context("end", edge.end));
            }
            let range = EdgeRange {
                start: edge.start,
                end: edge.end,
                alive: edge.alive,
            };
            if ranges.insert(edge.id.clone(), range).is_some() {
                return Err(corrupt("edge id appears twice")
                    .with_context("edge", format!("{:?}", edge.id)));
            }
        }
        let store = EdgeStore::from_raw_parts(self.arena, ranges);

        let mut incidence = IncidenceIndex::new();
        for (vertex, edges) in self.incidence {
            for edge in edges {
                let holds_vertex = store
                    .live(&edge)
                    .is_some_and(|members| members.contains(&vertex));
                if !holds_vertex {
                    return Err(corrupt("incidence refers to an edge the vertex is not in")
                        .with_context("vertex", format!("{vertex:?}"))
                        .with_context("edge", format!("{edge:?}")));
                }
                incidence.attach(vertex.clone(), edge);
            }
            if incidence.get(&vertex).is_none() {
                incidence.touch(vertex);
            }
        }
        for (edge, members) in store.live_edges() {
            for vertex in members {
                let listed = incidence
                    .get(vertex)
                    .is_some_and(|edges| edges.contains(edge));
                if !listed {
                    return Err(corrupt("live edge missing from a member's incidence")
                        .with_context("vertex", format!("{vertex:?}"))
                        .with_context("edge", format!("{edge:?}")));
                }
            }
        }

        let init = self.init_neighbors.map(|entries| {
            let sets: FxHashMap<V, FxHashSet<V>> = entries
                .into_iter()
                .map(|(vertex, set)| (vertex, set.into_iter().collect()))
                .collect();
            InitNeighborhood::from_sets(sets)
        });

        Ok(Hypergraph::from_parts(self.config, store, incidence, init))
    }
}

fn corrupt(message: &str) -> HgError {
    HgError::Serde(ErrorInfo::new("corrupt-snapshot", message))
}
