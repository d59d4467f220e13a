//! On-disk graph representation.
//!
//! The persisted form is a JSON object with a `nodes` map (id → stop) and a
//! flat `edges` list. Reverse edges are stored as separate entries.
//!
//! ```json
//! { "nodes": { "saddar": { "id": "saddar", "name": "Saddar", "lat": 33.59, "lng": 73.04 } },
//!   "edges": [ { "from": "saddar", "to": "marir-chowk", "route": "Red Line", "weight": 0.37 } ] }
//! ```

use std::collections::{BTreeMap, HashMap};
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::domain::{Coordinate, Stop, StopId};
use crate::graph::{Edge, Graph};

/// Default location of the persisted graph.
pub const DEFAULT_GRAPH_PATH: &str = "data/graph.json";

/// Errors reading or writing the persisted graph.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// Filesystem operation failed
    #[error("I/O error on {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// Failed to encode or decode JSON
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// A node is stored under a key that differs from its id
    #[error("node stored under {key} has id {id}")]
    KeyMismatch { key: String, id: String },

    /// An edge references a stop that is not in `nodes`
    #[error("edge #{index} references unknown stop {stop}")]
    UnknownStop { index: usize, stop: String },

    /// An edge has a negative or non-finite weight
    #[error("edge #{index} has invalid weight {weight}")]
    InvalidWeight { index: usize, weight: f64 },
}

/// A stop as persisted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
struct PersistedStop {
    id: StopId,
    name: String,
    #[serde(default, alias = "latitude")]
    lat: Option<f64>,
    #[serde(default, alias = "longitude")]
    lng: Option<f64>,
}

/// The persisted graph document.
#[derive(Debug, Serialize, Deserialize)]
struct PersistedGraph {
    nodes: BTreeMap<String, PersistedStop>,
    edges: Vec<Edge>,
}

impl From<&Graph> for PersistedGraph {
    fn from(graph: &Graph) -> Self {
        let nodes = graph
            .stops()
            .map(|stop| {
                let persisted = PersistedStop {
                    id: stop.id.clone(),
                    name: stop.name.clone(),
                    lat: stop.coordinate.map(|c| c.latitude),
                    lng: stop.coordinate.map(|c| c.longitude),
                };
                (stop.id.to_string(), persisted)
            })
            .collect();

        Self {
            nodes,
            edges: graph.edges().to_vec(),
        }
    }
}

impl TryFrom<PersistedGraph> for Graph {
    type Error = StoreError;

    fn try_from(persisted: PersistedGraph) -> Result<Self, StoreError> {
        let mut nodes = HashMap::with_capacity(persisted.nodes.len());
        for (key, stop) in persisted.nodes {
            if key != stop.id.as_str() {
                return Err(StoreError::KeyMismatch {
                    key,
                    id: stop.id.to_string(),
                });
            }
            nodes.insert(
                stop.id.clone(),
                Stop {
                    id: stop.id,
                    name: stop.name,
                    coordinate: Coordinate::from_parts(stop.lat, stop.lng),
                },
            );
        }

        for (index, edge) in persisted.edges.iter().enumerate() {
            for stop in [&edge.from, &edge.to] {
                if !nodes.contains_key(stop) {
                    return Err(StoreError::UnknownStop {
                        index,
                        stop: stop.to_string(),
                    });
                }
            }
            if !edge.weight.is_finite() || edge.weight < 0.0 {
                return Err(StoreError::InvalidWeight {
                    index,
                    weight: edge.weight,
                });
            }
        }

        Ok(Graph::from_parts(nodes, persisted.edges))
    }
}

/// Encode a graph as pretty-printed JSON.
pub fn to_json(graph: &Graph) -> Result<String, StoreError> {
    Ok(serde_json::to_string_pretty(&PersistedGraph::from(graph))?)
}

/// Decode and validate a graph from JSON.
pub fn from_json(json: &str) -> Result<Graph, StoreError> {
    let persisted: PersistedGraph = serde_json::from_str(json)?;
    Graph::try_from(persisted)
}

/// File-backed graph storage.
#[derive(Debug, Clone)]
pub struct GraphStore {
    path: PathBuf,
}

impl GraphStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Write the graph, replacing any previous file.
    ///
    /// The document is written to a sibling temporary file and renamed into
    /// place, so readers never observe a half-written graph. Creates parent
    /// directories if they don't exist.
    pub fn save(&self, graph: &Graph) -> Result<(), StoreError> {
        let json = to_json(graph)?;

        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
            && !parent.exists()
        {
            std::fs::create_dir_all(parent).map_err(|e| self.io_error(e))?;
        }

        let tmp = self.path.with_extension("json.tmp");
        let written = std::fs::write(&tmp, json).and_then(|()| std::fs::rename(&tmp, &self.path));
        if let Err(e) = written {
            // Best-effort cleanup
            let _ = std::fs::remove_file(&tmp);
            return Err(self.io_error(e));
        }

        info!(
            path = %self.path.display(),
            nodes = graph.node_count(),
            edges = graph.edge_count(),
            "graph saved"
        );
        Ok(())
    }

    /// Read and validate the stored graph.
    pub fn load(&self) -> Result<Graph, StoreError> {
        let contents = std::fs::read_to_string(&self.path).map_err(|e| self.io_error(e))?;
        from_json(&contents)
    }

    fn io_error(&self, source: std::io::Error) -> StoreError {
        StoreError::Io {
            path: self.path.display().to_string(),
            source,
        }
    }
}

impl Default for GraphStore {
    fn default() -> Self {
        Self::new(DEFAULT_GRAPH_PATH)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::{Alias, RawStop, RouteSource, build_graph};
    use tempfile::tempdir;

    fn sample_graph() -> Graph {
        let routes = [
            RouteSource::new(
                "FR-01",
                vec![
                    RawStop::new("Saddar", 33.59844, 73.04507),
                    RawStop::unlocated("Marir Chowk"),
                    RawStop::new("PIMS Metro Station", 33.706, 73.052),
                ],
            ),
            RouteSource::new(
                "Red Line",
                vec![RawStop::new("PIMS", 33.70615, 73.05207), RawStop::new("Stock Exchange", 33.70924, 73.05386)],
            ),
        ];
        build_graph(&routes, &[Alias::new("pims-metro-station", "pims")]).unwrap()
    }

    fn sorted_edges(graph: &Graph) -> Vec<(String, String, String, u64)> {
        let mut edges: Vec<_> = graph
            .edges()
            .iter()
            .map(|e| (e.from.to_string(), e.to.to_string(), e.route.to_string(), e.weight.to_bits()))
            .collect();
        edges.sort();
        edges
    }

    #[test]
    fn save_and_load() {
        let dir = tempdir().unwrap();
        let store = GraphStore::new(dir.path().join("graph.json"));
        let graph = sample_graph();

        store.save(&graph).unwrap();
        let loaded = store.load().unwrap();

        assert_eq!(loaded.node_count(), graph.node_count());
        assert_eq!(sorted_edges(&loaded), sorted_edges(&graph));
        for stop in graph.stops() {
            assert_eq!(loaded.stop(&stop.id), Some(stop));
        }

        // The adjacency index is rebuilt on load.
        let pims = StopId::new("pims");
        assert_eq!(loaded.outgoing(&pims).count(), graph.outgoing(&pims).count());
    }

    #[test]
    fn creates_parent_directories() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nested").join("data").join("graph.json");
        let store = GraphStore::new(&path);

        store.save(&sample_graph()).unwrap();
        assert!(path.exists());
        assert!(!path.with_extension("json.tmp").exists());
    }

    #[test]
    fn failed_rename_removes_temp_file() {
        let dir = tempdir().unwrap();
        // A non-empty directory at the target path makes the rename fail.
        let path = dir.path().join("graph.json");
        std::fs::create_dir(&path).unwrap();
        std::fs::write(path.join("occupied"), "x").unwrap();

        let err = GraphStore::new(&path).save(&sample_graph()).unwrap_err();

        assert!(matches!(err, StoreError::Io { .. }));
        assert!(!path.with_extension("json.tmp").exists());
        assert!(path.join("occupied").exists());
    }

    #[test]
    fn document_shape() {
        let json = to_json(&sample_graph()).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();

        let saddar = &value["nodes"]["saddar"];
        assert_eq!(saddar["id"], "saddar");
        assert_eq!(saddar["name"], "Saddar");
        assert_eq!(saddar["lat"], 33.59844);
        assert!(value["nodes"]["marir-chowk"]["lat"].is_null());

        let edges = value["edges"].as_array().unwrap();
        assert_eq!(edges.len(), 8);
        assert!(edges.iter().any(|e| e["route"] == "Walk" && e["weight"] == 0.05));
    }

    #[test]
    fn accepts_long_coordinate_names() {
        let json = r#"{
            "nodes": { "a": { "id": "a", "name": "A", "latitude": 1.0, "longitude": 2.0 } },
            "edges": []
        }"#;
        let graph = from_json(json).unwrap();
        let a = graph.stop(&StopId::new("a")).unwrap();
        assert_eq!(a.coordinate, Some(Coordinate::new(1.0, 2.0)));
    }

    #[test]
    fn rejects_unknown_stop() {
        let json = r#"{
            "nodes": { "a": { "id": "a", "name": "A", "lat": null, "lng": null } },
            "edges": [ { "from": "a", "to": "b", "route": "R", "weight": 1.0 } ]
        }"#;
        let err = from_json(json).unwrap_err();
        assert!(matches!(err, StoreError::UnknownStop { index: 0, .. }));
    }

    #[test]
    fn rejects_negative_weight() {
        let json = r#"{
            "nodes": { "a": { "id": "a", "name": "A" } },
            "edges": [ { "from": "a", "to": "a", "route": "R", "weight": -1.0 } ]
        }"#;
        let err = from_json(json).unwrap_err();
        assert!(matches!(err, StoreError::InvalidWeight { index: 0, .. }));
    }

    #[test]
    fn rejects_key_mismatch() {
        let json = r#"{ "nodes": { "a": { "id": "b", "name": "B" } }, "edges": [] }"#;
        let err = from_json(json).unwrap_err();
        assert_eq!(err.to_string(), "node stored under a has id b");
    }

    #[test]
    fn missing_file_is_io_error() {
        let store = GraphStore::new("/nonexistent/path/graph.json");
        assert!(matches!(store.load(), Err(StoreError::Io { .. })));
    }

    #[test]
    fn garbage_is_json_error() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("graph.json");
        std::fs::write(&path, "{ not json").unwrap();

        let err = GraphStore::new(&path).load().unwrap_err();
        assert!(matches!(err, StoreError::Json(_)));
    }
}
