//! The currently published graph and its rebuild cycle.
//!
//! Queries take a snapshot (`Arc<Graph>`) and search it without holding any
//! lock. A rebuild constructs a complete new graph first and only then swaps
//! the published reference, so a query sees either the old graph or the new
//! one, never a partially built one.

use std::path::Path;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use tokio::sync::RwLock;
use tracing::info;

use crate::graph::{Graph, GraphStats, InputError, NetworkSource, build_network};
use crate::store::{GraphStore, StoreError};

/// Failure to rebuild and persist the network.
#[derive(Debug, thiserror::Error)]
pub enum RefreshError {
    #[error(transparent)]
    Input(#[from] InputError),

    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Read the feeder routes at `sources` and build the full network.
pub fn load_network(sources: &Path) -> Result<Graph, InputError> {
    let source = NetworkSource::load(sources)?;
    info!(path = %sources.display(), routes = source.routes.len(), "loaded route source");
    build_network(&source)
}

/// A published graph together with the time it was built.
#[derive(Debug, Clone)]
pub struct GraphSnapshot {
    pub graph: Arc<Graph>,
    pub built_at: DateTime<Utc>,
}

/// Thread-safe handle to the published graph.
///
/// Clones share the same published graph.
#[derive(Debug, Clone)]
pub struct GraphHandle {
    inner: Arc<RwLock<GraphSnapshot>>,
}

impl GraphHandle {
    /// Publish an initial graph.
    pub fn new(graph: Graph) -> Self {
        Self {
            inner: Arc::new(RwLock::new(GraphSnapshot {
                graph: Arc::new(graph),
                built_at: Utc::now(),
            })),
        }
    }

    /// The graph queries should run against.
    pub async fn current(&self) -> Arc<Graph> {
        let guard = self.inner.read().await;
        Arc::clone(&guard.graph)
    }

    /// The graph plus its build time.
    pub async fn snapshot(&self) -> GraphSnapshot {
        self.inner.read().await.clone()
    }

    /// Publish a new graph. In-flight queries keep the graph they took.
    pub async fn replace(&self, graph: Graph) {
        let snapshot = GraphSnapshot {
            graph: Arc::new(graph),
            built_at: Utc::now(),
        };
        let mut guard = self.inner.write().await;
        *guard = snapshot;
    }

    /// Rebuild from `sources`, persist through `store`, then publish.
    ///
    /// On failure the published graph is left untouched and the error is
    /// returned.
    pub async fn rebuild(
        &self,
        sources: &Path,
        store: &GraphStore,
    ) -> Result<GraphStats, RefreshError> {
        let graph = load_network(sources)?;
        store.save(&graph)?;

        let stats = graph.stats();
        self.replace(graph).await;
        info!(nodes = stats.nodes, edges = stats.edges, "published rebuilt graph");
        Ok(stats)
    }
}
