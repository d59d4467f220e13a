//! Application state for the web layer.

use std::sync::Arc;

use crate::network::GraphHandle;
use crate::planner::RoutingConfig;

/// Shared application state.
///
/// Contains everything the handlers need to answer route queries.
#[derive(Clone)]
pub struct AppState {
    /// The published transit graph
    pub graph: GraphHandle,

    /// Search policy
    pub routing: Arc<RoutingConfig>,
}

impl AppState {
    /// Create a new app state.
    pub fn new(graph: GraphHandle, routing: RoutingConfig) -> Self {
        Self {
            graph,
            routing: Arc::new(routing),
        }
    }
}
