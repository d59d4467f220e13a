//! Route planner: transfer-penalized shortest paths over the transit graph.
//!
//! The search runs Dijkstra over (stop, boarded route) states so that a
//! change of vehicle can be charged a fixed penalty, while walking links
//! between interchanges stay free of it. Found paths are then merged into
//! rider-facing steps.

mod config;
mod format;
mod search;
mod summary;


pub use config::{RoutingConfig, RoutingConfigError};
pub use format::{Step, format_path, merge_hops};
pub use search::{MissingNodeError, Path, PathHop, RouteOutcome, Router, find_shortest_path};
pub use summary::{RouteSummary, count_transfers, distance_km, estimate_minutes};
