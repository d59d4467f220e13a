//! Data transfer objects for web requests and responses.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::Stop;
use crate::graph::{Graph, GraphStats};
use crate::planner::{PathHop, RouteSummary};

/// Request to find a route between two stops.
#[derive(Debug, Deserialize)]
pub struct RouteRequest {
    /// Start stop id
    pub from: Option<String>,

    /// Destination stop id
    pub to: Option<String>,
}

/// One traversed edge of a route.
#[derive(Debug, Serialize)]
pub struct HopResult {
    pub from: String,
    pub to: String,
    pub from_name: String,
    pub to_name: String,
    pub route: String,
    pub weight: f64,
}

impl HopResult {
    pub fn from_hop(hop: &PathHop) -> Self {
        Self {
            from: hop.from.to_string(),
            to: hop.to.to_string(),
            from_name: hop.from_name.clone(),
            to_name: hop.to_name.clone(),
            route: hop.route.to_string(),
            weight: hop.weight,
        }
    }
}

/// A found route.
#[derive(Debug, Serialize)]
pub struct RouteResponse {
    pub from: String,
    pub to: String,

    /// Rider-facing steps, e.g. "Red Line from Saddar → PIMS"
    pub steps: Vec<String>,

    pub hops: Vec<HopResult>,

    /// Search cost including transfer penalties
    pub cost: f64,

    pub distance_km: f64,
    pub transfers: usize,
    pub estimated_minutes: u32,
}

impl RouteResponse {
    pub fn new(from: &str, to: &str, hops: &[PathHop], summary: &RouteSummary) -> Self {
        Self {
            from: from.to_string(),
            to: to.to_string(),
            steps: summary.steps.iter().map(ToString::to_string).collect(),
            hops: hops.iter().map(HopResult::from_hop).collect(),
            cost: summary.cost,
            distance_km: summary.distance_km,
            transfers: summary.transfers,
            estimated_minutes: summary.estimated_minutes,
        }
    }
}

/// Request to search stops by name.
#[derive(Debug, Deserialize)]
pub struct StopSearchRequest {
    /// Case-insensitive name fragment; all stops when absent
    pub q: Option<String>,

    /// Maximum number of results
    pub limit: Option<usize>,
}

/// A stop in search results.
#[derive(Debug, Serialize)]
pub struct StopResult {
    pub id: String,
    pub name: String,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,

    /// Routes serving the stop, excluding walking links
    pub routes: Vec<String>,

    pub is_transfer: bool,
}

impl StopResult {
    pub fn from_stop(stop: &Stop, graph: &Graph) -> Self {
        let routes: Vec<String> = graph
            .routes_at(&stop.id)
            .iter()
            .map(ToString::to_string)
            .collect();

        Self {
            id: stop.id.to_string(),
            name: stop.name.clone(),
            latitude: stop.coordinate.map(|c| c.latitude),
            longitude: stop.coordinate.map(|c| c.longitude),
            is_transfer: routes.len() > 1,
            routes,
        }
    }
}

/// Response for stop search.
#[derive(Debug, Serialize)]
pub struct StopSearchResponse {
    pub stops: Vec<StopResult>,
}

/// Graph statistics.
#[derive(Debug, Serialize)]
pub struct StatsResponse {
    #[serde(flatten)]
    pub stats: GraphStats,

    /// When the published graph was built
    pub built_at: DateTime<Utc>,
}

/// Error body.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}
