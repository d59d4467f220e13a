//! Totals shown alongside a formatted route.

use super::config::RoutingConfig;
use super::format::{Step, merge_hops};
use super::search::{Path, PathHop};

/// A found path with its rider-facing steps and totals.
#[derive(Debug, Clone, PartialEq)]
pub struct RouteSummary {
    pub steps: Vec<Step>,
    pub cost: f64,
    /// Sum of traversed edge weights (km), without penalties.
    pub distance_km: f64,
    /// Number of vehicle changes charged a transfer penalty.
    pub transfers: usize,
    /// Travel time at the configured average speed, rounded up.
    pub estimated_minutes: u32,
}

impl RouteSummary {
    pub fn from_path(path: &Path, config: &RoutingConfig) -> Self {
        let distance_km = distance_km(&path.hops);
        Self {
            steps: merge_hops(&path.hops),
            cost: path.cost,
            distance_km,
            transfers: count_transfers(&path.hops, config),
            estimated_minutes: estimate_minutes(distance_km, config.average_speed_kmh()),
        }
    }
}

/// Total edge weight of the hops.
pub fn distance_km(hops: &[PathHop]) -> f64 {
    hops.iter().map(|h| h.weight).sum()
}

/// Count the route changes the search charges a penalty for: a hop whose
/// route differs from the previous hop's, unless it is a walking link.
pub fn count_transfers(hops: &[PathHop], config: &RoutingConfig) -> usize {
    hops.windows(2)
        .filter(|pair| pair[0].route != pair[1].route && !config.is_walk(&pair[1].route))
        .count()
}

/// Minutes needed to cover `distance_km` at `speed_kmh`, rounded up.
pub fn estimate_minutes(distance_km: f64, speed_kmh: f64) -> u32 {
    if distance_km <= 0.0 || speed_kmh <= 0.0 {
        return 0;
    }
    (distance_km * 60.0 / speed_kmh).ceil() as u32
}
