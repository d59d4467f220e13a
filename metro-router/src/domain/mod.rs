//! Domain types for the metro router.
//!
//! Stops, routes and coordinates as they appear in the transit graph, plus
//! the distance function that turns a pair of coordinates into an edge weight.

mod coord;
mod route;
mod stop;

pub use coord::{
    Coordinate, EARTH_RADIUS_KM, MIN_EDGE_WEIGHT_KM, MISSING_COORDINATE_WEIGHT, edge_weight,
    haversine_km,
};
pub use route::{RouteId, WALK_ROUTE};
pub use stop::{Stop, StopId, slugify};
