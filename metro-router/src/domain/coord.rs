//! Geographic coordinates and the edge-weight distance function.

use serde::{Deserialize, Serialize};

/// Mean Earth radius used by the haversine formula, in kilometres.
pub const EARTH_RADIUS_KM: f64 = 6371.0;

/// Smallest weight a distance-derived edge may carry.
///
/// Two stops at the same position would otherwise produce zero-cost edges,
/// and the search relies on every edge costing something.
pub const MIN_EDGE_WEIGHT_KM: f64 = 0.1;

/// Weight used when either end of a segment has no usable coordinate.
pub const MISSING_COORDINATE_WEIGHT: f64 = 1.0;

/// A latitude/longitude pair in degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinate {
    pub latitude: f64,
    pub longitude: f64,
}

impl Coordinate {
    /// Create a new coordinate. No validation is performed; see [`Coordinate::is_valid`].
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }

    /// Build a coordinate from optional components, as found in raw route data.
    ///
    /// Returns `None` unless both components are present and form a valid position.
    pub fn from_parts(latitude: Option<f64>, longitude: Option<f64>) -> Option<Self> {
        let coord = Self::new(latitude?, longitude?);
        coord.is_valid().then_some(coord)
    }

    /// Whether both components are finite and inside their geographic range.
    pub fn is_valid(&self) -> bool {
        self.latitude.is_finite()
            && self.longitude.is_finite()
            && (-90.0..=90.0).contains(&self.latitude)
            && (-180.0..=180.0).contains(&self.longitude)
    }
}

/// Great-circle distance between two coordinates in kilometres.
pub fn haversine_km(a: &Coordinate, b: &Coordinate) -> f64 {
    let lat1 = a.latitude.to_radians();
    let lat2 = b.latitude.to_radians();
    let d_lat = (b.latitude - a.latitude).to_radians();
    let d_lon = (b.longitude - a.longitude).to_radians();

    let h = (d_lat / 2.0).sin().powi(2) + lat1.cos() * lat2.cos() * (d_lon / 2.0).sin().powi(2);
    let c = 2.0 * h.sqrt().atan2((1.0 - h).sqrt());

    EARTH_RADIUS_KM * c
}

/// Weight of the segment between two stops.
///
/// Falls back to [`MISSING_COORDINATE_WEIGHT`] when either coordinate is
/// absent or invalid, and never returns less than [`MIN_EDGE_WEIGHT_KM`].
pub fn edge_weight(a: Option<&Coordinate>, b: Option<&Coordinate>) -> f64 {
    match (a, b) {
        (Some(a), Some(b)) if a.is_valid() && b.is_valid() => {
            haversine_km(a, b).max(MIN_EDGE_WEIGHT_KM)
        }
        _ => MISSING_COORDINATE_WEIGHT,
    }
}
