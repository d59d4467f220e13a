//! Raw route definitions consumed by the graph builder.
//!
//! The source file lists feeder routes as ordered stop sequences:
//!
//! ```json
//! { "metro_transit_routes": [
//!     { "route_id": "FR-01",
//!       "locations": [ { "name": "Saddar", "latitude": 33.59, "longitude": 73.04 } ] } ] }
//! ```
//!
//! Coordinates may be `null` or absent; such segments still get an edge.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::domain::{Coordinate, RouteId};

/// Malformed raw route data. The whole build is aborted.
#[derive(Debug, thiserror::Error)]
pub enum InputError {
    /// The source could not be read.
    #[error("failed to read route source {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// The source is not valid JSON or does not have the expected shape.
    #[error("malformed route source: {0}")]
    Malformed(#[from] serde_json::Error),

    /// A route has an empty identifier.
    #[error("route #{index} has an empty route id")]
    EmptyRouteId { index: usize },

    /// A route has no stops at all.
    #[error("route {route} has no stops")]
    NoStops { route: String },

    /// A stop has an empty name.
    #[error("stop #{position} on route {route} has an empty name")]
    EmptyStopName { route: String, position: usize },
}

/// One stop as written in the raw data.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawStop {
    pub name: String,
    #[serde(default)]
    pub latitude: Option<f64>,
    #[serde(default)]
    pub longitude: Option<f64>,
}

impl RawStop {
    pub fn new(name: impl Into<String>, latitude: f64, longitude: f64) -> Self {
        Self {
            name: name.into(),
            latitude: Some(latitude),
            longitude: Some(longitude),
        }
    }

    /// A stop without a known position.
    pub fn unlocated(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            latitude: None,
            longitude: None,
        }
    }

    /// The stop's position, if both components are present and valid.
    pub fn coordinate(&self) -> Option<Coordinate> {
        Coordinate::from_parts(self.latitude, self.longitude)
    }
}

/// A named route: stops traversed consecutively by one line.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RouteSource {
    pub route_id: String,
    #[serde(rename = "locations")]
    pub stops: Vec<RawStop>,
}

impl RouteSource {
    pub fn new(route_id: impl Into<String>, stops: Vec<RawStop>) -> Self {
        Self {
            route_id: route_id.into(),
            stops,
        }
    }

    pub fn route(&self) -> RouteId {
        RouteId::new(&self.route_id)
    }

    /// Check the structural requirements of a single route.
    ///
    /// `index` is the route's position in its source, used in messages.
    pub fn validate(&self, index: usize) -> Result<(), InputError> {
        if self.route_id.trim().is_empty() {
            return Err(InputError::EmptyRouteId { index });
        }
        if self.stops.is_empty() {
            return Err(InputError::NoStops {
                route: self.route_id.clone(),
            });
        }
        if let Some(position) = self.stops.iter().position(|s| s.name.trim().is_empty()) {
            return Err(InputError::EmptyStopName {
                route: self.route_id.clone(),
                position,
            });
        }
        Ok(())
    }
}

/// All feeder routes read from a source file.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NetworkSource {
    #[serde(rename = "metro_transit_routes")]
    pub routes: Vec<RouteSource>,
}

impl NetworkSource {
    pub fn new(routes: Vec<RouteSource>) -> Self {
        Self { routes }
    }

    /// Parse and validate a source document.
    pub fn from_json_str(json: &str) -> Result<Self, InputError> {
        let source: Self = serde_json::from_str(json)?;
        source.validate()?;
        Ok(source)
    }

    /// Read, parse and validate a source file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, InputError> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path).map_err(|source| InputError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_json_str(&contents)
    }

    /// Check every route, stopping at the first problem.
    pub fn validate(&self) -> Result<(), InputError> {
        self.routes
            .iter()
            .enumerate()
            .try_for_each(|(index, route)| route.validate(index))
    }
}
