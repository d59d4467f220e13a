//! Route (line) identifiers.

use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

/// Label carried by pedestrian interchange edges.
pub const WALK_ROUTE: &str = "Walk";

/// Identifier of a route or line, e.g. `"Red Line"` or `"FR-04A"`.
///
/// Route identifiers are used verbatim in rider-facing steps, so they are
/// not normalized.
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RouteId(Arc<str>);

impl RouteId {
    pub fn new(id: impl AsRef<str>) -> Self {
        Self(id.as_ref().into())
    }

    /// The route label used for walking links between interchanges.
    pub fn walk() -> Self {
        Self::new(WALK_ROUTE)
    }

    /// Whether this is the walking-link route.
    pub fn is_walk(&self) -> bool {
        &*self.0 == WALK_ROUTE
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for RouteId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "RouteId({})", self.0)
    }
}

impl fmt::Display for RouteId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for RouteId {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn walk_route() {
        assert!(RouteId::walk().is_walk());
        assert!(RouteId::new("Walk").is_walk());
        assert!(!RouteId::new("walk").is_walk());
        assert!(!RouteId::new("Red Line").is_walk());
    }

    #[test]
    fn equality_and_display() {
        let a = RouteId::new("FR-01");
        let b = RouteId::from("FR-01");
        assert_eq!(a, b);
        assert_ne!(a, RouteId::new("FR-02"));
        assert_eq!(a.to_string(), "FR-01");
        assert_eq!(format!("{a:?}"), "RouteId(FR-01)");
    }
}
