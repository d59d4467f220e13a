//! Stop identifiers and stops.

use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use super::Coordinate;

/// Separator used between the alphanumeric runs of a slug.
const SLUG_SEPARATOR: char = '-';

/// Stable identifier of a stop, derived from its display name.
///
/// Identifiers are slugs: lowercase ASCII letters and digits, with every run
/// of other characters collapsed to a single `-`. Cloning is cheap.
///
/// # Examples
///
/// ```
/// use metro_router::domain::StopId;
///
/// assert_eq!(StopId::from_name("Faiz Ahmad Faiz").as_str(), "faiz-ahmad-faiz");
/// assert_eq!(StopId::from_name("G-10 (Markaz)").as_str(), "g-10-markaz-");
/// ```
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StopId(Arc<str>);

impl StopId {
    /// Derive the identifier for a display name.
    pub fn from_name(name: &str) -> Self {
        Self(slugify(name).into())
    }

    /// Wrap an identifier that is already in slug form, such as one received
    /// from a client or read from a persisted graph.
    pub fn new(id: impl AsRef<str>) -> Self {
        Self(id.as_ref().into())
    }

    /// Returns the identifier as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for StopId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "StopId({})", self.0)
    }
}

impl fmt::Display for StopId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for StopId {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

/// Convert a display name to its slug.
///
/// Lowercases the name, then replaces each maximal run of characters outside
/// `[a-z0-9]` with a single separator. Separators at either end are kept.
pub fn slugify(name: &str) -> String {
    let mut slug = String::with_capacity(name.len());
    let mut in_gap = false;

    for c in name.chars().flat_map(char::to_lowercase) {
        if c.is_ascii_lowercase() || c.is_ascii_digit() {
            slug.push(c);
            in_gap = false;
        } else if !in_gap {
            slug.push(SLUG_SEPARATOR);
            in_gap = true;
        }
    }

    slug
}

/// A named, optionally geolocated transit stop.
#[derive(Debug, Clone, PartialEq)]
pub struct Stop {
    pub id: StopId,
    pub name: String,
    pub coordinate: Option<Coordinate>,
}

impl Stop {
    /// Create a stop whose identifier is derived from `name`.
    pub fn new(name: impl Into<String>, coordinate: Option<Coordinate>) -> Self {
        let name = name.into();
        Self {
            id: StopId::from_name(&name),
            name,
            coordinate,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn slug_examples() {
        assert_eq!(slugify("Saddar"), "saddar");
        assert_eq!(slugify("Marir Chowk"), "marir-chowk");
        assert_eq!(slugify("Khayaban-e-Johar"), "khayaban-e-johar");
        assert_eq!(slugify("6th Road"), "6th-road");
        assert_eq!(slugify("PIMS Metro Station"), "pims-metro-station");
        assert_eq!(slugify("G-10"), "g-10");
    }

    #[test]
    fn slug_collapses_runs() {
        assert_eq!(slugify("Blue   Area"), "blue-area");
        assert_eq!(slugify("F-6 / Super Market"), "f-6-super-market");
    }

    #[test]
    fn slug_keeps_edge_separators() {
        assert_eq!(slugify(" Chaman "), "-chaman-");
        assert_eq!(slugify("(IJP)"), "-ijp-");
    }

    #[test]
    fn slug_replaces_non_ascii_letters() {
        assert_eq!(slugify("Café Stop"), "caf-stop");
    }

    #[test]
    fn stop_id_from_name() {
        let stop = Stop::new("Stock Exchange", None);
        assert_eq!(stop.id, StopId::new("stock-exchange"));
        assert_eq!(stop.name, "Stock Exchange");
    }

    #[test]
    fn display_and_debug() {
        let id = StopId::from_name("PIMS");
        assert_eq!(format!("{id}"), "pims");
        assert_eq!(format!("{id:?}"), "StopId(pims)");
    }
}

#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        /// Slugs only contain lowercase alphanumerics and separators.
        #[test]
        fn slug_alphabet(name in "\\PC{0,40}") {
            let slug = slugify(&name);
            prop_assert!(slug.chars().all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-'));
        }

        /// No two separators are ever adjacent.
        #[test]
        fn slug_has_no_double_separator(name in "\\PC{0,40}") {
            prop_assert!(!slugify(&name).contains("--"));
        }

        /// Slugifying a slug is a no-op.
        #[test]
        fn slug_is_idempotent(name in "\\PC{0,40}") {
            let once = slugify(&name);
            prop_assert_eq!(slugify(&once), once.clone());
        }
    }
}
