//! Walking links between interchange stops.
//!
//! The same physical interchange often appears under different names in
//! different sources ("PIMS" on the metro, "PIMS Metro Station" on a feeder).
//! Aliases join such pairs with short walking edges.

use crate::domain::StopId;

/// Weight of a walking link between two aliased stops.
pub const WALK_WEIGHT: f64 = 0.05;

/// A pair of stop identifiers known to be the same or adjoining places.
///
/// Aliases are symmetric; the builder adds an edge in each direction.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Alias {
    pub a: StopId,
    pub b: StopId,
}

impl Alias {
    pub fn new(a: impl Into<StopId>, b: impl Into<StopId>) -> Self {
        Self {
            a: a.into(),
            b: b.into(),
        }
    }
}

/// Builder for alias lists.
///
/// Provides a fluent API for adding pairs.
#[derive(Debug, Default)]
pub struct AliasListBuilder {
    inner: Vec<Alias>,
}

impl AliasListBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an alias pair. Self-links are ignored.
    pub fn add(mut self, a: &str, b: &str) -> Self {
        if a != b {
            self.inner.push(Alias::new(a, b));
        }
        self
    }

    pub fn build(self) -> Vec<Alias> {
        self.inner
    }
}

/// The curated interchange aliases for the Islamabad–Rawalpindi network.
///
/// Pairs whose ids are missing from a given graph are skipped at build time,
/// since interchange naming may lag behind the source data.
pub fn interchange_aliases() -> Vec<Alias> {
    AliasListBuilder::new()
        .add("pims-hospital", "pims-metro-station")
        .add("pims-metro-station", "pims")
        .add("faizabad", "faizabad-metro-station")
        .add("nust-metro-station", "nust")
        .add("police-foundation-metro-station", "police-foundation")
        .add("g-10-metro-station", "g-10")
        .add("g-11-metro-station", "g-11")
        .add("golra-morh-metro-station", "golra-morh")
        .add("golra-morh", "golra")
        .add("ijp-metro-station", "ijp")
        .add("chaman-metro-station", "chaman")
        .add("ibn-e-sina-metro-station", "ibn-e-sina")
        .build()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builder_collects_pairs() {
        let aliases = AliasListBuilder::new()
            .add("a", "b")
            .add("b", "c")
            .build();

        assert_eq!(aliases, vec![Alias::new("a", "b"), Alias::new("b", "c")]);
    }

    #[test]
    fn builder_ignores_self_links() {
        let aliases = AliasListBuilder::new().add("a", "a").build();
        assert!(aliases.is_empty());
    }

    #[test]
    fn curated_aliases_are_slugs() {
        let aliases = interchange_aliases();
        assert_eq!(aliases.len(), 12);
        for alias in &aliases {
            assert_eq!(crate::domain::slugify(alias.a.as_str()), alias.a.as_str());
            assert_eq!(crate::domain::slugify(alias.b.as_str()), alias.b.as_str());
        }
    }

    #[test]
    fn curated_aliases_reach_metro_stops() {
        let aliases = interchange_aliases();
        assert!(aliases.contains(&Alias::new("pims-metro-station", "pims")));
        assert!(aliases.contains(&Alias::new("golra-morh", "golra")));
    }
}
