//! Graph construction from raw route definitions.
//!
//! Each route contributes a pair of directed edges for every two consecutive
//! stops. Stops are deduplicated by slug, and the first record of a stop
//! decides its name and coordinate. Aliases are applied last.

use std::collections::HashMap;
use std::collections::hash_map::Entry;

use tracing::{debug, info};

use crate::domain::{RouteId, Stop, StopId, edge_weight};

use super::aliases::{Alias, WALK_WEIGHT, interchange_aliases};
use super::lines::metro_lines;
use super::model::{Edge, Graph};
use super::source::{InputError, NetworkSource, RawStop, RouteSource};

/// Incremental graph construction.
///
/// The builder is consumed by [`GraphBuilder::finish`], so a partially built
/// graph is never observable.
#[derive(Debug, Default)]
pub struct GraphBuilder {
    nodes: HashMap<StopId, Stop>,
    edges: Vec<Edge>,
    routes_added: usize,
}

impl GraphBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add one route's stop sequence.
    ///
    /// A route with a single stop adds nothing: stops only enter the graph
    /// as an endpoint of a segment.
    pub fn add_route(&mut self, route: &RouteSource) -> Result<(), InputError> {
        route.validate(self.routes_added)?;
        self.routes_added += 1;

        let route_id = route.route();
        for pair in route.stops.windows(2) {
            let from = self.resolve_stop(&pair[0]);
            let to = self.resolve_stop(&pair[1]);
            self.connect(from, to, &route_id);
        }
        Ok(())
    }

    /// Add walking edges for an alias pair.
    ///
    /// Returns `false`, adding nothing, if either stop is unknown.
    pub fn add_alias(&mut self, alias: &Alias) -> bool {
        if !(self.nodes.contains_key(&alias.a) && self.nodes.contains_key(&alias.b)) {
            debug!(a = %alias.a, b = %alias.b, "skipping alias with unknown stop");
            return false;
        }

        let walk = RouteId::walk();
        self.push_pair(alias.a.clone(), alias.b.clone(), &walk, WALK_WEIGHT);
        true
    }

    /// Freeze the graph.
    pub fn finish(self) -> Graph {
        Graph::from_parts(self.nodes, self.edges)
    }

    /// Find or insert the stop for a raw record. The first record wins.
    fn resolve_stop(&mut self, raw: &RawStop) -> StopId {
        let id = StopId::from_name(&raw.name);
        if let Entry::Vacant(slot) = self.nodes.entry(id.clone()) {
            slot.insert(Stop {
                id: id.clone(),
                name: raw.name.clone(),
                coordinate: raw.coordinate(),
            });
        }
        id
    }

    /// Connect two stored stops, weighting by their stored coordinates.
    fn connect(&mut self, from: StopId, to: StopId, route: &RouteId) {
        let weight = edge_weight(
            self.nodes.get(&from).and_then(|s| s.coordinate.as_ref()),
            self.nodes.get(&to).and_then(|s| s.coordinate.as_ref()),
        );
        self.push_pair(from, to, route, weight);
    }

    fn push_pair(&mut self, a: StopId, b: StopId, route: &RouteId, weight: f64) {
        self.edges.push(Edge {
            from: a.clone(),
            to: b.clone(),
            route: route.clone(),
            weight,
        });
        self.edges.push(Edge {
            from: b,
            to: a,
            route: route.clone(),
            weight,
        });
    }
}

/// Build a graph from route definitions and an alias list.
///
/// Every route is validated before anything is inserted; the first invalid
/// route aborts the build. Aliases naming unknown stops are skipped.
pub fn build_graph(routes: &[RouteSource], aliases: &[Alias]) -> Result<Graph, InputError> {
    routes
        .iter()
        .enumerate()
        .try_for_each(|(index, route)| route.validate(index))?;

    let mut builder = GraphBuilder::new();
    for route in routes {
        builder.add_route(route)?;
    }

    let applied = aliases.iter().filter(|a| builder.add_alias(a)).count();

    let graph = builder.finish();
    info!(
        routes = routes.len(),
        aliases = applied,
        skipped_aliases = aliases.len() - applied,
        nodes = graph.node_count(),
        edges = graph.edge_count(),
        "graph built"
    );
    Ok(graph)
}

/// Build the full network: feeder routes from `source`, then the metro
/// lines, then the curated interchange aliases.
pub fn build_network(source: &NetworkSource) -> Result<Graph, InputError> {
    let routes: Vec<RouteSource> = source
        .routes
        .iter()
        .cloned()
        .chain(metro_lines())
        .collect();

    build_graph(&routes, &interchange_aliases())
}
