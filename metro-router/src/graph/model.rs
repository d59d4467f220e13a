//! The immutable transit graph.

use std::collections::{BTreeSet, HashMap};

use serde::{Deserialize, Serialize};

use crate::domain::{RouteId, Stop, StopId};

/// A directed, weighted connection between two stops on one route.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Edge {
    pub from: StopId,
    pub to: StopId,
    pub route: RouteId,
    pub weight: f64,
}

/// Summary counts describing a graph.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct GraphStats {
    pub nodes: usize,
    pub edges: usize,
    /// Distinct routes, excluding walking links.
    pub lines: usize,
    /// Stops served by more than one route, excluding walking links.
    pub transfer_stations: usize,
}

/// The transit network: stops plus directed edges.
///
/// A graph is fully built before anyone can see it and never changes
/// afterwards, so it can be shared between concurrent queries behind an `Arc`.
/// The adjacency index is derived from the edge list at construction.
#[derive(Debug, Clone)]
pub struct Graph {
    nodes: HashMap<StopId, Stop>,
    edges: Vec<Edge>,
    /// Stop → indices into `edges` of the stop's outgoing edges.
    adjacency: HashMap<StopId, Vec<usize>>,
}

impl Graph {
    /// Assemble a graph from its nodes and edges.
    ///
    /// Callers guarantee that every edge endpoint is a key of `nodes`.
    pub(crate) fn from_parts(nodes: HashMap<StopId, Stop>, edges: Vec<Edge>) -> Self {
        let mut adjacency: HashMap<StopId, Vec<usize>> = HashMap::new();
        for (idx, edge) in edges.iter().enumerate() {
            adjacency.entry(edge.from.clone()).or_default().push(idx);
        }

        Self {
            nodes,
            edges,
            adjacency,
        }
    }

    /// Look up a stop by identifier.
    pub fn stop(&self, id: &StopId) -> Option<&Stop> {
        self.nodes.get(id)
    }

    /// Whether the graph contains a stop with this identifier.
    pub fn contains(&self, id: &StopId) -> bool {
        self.nodes.contains_key(id)
    }

    /// All stops, in no particular order.
    pub fn stops(&self) -> impl Iterator<Item = &Stop> {
        self.nodes.values()
    }

    /// All edges, in insertion order.
    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    /// The edge at `idx` in the edge list.
    pub fn edge(&self, idx: usize) -> Option<&Edge> {
        self.edges.get(idx)
    }

    /// Outgoing edges of a stop, paired with their index in the edge list.
    pub fn outgoing<'a>(&'a self, id: &StopId) -> impl Iterator<Item = (usize, &'a Edge)> + 'a {
        self.adjacency
            .get(id)
            .map(Vec::as_slice)
            .unwrap_or_default()
            .iter()
            .map(move |&idx| (idx, &self.edges[idx]))
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    /// Routes (excluding walking links) with an edge leaving this stop, sorted.
    pub fn routes_at(&self, id: &StopId) -> Vec<RouteId> {
        self.outgoing(id)
            .filter(|(_, e)| !e.route.is_walk())
            .map(|(_, e)| e.route.clone())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }

    /// Whether more than one route serves this stop.
    pub fn is_transfer_station(&self, id: &StopId) -> bool {
        self.routes_at(id).len() > 1
    }

    pub fn stats(&self) -> GraphStats {
        let lines: BTreeSet<&RouteId> = self
            .edges
            .iter()
            .map(|e| &e.route)
            .filter(|r| !r.is_walk())
            .collect();

        let transfer_stations = self
            .nodes
            .keys()
            .filter(|id| self.is_transfer_station(id))
            .count();

        GraphStats {
            nodes: self.nodes.len(),
            edges: self.edges.len(),
            lines: lines.len(),
            transfer_stations,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn edge(from: &str, to: &str, route: &str, weight: f64) -> Edge {
        Edge {
            from: StopId::new(from),
            to: StopId::new(to),
            route: RouteId::new(route),
            weight,
        }
    }

    fn sample() -> Graph {
        let nodes = ["a", "b", "c", "d"]
            .into_iter()
            .map(|n| (StopId::new(n), Stop::new(n, None)))
            .collect();
        let edges = vec![
            edge("a", "b", "R1", 1.0),
            edge("b", "a", "R1", 1.0),
            edge("b", "c", "R2", 2.0),
            edge("c", "b", "R2", 2.0),
            edge("c", "d", "Walk", 0.05),
            edge("d", "c", "Walk", 0.05),
        ];
        Graph::from_parts(nodes, edges)
    }

    #[test]
    fn outgoing_uses_adjacency() {
        let g = sample();
        let from_b: Vec<_> = g.outgoing(&StopId::new("b")).map(|(i, _)| i).collect();
        assert_eq!(from_b, vec![1, 2]);

        assert_eq!(g.outgoing(&StopId::new("zzz")).count(), 0);
    }

    #[test]
    fn routes_at_skips_walk() {
        let g = sample();
        assert_eq!(
            g.routes_at(&StopId::new("b")),
            vec![RouteId::new("R1"), RouteId::new("R2")]
        );
        assert_eq!(g.routes_at(&StopId::new("c")), vec![RouteId::new("R2")]);
        assert!(g.routes_at(&StopId::new("d")).is_empty());
    }

    #[test]
    fn stats() {
        let stats = sample().stats();
        assert_eq!(
            stats,
            GraphStats {
                nodes: 4,
                edges: 6,
                lines: 2,
                transfer_stations: 1,
            }
        );
    }

    #[test]
    fn lookup() {
        let g = sample();
        assert!(g.contains(&StopId::new("a")));
        assert!(!g.contains(&StopId::new("z")));
        assert_eq!(g.stop(&StopId::new("c")).map(|s| s.name.as_str()), Some("c"));
        assert_eq!(g.edge(4).map(|e| e.route.is_walk()), Some(true));
        assert!(g.edge(99).is_none());
    }
}
