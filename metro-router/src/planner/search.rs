//! Transfer-penalized Dijkstra search.
//!
//! A search state is a stop *and* the route the rider is currently on, so the
//! same stop reached on two different routes is two different states. That is
//! what lets the search charge a penalty exactly when the rider changes
//! vehicle.

use std::cmp::Ordering;
use std::collections::{BinaryHeap, HashMap};

use tracing::{debug, trace};

use crate::domain::{RouteId, StopId};
use crate::graph::{Edge, Graph};

use super::config::RoutingConfig;

/// The route a rider is on at a search state.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Boarding {
    /// Nothing boarded yet; the next edge is the first boarding.
    Start,
    /// Currently travelling on this route.
    Route(RouteId),
}

/// Composite search key: a stop plus the route used to reach it.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
struct SearchState {
    stop: StopId,
    boarding: Boarding,
}

/// Heap entry. Ordered so that `BinaryHeap` pops the cheapest first.
#[derive(Debug)]
struct QueueEntry {
    cost: f64,
    state: SearchState,
}

impl PartialEq for QueueEntry {
    fn eq(&self, other: &Self) -> bool {
        self.cost.total_cmp(&other.cost) == Ordering::Equal
    }
}

impl Eq for QueueEntry {}

impl Ord for QueueEntry {
    fn cmp(&self, other: &Self) -> Ordering {
        // Min-heap by cost (reversed from the standard max-heap)
        other.cost.total_cmp(&self.cost)
    }
}

impl PartialOrd for QueueEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// One edge traversal on a found path.
#[derive(Debug, Clone, PartialEq)]
pub struct PathHop {
    pub from: StopId,
    pub to: StopId,
    pub from_name: String,
    pub to_name: String,
    pub route: RouteId,
    /// Weight of the traversed edge, without any transfer penalty.
    pub weight: f64,
}

/// The cheapest path between two stops.
#[derive(Debug, Clone, PartialEq)]
pub struct Path {
    /// Hops in travel order. Empty when start and end are the same stop.
    pub hops: Vec<PathHop>,
    /// Total cost: edge weights plus transfer penalties.
    pub cost: f64,
}

/// A query endpoint that does not exist in the graph.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MissingNodeError {
    #[error("unknown start stop: {0}")]
    Start(StopId),

    #[error("unknown destination stop: {0}")]
    End(StopId),
}

/// Result of a shortest-path query.
///
/// A missing stop and a disconnected network are expected outcomes rather
/// than failures, so they are variants here instead of errors.
#[derive(Debug, Clone, PartialEq)]
pub enum RouteOutcome {
    Found(Path),
    NoPath,
    MissingNode(MissingNodeError),
}

impl RouteOutcome {
    pub fn path(&self) -> Option<&Path> {
        match self {
            RouteOutcome::Found(path) => Some(path),
            _ => None,
        }
    }

    pub fn into_path(self) -> Option<Path> {
        match self {
            RouteOutcome::Found(path) => Some(path),
            _ => None,
        }
    }

    pub fn is_found(&self) -> bool {
        matches!(self, RouteOutcome::Found(_))
    }
}

/// Shortest-path search over a shared graph.
///
/// A router holds only borrows; every query allocates its own queue, cost
/// table and back-pointers, so any number of routers may search one graph
/// concurrently.
pub struct Router<'a> {
    graph: &'a Graph,
    config: &'a RoutingConfig,
}

impl<'a> Router<'a> {
    pub fn new(graph: &'a Graph, config: &'a RoutingConfig) -> Self {
        Self { graph, config }
    }

    /// Find the cheapest path from `start` to `end`.
    pub fn find(&self, start: &StopId, end: &StopId) -> RouteOutcome {
        if !self.graph.contains(start) {
            return RouteOutcome::MissingNode(MissingNodeError::Start(start.clone()));
        }
        if !self.graph.contains(end) {
            return RouteOutcome::MissingNode(MissingNodeError::End(end.clone()));
        }

        let mut costs: HashMap<SearchState, f64> = HashMap::new();
        // State → (predecessor state, index of the edge taken)
        let mut previous: HashMap<SearchState, (SearchState, usize)> = HashMap::new();
        let mut heap = BinaryHeap::new();

        let initial = SearchState {
            stop: start.clone(),
            boarding: Boarding::Start,
        };
        costs.insert(initial.clone(), 0.0);
        heap.push(QueueEntry {
            cost: 0.0,
            state: initial,
        });

        let mut settled = 0usize;

        while let Some(QueueEntry { cost, state }) = heap.pop() {
            // Skip stale entries superseded by a cheaper push
            if costs.get(&state).is_some_and(|&best| cost > best) {
                continue;
            }
            settled += 1;

            // With non-negative costs, the first settled state at the
            // destination is optimal over every route.
            if &state.stop == end {
                debug!(%start, %end, cost, settled, "path found");
                let hops = self.reconstruct(&state, &previous);
                return RouteOutcome::Found(Path { hops, cost });
            }

            for (idx, edge) in self.graph.outgoing(&state.stop) {
                let candidate = cost + self.edge_cost(&state.boarding, edge);
                let next = SearchState {
                    stop: edge.to.clone(),
                    boarding: Boarding::Route(edge.route.clone()),
                };

                if costs.get(&next).is_none_or(|&known| candidate < known) {
                    trace!(from = %state.stop, to = %edge.to, route = %edge.route, candidate, "relaxed");
                    costs.insert(next.clone(), candidate);
                    previous.insert(next.clone(), (state.clone(), idx));
                    heap.push(QueueEntry {
                        cost: candidate,
                        state: next,
                    });
                }
            }
        }

        debug!(%start, %end, settled, "no path");
        RouteOutcome::NoPath
    }

    /// Cost of taking `edge` while on `boarding`.
    fn edge_cost(&self, boarding: &Boarding, edge: &Edge) -> f64 {
        let changes_vehicle = match boarding {
            Boarding::Start => false,
            Boarding::Route(current) => current != &edge.route && !self.config.is_walk(&edge.route),
        };

        if changes_vehicle {
            edge.weight + self.config.transfer_penalty()
        } else {
            edge.weight
        }
    }

    /// Walk back-pointers from `terminal` to the initial state.
    fn reconstruct(
        &self,
        terminal: &SearchState,
        previous: &HashMap<SearchState, (SearchState, usize)>,
    ) -> Vec<PathHop> {
        let mut hops = Vec::new();
        let mut current = terminal;

        while let Some((prev, idx)) = previous.get(current) {
            if let Some(edge) = self.graph.edge(*idx) {
                hops.push(PathHop {
                    from: edge.from.clone(),
                    to: edge.to.clone(),
                    from_name: self.name_of(&edge.from).to_string(),
                    to_name: self.name_of(&edge.to).to_string(),
                    route: edge.route.clone(),
                    weight: edge.weight,
                });
            }
            current = prev;
        }

        hops.reverse();
        hops
    }

    fn name_of<'g>(&'g self, id: &'g StopId) -> &'g str {
        self.graph
            .stop(id)
            .map(|s| s.name.as_str())
            .unwrap_or(id.as_str())
    }
}

/// Find the cheapest path using the default routing policy.
pub fn find_shortest_path(graph: &Graph, start: &StopId, end: &StopId) -> RouteOutcome {
    Router::new(graph, &RoutingConfig::default()).find(start, end)
}
