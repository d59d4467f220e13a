//! Multi-modal metro router.
//!
//! Builds one weighted graph from metro lines, feeder bus routes and
//! pedestrian interchange links, and answers "what is the cheapest way from
//! this stop to that one?" with a search that charges a penalty for every
//! change of vehicle.

pub mod config;
pub mod domain;
pub mod graph;
pub mod network;
pub mod planner;
pub mod store;
pub mod web;

pub use graph::{InputError, build_graph};
pub use planner::{RouteOutcome, find_shortest_path, format_path};
