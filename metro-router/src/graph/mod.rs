//! Transit graph construction.
//!
//! Merges feeder routes, the fixed metro line table and the curated
//! interchange aliases into one immutable [`Graph`].

mod aliases;
mod builder;
mod lines;
mod model;
mod source;

pub use aliases::{Alias, AliasListBuilder, WALK_WEIGHT, interchange_aliases};
pub use builder::{GraphBuilder, build_graph, build_network};
pub use lines::metro_lines;
pub use model::{Edge, Graph, GraphStats};
pub use source::{InputError, NetworkSource, RawStop, RouteSource};
