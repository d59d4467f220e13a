//! Web layer for the metro router.
//!
//! Provides JSON endpoints for looking up stops and planning routes. The
//! rider-facing UI is served separately (or from a static directory) and
//! only consumes these endpoints.

mod dto;
mod routes;
mod state;

pub use dto::*;
pub use routes::create_router;
pub use state::AppState;
