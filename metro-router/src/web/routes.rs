//! HTTP route handlers.

use std::path::Path;

use axum::{
    Json, Router,
    extract::{Query, State, rejection::QueryRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
};
use tower_http::services::ServeDir;
use tracing::warn;

use crate::domain::StopId;
use crate::planner::{RouteOutcome, RouteSummary, Router as PathRouter};

use super::dto::*;
use super::state::AppState;

/// Default number of stops returned by a search.
const DEFAULT_STOP_LIMIT: usize = 50;

/// Upper bound on the stop search limit.
const MAX_STOP_LIMIT: usize = 500;

/// Create the application router.
///
/// When `static_dir` is given, files in it are served for any path not
/// matched by an API route.
pub fn create_router(state: AppState, static_dir: Option<&Path>) -> Router {
    let router = Router::new()
        .route("/health", get(health))
        .route("/api/stops", get(search_stops))
        .route("/api/route", get(find_route))
        .route("/api/graph/stats", get(graph_stats))
        .with_state(state);

    match static_dir {
        Some(dir) => router.fallback_service(ServeDir::new(dir)),
        None => router,
    }
}

/// Health check endpoint.
async fn health() -> &'static str {
    "ok"
}

/// Search stops by name.
async fn search_stops(
    State(state): State<AppState>,
    query: Result<Query<StopSearchRequest>, QueryRejection>,
) -> Result<Json<StopSearchResponse>, AppError> {
    let Query(req) = query?;
    let graph = state.graph.current().await;
    let limit = req.limit.unwrap_or(DEFAULT_STOP_LIMIT).min(MAX_STOP_LIMIT);
    let needle = req
        .q
        .as_deref()
        .map(str::trim)
        .unwrap_or_default()
        .to_lowercase();

    let mut matches: Vec<_> = graph
        .stops()
        .filter(|s| needle.is_empty() || s.name.to_lowercase().contains(&needle))
        .collect();
    matches.sort_by(|a, b| a.name.cmp(&b.name).then_with(|| a.id.cmp(&b.id)));

    let stops = matches
        .into_iter()
        .take(limit)
        .map(|s| StopResult::from_stop(s, &graph))
        .collect();

    Ok(Json(StopSearchResponse { stops }))
}

/// Find the cheapest route between two stops.
async fn find_route(
    State(state): State<AppState>,
    query: Result<Query<RouteRequest>, QueryRejection>,
) -> Result<Json<RouteResponse>, AppError> {
    let Query(req) = query?;
    let from = req.from.as_deref().map(str::trim).unwrap_or_default();
    let to = req.to.as_deref().map(str::trim).unwrap_or_default();
    if from.is_empty() || to.is_empty() {
        return Err(AppError::BadRequest {
            message: "both 'from' and 'to' stop ids are required".to_string(),
        });
    }

    let graph = state.graph.current().await;
    let outcome = PathRouter::new(&graph, &state.routing).find(&StopId::new(from), &StopId::new(to));

    match outcome {
        RouteOutcome::Found(path) => {
            let summary = RouteSummary::from_path(&path, &state.routing);
            Ok(Json(RouteResponse::new(from, to, &path.hops, &summary)))
        }
        RouteOutcome::NoPath => Err(AppError::NotFound {
            message: format!("no route from {from} to {to}"),
        }),
        RouteOutcome::MissingNode(e) => Err(AppError::NotFound {
            message: e.to_string(),
        }),
    }
}

/// Statistics about the published graph.
async fn graph_stats(State(state): State<AppState>) -> Json<StatsResponse> {
    let snapshot = state.graph.snapshot().await;
    Json(StatsResponse {
        stats: snapshot.graph.stats(),
        built_at: snapshot.built_at,
    })
}

/// Application error type.
#[derive(Debug)]
pub enum AppError {
    BadRequest { message: String },
    NotFound { message: String },
}

impl From<QueryRejection> for AppError {
    fn from(rejection: QueryRejection) -> Self {
        AppError::BadRequest {
            message: rejection.body_text(),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            AppError::BadRequest { message } => (StatusCode::BAD_REQUEST, message),
            AppError::NotFound { message } => (StatusCode::NOT_FOUND, message),
        };

        warn!(%status, "{message}");

        let body = Json(ErrorResponse { error: message });
        (status, body).into_response()
    }
}
