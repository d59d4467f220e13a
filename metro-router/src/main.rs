use std::error::Error;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

use metro_router::config::RouterConfig;
use metro_router::domain::StopId;
use metro_router::graph::Graph;
use metro_router::network::{GraphHandle, load_network};
use metro_router::planner::{RouteOutcome, RouteSummary, Router};
use metro_router::store::GraphStore;
use metro_router::web::{AppState, create_router};

/// Multi-modal metro router: graph builder, route search and HTTP API.
///
/// Paths, bind address and routing policy come from `ROUTER_*` environment
/// variables.
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Debug, Clone, Subcommand)]
enum Command {
    /// Build the graph and serve the HTTP API (the default)
    Serve,

    /// Build the graph from the route sources and write it to disk
    Build,

    /// Print the cheapest route between two stops
    Route {
        /// Start stop id, e.g. `saddar`
        from: String,

        /// Destination stop id, e.g. `g-7`
        to: String,
    },
}

type BoxError = Box<dyn Error + Send + Sync>;

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config = match RouterConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            error!("{e}");
            return ExitCode::FAILURE;
        }
    };

    let result = match cli.command.unwrap_or(Command::Serve) {
        Command::Serve => serve(config).await,
        Command::Build => build(&config),
        Command::Route { from, to } => route(&config, &from, &to),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{e}");
            ExitCode::FAILURE
        }
    }
}

/// Build the graph from the route sources and persist it.
fn build(config: &RouterConfig) -> Result<(), BoxError> {
    let graph = load_network(&config.sources_path)?;
    GraphStore::new(&config.graph_path).save(&graph)?;

    let stats = graph.stats();
    println!(
        "Graph generated with {} nodes and {} edges ({} lines, {} transfer stations).",
        stats.nodes, stats.edges, stats.lines, stats.transfer_stations
    );
    Ok(())
}

/// Print the formatted route between two stops.
fn route(config: &RouterConfig, from: &str, to: &str) -> Result<(), BoxError> {
    let graph = startup_graph(config)?;
    let outcome = Router::new(&graph, &config.routing).find(&StopId::new(from), &StopId::new(to));

    match outcome {
        RouteOutcome::Found(path) => {
            let summary = RouteSummary::from_path(&path, &config.routing);
            for step in &summary.steps {
                println!("{step}");
            }
            println!();
            println!(
                "{:.2} km, {} transfer(s), about {} min",
                summary.distance_km, summary.transfers, summary.estimated_minutes
            );
            Ok(())
        }
        RouteOutcome::NoPath => Err(format!("no route from {from} to {to}").into()),
        RouteOutcome::MissingNode(e) => Err(e.into()),
    }
}

/// Build the graph, serve the HTTP API, and rebuild periodically if configured.
async fn serve(config: RouterConfig) -> Result<(), BoxError> {
    let store = GraphStore::new(&config.graph_path);
    let graph = startup_graph(&config)?;
    if let Err(e) = store.save(&graph) {
        warn!("could not persist graph: {e}");
    }

    let handle = GraphHandle::new(graph);

    if let Some(period) = config.refresh_interval {
        let refresh_handle = handle.clone();
        let sources = config.sources_path.clone();
        let store = store.clone();
        tokio::spawn(async move {
            let mut interval = tokio::time::interval(period);
            interval.tick().await; // First tick is immediate, skip it
            loop {
                interval.tick().await;
                if let Err(e) = refresh_handle.rebuild(&sources, &store).await {
                    warn!("graph rebuild failed, keeping current graph: {e}");
                }
            }
        });
    }

    let state = AppState::new(handle, config.routing.clone());
    let app = create_router(state, config.static_dir.as_deref());

    let listener = tokio::net::TcpListener::bind(config.bind).await?;
    info!("Metro router listening on http://{}", config.bind);
    info!("  GET /health            - Health check");
    info!("  GET /api/stops         - Search stops by name");
    info!("  GET /api/route         - Cheapest route between two stops");
    info!("  GET /api/graph/stats   - Graph statistics");

    axum::serve(listener, app)
        .with_graceful_shutdown(async {
            let _ = tokio::signal::ctrl_c().await;
        })
        .await?;
    Ok(())
}

/// Build from the route sources, falling back to the persisted graph when
/// the sources cannot be read.
fn startup_graph(config: &RouterConfig) -> Result<Graph, BoxError> {
    match load_network(&config.sources_path) {
        Ok(graph) => Ok(graph),
        Err(build_err) => {
            let store = GraphStore::new(&config.graph_path);
            warn!("building from {} failed: {build_err}", config.sources_path.display());
            match store.load() {
                Ok(graph) => {
                    info!("using persisted graph at {}", store.path().display());
                    Ok(graph)
                }
                Err(load_err) => {
                    Err(format!("no usable graph: {build_err}; persisted graph: {load_err}").into())
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    fn parse(args: &[&str]) -> Result<Option<Command>, clap::Error> {
        Cli::try_parse_from(std::iter::once("metro-router").chain(args.iter().copied()))
            .map(|cli| cli.command)
    }

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn serve_is_the_default() {
        assert!(parse(&[]).unwrap().is_none());
        assert!(matches!(parse(&["serve"]).unwrap(), Some(Command::Serve)));
    }

    #[test]
    fn route_takes_two_stop_ids() {
        match parse(&["route", "saddar", "g-7"]).unwrap() {
            Some(Command::Route { from, to }) => {
                assert_eq!(from, "saddar");
                assert_eq!(to, "g-7");
            }
            other => panic!("unexpected {other:?}"),
        }
        assert!(parse(&["route", "saddar"]).is_err());
    }

    #[test]
    fn unknown_arguments_are_rejected() {
        let err = parse(&["rebuild"]).unwrap_err();
        assert_eq!(err.kind(), clap::error::ErrorKind::InvalidSubcommand);

        let help = parse(&["--help"]).unwrap_err();
        assert_eq!(help.kind(), clap::error::ErrorKind::DisplayHelp);
    }
}
