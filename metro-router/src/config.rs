//! Server configuration read from the environment.

use std::net::SocketAddr;
use std::path::PathBuf;
use std::time::Duration;

use crate::planner::RoutingConfig;
use crate::store::DEFAULT_GRAPH_PATH;

/// Default feeder route source file.
pub const DEFAULT_SOURCES_PATH: &str = "Metro-Transit.json";

/// Default listen address.
pub const DEFAULT_BIND: &str = "127.0.0.1:3000";

/// Invalid configuration value.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ConfigError {
    #[error("invalid {var}: {message}")]
    Invalid { var: &'static str, message: String },
}

/// Configuration for the router binary.
#[derive(Debug, Clone)]
pub struct RouterConfig {
    /// Feeder route source file (`ROUTER_SOURCES`).
    pub sources_path: PathBuf,

    /// Where the built graph is persisted (`ROUTER_GRAPH_PATH`).
    pub graph_path: PathBuf,

    /// HTTP listen address (`ROUTER_BIND`).
    pub bind: SocketAddr,

    /// Search policy; the penalty comes from `ROUTER_TRANSFER_PENALTY`.
    pub routing: RoutingConfig,

    /// Rebuild interval (`ROUTER_REFRESH_SECS`). No periodic rebuild if unset.
    pub refresh_interval: Option<Duration>,

    /// Directory of UI assets to serve at `/` (`ROUTER_STATIC_DIR`).
    pub static_dir: Option<PathBuf>,
}

impl RouterConfig {
    /// Read the configuration from process environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    /// Read the configuration through `lookup`, which maps a variable name
    /// to its value. Unset and blank variables take their defaults.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let get = |var: &str| lookup(var).filter(|v| !v.trim().is_empty());
        let mut config = Self::default();

        if let Some(path) = get("ROUTER_SOURCES") {
            config.sources_path = path.into();
        }
        if let Some(path) = get("ROUTER_GRAPH_PATH") {
            config.graph_path = path.into();
        }
        if let Some(bind) = get("ROUTER_BIND") {
            config.bind = bind.trim().parse().map_err(|_| ConfigError::Invalid {
                var: "ROUTER_BIND",
                message: format!("not a socket address: {bind}"),
            })?;
        }
        if let Some(penalty) = get("ROUTER_TRANSFER_PENALTY") {
            let value: f64 = penalty.trim().parse().map_err(|_| ConfigError::Invalid {
                var: "ROUTER_TRANSFER_PENALTY",
                message: format!("not a number: {penalty}"),
            })?;
            config.routing =
                config
                    .routing
                    .with_transfer_penalty(value)
                    .map_err(|e| ConfigError::Invalid {
                        var: "ROUTER_TRANSFER_PENALTY",
                        message: e.to_string(),
                    })?;
        }
        if let Some(secs) = get("ROUTER_REFRESH_SECS") {
            let secs: u64 = secs.trim().parse().map_err(|_| ConfigError::Invalid {
                var: "ROUTER_REFRESH_SECS",
                message: format!("not a whole number of seconds: {secs}"),
            })?;
            config.refresh_interval = (secs > 0).then(|| Duration::from_secs(secs));
        }
        if let Some(dir) = get("ROUTER_STATIC_DIR") {
            config.static_dir = Some(dir.into());
        }

        Ok(config)
    }

    /// Set the source file path.
    pub fn with_sources_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.sources_path = path.into();
        self
    }

    /// Set the persisted graph path.
    pub fn with_graph_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.graph_path = path.into();
        self
    }
}

impl Default for RouterConfig {
    fn default() -> Self {
        Self {
            sources_path: DEFAULT_SOURCES_PATH.into(),
            graph_path: DEFAULT_GRAPH_PATH.into(),
            bind: SocketAddr::from(([127, 0, 0, 1], 3000)),
            routing: RoutingConfig::default(),
            refresh_interval: None,
            static_dir: None,
        }
    }
}
