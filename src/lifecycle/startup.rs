//! Startup orchestration.
//!
//! # Responsibilities
//! - Load and validate configuration
//! - Initialize subsystems in dependency order
//! - Bind the listener last (traffic only when ready)
//!
//! # Design Decisions
//! - Fail fast: any startup error is fatal
//! - Subsystems initialize in order, not concurrently

use std::net::{AddrParseError, SocketAddr};
use std::path::Path;
use std::sync::Arc;
use tokio::net::TcpListener;

use crate::config::validation::validate_config;
use crate::config::{load_config, ConfigError, ConsoleConfig};
use crate::http::HttpServer;
use crate::observability::metrics;
use crate::scheduler::InMemoryScheduler;

#[derive(Debug, thiserror::Error)]
pub enum StartupError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("failed to bind {address}: {source}")]
    Bind {
        address: String,
        source: std::io::Error,
    },

    #[error("invalid metrics address {address}: {source}")]
    MetricsAddress {
        address: String,
        source: AddrParseError,
    },

    #[error("failed to start metrics exporter: {0}")]
    Metrics(#[from] metrics_exporter_prometheus::BuildError),
}

/// Resolve the effective configuration.
///
/// Without a path the defaults apply. A bind override replaces the configured
/// listener address and is validated like the rest of the file.
pub fn resolve_config(
    path: Option<&Path>,
    bind_override: Option<String>,
) -> Result<ConsoleConfig, StartupError> {
    let mut config = match path {
        Some(path) => load_config(path)?,
        None => ConsoleConfig::default(),
    };
    if let Some(address) = bind_override {
        config.listener.bind_address = address;
    }
    validate_config(&config).map_err(ConfigError::Validation)?;
    Ok(config)
}

/// Build the server and bind its listener.
pub async fn start(config: ConsoleConfig) -> Result<(HttpServer, TcpListener), StartupError> {
    tracing::info!(
        bind_address = %config.listener.bind_address,
        request_timeout_secs = config.timeouts.request_secs,
        jobs = config.scheduler.jobs.len(),
        "Configuration loaded"
    );

    if config.observability.metrics_enabled {
        let address = &config.observability.metrics_address;
        let addr = address
            .parse::<SocketAddr>()
            .map_err(|source| StartupError::MetricsAddress {
                address: address.clone(),
                source,
            })?;
        metrics::init_metrics(addr)?;
    }

    let scheduler = Arc::new(InMemoryScheduler::from_config(&config.scheduler));

    let listener = TcpListener::bind(&config.listener.bind_address)
        .await
        .map_err(|source| StartupError::Bind {
            address: config.listener.bind_address.clone(),
            source,
        })?;

    let server = HttpServer::new(config, scheduler);
    Ok((server, listener))
}
