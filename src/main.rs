//! Scheduler Console (v1)
//!
//! Serves status views over a job scheduler, built with Tokio and Axum.
//!
//! # Architecture Overview
//!
//! ```text
//!                     ┌───────────────────────────────────────────────────┐
//!                     │                 SCHEDULER CONSOLE                 │
//!                     │                                                   │
//!   Client Request    │  ┌─────────┐   ┌─────────────┐   ┌────────────┐  │
//!   ──────────────────┼─▶│  http   │──▶│ environment │──▶│  routing   │  │
//!                     │  │ server  │   │   adapter   │   │ dispatcher │  │
//!                     │  └─────────┘   └──────┬──────┘   └─────┬──────┘  │
//!                     │                       │                │         │
//!                     │                       │                ▼         │
//!                     │                       │         ┌────────────┐   │
//!                     │                       │         │  console   │──┼──▶ Scheduler
//!                     │                       │         │  handlers  │   │
//!                     │                       │         └─────┬──────┘   │
//!   Client Response   │  ┌─────────┐          │               │          │
//!   ◀─────────────────┼──│buffered │◀─────────┴───── Response ◀┘          │
//!                     │  │  env    │   render / fall through (404)        │
//!                     │  └─────────┘                                      │
//!                     └───────────────────────────────────────────────────┘
//! ```

use clap::Parser;
use std::path::PathBuf;

use scheduler_console::lifecycle::{signals, startup, Shutdown};
use scheduler_console::observability;

#[derive(Parser)]
#[command(name = "scheduler-console")]
#[command(about = "Web console for a job scheduler", long_about = None)]
struct Cli {
    /// Path to a TOML configuration file.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Override the listener bind address.
    #[arg(short, long)]
    bind: Option<String>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let config = startup::resolve_config(cli.config.as_deref(), cli.bind)?;

    observability::logging::init(&config.observability.log_level);
    tracing::info!("scheduler-console v{} starting", env!("CARGO_PKG_VERSION"));

    let (server, listener) = startup::start(config).await?;
    tracing::info!(
        address = %listener.local_addr()?,
        "Listening for connections"
    );

    let shutdown = Shutdown::new();
    let server_shutdown = shutdown.subscribe();
    tokio::spawn(signals::trigger_on_signal(shutdown));

    server.run(listener, server_shutdown).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}
