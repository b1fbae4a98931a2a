//! MTA Hosting Optimizer (v1)
//!
//! # Architecture Overview
//!
//! ```text
//!                         ┌──────────────────────────────────────────────┐
//!                         │               HOSTING OPTIMIZER               │
//!   GET /mta-hosting-     │  ┌────────┐   ┌───────────┐   ┌────────────┐ │
//!   optimizer ────────────┼─▶│  http  │──▶│ threshold │──▶│ classifier │ │
//!                         │  │ server │   │ resolver  │   │            │ │
//!                         │  └────────┘   └─────┬─────┘   └─────┬──────┘ │
//!                         │                     │               │        │
//!                         │               env / .env        inventory    │
//!                         │               (cached)          (Arc, r/o)   │
//!   ["mta-prod-1", ...] ◀─┼──────────────────────────────────────┘        │
//!                         │                                                │
//!                         │  config · observability · lifecycle            │
//!                         └──────────────────────────────────────────────┘
//! ```

use std::path::PathBuf;
use std::sync::Arc;

use clap::Parser;

use mta_hosting_optimizer::config::load_or_default;
use mta_hosting_optimizer::lifecycle::signals::spawn_signal_handler;
use mta_hosting_optimizer::observability::logging::init_logging;
use mta_hosting_optimizer::{Service, Shutdown};

#[derive(Parser)]
#[command(name = "mta-hosting-optimizer")]
#[command(about = "Reports MTA host groups with few live endpoints", long_about = None)]
struct Args {
    /// Path to a TOML configuration file.
    #[arg(short, long, env = "OPTIMIZER_CONFIG")]
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    let config = load_or_default(args.config.as_deref())?;
    init_logging(&config.observability)?;

    tracing::info!("mta-hosting-optimizer v{} starting", env!("CARGO_PKG_VERSION"));
    tracing::info!(
        bind_address = %config.listener.bind_address,
        path = %config.api.path,
        threshold_variable = %config.threshold.variable,
        request_timeout_secs = config.timeouts.request_secs,
        "Configuration loaded"
    );

    let service = match Service::from_config(config) {
        Ok(service) => service,
        Err(e) => {
            tracing::error!(error = %e, "Startup failed");
            return Err(e.into());
        }
    };

    let shutdown = Arc::new(Shutdown::new());
    spawn_signal_handler(shutdown.clone());

    service.run(&shutdown).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}
