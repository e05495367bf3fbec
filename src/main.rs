//! updog: dependency health-check aggregator.
//!
//! # Architecture Overview
//!
//! ```text
//!                     ┌──────────────────────────────────────────────────┐
//!                     │                      UPDOG                       │
//!   GET /health       │  ┌────────┐    ┌────────────┐    ┌───────────┐   │
//!   ──────────────────┼─▶│  http  │───▶│ aggregator │───▶│ registry  │   │
//!                     │  │ server │    │  fan-out   │    │ checkers  │───┼──▶ HTTP / Redis /
//!                     │  └────────┘    └─────┬──────┘    └───────────┘   │    SQL / AMQP / file
//!   200 | 503 + JSON  │       ▲              │ fan-in (mpsc)             │
//!   ◀─────────────────┼───────┴──────────────┘                           │
//!                     │                                                  │
//!                     │  ┌──────────┐ ┌───────────────┐ ┌─────────────┐  │
//!                     │  │  config  │ │ observability │ │  lifecycle  │  │
//!                     │  └──────────┘ └───────────────┘ └─────────────┘  │
//!                     └──────────────────────────────────────────────────┘
//! ```

use std::path::PathBuf;

use clap::Parser;

use updog::config::ObservabilityConfig;
use updog::lifecycle::{self, Overrides};
use updog::observability::logging;

#[derive(Parser)]
#[command(name = "updog", version)]
#[command(about = "Service to aggregate health checks. Returns 503 if any fail.", long_about = None)]
struct Cli {
    /// Path of configuration file
    #[arg(short = 'c', long = "config.path", default_value = "updog.toml")]
    config_path: PathBuf,

    /// Address to listen on for HTTP requests
    #[arg(long = "listen.address")]
    listen_address: Option<String>,

    /// Timeout for dependency checks, in milliseconds
    #[arg(short = 't', long = "timeout-ms")]
    timeout_ms: Option<u64>,
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    let overrides = Overrides {
        listen_address: cli.listen_address,
        timeout_ms: cli.timeout_ms,
    };

    let config = match lifecycle::prepare_config(&cli.config_path, &overrides) {
        Ok(config) => config,
        Err(e) => {
            logging::init(&ObservabilityConfig::default());
            tracing::error!(path = %cli.config_path.display(), error = %e, "Invalid configuration");
            std::process::exit(1);
        }
    };

    logging::init(&config.observability);
    tracing::info!("updog v{} starting", env!("CARGO_PKG_VERSION"));

    if let Err(e) = lifecycle::run(config).await {
        tracing::error!(error = %e, "Fatal error");
        std::process::exit(1);
    }
}
