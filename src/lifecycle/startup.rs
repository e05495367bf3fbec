//! Startup orchestration.
//!
//! # Responsibilities
//! - Load configuration and apply command-line overrides
//! - Validate before anything else is initialized
//! - Build the checker registry and pre-register metrics
//! - Bind the listener and serve until shutdown
//!
//! # Design Decisions
//! - Fail fast: any startup error is fatal
//! - The listener is bound last (traffic only when ready)

use std::path::Path;
use std::sync::Arc;

use tokio::net::TcpListener;

use crate::checks::{Registry, RegistryError};
use crate::config::{read_config, validate_config, ConfigError, UpdogConfig};
use crate::http::{AppState, HttpServer};
use crate::lifecycle::shutdown;
use crate::observability::metrics::{self, MetricsSink, NoopSink, PrometheusSink};

#[derive(Debug, thiserror::Error)]
pub enum StartupError {
    #[error(transparent)]
    Registry(#[from] RegistryError),

    #[error("failed to install metrics recorder: {0}")]
    Metrics(#[from] metrics_exporter_prometheus::BuildError),

    #[error("invalid listen address {address:?}: {source}")]
    ListenAddress {
        address: String,
        source: std::net::AddrParseError,
    },

    #[error("failed to bind {address}: {source}")]
    Bind {
        address: String,
        source: std::io::Error,
    },

    #[error("server error: {0}")]
    Serve(#[from] std::io::Error),
}

/// Values given on the command line; each one overrides the file.
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub listen_address: Option<String>,
    pub timeout_ms: Option<u64>,
}

impl Overrides {
    pub fn apply(&self, config: &mut UpdogConfig) {
        if let Some(address) = &self.listen_address {
            config.listen_address = address.clone();
        }
        if let Some(timeout_ms) = self.timeout_ms {
            config.timeout_ms = timeout_ms;
        }
    }
}

/// Read, override and validate the configuration.
pub fn prepare_config(path: &Path, overrides: &Overrides) -> Result<UpdogConfig, ConfigError> {
    let mut config = read_config(path)?;
    overrides.apply(&mut config);
    validate_config(&config).map_err(ConfigError::Validation)?;
    Ok(config)
}

/// Log every dependency once; secrets never reach the log.
fn log_dependencies(config: &UpdogConfig) {
    let deps = &config.dependencies;
    tracing::info!(count = deps.len(), "Dependencies:");

    for dep in &deps.http {
        tracing::info!(kind = "http", name = %dep.name, endpoint = %dep.endpoint, "Dependency");
    }
    for dep in &deps.redis {
        tracing::info!(
            kind = "redis",
            name = %dep.name,
            address = %dep.address,
            tls = dep.tls,
            password = if dep.password.is_some() { "********" } else { "" },
            "Dependency"
        );
    }
    for dep in &deps.sql {
        tracing::info!(kind = "sql", name = %dep.name, engine = %dep.engine, "Dependency");
    }
    for dep in &deps.amqp {
        tracing::info!(kind = "amqp", name = %dep.name, exchange = %dep.exchange, "Dependency");
    }
    for dep in &deps.file {
        tracing::info!(kind = "file", name = %dep.name, path = %dep.path, "Dependency");
    }
}

/// Start the service with a validated configuration.
pub async fn run(config: UpdogConfig) -> Result<(), StartupError> {
    tracing::info!(
        listen_address = %config.listen_address,
        timeout_ms = config.timeout_ms,
        metrics_enabled = config.observability.metrics_enabled,
        "Configuration loaded"
    );
    log_dependencies(&config);

    let registry = Registry::from_config(&config.dependencies, config.timeout())?;

    let state = if config.observability.metrics_enabled {
        let handle = metrics::install()?;
        let sink = PrometheusSink;
        for checker in registry.iter() {
            sink.register_dependency(checker.name(), checker.kind());
        }
        AppState::new(registry, Arc::new(sink)).with_metrics(handle)
    } else {
        AppState::new(registry, Arc::new(NoopSink))
    };

    let address = config
        .listen_socket_addr()
        .map_err(|source| StartupError::ListenAddress {
            address: config.listen_address.clone(),
            source,
        })?;
    let listener = TcpListener::bind(address)
        .await
        .map_err(|source| StartupError::Bind {
            address: config.listen_address.clone(),
            source,
        })?;

    HttpServer::new(state).run(listener, shutdown::signal()).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}
