//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Create Axum Router with all handlers
//! - Wire up middleware (tracing, request ID)
//! - Serve on a bound listener until the shutdown future resolves

use std::future::Future;
use std::sync::Arc;

use axum::{routing::get, Router};
use metrics_exporter_prometheus::PrometheusHandle;
use tokio::net::TcpListener;
use tower_http::{
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    trace::TraceLayer,
};

use crate::aggregator::Aggregator;
use crate::checks::Registry;
use crate::http::handlers;
use crate::observability::metrics::{MetricsSink, NoopSink};

/// Paths that trigger an aggregation run.
pub const HEALTH_PATHS: &[&str] = &["/health", "/health/", "/healthz"];

/// Application state injected into handlers.
#[derive(Clone)]
pub struct AppState {
    pub registry: Arc<Registry>,
    pub aggregator: Arc<Aggregator>,
    pub sink: Arc<dyn MetricsSink>,
    /// Present when `/metrics` is enabled.
    pub metrics: Option<PrometheusHandle>,
}

impl AppState {
    pub fn new(registry: Registry, sink: Arc<dyn MetricsSink>) -> Self {
        Self {
            registry: Arc::new(registry),
            aggregator: Arc::new(Aggregator::new(sink.clone())),
            sink,
            metrics: None,
        }
    }

    pub fn with_metrics(mut self, handle: PrometheusHandle) -> Self {
        self.metrics = Some(handle);
        self
    }
}

impl From<Registry> for AppState {
    fn from(registry: Registry) -> Self {
        Self::new(registry, Arc::new(NoopSink))
    }
}

/// HTTP front of the aggregator.
pub struct HttpServer {
    router: Router,
}

impl HttpServer {
    pub fn new(state: AppState) -> Self {
        Self {
            router: Self::build_router(state),
        }
    }

    /// Build the Axum router with all middleware layers.
    fn build_router(state: AppState) -> Router {
        let mut router = Router::new()
            .route("/ping", get(handlers::ping))
            .route("/metrics", get(handlers::metrics));

        for path in HEALTH_PATHS {
            router = router.route(path, get(handlers::health));
        }

        router
            .with_state(state)
            .layer(PropagateRequestIdLayer::x_request_id())
            .layer(TraceLayer::new_for_http())
            .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
    }

    pub fn router(&self) -> Router {
        self.router.clone()
    }

    /// Serve until `shutdown` resolves.
    pub async fn run<F>(self, listener: TcpListener, shutdown: F) -> Result<(), std::io::Error>
    where
        F: Future<Output = ()> + Send + 'static,
    {
        let addr = listener.local_addr()?;
        tracing::info!(address = %addr, "HTTP server starting");

        axum::serve(listener, self.router)
            .with_graceful_shutdown(shutdown)
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }
}
