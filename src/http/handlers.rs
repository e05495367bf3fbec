//! Request handlers.

use std::time::Instant;

use axum::{
    extract::{MatchedPath, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    Json,
};

use crate::http::server::AppState;

/// Liveness: always `pong`, never touches a dependency.
pub async fn ping(State(state): State<AppState>) -> &'static str {
    let start = Instant::now();
    state.sink.record_request("/ping", start.elapsed());
    "pong"
}

/// One aggregation run over the whole registry.
pub async fn health(State(state): State<AppState>, path: MatchedPath) -> Response {
    let start = Instant::now();
    let report = state.aggregator.run(&state.registry).await;
    let status = report.status_code();

    if !report.overall_success() {
        tracing::info!(
            failed = report.failures().count(),
            total = report.len(),
            "Health check degraded"
        );
    }

    let response = (status, Json(report)).into_response();
    state.sink.record_request(path.as_str(), start.elapsed());
    response
}

/// Prometheus text exposition.
pub async fn metrics(State(state): State<AppState>) -> Response {
    let start = Instant::now();
    let response = match &state.metrics {
        Some(handle) => (
            [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
            handle.render(),
        )
            .into_response(),
        None => (StatusCode::NOT_FOUND, "metrics disabled").into_response(),
    };
    state.sink.record_request("/metrics", start.elapsed());
    response
}
