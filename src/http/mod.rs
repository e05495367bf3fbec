//! HTTP boundary.
//!
//! # Data Flow
//! ```text
//! GET /ping     → "pong" (200, no dependency touched)
//! GET /health   → Aggregator::run(registry)
//!               → JSON map name → result, 200 if all passed else 503
//! GET /metrics  → Prometheus text (when enabled)
//! ```

pub mod handlers;
pub mod server;

pub use server::{AppState, HttpServer, HEALTH_PATHS};
