//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! All subsystems produce:
//!     → logging.rs (structured log events)
//!     → metrics.rs (MetricsSink: per-check and per-request events)
//!
//! Consumers:
//!     → stderr/stdout (text or JSON)
//!     → GET /metrics (Prometheus scrape)
//! ```

pub mod logging;
pub mod metrics;
