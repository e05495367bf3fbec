//! Dependency health-check aggregator.
//!
//! Polls every configured dependency (HTTP endpoints, Redis, SQL databases,
//! AMQP brokers, local files) in parallel on each `/health` request and
//! reduces the outcomes to one verdict: 200 when all passed, 503 otherwise,
//! with a per-dependency JSON report either way.

pub mod aggregator;
pub mod checks;
pub mod config;
pub mod http;
pub mod lifecycle;
pub mod observability;

pub use aggregator::{AggregateReport, Aggregator};
pub use checks::{CheckResult, Checker, Registry};
pub use config::UpdogConfig;
pub use http::{AppState, HttpServer};
