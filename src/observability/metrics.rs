//! Metrics collection and exposition.
//!
//! # Metrics
//! - `updog_dependency_duration_seconds` (histogram): probe latency by dependency, type
//! - `updog_dependency_checks_total` (counter): probes by dependency, type
//! - `updog_dependency_check_failures_total` (counter): failed probes by dependency, type
//! - `updog_http_request_duration_seconds` (histogram): handler latency by path
//!
//! # Design Decisions
//! - The aggregator only sees the `MetricsSink` trait; storage belongs to
//!   the `metrics` recorder
//! - Dependency series are registered at zero on startup so dashboards see
//!   every dependency before its first probe

use std::time::Duration;

use metrics::{counter, describe_counter, describe_histogram, histogram, Unit};
use metrics_exporter_prometheus::{BuildError, Matcher, PrometheusBuilder, PrometheusHandle};

use crate::checks::CheckResult;

pub const DEPENDENCY_DURATION: &str = "updog_dependency_duration_seconds";
pub const DEPENDENCY_CHECKS: &str = "updog_dependency_checks_total";
pub const DEPENDENCY_FAILURES: &str = "updog_dependency_check_failures_total";
pub const HTTP_REQUEST_DURATION: &str = "updog_http_request_duration_seconds";

const LATENCY_BUCKETS: &[f64] = &[0.005, 0.01, 0.025, 0.05, 0.1, 0.25, 0.5, 1.0, 2.5, 5.0, 10.0];

/// Receiver of per-check and per-request events.
pub trait MetricsSink: Send + Sync {
    fn register_dependency(&self, _name: &str, _kind: &str) {}

    /// Called once per completed check.
    fn record_check(&self, result: &CheckResult);

    fn record_request(&self, path: &str, duration: Duration);
}

/// Discards every event.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopSink;

impl MetricsSink for NoopSink {
    fn record_check(&self, _result: &CheckResult) {}

    fn record_request(&self, _path: &str, _duration: Duration) {}
}

/// Forwards events to the global `metrics` recorder.
#[derive(Debug, Default, Clone, Copy)]
pub struct PrometheusSink;

impl MetricsSink for PrometheusSink {
    fn register_dependency(&self, name: &str, kind: &str) {
        let labels = [("dependency", name.to_string()), ("type", kind.to_string())];
        counter!(DEPENDENCY_CHECKS, &labels).absolute(0);
        counter!(DEPENDENCY_FAILURES, &labels).absolute(0);
        let _ = histogram!(DEPENDENCY_DURATION, &labels);
    }

    fn record_check(&self, result: &CheckResult) {
        let labels = [("dependency", result.name.clone()), ("type", result.kind.clone())];
        histogram!(DEPENDENCY_DURATION, &labels).record(result.duration);
        counter!(DEPENDENCY_CHECKS, &labels).increment(1);
        if !result.success {
            counter!(DEPENDENCY_FAILURES, &labels).increment(1);
        }
    }

    fn record_request(&self, path: &str, duration: Duration) {
        histogram!(HTTP_REQUEST_DURATION, "path" => path.to_string()).record(duration.as_secs_f64());
    }
}

/// Install the Prometheus recorder globally. Call once per process.
pub fn install() -> Result<PrometheusHandle, BuildError> {
    let handle = PrometheusBuilder::new()
        .set_buckets_for_metric(Matcher::Suffix("duration_seconds".to_string()), LATENCY_BUCKETS)?
        .install_recorder()?;

    describe_histogram!(DEPENDENCY_DURATION, Unit::Seconds, "Duration of a health check dependency in seconds");
    describe_counter!(DEPENDENCY_CHECKS, "Count of total health checks per dependency");
    describe_counter!(DEPENDENCY_FAILURES, "Count of total health check failures per dependency");
    describe_histogram!(HTTP_REQUEST_DURATION, Unit::Seconds, "HTTP latency histogram");

    Ok(handle)
}
