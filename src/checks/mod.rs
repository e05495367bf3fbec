//! Dependency checkers.
//!
//! # Data Flow
//! ```text
//! config [dependencies]
//!     → registry.rs (one Checker per entry, built once at startup)
//!     → Checker::check() per aggregation run
//!         → probe(): start clock → protocol call under deadline → stop clock
//!         → CheckResult { success, duration, error?, reason? }
//! ```
//!
//! # Design Decisions
//! - One capability (`check`), one variant per dependency kind
//! - Every probe is bounded by the checker's own deadline; nothing upstream
//!   will cancel it
//! - Probe errors are values: a checker always returns a `CheckResult`

pub mod amqp;
pub mod error;
pub mod file;
pub mod func;
pub mod http;
pub mod redis;
pub mod registry;
pub mod result;
pub mod sql;

use std::future::Future;
use std::time::{Duration, Instant};

use async_trait::async_trait;

pub use error::ProbeError;
pub use func::FnChecker;
pub use registry::{Registry, RegistryError};
pub use result::CheckResult;

/// Probes exactly one dependency instance.
///
/// Implementations hold only immutable identity and connection parameters,
/// so a single checker may be invoked concurrently and repeatedly.
#[async_trait]
pub trait Checker: Send + Sync {
    /// Unique name of the dependency; the key in the aggregate report.
    fn name(&self) -> &str;

    /// Dependency category, used as a metrics label.
    fn kind(&self) -> &str;

    /// Run one bounded probe. Never panics, never outlives its deadline.
    async fn check(&self) -> CheckResult;
}

/// What a dependency said about itself once the probe completed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Verdict {
    Healthy(Option<String>),
    Unhealthy(String),
}

/// Time `fut` under `timeout` and turn its outcome into a `CheckResult`.
pub async fn probe<F>(name: &str, kind: &str, timeout: Duration, fut: F) -> CheckResult
where
    F: Future<Output = Result<Verdict, ProbeError>>,
{
    let start = Instant::now();
    let outcome = match tokio::time::timeout(timeout, fut).await {
        Ok(outcome) => outcome,
        Err(_) => Err(ProbeError::Timeout(timeout)),
    };
    let elapsed = start.elapsed().as_secs_f64();

    match outcome {
        Ok(Verdict::Healthy(reason)) => {
            let result = CheckResult::healthy(name, kind, elapsed);
            match reason {
                Some(reason) => result.with_reason(reason),
                None => result,
            }
        }
        Ok(Verdict::Unhealthy(reason)) => CheckResult::unhealthy(name, kind, elapsed, reason),
        Err(e) => CheckResult::failed(name, kind, elapsed, e.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_probe_healthy_with_reason() {
        let result = probe("cache", "redis", Duration::from_secs(1), async {
            Ok(Verdict::Healthy(Some("PONG".into())))
        })
        .await;

        assert!(result.success);
        assert!(result.error.is_none());
        assert_eq!(result.reason.as_deref(), Some("PONG"));
        assert!(result.duration >= 0.0);
    }

    #[tokio::test]
    async fn test_probe_error_is_captured() {
        let result = probe("api", "http", Duration::from_secs(1), async {
            Err(ProbeError::NoEcho)
        })
        .await;

        assert!(!result.success);
        assert!(result.error.unwrap().contains("echoed"));
    }

    #[tokio::test]
    async fn test_probe_enforces_deadline() {
        let start = Instant::now();
        let result = probe("slow", "http", Duration::from_millis(50), async {
            tokio::time::sleep(Duration::from_secs(10)).await;
            Ok(Verdict::Healthy(None))
        })
        .await;

        assert!(start.elapsed() < Duration::from_secs(1));
        assert!(!result.success);
        assert!(result.error.unwrap().starts_with("timed out"));
    }
}
