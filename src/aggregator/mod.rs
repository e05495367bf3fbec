//! Aggregation engine: run every checker in parallel, reduce to one report.
//!
//! # Data Flow
//! ```text
//! Registry (N checkers)
//!     → N tokio tasks, each owning one mpsc::Sender clone
//!     → results arrive in completion order
//!     → channel closes when the last sender drops (countdown reaches 0)
//!     → collect loop: insert by name, AND success, emit metrics event
//!     → AggregateReport
//! ```
//!
//! # Design Decisions
//! - Sender reference count is the completion latch; no fixed-delay waits,
//!   no manual counting of receives, N = 0 needs no special case
//! - No outer deadline: every checker bounds itself
//! - A task that dies without reporting still gets a failed entry; tasks are
//!   tracked by registry position, not by name

pub mod report;

use std::sync::Arc;
use std::time::Instant;

use tokio::sync::mpsc;

use crate::checks::{CheckResult, Registry};
use crate::observability::metrics::MetricsSink;

pub use report::AggregateReport;

pub const ABORTED: &str = "check aborted before reporting a result";

pub struct Aggregator {
    sink: Arc<dyn MetricsSink>,
}

impl Aggregator {
    pub fn new(sink: Arc<dyn MetricsSink>) -> Self {
        Self { sink }
    }

    /// Probe every dependency in `registry` concurrently.
    pub async fn run(&self, registry: &Registry) -> AggregateReport {
        let start = Instant::now();
        let (tx, mut rx) = mpsc::channel::<(usize, CheckResult)>(registry.len().max(1));

        for (index, checker) in registry.iter().enumerate() {
            let checker = Arc::clone(checker);
            let tx = tx.clone();
            tokio::spawn(async move {
                let result = checker.check().await;
                // Fails only if the run was dropped mid-flight.
                let _ = tx.send((index, result)).await;
            });
        }
        drop(tx);

        let mut report = AggregateReport::new();
        let mut reported = vec![false; registry.len()];
        while let Some((index, result)) = rx.recv().await {
            reported[index] = true;
            self.collect(&mut report, result);
        }

        for (checker, done) in registry.iter().zip(reported) {
            if !done {
                tracing::error!(
                    dependency = %checker.name(),
                    kind = %checker.kind(),
                    "Check task terminated without a result"
                );
                let result = CheckResult::failed(checker.name(), checker.kind(), 0.0, ABORTED);
                self.collect(&mut report, result);
            }
        }

        tracing::debug!(
            dependencies = report.len(),
            failed = report.failures().count(),
            elapsed_ms = start.elapsed().as_millis() as u64,
            "Aggregation complete"
        );

        report
    }

    fn collect(&self, report: &mut AggregateReport, result: CheckResult) {
        if result.success {
            tracing::debug!(
                dependency = %result.name,
                kind = %result.kind,
                duration = result.duration,
                "Dependency healthy"
            );
        } else {
            tracing::warn!(
                dependency = %result.name,
                kind = %result.kind,
                duration = result.duration,
                error = result.error.as_deref().unwrap_or(""),
                reason = result.reason.as_deref().unwrap_or(""),
                "Dependency check failed"
            );
        }

        self.sink.record_check(&result);
        report.insert(result);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::checks::{Checker, FnChecker};
    use crate::observability::metrics::NoopSink;

    fn fixed(name: &'static str, success: bool) -> Arc<dyn Checker> {
        Arc::new(FnChecker::new(name, "test", move || async move {
            if success {
                CheckResult::healthy(name, "test", 0.0)
            } else {
                CheckResult::failed(name, "test", 0.0, "down")
            }
        }))
    }

    #[tokio::test]
    async fn test_empty_registry_is_healthy() {
        let aggregator = Aggregator::new(Arc::new(NoopSink));
        let report = aggregator.run(&Registry::default()).await;

        assert!(report.is_empty());
        assert!(report.overall_success());
    }

    #[tokio::test]
    async fn test_one_entry_per_checker() {
        let registry: Registry = vec![fixed("a", true), fixed("b", false), fixed("c", true)]
            .into_iter()
            .collect();

        let report = Aggregator::new(Arc::new(NoopSink)).run(&registry).await;

        assert_eq!(report.len(), 3);
        assert!(!report.overall_success());
        assert!(!report.get("b").unwrap().success);
        assert!(report.get("a").unwrap().success);
    }

    #[tokio::test]
    async fn test_panicking_checker_still_reported() {
        let panicking: Arc<dyn Checker> = Arc::new(FnChecker::new("bad", "test", || async {
            if std::hint::black_box(true) {
                panic!("checker defect");
            }
            CheckResult::healthy("bad", "test", 0.0)
        }));
        let registry: Registry = vec![fixed("good", true), panicking].into_iter().collect();

        let report = Aggregator::new(Arc::new(NoopSink)).run(&registry).await;

        assert_eq!(report.len(), 2);
        assert!(!report.overall_success());
        assert_eq!(report.get("bad").unwrap().error.as_deref(), Some(ABORTED));
    }

    #[tokio::test]
    async fn test_panicking_checker_sharing_a_name_fails_the_run() {
        let panicking: Arc<dyn Checker> = Arc::new(FnChecker::new("shared", "test", || async {
            if std::hint::black_box(true) {
                panic!("checker defect");
            }
            CheckResult::healthy("shared", "test", 0.0)
        }));
        let registry: Registry = vec![fixed("shared", true), panicking].into_iter().collect();

        let report = Aggregator::new(Arc::new(NoopSink)).run(&registry).await;

        assert_eq!(report.len(), 1);
        assert!(!report.overall_success());
    }

    #[derive(Clone, Default)]
    struct Captured(Arc<std::sync::Mutex<Vec<u8>>>);

    impl std::io::Write for Captured {
        fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    #[tokio::test(flavor = "current_thread")]
    async fn test_failed_check_is_logged_once() {
        let captured = Captured::default();
        let writer = captured.clone();
        let subscriber = tracing_subscriber::fmt()
            .with_max_level(tracing::Level::WARN)
            .with_ansi(false)
            .with_writer(move || writer.clone())
            .finish();
        let _guard = tracing::subscriber::set_default(subscriber);

        let failing: Arc<dyn Checker> = Arc::new(FnChecker::new("db", "test", || async {
            crate::checks::probe("db", "test", std::time::Duration::from_secs(1), async {
                Err(crate::checks::ProbeError::NoEcho)
            })
            .await
        }));
        let registry = Registry::new(vec![failing]);

        let report = Aggregator::new(Arc::new(NoopSink)).run(&registry).await;
        assert!(!report.overall_success());

        let output = String::from_utf8(captured.0.lock().unwrap().clone()).unwrap();
        assert_eq!(output.lines().filter(|l| l.contains("WARN")).count(), 1, "{output}");
    }
}
