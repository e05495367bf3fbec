//! AMQP checker against brokers that never answer.

use std::time::{Duration, Instant};

use updog::checks::amqp::{AmqpChecker, DEFAULT_EXCHANGE, KIND};
use updog::checks::{Checker, ProbeError};

mod common;

#[tokio::test]
async fn test_stalled_broker_is_bounded_by_timeout() {
    let addr = common::start_hanging_backend().await;
    let timeout = Duration::from_millis(1000);
    let checker = AmqpChecker::new("events", format!("amqp://guest:guest@{addr}/%2f"), DEFAULT_EXCHANGE, timeout);

    let start = Instant::now();
    let result = checker.check().await;
    let elapsed = start.elapsed();

    assert_eq!(result.kind, KIND);
    assert!(!result.success);
    assert!(elapsed < timeout + Duration::from_millis(250), "took {elapsed:?}");
    assert_eq!(result.error, Some(ProbeError::Timeout(timeout).to_string()));
}

#[tokio::test]
async fn test_closed_port_fails_fast() {
    let addr = common::closed_port().await;
    let timeout = Duration::from_secs(2);
    let checker = AmqpChecker::new("events", format!("amqp://guest:guest@{addr}/%2f"), DEFAULT_EXCHANGE, timeout);

    let start = Instant::now();
    let result = checker.check().await;

    assert!(!result.success);
    assert!(result.error.is_some());
    assert!(start.elapsed() < timeout);
}
