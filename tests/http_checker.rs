//! HTTP checker against mock backends.

use std::time::{Duration, Instant};

use updog::checks::http::HttpChecker;
use updog::checks::Checker;
use url::Url;

mod common;

fn checker(name: &str, addr: std::net::SocketAddr, timeout: Duration) -> HttpChecker {
    let endpoint = Url::parse(&format!("http://{addr}/health")).unwrap();
    HttpChecker::new(name, endpoint, timeout).unwrap()
}

#[tokio::test]
async fn test_2xx_is_healthy() {
    let addr = common::start_mock_backend(204).await;
    let result = checker("api", addr, Duration::from_secs(2)).check().await;

    assert_eq!(result.name, "api");
    assert_eq!(result.kind, "http");
    assert!(result.success);
    assert!(result.error.is_none());
    assert!(result.duration >= 0.0);
}

#[tokio::test]
async fn test_non_2xx_is_unhealthy_with_reason() {
    let addr = common::start_mock_backend(503).await;
    let result = checker("api", addr, Duration::from_secs(2)).check().await;

    assert!(!result.success);
    assert!(result.error.is_none());
    assert_eq!(result.reason.as_deref(), Some("503 Service Unavailable"));
}

#[tokio::test]
async fn test_closed_port_fails_fast() {
    let addr = common::closed_port().await;
    let timeout = Duration::from_secs(5);

    let start = Instant::now();
    let result = checker("gone", addr, timeout).check().await;

    assert!(!result.success);
    assert!(result.error.is_some());
    assert!(start.elapsed() < Duration::from_secs(2));
    assert!(result.duration < timeout.as_secs_f64());
}

#[tokio::test]
async fn test_hanging_backend_is_bounded_by_timeout() {
    let addr = common::start_hanging_backend().await;
    let timeout = Duration::from_millis(300);

    let start = Instant::now();
    let result = checker("stuck", addr, timeout).check().await;
    let elapsed = start.elapsed();

    assert!(!result.success);
    assert!(result.error.is_some());
    assert!(elapsed >= timeout);
    assert!(elapsed < timeout + Duration::from_millis(500), "took {elapsed:?}");
}

#[tokio::test]
async fn test_unresolvable_host_fails() {
    let endpoint = Url::parse("https://example.invalid/health").unwrap();
    let result = HttpChecker::new("invalid", endpoint, Duration::from_secs(2))
        .unwrap()
        .check()
        .await;

    assert!(!result.success);
    assert!(result.error.is_some());
}
