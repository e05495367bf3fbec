//! Shared utilities for integration testing.

#![allow(dead_code)]

use std::future::Future;
use std::net::SocketAddr;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;

use updog::checks::{CheckResult, Checker, FnChecker};
use updog::observability::metrics::MetricsSink;

fn status_line(status: u16) -> &'static str {
    match status {
        200 => "200 OK",
        204 => "204 No Content",
        404 => "404 Not Found",
        500 => "500 Internal Server Error",
        502 => "502 Bad Gateway",
        503 => "503 Service Unavailable",
        _ => "200 OK",
    }
}

/// Start a mock backend on an ephemeral port that answers every request
/// with `status`.
pub async fn start_mock_backend(status: u16) -> SocketAddr {
    start_programmable_backend(move || async move { (status, String::new()) }).await
}

/// Start a programmable mock backend with async support.
pub async fn start_programmable_backend<F, Fut>(f: F) -> SocketAddr
where
    F: Fn() -> Fut + Send + Sync + 'static,
    Fut: Future<Output = (u16, String)> + Send + 'static,
{
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let f = Arc::new(f);

    tokio::spawn(async move {
        while let Ok((mut socket, _)) = listener.accept().await {
            let f = f.clone();
            tokio::spawn(async move {
                let mut buf = [0u8; 1024];
                let _ = socket.read(&mut buf).await;

                let (status, body) = f().await;
                let response = format!(
                    "HTTP/1.1 {}\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                    status_line(status),
                    body.len(),
                    body
                );
                let _ = socket.write_all(response.as_bytes()).await;
                let _ = socket.shutdown().await;
            });
        }
    });

    addr
}

/// Start a backend that accepts connections and never answers.
pub async fn start_hanging_backend() -> SocketAddr {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    tokio::spawn(async move {
        let mut held = Vec::new();
        while let Ok((socket, _)) = listener.accept().await {
            held.push(socket);
        }
    });

    addr
}

/// An address nothing listens on.
pub async fn closed_port() -> SocketAddr {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    listener.local_addr().unwrap()
}

/// A synthetic checker that sleeps for `delay` and then reports `success`.
pub fn delayed_checker(name: &'static str, delay: Duration, success: bool) -> Arc<dyn Checker> {
    Arc::new(FnChecker::new(name, "synthetic", move || async move {
        tokio::time::sleep(delay).await;
        let secs = delay.as_secs_f64();
        if success {
            CheckResult::healthy(name, "synthetic", secs)
        } else {
            CheckResult::failed(name, "synthetic", secs, "induced failure")
        }
    }))
}

/// A metrics sink that remembers what it was told.
#[derive(Default)]
pub struct RecordingSink {
    pub checks: Mutex<Vec<(String, String, f64, bool)>>,
    pub requests: Mutex<Vec<String>>,
}

impl MetricsSink for RecordingSink {
    fn record_check(&self, result: &CheckResult) {
        self.checks.lock().unwrap().push((
            result.name.clone(),
            result.kind.clone(),
            result.duration,
            !result.success,
        ));
    }

    fn record_request(&self, path: &str, _duration: Duration) {
        self.requests.lock().unwrap().push(path.to_string());
    }
}
