//! HTTP endpoint checker.
//!
//! # Design Decisions
//! - One `reqwest::Client` per checker, built with the deadline as its timeout
//! - Only 200-299 is healthy; anything else is reported with the status line
//! - Redirects are followed by the client, so 3xx never reaches the verdict

use std::time::Duration;

use async_trait::async_trait;
use url::Url;

use crate::checks::{probe, CheckResult, Checker, ProbeError, Verdict};

pub const KIND: &str = "http";

pub struct HttpChecker {
    name: String,
    endpoint: Url,
    timeout: Duration,
    client: reqwest::Client,
}

impl HttpChecker {
    pub fn new(name: impl Into<String>, endpoint: Url, timeout: Duration) -> Result<Self, reqwest::Error> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .user_agent(concat!("updog/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            name: name.into(),
            endpoint,
            timeout,
            client,
        })
    }

    async fn get(&self) -> Result<Verdict, ProbeError> {
        let response = self.client.get(self.endpoint.clone()).send().await?;
        let status = response.status();

        if status.is_success() {
            Ok(Verdict::Healthy(None))
        } else {
            Ok(Verdict::Unhealthy(status.to_string()))
        }
    }
}

#[async_trait]
impl Checker for HttpChecker {
    fn name(&self) -> &str {
        &self.name
    }

    fn kind(&self) -> &str {
        KIND
    }

    async fn check(&self) -> CheckResult {
        probe(&self.name, KIND, self.timeout, self.get()).await
    }
}
