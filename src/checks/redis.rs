//! Redis checker: one `PING` over a fresh multiplexed connection.

use std::time::Duration;

use async_trait::async_trait;
use url::Url;

use crate::checks::{probe, CheckResult, Checker, ProbeError, Verdict};

pub const KIND: &str = "redis";

pub struct RedisChecker {
    name: String,
    timeout: Duration,
    client: redis::Client,
}

impl RedisChecker {
    /// `address` is `host:port`. With `tls` the connection uses `rediss://`.
    pub fn new(
        name: impl Into<String>,
        address: &str,
        password: Option<&str>,
        tls: bool,
        timeout: Duration,
    ) -> Result<Self, RedisUrlError> {
        let url = connection_url(address, password, tls)?;
        let client = redis::Client::open(url.as_str())?;

        Ok(Self {
            name: name.into(),
            timeout,
            client,
        })
    }

    async fn ping(&self) -> Result<Verdict, ProbeError> {
        let mut conn = self.client.get_multiplexed_async_connection().await?;
        let pong: String = redis::cmd("PING").query_async(&mut conn).await?;
        Ok(Verdict::Healthy(Some(pong)))
    }
}

#[derive(Debug, thiserror::Error)]
pub enum RedisUrlError {
    #[error("invalid redis address {0:?}")]
    Address(String),

    #[error(transparent)]
    Client(#[from] redis::RedisError),
}

fn connection_url(address: &str, password: Option<&str>, tls: bool) -> Result<Url, RedisUrlError> {
    let scheme = if tls { "rediss" } else { "redis" };
    let mut url = Url::parse(&format!("{scheme}://{address}/0"))
        .map_err(|_| RedisUrlError::Address(address.to_string()))?;

    if let Some(password) = password.filter(|p| !p.is_empty()) {
        url.set_password(Some(password))
            .map_err(|_| RedisUrlError::Address(address.to_string()))?;
    }

    Ok(url)
}

#[async_trait]
impl Checker for RedisChecker {
    fn name(&self) -> &str {
        &self.name
    }

    fn kind(&self) -> &str {
        KIND
    }

    async fn check(&self) -> CheckResult {
        probe(&self.name, KIND, self.timeout, self.ping()).await
    }
}
