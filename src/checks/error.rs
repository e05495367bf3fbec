//! Errors raised while probing a dependency.
//!
//! These never leave a checker: they are rendered into `CheckResult::error`.

use std::time::Duration;

#[derive(Debug, thiserror::Error)]
pub enum ProbeError {
    #[error("timed out after {0:?}")]
    Timeout(Duration),

    #[error("http request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("redis error: {0}")]
    Redis(#[from] redis::RedisError),

    #[error("sql error: {0}")]
    Sql(#[from] sqlx::Error),

    #[error("amqp error: {0}")]
    Amqp(#[from] lapin::Error),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("consumer closed before the published message was echoed")]
    NoEcho,
}
