//! Relational database checker.
//!
//! The pool is opened lazily at construction: no connection is attempted
//! until the first probe, so a database that is down at startup still
//! yields a checker that reports failure per probe.

use std::time::Duration;

use async_trait::async_trait;
use sqlx::any::AnyPoolOptions;
use sqlx::AnyPool;

use crate::checks::{probe, CheckResult, Checker, ProbeError, Verdict};

/// Engines the `sqlx` any-driver is built with.
pub const ENGINES: &[&str] = &["postgres", "mysql", "sqlite"];

pub struct SqlChecker {
    name: String,
    kind: String,
    timeout: Duration,
    pool: AnyPool,
}

impl SqlChecker {
    pub fn new(
        name: impl Into<String>,
        engine: &str,
        connection_string: &str,
        timeout: Duration,
    ) -> Result<Self, sqlx::Error> {
        sqlx::any::install_default_drivers();

        let pool = AnyPoolOptions::new()
            .max_connections(2)
            .acquire_timeout(timeout)
            .connect_lazy(connection_string)?;

        Ok(Self {
            name: name.into(),
            kind: format!("sql-{engine}"),
            timeout,
            pool,
        })
    }

    async fn select_one(&self) -> Result<Verdict, ProbeError> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(Verdict::Healthy(None))
    }
}

#[async_trait]
impl Checker for SqlChecker {
    fn name(&self) -> &str {
        &self.name
    }

    fn kind(&self) -> &str {
        &self.kind
    }

    async fn check(&self) -> CheckResult {
        probe(&self.name, &self.kind, self.timeout, self.select_one()).await
    }
}
