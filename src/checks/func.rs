//! Function adapter: any async closure returning a `CheckResult` is a checker.

use std::future::Future;

use async_trait::async_trait;

use crate::checks::{CheckResult, Checker};

pub struct FnChecker<F> {
    name: String,
    kind: String,
    f: F,
}

impl<F, Fut> FnChecker<F>
where
    F: Fn() -> Fut + Send + Sync,
    Fut: Future<Output = CheckResult> + Send,
{
    pub fn new(name: impl Into<String>, kind: impl Into<String>, f: F) -> Self {
        Self {
            name: name.into(),
            kind: kind.into(),
            f,
        }
    }
}

#[async_trait]
impl<F, Fut> Checker for FnChecker<F>
where
    F: Fn() -> Fut + Send + Sync,
    Fut: Future<Output = CheckResult> + Send,
{
    fn name(&self) -> &str {
        &self.name
    }

    fn kind(&self) -> &str {
        &self.kind
    }

    async fn check(&self) -> CheckResult {
        (self.f)().await
    }
}
