//! File presence checker, built on the function adapter.

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use crate::checks::{probe, Checker, FnChecker, ProbeError, Verdict};

pub const KIND: &str = "file";

/// Healthy iff `path` exists and its metadata can be read.
pub fn file_checker(name: impl Into<String>, path: impl Into<PathBuf>, timeout: Duration) -> Arc<dyn Checker> {
    let name = name.into();
    let path = path.into();
    let probe_name = name.clone();

    Arc::new(FnChecker::new(name, KIND, move || {
        let name = probe_name.clone();
        let path = path.clone();
        async move {
            probe(&name, KIND, timeout, async move {
                tokio::fs::metadata(&path).await?;
                Ok::<_, ProbeError>(Verdict::Healthy(None))
            })
            .await
        }
    }))
}
