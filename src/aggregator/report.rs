//! Reduction of one aggregation run.

use std::collections::BTreeMap;

use axum::http::StatusCode;
use serde::Serialize;

use crate::checks::CheckResult;

/// Every `CheckResult` of one run, keyed by dependency name, plus the
/// AND of their `success` flags.
///
/// Serializes as the bare name → result map.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct AggregateReport {
    results: BTreeMap<String, CheckResult>,

    #[serde(skip)]
    overall_success: bool,
}

impl AggregateReport {
    /// An empty report is vacuously successful.
    pub fn new() -> Self {
        Self {
            results: BTreeMap::new(),
            overall_success: true,
        }
    }

    /// Fold one result in. A duplicate name replaces the earlier entry.
    pub fn insert(&mut self, result: CheckResult) {
        self.overall_success &= result.success;
        self.results.insert(result.name.clone(), result);
    }

    pub fn overall_success(&self) -> bool {
        self.overall_success
    }

    pub fn get(&self, name: &str) -> Option<&CheckResult> {
        self.results.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.results.contains_key(name)
    }

    pub fn failures(&self) -> impl Iterator<Item = &CheckResult> {
        self.results.values().filter(|r| !r.success)
    }

    pub fn len(&self) -> usize {
        self.results.len()
    }

    pub fn is_empty(&self) -> bool {
        self.results.is_empty()
    }

    /// 200 when every dependency passed, 503 otherwise.
    pub fn status_code(&self) -> StatusCode {
        if self.overall_success {
            StatusCode::OK
        } else {
            StatusCode::SERVICE_UNAVAILABLE
        }
    }
}

impl Default for AggregateReport {
    fn default() -> Self {
        Self::new()
    }
}

impl FromIterator<CheckResult> for AggregateReport {
    fn from_iter<I: IntoIterator<Item = CheckResult>>(iter: I) -> Self {
        let mut report = Self::new();
        for result in iter {
            report.insert(result);
        }
        report
    }
}
