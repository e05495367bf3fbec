//! Outcome of a single dependency probe.

use serde::Serialize;

/// The outcome of one probe against one dependency.
///
/// Serialized as the value side of the `/health` response map, so the name
/// is skipped: it is already the key.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CheckResult {
    #[serde(skip)]
    pub name: String,

    /// Dependency category, optionally with a sub-variant (`sql-postgres`).
    #[serde(rename = "type")]
    pub kind: String,

    pub success: bool,

    /// Elapsed wall-clock time of the probe in seconds.
    pub duration: f64,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
}

impl CheckResult {
    /// Probe completed and the dependency signaled a healthy state.
    pub fn healthy(name: impl Into<String>, kind: impl Into<String>, duration: f64) -> Self {
        Self {
            name: name.into(),
            kind: kind.into(),
            success: true,
            duration,
            error: None,
            reason: None,
        }
    }

    /// Dependency answered, but reported itself unhealthy.
    pub fn unhealthy(
        name: impl Into<String>,
        kind: impl Into<String>,
        duration: f64,
        reason: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            kind: kind.into(),
            success: false,
            duration,
            error: None,
            reason: Some(reason.into()),
        }
    }

    /// Probe could not complete (transport error, timeout, protocol error).
    pub fn failed(
        name: impl Into<String>,
        kind: impl Into<String>,
        duration: f64,
        error: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            kind: kind.into(),
            success: false,
            duration,
            error: Some(error.into()),
            reason: None,
        }
    }

    pub fn with_reason(mut self, reason: impl Into<String>) -> Self {
        self.reason = Some(reason.into());
        self
    }
}
