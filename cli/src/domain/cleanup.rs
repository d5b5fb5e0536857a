//! Bulk clean-up policy and its per-id report.

use serde::Serialize;

/// What `clean_up_all` does when stopping or removing one workspace fails.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CleanupMode {
    /// Record the failure and move on to the next id.
    #[default]
    BestEffort,
    /// Return the first per-id error immediately.
    FailFast,
}

/// Result of one stop or remove call inside a clean-up.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct IdOutcome {
    pub id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl IdOutcome {
    #[must_use]
    pub fn ok(id: &str) -> Self {
        Self {
            id: id.to_string(),
            error: None,
        }
    }

    #[must_use]
    pub fn failed(id: &str, err: &anyhow::Error) -> Self {
        Self {
            id: id.to_string(),
            error: Some(format!("{err:#}")),
        }
    }

    #[must_use]
    pub fn is_ok(&self) -> bool {
        self.error.is_none()
    }
}

/// Outcomes of both clean-up phases, in the order the calls were made.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CleanupReport {
    pub stopped: Vec<IdOutcome>,
    pub removed: Vec<IdOutcome>,
}

impl CleanupReport {
    /// Every failed outcome, stops first.
    pub fn failures(&self) -> impl Iterator<Item = &IdOutcome> {
        self.stopped
            .iter()
            .chain(self.removed.iter())
            .filter(|o| !o.is_ok())
    }

    #[must_use]
    pub fn is_clean(&self) -> bool {
        self.failures().next().is_none()
    }
}
