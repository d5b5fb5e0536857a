//! Typed domain error enums.
//!
//! This module has zero imports from `crate::infra`, `crate::commands`,
//! `crate::application`, `tokio`, or `reqwest`. All error types implement
//! `thiserror::Error` and convert to `anyhow::Error` via the `?` operator;
//! callers that need to branch on the kind use `downcast_ref`.

use thiserror::Error;

// ── Poller errors ─────────────────────────────────────────────────────────────

/// Failures of the workspace lifecycle operations.
///
/// Transport failures are not listed here: they come out of the HTTP port as
/// plain `anyhow::Error` and are propagated untouched.
#[derive(Debug, Error)]
pub enum PollerError {
    /// The attempt budget ran out before the condition held.
    #[error(
        "Exceeded the maximum number of checking attempts ({attempts}) waiting for {what}; last observed: {last_observed}"
    )]
    Timeout {
        what: String,
        attempts: u32,
        last_observed: String,
    },

    /// A terminal call answered with something other than its success code.
    #[error("Can not {operation}. Code: {code} Data: {body}")]
    UnexpectedResponse {
        operation: String,
        code: u16,
        body: String,
    },

    /// Removal was requested but the workspace never reached STOPPED.
    #[error(
        "Can not remove workspace with id {id}, because it is still not in STOPPED state after {attempts} checks (last observed: {last_observed})"
    )]
    Precondition {
        id: String,
        attempts: u32,
        last_observed: String,
    },

    #[error("Invalid workspace key: {0}")]
    InvalidKey(String),

    #[error("Invalid poll budget: {0}")]
    InvalidBudget(String),
}

impl From<wspoll_common::KeyError> for PollerError {
    fn from(e: wspoll_common::KeyError) -> Self {
        Self::InvalidKey(e.to_string())
    }
}

impl PollerError {
    /// Stable machine-readable code used by `--json` error output.
    #[must_use]
    pub fn code(&self) -> &'static str {
        match self {
            Self::Timeout { .. } => "timeout",
            Self::UnexpectedResponse { .. } => "unexpected_response",
            Self::Precondition { .. } => "precondition",
            Self::InvalidKey(_) => "invalid_key",
            Self::InvalidBudget(_) => "invalid_budget",
        }
    }
}

// ── Config errors ─────────────────────────────────────────────────────────────

/// Errors related to configuration key/value validation.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Unknown setting: {key}\n\nValid settings: {valid}")]
    UnknownKey { key: String, valid: String },

    #[error("Invalid value for {key}: {value}\n\n{reason}")]
    InvalidValue {
        key: String,
        value: String,
        reason: String,
    },
}

/// Map any error chain to the `--json` error code.
#[must_use]
pub fn error_code(err: &anyhow::Error) -> &'static str {
    if let Some(e) = err.downcast_ref::<PollerError>() {
        return e.code();
    }
    if err.downcast_ref::<ConfigError>().is_some() {
        return "config";
    }
    "error"
}
