//! Port trait definitions for the Application layer.
//!
//! Ports are the interfaces (contracts) that infrastructure must fulfill.
//! This file imports only from `crate::domain` and never from `crate::infra`,
//! `crate::commands`, or `crate::output`.

use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};
use serde::de::DeserializeOwned;

use crate::domain::WspollConfig;

// ── Value Types ───────────────────────────────────────────────────────────────

/// HTTP verbs used against the workspace API.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HttpMethod {
    Get,
    Post,
    Delete,
}

/// One authenticated request.
///
/// The bearer token travels with the request itself; transports must not
/// keep it as a client-wide default header.
#[derive(Debug, Clone, Copy)]
pub struct ApiRequest<'a> {
    pub method: HttpMethod,
    /// Path (plus optional query) relative to the configured base URL,
    /// e.g. `/api/workspace/abc/runtime`.
    pub path: &'a str,
    /// Token value without the `Bearer ` prefix.
    pub bearer: &'a str,
    /// JSON body, only meaningful for `Post`.
    pub body: Option<&'a serde_json::Value>,
}

/// A response that made it back from the server, whatever its status code.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiResponse {
    pub status: u16,
    pub body: String,
}

impl ApiResponse {
    #[must_use]
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    /// Decode the body as JSON.
    ///
    /// # Errors
    ///
    /// Returns an error if the body is not valid JSON for `T`.
    pub fn json<T: DeserializeOwned>(&self) -> Result<T> {
        serde_json::from_str(&self.body)
            .with_context(|| format!("decoding response body (HTTP {})", self.status))
    }
}

// ── HTTP Port ─────────────────────────────────────────────────────────────────

/// Sends a single request and returns the raw response.
///
/// `Err` is reserved for transport failures (DNS, refused connection,
/// timeout). Any HTTP status, including 4xx/5xx, is an `Ok` response.
#[allow(async_fn_in_trait)]
pub trait HttpTransport {
    async fn send(&self, request: &ApiRequest<'_>) -> Result<ApiResponse>;
}

// ── Auth Port ─────────────────────────────────────────────────────────────────

/// Supplies the bearer token attached to every request.
#[allow(async_fn_in_trait)]
pub trait TokenSource {
    /// # Errors
    ///
    /// Returns an error if the credential cannot be obtained; callers
    /// propagate it unchanged.
    async fn bearer_token(&self) -> Result<String>;
}

// ── Clock Port ────────────────────────────────────────────────────────────────

/// The wait primitive used between poll attempts.
#[allow(async_fn_in_trait)]
pub trait Sleeper {
    async fn sleep(&self, duration: Duration);
}

// ── Progress Reporting Port ───────────────────────────────────────────────────

/// Abstracts progress reporting so services can emit events without
/// depending on the Presentation layer. Sync trait, no async needed.
pub trait ProgressReporter {
    /// Emit an in-progress step message.
    fn step(&self, message: &str);
    /// Emit a success message.
    fn success(&self, message: &str);
    /// Emit a warning message.
    fn warn(&self, message: &str);
}

/// Reporter that discards everything; used by library callers and tests.
pub struct SilentReporter;

impl ProgressReporter for SilentReporter {
    fn step(&self, _: &str) {}
    fn success(&self, _: &str) {}
    fn warn(&self, _: &str) {}
}

// ── Config Port ───────────────────────────────────────────────────────────────

/// Abstracts loading and saving the configuration file.
pub trait ConfigStore {
    /// Load the file, falling back to defaults when it does not exist.
    fn load(&self) -> Result<WspollConfig>;
    /// Persist `config` to the file.
    fn save(&self, config: &WspollConfig) -> Result<()>;
    /// Location of the file.
    fn path(&self) -> Result<PathBuf>;
}
