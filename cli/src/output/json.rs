//! JSON output helpers.
//!
//! `JsonRenderer` prints one pretty-printed document per command on stdout.
//! `format_error` builds the error object printed when a command fails.

use anyhow::{Context, Result};
use serde::Serialize;

use crate::domain::{CleanupReport, WspollConfig};

/// Format a JSON error object.
///
/// Output (pretty-printed):
/// ```json
/// {
///   "error": true,
///   "message": "...",
///   "code": "..."
/// }
/// ```
///
/// # Errors
///
/// Returns an error if JSON serialization fails.
pub fn format_error(message: &str, code: &str) -> Result<String> {
    let obj = serde_json::json!({
        "error": true,
        "message": message,
        "code": code,
    });
    serde_json::to_string_pretty(&obj).context("JSON serialization failed")
}

/// Renders command results as JSON on stdout.
pub struct JsonRenderer;

impl JsonRenderer {
    fn print(value: &impl Serialize) -> Result<()> {
        let out = serde_json::to_string_pretty(value).context("JSON serialization failed")?;
        println!("{out}");
        Ok(())
    }

    /// # Errors
    ///
    /// Returns an error if JSON serialization fails.
    pub fn render_version(&self, version: &str) -> Result<()> {
        Self::print(&serde_json::json!({ "version": version }))
    }

    /// # Errors
    ///
    /// Returns an error if JSON serialization fails.
    pub fn render_ids(&self, ids: &[String], running_only: bool) -> Result<()> {
        Self::print(&serde_json::json!({ "running_only": running_only, "ids": ids }))
    }

    /// # Errors
    ///
    /// Returns an error if JSON serialization fails.
    pub fn render_cleanup(&self, report: &CleanupReport) -> Result<()> {
        Self::print(&serde_json::json!({
            "clean": report.is_clean(),
            "stopped": report.stopped,
            "removed": report.removed,
        }))
    }

    /// # Errors
    ///
    /// Returns an error if JSON serialization fails.
    pub fn render_config(&self, config: &WspollConfig, path: &str) -> Result<()> {
        Self::print(&serde_json::json!({
            "path": path,
            "config": config.redacted(),
        }))
    }

    /// # Errors
    ///
    /// Returns an error if JSON serialization fails.
    pub fn render_path(&self, path: &str) -> Result<()> {
        Self::print(&serde_json::json!({ "path": path }))
    }

    /// # Errors
    ///
    /// Returns an error if JSON serialization fails.
    pub fn render_done(&self, action: &str, id: &str) -> Result<()> {
        Self::print(&serde_json::json!({ "action": action, "id": id, "ok": true }))
    }
}
