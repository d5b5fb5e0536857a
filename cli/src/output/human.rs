//! Human-readable terminal renderer.

use owo_colors::OwoColorize as _;

use crate::domain::{CleanupReport, IdOutcome, WspollConfig};
use crate::output::OutputContext;

/// Renders domain types as human-readable terminal output using `OutputContext`.
pub struct HumanRenderer<'a> {
    ctx: &'a OutputContext,
}

impl<'a> HumanRenderer<'a> {
    /// Create a new `HumanRenderer` wrapping the given output context.
    #[must_use]
    pub fn new(ctx: &'a OutputContext) -> Self {
        Self { ctx }
    }

    /// Render the CLI version information.
    pub fn render_version(&self, version: &str) {
        if self.ctx.quiet {
            return;
        }
        println!("wspoll {version}");
    }

    /// Render workspace ids, one per line.
    ///
    /// Ids are printed even in quiet mode so the output can be piped.
    pub fn render_ids(&self, ids: &[String], running_only: bool) {
        if ids.is_empty() {
            if !self.ctx.quiet {
                let what = if running_only { "running workspaces" } else { "workspaces" };
                println!("No {what}.");
            }
            return;
        }
        for id in ids {
            println!("{id}");
        }
    }

    /// Render a clean-up report: totals first, then each failed id.
    pub fn render_cleanup(&self, report: &CleanupReport) {
        let ok = |outcomes: &[IdOutcome]| outcomes.iter().filter(|o| o.is_ok()).count();
        self.ctx.kv(
            "Stopped:",
            &format!("{}/{}", ok(&report.stopped), report.stopped.len()),
        );
        self.ctx.kv(
            "Removed:",
            &format!("{}/{}", ok(&report.removed), report.removed.len()),
        );

        if report.is_clean() {
            self.ctx.success("All workspaces cleaned up");
            return;
        }
        for failure in report.failures() {
            let reason = failure.error.as_deref().unwrap_or("unknown error");
            self.ctx.error(&format!(
                "{}: {reason}",
                failure.id.style(self.ctx.styles.bold)
            ));
        }
    }

    /// Render the effective configuration with the password masked.
    pub fn render_config(&self, config: &WspollConfig, path: &str) {
        let shown = config.redacted();
        self.ctx.header("Configuration:");
        self.ctx.kv("base_url:", &shown.base_url);
        self.ctx.kv("api:", &shown.workspace_api_url());
        self.ctx.kv("multiuser:", &shown.multiuser.to_string());
        self.ctx.kv("username:", &shown.username);
        self.ctx.kv("password:", &shown.password);
        self.ctx.kv(
            "status budget:",
            &format!("{} x {} ms", shown.status_attempts, shown.status_polling_ms),
        );
        self.ctx.kv(
            "plugin budget:",
            &format!("{} x {} ms", shown.plugin_attempts, shown.plugin_polling_ms),
        );
        self.ctx
            .kv("request timeout:", &format!("{} s", shown.request_timeout_secs));
        if let Some(ep) = &shown.keycloak_token_endpoint {
            self.ctx.kv("keycloak endpoint:", ep);
        }
        if let Some(client) = &shown.keycloak_client_id {
            self.ctx.kv("keycloak client:", client);
        }
        println!();
        self.ctx.kv("File:", path);
    }

    /// Render a single-workspace success line.
    pub fn render_done(&self, message: &str) {
        self.ctx.success(message);
    }
}
