//! `wspoll clean-up`: stop and remove every workspace on the server.

use anyhow::Result;
use clap::Args;
use std::process::ExitCode;

use crate::app::AppContext;
use crate::application::services::clean_up_all;
use crate::domain::CleanupMode;
use crate::output::TerminalReporter;

/// Arguments for `clean-up`.
#[derive(Args)]
pub struct CleanUpArgs {
    /// Stop at the first workspace that cannot be stopped or removed
    #[arg(long)]
    pub fail_fast: bool,
}

/// Run `wspoll clean-up`.
///
/// Exits with code 1 when any workspace could not be stopped or removed.
///
/// # Errors
///
/// Returns an error if listing fails, the prompt fails, or (with
/// `--fail-fast`) the first per-workspace failure.
pub async fn run(app: &AppContext, args: &CleanUpArgs) -> Result<ExitCode> {
    let poller = app.poller()?;
    let prompt = format!("Stop and remove ALL workspaces on {}?", app.config.base_url);
    if !app.non_interactive && !app.confirm(&prompt, false)? {
        app.output.info("Cancelled.");
        return Ok(ExitCode::SUCCESS);
    }

    let mode = if args.fail_fast {
        CleanupMode::FailFast
    } else {
        CleanupMode::BestEffort
    };

    app.output.info(&format!(
        "Cleaning workspaces at {}",
        chrono::Local::now().format("%H:%M:%S")
    ));
    let reporter = TerminalReporter::new(&app.output);
    let report = clean_up_all(&poller, mode, &reporter).await?;

    app.renderer().render_cleanup(&report)?;
    if report.is_clean() {
        Ok(ExitCode::SUCCESS)
    } else {
        Ok(ExitCode::FAILURE)
    }
}
