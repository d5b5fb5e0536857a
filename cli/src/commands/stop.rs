//! `wspoll stop`: stop a workspace runtime.

use anyhow::Result;
use clap::Args;
use std::process::ExitCode;

use crate::app::AppContext;
use crate::output::progress;

/// Arguments for `stop`.
#[derive(Args)]
pub struct StopArgs {
    /// Workspace id
    pub id: String,
    /// Poll until the workspace reports STOPPED
    #[arg(long)]
    pub verify: bool,
}

/// Run `wspoll stop`.
///
/// # Errors
///
/// Returns an error if the stop request is rejected, or with `--verify`
/// when STOPPED is never observed.
pub async fn run(app: &AppContext, args: &StopArgs) -> Result<ExitCode> {
    let poller = app.poller()?;
    let pb = progress::spinner_if(
        app.output.show_progress() && args.verify,
        &format!("Stopping {}...", args.id),
    );
    if let Err(e) = poller.stop_workspace(&args.id, args.verify).await {
        progress::finish_error(&pb, &format!("Could not stop {}", args.id));
        return Err(e);
    }
    pb.finish_and_clear();

    let message = if args.verify {
        format!("Workspace {} stopped", args.id)
    } else {
        format!("Stop requested for {}", args.id)
    };
    app.renderer().render_done("stop", &args.id, &message)?;
    Ok(ExitCode::SUCCESS)
}
