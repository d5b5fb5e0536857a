//! `wspoll remove`: delete a stopped workspace.

use anyhow::Result;
use clap::Args;
use std::process::ExitCode;

use crate::app::AppContext;
use crate::output::progress;

/// Arguments for `remove`.
#[derive(Args)]
pub struct RemoveArgs {
    /// Workspace id
    pub id: String,
}

/// Run `wspoll remove`.
///
/// # Errors
///
/// Returns an error if the workspace never reports STOPPED or the delete
/// request is rejected.
pub async fn run(app: &AppContext, args: &RemoveArgs) -> Result<ExitCode> {
    let poller = app.poller()?;
    let pb = progress::spinner_if(
        app.output.show_progress(),
        &format!("Removing {}...", args.id),
    );
    if let Err(e) = poller.remove_workspace(&args.id).await {
        progress::finish_error(&pb, &format!("Could not remove {}", args.id));
        return Err(e);
    }
    pb.finish_and_clear();
    app.renderer()
        .render_done("remove", &args.id, &format!("Workspace {} removed", args.id))?;
    Ok(ExitCode::SUCCESS)
}
