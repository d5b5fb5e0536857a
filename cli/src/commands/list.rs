//! `wspoll list`: print workspace ids.

use anyhow::Result;
use clap::Args;
use std::process::ExitCode;

use crate::app::AppContext;

/// Arguments for `list`.
#[derive(Args)]
pub struct ListArgs {
    /// Only workspaces whose status is RUNNING
    #[arg(long)]
    pub running: bool,
}

/// Run `wspoll list`.
///
/// # Errors
///
/// Returns an error if the collection cannot be fetched.
pub async fn run(app: &AppContext, args: &ListArgs) -> Result<ExitCode> {
    let poller = app.poller()?;
    let ids = if args.running {
        poller.list_running_workspace_ids().await?
    } else {
        poller.list_workspace_ids().await?
    };
    app.renderer().render_ids(&ids, args.running)?;
    Ok(ExitCode::SUCCESS)
}
