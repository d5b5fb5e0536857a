//! `wspoll wait-status` and `wspoll wait-plugin`.

use anyhow::Result;
use clap::Args;
use std::process::ExitCode;
use wspoll_common::WorkspaceStatus;

use crate::app::AppContext;
use crate::domain::workspace_key;
use crate::output::progress;

/// Arguments for `wait-status`.
#[derive(Args)]
pub struct WaitStatusArgs {
    /// Namespace (owner) of the workspace
    pub namespace: String,
    /// Workspace name
    pub name: String,
    /// Status to wait for (RUNNING, STOPPED, ...)
    pub status: WorkspaceStatus,
}

/// Arguments for `wait-plugin`.
#[derive(Args)]
pub struct WaitPluginArgs {
    /// Namespace (owner) of the workspace
    pub namespace: String,
    /// Workspace name
    pub name: String,
    /// Plugin (machine) name to look for
    pub plugin: String,
}

/// Run `wspoll wait-status`.
///
/// # Errors
///
/// Returns an error if the key is invalid, a request fails, or the status
/// budget runs out.
pub async fn status(app: &AppContext, args: &WaitStatusArgs) -> Result<ExitCode> {
    let key = workspace_key(&args.namespace, &args.name)?;
    let poller = app.poller()?;
    let pb = progress::spinner_if(
        app.output.show_progress(),
        &format!("Waiting for {key} to be {}...", args.status),
    );

    match poller.wait_for_status(&key, &args.status).await {
        Ok(()) => {
            pb.finish_and_clear();
            app.renderer().render_done(
                "wait-status",
                &key.to_string(),
                &format!("{key} is {}", args.status),
            )?;
            Ok(ExitCode::SUCCESS)
        }
        Err(e) => {
            progress::finish_error(&pb, &format!("{key} never reached {}", args.status));
            Err(e)
        }
    }
}

/// Run `wspoll wait-plugin`.
///
/// # Errors
///
/// Returns an error if the key is invalid, a request fails, or the plugin
/// budget runs out.
pub async fn plugin(app: &AppContext, args: &WaitPluginArgs) -> Result<ExitCode> {
    let key = workspace_key(&args.namespace, &args.name)?;
    let poller = app.poller()?;
    let pb = progress::spinner_if(
        app.output.show_progress(),
        &format!("Waiting for plugin {} in {key}...", args.plugin),
    );

    match poller.wait_for_plugin(&key, &args.plugin).await {
        Ok(()) => {
            pb.finish_and_clear();
            app.renderer().render_done(
                "wait-plugin",
                &key.to_string(),
                &format!("{} is running in {key}", args.plugin),
            )?;
            Ok(ExitCode::SUCCESS)
        }
        Err(e) => {
            progress::finish_error(&pb, &format!("{} never appeared in {key}", args.plugin));
            Err(e)
        }
    }
}
