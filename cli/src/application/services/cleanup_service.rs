//! Application service: bulk workspace clean-up use-case.

use anyhow::Result;

use crate::application::ports::{HttpTransport, ProgressReporter, Sleeper, TokenSource};
use crate::application::services::poller::WorkspacePoller;
use crate::domain::{CleanupMode, CleanupReport, IdOutcome};

/// Stop every running workspace, then remove every workspace.
///
/// Both phases run strictly one id at a time and await each call. Stops do
/// not verify (removal waits for STOPPED anyway). In `BestEffort` mode a
/// failing id is recorded in the report and the loop moves on; in
/// `FailFast` mode the first failure is returned.
///
/// # Errors
///
/// Listing failures always propagate. Per-id failures propagate only in
/// `FailFast` mode.
pub async fn clean_up_all<H, T, S>(
    poller: &WorkspacePoller<H, T, S>,
    mode: CleanupMode,
    reporter: &impl ProgressReporter,
) -> Result<CleanupReport>
where
    H: HttpTransport,
    T: TokenSource,
    S: Sleeper,
{
    let mut report = CleanupReport::default();

    let running = poller.list_running_workspace_ids().await?;
    tracing::info!(count = running.len(), "stopping running workspaces");
    for id in &running {
        reporter.step(&format!("stopping {id}..."));
        match poller.stop_workspace(id, false).await {
            Ok(()) => report.stopped.push(IdOutcome::ok(id)),
            Err(e) => {
                tracing::warn!(id = %id, error = %format!("{e:#}"), "stop failed");
                if mode == CleanupMode::FailFast {
                    return Err(e.context(format!("stopping {id}")));
                }
                reporter.warn(&format!("could not stop {id}: {e:#}"));
                report.stopped.push(IdOutcome::failed(id, &e));
            }
        }
    }

    let all = poller.list_workspace_ids().await?;
    tracing::info!(count = all.len(), "removing workspaces");
    for id in &all {
        reporter.step(&format!("removing {id}..."));
        match poller.remove_workspace(id).await {
            Ok(()) => {
                reporter.success(&format!("removed {id}"));
                report.removed.push(IdOutcome::ok(id));
            }
            Err(e) => {
                tracing::warn!(id = %id, error = %format!("{e:#}"), "remove failed");
                if mode == CleanupMode::FailFast {
                    return Err(e.context(format!("removing {id}")));
                }
                reporter.warn(&format!("could not remove {id}: {e:#}"));
                report.removed.push(IdOutcome::failed(id, &e));
            }
        }
    }

    Ok(report)
}
