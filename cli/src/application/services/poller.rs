//! Workspace lifecycle poller: bounded-retry waits plus stop/remove/list.
//!
//! Imports only from `crate::domain` and `crate::application::ports`.
//!
//! "Not ready yet" (a non-200 on a polling GET, a status mismatch, a missing
//! plugin) consumes an attempt. Everything else, including transport errors
//! and undecodable 200 bodies, propagates immediately.

use std::future::Future;

use anyhow::{Context, Result};
use wspoll_common::{WorkspaceDetails, WorkspaceKey, WorkspaceStatus};

use crate::application::ports::{HttpTransport, Sleeper, TokenSource};
use crate::application::services::workspace_client::WorkspaceClient;
use crate::domain::workspace::{
    DEVFILE_COLLECTION, id_path, ids, key_path, running_ids, runtime_path, validate_workspace_id,
};
use crate::domain::{PollBudget, PollerError, Probe};

/// Observed value used in timeout messages before any 200 arrived.
const NOTHING_OBSERVED: &str = "no successful response";

/// The budget ran out; carries what the last attempt saw.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Exhausted {
    pub attempts: u32,
    pub last_observed: String,
}

/// Run `probe` up to `budget.attempts()` times, sleeping `budget.interval()`
/// between attempts (never after the last one).
///
/// The outer `Result` carries errors raised by `probe`; the inner one tells
/// success from exhaustion.
///
/// # Errors
///
/// Returns the first error `probe` returns, without retrying.
pub async fn poll_until<T, F, Fut>(
    sleeper: &impl Sleeper,
    budget: PollBudget,
    mut probe: F,
) -> Result<std::result::Result<T, Exhausted>>
where
    F: FnMut(u32) -> Fut,
    Fut: Future<Output = Result<Probe<T>>>,
{
    let mut last_observed = NOTHING_OBSERVED.to_string();
    for attempt in 1..=budget.attempts() {
        match probe(attempt).await? {
            Probe::Ready(value) => {
                tracing::debug!(attempt, "condition met");
                return Ok(Ok(value));
            }
            Probe::Pending { observed } => {
                tracing::debug!(attempt, max = budget.attempts(), %observed, "condition not met");
                last_observed = observed;
            }
        }
        if attempt < budget.attempts() {
            sleeper.sleep(budget.interval()).await;
        }
    }
    Ok(Err(Exhausted {
        attempts: budget.attempts(),
        last_observed,
    }))
}

/// Probe helper: GET `path` and classify the response.
async fn probe_details<H, T, R>(
    client: &WorkspaceClient<H, T>,
    path: &str,
    ready: impl FnOnce(&WorkspaceDetails) -> Option<R>,
) -> Result<Probe<R>>
where
    H: HttpTransport,
    T: TokenSource,
{
    let response = client.get(path).await?;
    if response.status != 200 {
        return Ok(Probe::Pending {
            observed: format!("HTTP {}", response.status),
        });
    }
    let details: WorkspaceDetails = response
        .json()
        .with_context(|| format!("reading workspace state from {path}"))?;
    Ok(match ready(&details) {
        Some(value) => Probe::Ready(value),
        None => Probe::Pending {
            observed: details.status.to_string(),
        },
    })
}

/// Blocking, retry-bounded operations against the workspace API.
pub struct WorkspacePoller<H, T, S> {
    client: WorkspaceClient<H, T>,
    sleeper: S,
    status_budget: PollBudget,
    plugin_budget: PollBudget,
}

impl<H, T, S> WorkspacePoller<H, T, S>
where
    H: HttpTransport,
    T: TokenSource,
    S: Sleeper,
{
    /// `status_budget` drives `wait_for_status`; `plugin_budget` drives
    /// `wait_for_plugin`, stop verification and the removal precondition.
    #[must_use]
    pub fn new(
        client: WorkspaceClient<H, T>,
        sleeper: S,
        status_budget: PollBudget,
        plugin_budget: PollBudget,
    ) -> Self {
        Self {
            client,
            sleeper,
            status_budget,
            plugin_budget,
        }
    }

    #[must_use]
    pub fn client(&self) -> &WorkspaceClient<H, T> {
        &self.client
    }

    #[must_use]
    pub fn sleeper(&self) -> &S {
        &self.sleeper
    }

    /// Wait until `GET /api/workspace/{namespace}:{name}` reports `expected`.
    ///
    /// # Errors
    ///
    /// `PollerError::Timeout` (with the last observed status) when the status
    /// budget runs out; token, transport and decode errors propagate.
    pub async fn wait_for_status(
        &self,
        key: &WorkspaceKey,
        expected: &WorkspaceStatus,
    ) -> Result<()> {
        let path = key_path(key);
        let client = &self.client;
        let path_ref = path.as_str();
        tracing::info!(workspace = %key, %expected, "waiting for workspace status");

        let outcome = poll_until(&self.sleeper, self.status_budget, move |_| async move {
            probe_details(client, path_ref, |ws| (ws.status == *expected).then_some(())).await
        })
        .await?;

        outcome.map_err(|ex| {
            PollerError::Timeout {
                what: format!("workspace {key} to be {expected}"),
                attempts: ex.attempts,
                last_observed: ex.last_observed,
            }
            .into()
        })
    }

    /// Wait until the runtime of `key` lists a machine for `plugin`.
    ///
    /// Membership is exact: see [`wspoll_common::WorkspaceRuntime::has_plugin`].
    ///
    /// # Errors
    ///
    /// `PollerError::Timeout` when the plugin budget runs out.
    pub async fn wait_for_plugin(&self, key: &WorkspaceKey, plugin: &str) -> Result<()> {
        let path = key_path(key);
        let client = &self.client;
        let path_ref = path.as_str();
        tracing::info!(workspace = %key, plugin, "waiting for plugin");

        let outcome = poll_until(&self.sleeper, self.plugin_budget, move |_| async move {
            let probe = probe_details(client, path_ref, |ws| ws.has_plugin(plugin).then_some(()))
                .await?;
            // Report plugin absence rather than the workspace status.
            Ok(match probe {
                Probe::Pending { observed } if observed.starts_with("HTTP ") => {
                    Probe::Pending { observed }
                }
                Probe::Pending { observed } => Probe::Pending {
                    observed: format!("'{plugin}' absent (workspace {observed})"),
                },
                ready @ Probe::Ready(()) => ready,
            })
        })
        .await?;

        outcome.map_err(|ex| {
            PollerError::Timeout {
                what: format!("the '{plugin}' plugin to be present in workspace {key}"),
                attempts: ex.attempts,
                last_observed: ex.last_observed,
            }
            .into()
        })
    }

    /// Ids of every workspace, in server order. No retry.
    ///
    /// # Errors
    ///
    /// Transport errors propagate unchanged.
    pub async fn list_workspace_ids(&self) -> Result<Vec<String>> {
        Ok(ids(&self.client.list().await?))
    }

    /// Ids of the RUNNING workspaces, in server order. No retry.
    ///
    /// # Errors
    ///
    /// Transport errors propagate unchanged.
    pub async fn list_running_workspace_ids(&self) -> Result<Vec<String>> {
        Ok(running_ids(&self.client.list().await?))
    }

    /// Stop the runtime of workspace `id`.
    ///
    /// Succeeds once `DELETE /api/workspace/{id}/runtime` answers 204. With
    /// `verify_stopped` it then also waits (plugin budget) until the
    /// workspace reports STOPPED.
    ///
    /// # Errors
    ///
    /// `PollerError::UnexpectedResponse` for any code other than 204 (the
    /// DELETE is never retried); `PollerError::Timeout` when verification
    /// is requested and STOPPED is not observed.
    pub async fn stop_workspace(&self, id: &str, verify_stopped: bool) -> Result<()> {
        validate_workspace_id(id)?;
        let response = self.client.delete(&runtime_path(id)).await?;
        if response.status != 204 {
            return Err(PollerError::UnexpectedResponse {
                operation: "stop workspace".to_string(),
                code: response.status,
                body: response.body,
            }
            .into());
        }
        tracing::info!(id, "stop requested");

        if verify_stopped {
            self.wait_stopped(id).await?.map_err(|ex| PollerError::Timeout {
                what: format!("workspace {id} to be STOPPED"),
                attempts: ex.attempts,
                last_observed: ex.last_observed,
            })?;
            tracing::info!(id, "workspace stopped");
        }
        Ok(())
    }

    /// Remove workspace `id` once it reports STOPPED.
    ///
    /// # Errors
    ///
    /// `PollerError::Precondition` (and no DELETE) when STOPPED is not seen
    /// within the plugin budget; `PollerError::UnexpectedResponse` when the
    /// DELETE answers anything other than 204.
    pub async fn remove_workspace(&self, id: &str) -> Result<()> {
        validate_workspace_id(id)?;
        if let Err(ex) = self.wait_stopped(id).await? {
            return Err(PollerError::Precondition {
                id: id.to_string(),
                attempts: ex.attempts,
                last_observed: ex.last_observed,
            }
            .into());
        }

        let response = self.client.delete(&id_path(id)).await?;
        if response.status != 204 {
            return Err(PollerError::UnexpectedResponse {
                operation: "remove workspace".to_string(),
                code: response.status,
                body: response.body,
            }
            .into());
        }
        tracing::info!(id, "workspace removed");
        Ok(())
    }

    async fn wait_stopped(&self, id: &str) -> Result<std::result::Result<(), Exhausted>> {
        let path = id_path(id);
        let client = &self.client;
        let path_ref = path.as_str();
        poll_until(&self.sleeper, self.plugin_budget, move |_| async move {
            probe_details(client, path_ref, |ws| {
                (ws.status == WorkspaceStatus::Stopped).then_some(())
            })
            .await
        })
        .await
    }

    /// Create a workspace from a devfile and return its id.
    ///
    /// # Errors
    ///
    /// `PollerError::UnexpectedResponse` for a non-2xx answer; a decode error
    /// when the created workspace has no id.
    pub async fn create_from_devfile(
        &self,
        devfile: &serde_json::Value,
        start_after_create: bool,
    ) -> Result<String> {
        let path = if start_after_create {
            format!("{DEVFILE_COLLECTION}?start-after-create=true")
        } else {
            DEVFILE_COLLECTION.to_string()
        };
        let response = self.client.post_json(&path, devfile).await?;
        if !(200..300).contains(&response.status) {
            return Err(PollerError::UnexpectedResponse {
                operation: "create workspace".to_string(),
                code: response.status,
                body: response.body,
            }
            .into());
        }
        let created: WorkspaceDetails = response.json().context("reading created workspace")?;
        anyhow::ensure!(!created.id.is_empty(), "server returned a workspace without an id");
        tracing::info!(id = %created.id, "workspace created");
        Ok(created.id)
    }
}
