//! Workspace domain helpers: request paths, id validation, list projections.
//!
//! This module is intentionally free of I/O, async, and external layer imports.
//! All functions take data in and return data out.

use anyhow::Result;
use wspoll_common::{WorkspaceKey, WorkspaceStatus, WorkspaceSummary};

use crate::domain::error::PollerError;

/// Collection path, relative to the server base URL.
pub const WORKSPACE_COLLECTION: &str = "/api/workspace";

/// Devfile creation path.
pub const DEVFILE_COLLECTION: &str = "/api/workspace/devfile";

/// Validates a workspace id before it is spliced into a request path.
///
/// # Errors
///
/// Returns an error if the id is empty or contains `/`, `?`, `#` or whitespace.
pub fn validate_workspace_id(id: &str) -> Result<()> {
    if id.is_empty() || id.contains(['/', '?', '#']) || id.chars().any(char::is_whitespace) {
        return Err(PollerError::InvalidKey(format!("'{id}' is not a workspace id")).into());
    }
    Ok(())
}

/// Build a key from separate namespace and name arguments.
///
/// # Errors
///
/// Returns `PollerError::InvalidKey` if either part is empty or contains
/// `:`, `/`, `?`, `#` or whitespace.
pub fn workspace_key(namespace: &str, name: &str) -> Result<WorkspaceKey> {
    Ok(WorkspaceKey::new(namespace, name).map_err(PollerError::from)?)
}

/// `/api/workspace/{namespace}:{name}`
#[must_use]
pub fn key_path(key: &WorkspaceKey) -> String {
    format!("{WORKSPACE_COLLECTION}/{key}")
}

/// `/api/workspace/{id}`
#[must_use]
pub fn id_path(id: &str) -> String {
    format!("{WORKSPACE_COLLECTION}/{id}")
}

/// `/api/workspace/{id}/runtime`
#[must_use]
pub fn runtime_path(id: &str) -> String {
    format!("{WORKSPACE_COLLECTION}/{id}/runtime")
}

/// Project the `id` of every record, preserving server order.
#[must_use]
pub fn ids(workspaces: &[WorkspaceSummary]) -> Vec<String> {
    workspaces.iter().map(|w| w.id.clone()).collect()
}

/// Ids of the records whose status is exactly RUNNING, in server order.
#[must_use]
pub fn running_ids(workspaces: &[WorkspaceSummary]) -> Vec<String> {
    workspaces
        .iter()
        .filter(|w| w.status == WorkspaceStatus::Running)
        .map(|w| w.id.clone())
        .collect()
}
