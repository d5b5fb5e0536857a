use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Lifecycle status reported by the workspace API.
///
/// Statuses the server invents later are kept verbatim in `Other` so they
/// still show up in diagnostics.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum WorkspaceStatus {
    Starting,
    Running,
    Stopping,
    Stopped,
    Error,
    Other(String),
}

impl WorkspaceStatus {
    /// Wire representation, e.g. `"RUNNING"`.
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::Starting => "STARTING",
            Self::Running => "RUNNING",
            Self::Stopping => "STOPPING",
            Self::Stopped => "STOPPED",
            Self::Error => "ERROR",
            Self::Other(s) => s,
        }
    }
}

impl From<String> for WorkspaceStatus {
    fn from(value: String) -> Self {
        match value.as_str() {
            "STARTING" => Self::Starting,
            "RUNNING" => Self::Running,
            "STOPPING" => Self::Stopping,
            "STOPPED" => Self::Stopped,
            "ERROR" => Self::Error,
            _ => Self::Other(value),
        }
    }
}

impl From<WorkspaceStatus> for String {
    fn from(value: WorkspaceStatus) -> Self {
        match value {
            WorkspaceStatus::Other(s) => s,
            known => known.as_str().to_string(),
        }
    }
}

impl FromStr for WorkspaceStatus {
    type Err = std::convert::Infallible;

    /// Case-insensitive for the known statuses so `running` works on the
    /// command line.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::from(s.to_ascii_uppercase()))
    }
}

impl fmt::Display for WorkspaceStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ── Workspace key ─────────────────────────────────────────────────────────────

/// Error returned when a `namespace:name` pair is malformed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum KeyError {
    #[error("namespace must not be empty")]
    EmptyNamespace,
    #[error("workspace name must not be empty")]
    EmptyName,
    #[error("'{0}' must not contain ':', '/', '?', '#' or whitespace")]
    IllegalChar(String),
    #[error("expected <namespace>:<name>, got '{0}'")]
    Malformed(String),
}

/// A workspace addressed by `namespace:name`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct WorkspaceKey {
    namespace: String,
    name: String,
}

impl WorkspaceKey {
    /// Build a key from its two parts.
    ///
    /// Both parts must be non-empty and may not contain `:`, `/`, `?`, `#`
    /// or whitespace, since any of them would change the request path.
    pub fn new(namespace: impl Into<String>, name: impl Into<String>) -> Result<Self, KeyError> {
        let namespace = namespace.into();
        let name = name.into();
        if namespace.is_empty() {
            return Err(KeyError::EmptyNamespace);
        }
        if name.is_empty() {
            return Err(KeyError::EmptyName);
        }
        for part in [&namespace, &name] {
            if part.contains([':', '/', '?', '#']) || part.chars().any(char::is_whitespace) {
                return Err(KeyError::IllegalChar(part.clone()));
            }
        }
        Ok(Self { namespace, name })
    }

    #[must_use]
    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }
}

impl FromStr for WorkspaceKey {
    type Err = KeyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (namespace, name) = s
            .split_once(':')
            .ok_or_else(|| KeyError::Malformed(s.to_string()))?;
        Self::new(namespace, name)
    }
}

impl fmt::Display for WorkspaceKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.namespace, self.name)
    }
}

// ── Response bodies ───────────────────────────────────────────────────────────

/// One entry of the `GET /api/workspace` collection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkspaceSummary {
    pub id: String,
    pub status: WorkspaceStatus,
}

/// Body of `GET /api/workspace/{key}`. Only the fields the poller reads are
/// modelled; everything else is ignored.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorkspaceDetails {
    #[serde(default)]
    pub id: String,
    pub status: WorkspaceStatus,
    /// Absent while the workspace is stopped.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub runtime: Option<WorkspaceRuntime>,
}

impl WorkspaceDetails {
    /// Whether the runtime reports a machine for `plugin`.
    #[must_use]
    pub fn has_plugin(&self, plugin: &str) -> bool {
        self.runtime.as_ref().is_some_and(|rt| rt.has_plugin(plugin))
    }
}

/// Runtime section of a running workspace.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct WorkspaceRuntime {
    #[serde(default)]
    pub machines: BTreeMap<String, Machine>,
}

/// Machine attribute keys that name the component a machine belongs to.
pub const COMPONENT_ATTRIBUTES: &[&str] = &["component", "plugin"];

impl WorkspaceRuntime {
    /// Exact-name membership: a machine matches when its map key, or one of
    /// its [`COMPONENT_ATTRIBUTES`], equals `plugin`.
    #[must_use]
    pub fn has_plugin(&self, plugin: &str) -> bool {
        self.machines.iter().any(|(name, machine)| {
            name == plugin
                || COMPONENT_ATTRIBUTES
                    .iter()
                    .any(|key| machine.attributes.get(*key).is_some_and(|v| v == plugin))
        })
    }
}

/// A single runtime machine (container).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Machine {
    #[serde(default)]
    pub attributes: BTreeMap<String, String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
}
