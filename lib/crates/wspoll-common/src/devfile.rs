use serde::{Deserialize, Serialize};

/// Devfile schema version accepted by `POST /api/workspace/devfile`.
pub const DEVFILE_API_VERSION: &str = "1.0.0";

/// Name used by [`Devfile::base`] when none is given.
pub const DEFAULT_WORKSPACE_NAME: &str = "test-workspace";

/// Minimal devfile: just enough to create an empty workspace.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Devfile {
    pub api_version: String,
    pub metadata: DevfileMetadata,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DevfileMetadata {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub generate_name: Option<String>,
}

impl Devfile {
    /// The base devfile, optionally renamed.
    #[must_use]
    pub fn base(name: Option<&str>) -> Self {
        Self {
            api_version: DEVFILE_API_VERSION.to_string(),
            metadata: DevfileMetadata {
                name: Some(name.unwrap_or(DEFAULT_WORKSPACE_NAME).to_string()),
                generate_name: None,
            },
        }
    }
}
