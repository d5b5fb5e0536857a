//! Domain types and validators for wspoll configuration.
//!
//! Pure functions only: no I/O, no async, no filesystem access.

use anyhow::Result;
use serde::{Deserialize, Serialize};

use crate::domain::error::ConfigError;
use crate::domain::poll::PollBudget;

// ── Constants ────────────────────────────────────────────────────────────────

pub const VALID_CONFIG_KEYS: &[&str] = &[
    "base_url",
    "multiuser",
    "username",
    "password",
    "status_attempts",
    "status_polling_ms",
    "plugin_attempts",
    "plugin_polling_ms",
    "request_timeout_secs",
    "keycloak_token_endpoint",
    "keycloak_client_id",
];

/// Placeholder bearer token sent when multi-user auth is disabled.
pub const SINGLE_USER_TOKEN: &str = "dummy_token";

// ── Config schema ────────────────────────────────────────────────────────────

/// Configuration stored in `~/.wspoll/config.yaml` and overridable through
/// `WSPOLL_*` environment variables.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct WspollConfig {
    /// Base URL of the IDE server, without the `/api` suffix.
    pub base_url: String,
    /// Authenticate through Keycloak instead of the placeholder token.
    pub multiuser: bool,
    pub username: String,
    pub password: String,
    /// Attempt budget for `wait-status`.
    pub status_attempts: u32,
    pub status_polling_ms: u64,
    /// Attempt budget for `wait-plugin`, stop verification and removal.
    pub plugin_attempts: u32,
    pub plugin_polling_ms: u64,
    /// Per-request HTTP timeout.
    pub request_timeout_secs: u64,
    /// Skips Keycloak settings discovery when set.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub keycloak_token_endpoint: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub keycloak_client_id: Option<String>,
}

impl Default for WspollConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8080".to_string(),
            multiuser: false,
            username: "admin".to_string(),
            password: "admin".to_string(),
            status_attempts: 90,
            status_polling_ms: 10_000,
            plugin_attempts: 20,
            plugin_polling_ms: 20_000,
            request_timeout_secs: 30,
            keycloak_token_endpoint: None,
            keycloak_client_id: None,
        }
    }
}

/// Environment overlay: every field optional, `None` keeps the file value.
#[derive(Debug, Default, Deserialize)]
pub struct ConfigOverrides {
    pub base_url: Option<String>,
    pub multiuser: Option<bool>,
    pub username: Option<String>,
    pub password: Option<String>,
    pub status_attempts: Option<u32>,
    pub status_polling_ms: Option<u64>,
    pub plugin_attempts: Option<u32>,
    pub plugin_polling_ms: Option<u64>,
    pub request_timeout_secs: Option<u64>,
    pub keycloak_token_endpoint: Option<String>,
    pub keycloak_client_id: Option<String>,
}

impl WspollConfig {
    /// Apply non-empty overrides on top of `self`.
    #[must_use]
    pub fn with_overrides(mut self, o: ConfigOverrides) -> Self {
        macro_rules! take {
            ($($field:ident),*) => {
                $(if let Some(v) = o.$field { self.$field = v; })*
            };
        }
        take!(
            base_url,
            multiuser,
            username,
            password,
            status_attempts,
            status_polling_ms,
            plugin_attempts,
            plugin_polling_ms,
            request_timeout_secs
        );
        if o.keycloak_token_endpoint.is_some() {
            self.keycloak_token_endpoint = o.keycloak_token_endpoint;
        }
        if o.keycloak_client_id.is_some() {
            self.keycloak_client_id = o.keycloak_client_id;
        }
        self
    }

    /// `{base_url}/api/workspace` with any trailing slash on the base removed.
    #[must_use]
    pub fn workspace_api_url(&self) -> String {
        format!("{}/api/workspace", self.base_url.trim_end_matches('/'))
    }

    /// # Errors
    ///
    /// Returns an error if `status_attempts` is zero.
    pub fn status_budget(&self) -> Result<PollBudget> {
        Ok(PollBudget::from_millis(
            self.status_attempts,
            self.status_polling_ms,
        )?)
    }

    /// # Errors
    ///
    /// Returns an error if `plugin_attempts` is zero.
    pub fn plugin_budget(&self) -> Result<PollBudget> {
        Ok(PollBudget::from_millis(
            self.plugin_attempts,
            self.plugin_polling_ms,
        )?)
    }

    /// Check every field against the same rules `config set` enforces.
    ///
    /// # Errors
    ///
    /// Returns the first invalid field.
    pub fn validate(&self) -> Result<()> {
        validate_config_value("base_url", &self.base_url)?;
        validate_config_value("status_attempts", &self.status_attempts.to_string())?;
        validate_config_value("plugin_attempts", &self.plugin_attempts.to_string())?;
        validate_config_value(
            "request_timeout_secs",
            &self.request_timeout_secs.to_string(),
        )?;
        Ok(())
    }

    /// Set a single key from its string form (used by `config set`).
    ///
    /// # Errors
    ///
    /// Returns an error if the key is unknown or the value is invalid.
    pub fn set(&mut self, key: &str, value: &str) -> Result<()> {
        validate_config_key(key)?;
        validate_config_value(key, value)?;
        // Values were validated above, so the parses cannot fail.
        let num = || value.parse::<u64>().unwrap_or_default();
        match key {
            "base_url" => self.base_url = value.trim_end_matches('/').to_string(),
            "multiuser" => self.multiuser = value == "true",
            "username" => self.username = value.to_string(),
            "password" => self.password = value.to_string(),
            "status_attempts" => self.status_attempts = u32::try_from(num()).unwrap_or(u32::MAX),
            "status_polling_ms" => self.status_polling_ms = num(),
            "plugin_attempts" => self.plugin_attempts = u32::try_from(num()).unwrap_or(u32::MAX),
            "plugin_polling_ms" => self.plugin_polling_ms = num(),
            "request_timeout_secs" => self.request_timeout_secs = num(),
            "keycloak_token_endpoint" => self.keycloak_token_endpoint = Some(value.to_string()),
            "keycloak_client_id" => self.keycloak_client_id = Some(value.to_string()),
            _ => {}
        }
        Ok(())
    }

    /// A copy safe to print: the password is masked.
    #[must_use]
    pub fn redacted(&self) -> Self {
        Self {
            password: "********".to_string(),
            ..self.clone()
        }
    }
}

// ── Validators ───────────────────────────────────────────────────────────────

/// Validates a configuration key against the whitelist.
///
/// # Errors
///
/// Returns an error if the key is not in the allowed list.
pub fn validate_config_key(key: &str) -> Result<()> {
    if !VALID_CONFIG_KEYS.contains(&key) {
        return Err(ConfigError::UnknownKey {
            key: key.to_string(),
            valid: VALID_CONFIG_KEYS.join(", "),
        }
        .into());
    }
    Ok(())
}

/// Validates a configuration value for the given key.
///
/// # Errors
///
/// Returns an error if the value is not valid for the key.
pub fn validate_config_value(key: &str, value: &str) -> Result<()> {
    let invalid = |reason: &str| -> anyhow::Error {
        ConfigError::InvalidValue {
            key: key.to_string(),
            value: value.to_string(),
            reason: reason.to_string(),
        }
        .into()
    };
    match key {
        "base_url" | "keycloak_token_endpoint" => {
            if !(value.starts_with("http://") || value.starts_with("https://")) {
                return Err(invalid("Must start with http:// or https://"));
            }
        }
        "multiuser" => {
            if value != "true" && value != "false" {
                return Err(invalid("Valid values: true, false"));
            }
        }
        "status_attempts" | "plugin_attempts" | "request_timeout_secs" => {
            match value.parse::<u32>() {
                Ok(n) if n > 0 => {}
                _ => return Err(invalid("Must be a whole number greater than zero")),
            }
        }
        "status_polling_ms" | "plugin_polling_ms" => {
            if value.parse::<u64>().is_err() {
                return Err(invalid("Must be a whole number of milliseconds"));
            }
        }
        _ => {}
    }
    Ok(())
}

// ── Unit tests ───────────────────────────────────────────────────────────────
