//! Infrastructure implementations of the `TokenSource` port.
//!
//! - `StaticTokenSource`: fixed token (single-user servers use `dummy_token`).
//! - `KeycloakTokenSource`: password grant against the server's Keycloak.
//! - `CachedTokenSource`: fetch once, reuse for the session.

use anyhow::{Context, Result};
use serde::Deserialize;
use tokio::sync::OnceCell;

use crate::application::ports::TokenSource;
use crate::domain::WspollConfig;
use crate::domain::config::SINGLE_USER_TOKEN;

/// Keycloak settings keys published by `GET /api/keycloak/settings`.
const TOKEN_ENDPOINT_KEY: &str = "che.keycloak.token.endpoint";
const CLIENT_ID_KEY: &str = "che.keycloak.client_id";

// ── Static ────────────────────────────────────────────────────────────────────

/// Always returns the same token.
#[derive(Debug, Clone)]
pub struct StaticTokenSource(pub String);

impl StaticTokenSource {
    /// The placeholder token accepted by single-user servers.
    #[must_use]
    pub fn single_user() -> Self {
        Self(SINGLE_USER_TOKEN.to_string())
    }
}

impl TokenSource for StaticTokenSource {
    async fn bearer_token(&self) -> Result<String> {
        Ok(self.0.clone())
    }
}

// ── Keycloak ──────────────────────────────────────────────────────────────────

/// Where to send the password grant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeycloakEndpoint {
    pub token_url: String,
    pub client_id: String,
}

/// Extract the token endpoint and client id from the settings document.
///
/// # Errors
///
/// Returns an error if either key is missing or not a string.
pub fn parse_keycloak_settings(settings: &serde_json::Value) -> Result<KeycloakEndpoint> {
    let get = |key: &str| {
        settings
            .get(key)
            .and_then(serde_json::Value::as_str)
            .map(String::from)
            .with_context(|| format!("keycloak settings have no '{key}'"))
    };
    Ok(KeycloakEndpoint {
        token_url: get(TOKEN_ENDPOINT_KEY)?,
        client_id: get(CLIENT_ID_KEY)?,
    })
}

#[derive(Deserialize)]
struct TokenResponse {
    access_token: String,
}

/// Obtains a token with the OAuth2 password grant.
pub struct KeycloakTokenSource {
    client: reqwest::Client,
    base_url: String,
    username: String,
    password: String,
    endpoint: Option<KeycloakEndpoint>,
}

impl KeycloakTokenSource {
    /// Build from configuration. When both `keycloak_token_endpoint` and
    /// `keycloak_client_id` are set, settings discovery is skipped.
    #[must_use]
    pub fn from_config(client: reqwest::Client, config: &WspollConfig) -> Self {
        let endpoint = match (&config.keycloak_token_endpoint, &config.keycloak_client_id) {
            (Some(token_url), Some(client_id)) => Some(KeycloakEndpoint {
                token_url: token_url.clone(),
                client_id: client_id.clone(),
            }),
            _ => None,
        };
        Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            username: config.username.clone(),
            password: config.password.clone(),
            endpoint,
        }
    }

    async fn discover(&self) -> Result<KeycloakEndpoint> {
        if let Some(ep) = &self.endpoint {
            return Ok(ep.clone());
        }
        let url = format!("{}/api/keycloak/settings", self.base_url);
        let settings: serde_json::Value = self
            .client
            .get(&url)
            .send()
            .await
            .and_then(reqwest::Response::error_for_status)
            .with_context(|| format!("Can not get keycloak settings. URL used: {url}"))?
            .json()
            .await
            .context("decoding keycloak settings")?;
        parse_keycloak_settings(&settings)
    }
}

impl TokenSource for KeycloakTokenSource {
    async fn bearer_token(&self) -> Result<String> {
        let endpoint = self.discover().await?;
        let form = [
            ("client_id", endpoint.client_id.as_str()),
            ("username", self.username.as_str()),
            ("password", self.password.as_str()),
            ("grant_type", "password"),
        ];
        let token: TokenResponse = self
            .client
            .post(&endpoint.token_url)
            .form(&form)
            .send()
            .await
            .and_then(reqwest::Response::error_for_status)
            .with_context(|| {
                format!("Can not get bearer token. URL used: {}", endpoint.token_url)
            })?
            .json()
            .await
            .context("decoding keycloak token response")?;
        tracing::debug!(user = %self.username, "obtained keycloak token");
        Ok(token.access_token)
    }
}

// ── Selection and caching ─────────────────────────────────────────────────────

/// The token source chosen from `multiuser`.
pub enum ConfiguredTokenSource {
    SingleUser(StaticTokenSource),
    Keycloak(KeycloakTokenSource),
}

impl ConfiguredTokenSource {
    #[must_use]
    pub fn from_config(client: reqwest::Client, config: &WspollConfig) -> Self {
        if config.multiuser {
            Self::Keycloak(KeycloakTokenSource::from_config(client, config))
        } else {
            Self::SingleUser(StaticTokenSource::single_user())
        }
    }
}

impl TokenSource for ConfiguredTokenSource {
    async fn bearer_token(&self) -> Result<String> {
        match self {
            Self::SingleUser(s) => s.bearer_token().await,
            Self::Keycloak(k) => k.bearer_token().await,
        }
    }
}

/// Fetches the token from `inner` on first use and reuses it afterwards.
///
/// A failed fetch is not cached; the next call tries again.
pub struct CachedTokenSource<T> {
    inner: T,
    token: OnceCell<String>,
}

impl<T: TokenSource> CachedTokenSource<T> {
    #[must_use]
    pub fn new(inner: T) -> Self {
        Self {
            inner,
            token: OnceCell::new(),
        }
    }
}

impl<T: TokenSource> TokenSource for CachedTokenSource<T> {
    async fn bearer_token(&self) -> Result<String> {
        self.token
            .get_or_try_init(|| self.inner.bearer_token())
            .await
            .cloned()
    }
}
