//! Authenticated access to the workspace REST API.
//!
//! Every call fetches the bearer token from the injected `TokenSource` and
//! hands it to the transport together with the request, so no state is
//! shared between calls beyond what the token source itself caches.

use anyhow::Result;
use wspoll_common::WorkspaceSummary;

use crate::application::ports::{ApiRequest, ApiResponse, HttpMethod, HttpTransport, TokenSource};
use crate::domain::PollerError;
use crate::domain::workspace::WORKSPACE_COLLECTION;

/// Thin request layer over an `HttpTransport` and a `TokenSource`.
pub struct WorkspaceClient<H, T> {
    transport: H,
    tokens: T,
}

impl<H: HttpTransport, T: TokenSource> WorkspaceClient<H, T> {
    #[must_use]
    pub fn new(transport: H, tokens: T) -> Self {
        Self { transport, tokens }
    }

    /// The underlying transport (tests inspect recorded requests through it).
    #[must_use]
    pub fn transport(&self) -> &H {
        &self.transport
    }

    #[must_use]
    pub fn tokens(&self) -> &T {
        &self.tokens
    }

    async fn send(
        &self,
        method: HttpMethod,
        path: &str,
        body: Option<&serde_json::Value>,
    ) -> Result<ApiResponse> {
        let token = self.tokens.bearer_token().await?;
        tracing::trace!(?method, path, "sending request");
        self.transport
            .send(&ApiRequest {
                method,
                path,
                bearer: &token,
                body,
            })
            .await
    }

    /// # Errors
    ///
    /// Returns token or transport errors unchanged.
    pub async fn get(&self, path: &str) -> Result<ApiResponse> {
        self.send(HttpMethod::Get, path, None).await
    }

    /// # Errors
    ///
    /// Returns token or transport errors unchanged.
    pub async fn delete(&self, path: &str) -> Result<ApiResponse> {
        self.send(HttpMethod::Delete, path, None).await
    }

    /// # Errors
    ///
    /// Returns token or transport errors unchanged.
    pub async fn post_json(&self, path: &str, body: &serde_json::Value) -> Result<ApiResponse> {
        self.send(HttpMethod::Post, path, Some(body)).await
    }

    /// Fetch the whole workspace collection in server order.
    ///
    /// # Errors
    ///
    /// Transport errors propagate as-is; a non-200 answer is a
    /// `PollerError::UnexpectedResponse`; a malformed body is a decode error.
    pub async fn list(&self) -> Result<Vec<WorkspaceSummary>> {
        let response = self.get(WORKSPACE_COLLECTION).await?;
        if response.status != 200 {
            return Err(PollerError::UnexpectedResponse {
                operation: "list workspaces".to_string(),
                code: response.status,
                body: response.body,
            }
            .into());
        }
        response.json()
    }
}
