//! Infrastructure implementation of the `HttpTransport` port on reqwest.

use std::time::Duration;

use anyhow::{Context, Result};

use crate::application::ports::{ApiRequest, ApiResponse, HttpMethod, HttpTransport};

/// Build the shared reqwest client with a per-request timeout.
///
/// # Errors
///
/// Returns an error if the TLS backend cannot be initialised.
pub fn build_client(timeout: Duration) -> Result<reqwest::Client> {
    reqwest::Client::builder()
        .timeout(timeout)
        .user_agent(concat!("wspoll/", env!("CARGO_PKG_VERSION")))
        .build()
        .context("building HTTP client")
}

/// Production `HttpTransport`: one reqwest call per request, bearer header
/// set on that request only.
pub struct ReqwestTransport {
    client: reqwest::Client,
    base_url: String,
}

impl ReqwestTransport {
    #[must_use]
    pub fn new(client: reqwest::Client, base_url: &str) -> Self {
        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }
}

impl HttpTransport for ReqwestTransport {
    async fn send(&self, request: &ApiRequest<'_>) -> Result<ApiResponse> {
        let url = self.url(request.path);
        let builder = match request.method {
            HttpMethod::Get => self.client.get(&url),
            HttpMethod::Post => self.client.post(&url),
            HttpMethod::Delete => self.client.delete(&url),
        };
        let mut builder = builder.bearer_auth(request.bearer);
        if let Some(body) = request.body {
            builder = builder.json(body);
        }

        let response = builder
            .send()
            .await
            .with_context(|| format!("{:?} request failed. URL used: {url}", request.method))?;
        let status = response.status().as_u16();
        let body = response
            .text()
            .await
            .with_context(|| format!("reading response body from {url}"))?;
        tracing::debug!(method = ?request.method, %url, status, "response received");
        Ok(ApiResponse { status, body })
    }
}
