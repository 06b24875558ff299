//! Single-shot HTTP transport for JSON requests.

use std::time::Duration;

use bytes::Bytes;
use reqwest::header::CONTENT_TYPE;
use serde::Serialize;
use tracing::debug;

use super::error::CompletionError;

/// Configuration for the underlying reqwest client.
#[derive(Debug, Clone, Default)]
pub struct HttpClientConfig {
    /// Whole-request timeout. `None` waits for the server indefinitely.
    pub timeout: Option<Duration>,
    pub user_agent: Option<String>,
}

impl HttpClientConfig {
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = Some(user_agent.into());
        self
    }
}

/// HTTP client that sends each request exactly once.
pub struct HttpClient {
    client: reqwest::Client,
}

impl HttpClient {
    pub fn new(config: &HttpClientConfig) -> Result<Self, CompletionError> {
        let default_ua = format!("gptcli/{}", env!("CARGO_PKG_VERSION"));
        let ua = config.user_agent.as_deref().unwrap_or(&default_ua);

        let mut builder = reqwest::Client::builder().user_agent(ua);
        if let Some(timeout) = config.timeout {
            builder = builder.timeout(timeout);
        }

        let client = builder.build().map_err(|e| {
            CompletionError::Configuration(format!("building http client: {e}"))
        })?;

        Ok(Self { client })
    }

    /// POST `body` as JSON and return the full response body.
    ///
    /// The status code is not inspected: error bodies are returned like any
    /// other so the caller can decode or report them.
    #[tracing::instrument(
        name = "http_post_json",
        skip(self, headers, body),
        fields(url = %url),
        err
    )]
    pub async fn post_json<Req>(
        &self,
        url: &str,
        headers: &[(String, String)],
        body: &Req,
    ) -> Result<Bytes, CompletionError>
    where
        Req: Serialize,
    {
        let payload = serde_json::to_vec(body).map_err(CompletionError::Encoding)?;
        debug!(bytes = payload.len(), "sending request");

        let mut req_builder = self
            .client
            .post(url)
            .header(CONTENT_TYPE, "application/json")
            .body(payload);

        for (name, value) in headers {
            req_builder = req_builder.header(name, value);
        }

        let res = req_builder
            .send()
            .await
            .map_err(CompletionError::Transport)?;

        let status = res.status();
        let body = res.bytes().await.map_err(CompletionError::Io)?;
        debug!(status = %status, bytes = body.len(), "received response");

        Ok(body)
    }
}
