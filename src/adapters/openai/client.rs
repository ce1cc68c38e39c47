//! Shared HTTP plumbing for OpenAI-compatible endpoints.

use std::time::Duration;

use serde::de::DeserializeOwned;
use serde::Serialize;

use super::errors::OpenAiError;
use crate::infrastructure::retry::RetryPolicy;

/// Connection settings for one OpenAI-compatible endpoint family
#[derive(Debug, Clone)]
pub struct OpenAiSettings {
    /// Base URL, e.g. `https://api.openai.com/v1`
    pub base_url: String,
    /// Bearer token
    pub api_key: Option<String>,
    /// Per-request timeout
    pub timeout: Duration,
    /// Retry policy for transient failures
    pub retry: RetryPolicy,
}

/// Minimal JSON-over-HTTPS client with timeout and retry
#[derive(Clone)]
pub struct OpenAiClient {
    http: reqwest::Client,
    base_url: String,
    api_key: String,
    retry: RetryPolicy,
}

impl std::fmt::Debug for OpenAiClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OpenAiClient")
            .field("base_url", &self.base_url)
            .field("api_key", &"<redacted>")
            .finish_non_exhaustive()
    }
}

impl OpenAiClient {
    /// Build a client; fails when no API key is available
    pub fn new(settings: OpenAiSettings) -> Result<Self, OpenAiError> {
        let api_key = settings
            .api_key
            .filter(|k| !k.trim().is_empty())
            .ok_or(OpenAiError::MissingApiKey)?;

        let http = reqwest::Client::builder()
            .timeout(settings.timeout)
            .build()
            .map_err(|e| OpenAiError::Client(e.to_string()))?;

        Ok(Self {
            http,
            base_url: settings.base_url.trim_end_matches('/').to_string(),
            api_key,
            retry: settings.retry,
        })
    }

    /// POST `body` to `{base_url}/{path}` and decode the JSON reply, retrying
    /// transient failures
    pub async fn post_json<B, R>(&self, path: &str, body: &B) -> Result<R, OpenAiError>
    where
        B: Serialize + Sync,
        R: DeserializeOwned,
    {
        let url = format!("{}/{}", self.base_url, path.trim_start_matches('/'));
        self.retry.execute(|| self.send_once(&url, body)).await
    }

    async fn send_once<B, R>(&self, url: &str, body: &B) -> Result<R, OpenAiError>
    where
        B: Serialize + Sync,
        R: DeserializeOwned,
    {
        let response = self
            .http
            .post(url)
            .bearer_auth(&self.api_key)
            .json(body)
            .send()
            .await?;

        let status = response.status();
        let text = response.text().await?;

        if !status.is_success() {
            return Err(OpenAiError::from_status(status, text));
        }

        serde_json::from_str(&text).map_err(|e| OpenAiError::InvalidResponse(e.to_string()))
    }
}
