//! OpenAI embedding adapter.
//!
//! Calls the `/embeddings` endpoint of any OpenAI-compatible API, one text
//! per request, with the shared timeout and retry behavior.

use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::adapters::openai::{OpenAiClient, OpenAiError, OpenAiSettings};
use crate::domain::errors::{RagError, RagResult};
use crate::domain::models::config::{EmbeddingConfig, RetryConfig};
use crate::domain::ports::Embedder;
use crate::infrastructure::retry::RetryPolicy;

/// OpenAI embedding provider.
#[derive(Debug, Clone)]
pub struct OpenAiEmbedder {
    client: OpenAiClient,
    model: String,
    dimension: usize,
}

impl OpenAiEmbedder {
    /// Build from configuration
    pub fn new(config: &EmbeddingConfig, retry: &RetryConfig) -> Result<Self, OpenAiError> {
        let client = OpenAiClient::new(OpenAiSettings {
            base_url: config.base_url.clone(),
            api_key: config.api_key.clone(),
            timeout: Duration::from_secs(config.timeout_secs),
            retry: RetryPolicy::from(retry),
        })?;

        Ok(Self {
            client,
            model: config.model.clone(),
            dimension: config.dimension,
        })
    }

    async fn call_embeddings_api(&self, text: &str) -> Result<Vec<f32>, OpenAiError> {
        let request = EmbeddingsRequest {
            model: &self.model,
            input: [text],
        };

        let response: EmbeddingsResponse = self.client.post_json("embeddings", &request).await?;

        let data = response
            .data
            .into_iter()
            .min_by_key(|d| d.index)
            .ok_or_else(|| OpenAiError::InvalidResponse("empty embedding data".to_string()))?;

        if data.embedding.len() != self.dimension {
            return Err(OpenAiError::InvalidResponse(format!(
                "expected {} dimensions, got {}",
                self.dimension,
                data.embedding.len()
            )));
        }

        Ok(data.embedding)
    }
}

#[async_trait]
impl Embedder for OpenAiEmbedder {
    fn name(&self) -> &'static str {
        "openai"
    }

    fn model_id(&self) -> &str {
        &self.model
    }

    fn dimension(&self) -> usize {
        self.dimension
    }

    async fn embed(&self, text: &str) -> RagResult<Vec<f32>> {
        self.call_embeddings_api(text)
            .await
            .map_err(|e| RagError::EmbeddingFailure(e.to_string()))
    }
}

// -- OpenAI API request/response types --

#[derive(Debug, Serialize)]
struct EmbeddingsRequest<'a> {
    model: &'a str,
    input: [&'a str; 1],
}

#[derive(Debug, Deserialize)]
struct EmbeddingsResponse {
    data: Vec<EmbeddingData>,
}

#[derive(Debug, Deserialize)]
struct EmbeddingData {
    embedding: Vec<f32>,
    #[serde(default)]
    index: usize,
}
