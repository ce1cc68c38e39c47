//! OpenAI chat-completions adapter used for answer synthesis.

use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::adapters::openai::{OpenAiClient, OpenAiError, OpenAiSettings};
use crate::domain::errors::{RagError, RagResult};
use crate::domain::models::config::{GenerationConfig, RetryConfig};
use crate::domain::ports::{CompletionRequest, Generator};
use crate::infrastructure::retry::RetryPolicy;

/// Chat-completion generator backed by `/chat/completions`
#[derive(Debug, Clone)]
pub struct OpenAiGenerator {
    client: OpenAiClient,
    model: String,
}

impl OpenAiGenerator {
    /// Build from configuration
    pub fn new(config: &GenerationConfig, retry: &RetryConfig) -> Result<Self, OpenAiError> {
        let client = OpenAiClient::new(OpenAiSettings {
            base_url: config.base_url.clone(),
            api_key: config.api_key.clone(),
            timeout: Duration::from_secs(config.timeout_secs),
            retry: RetryPolicy::from(retry),
        })?;

        Ok(Self {
            client,
            model: config.model.clone(),
        })
    }

    async fn call_chat_api(&self, request: &CompletionRequest) -> Result<String, OpenAiError> {
        let body = ChatRequest {
            model: &self.model,
            messages: [
                ChatMessage {
                    role: "system",
                    content: &request.system,
                },
                ChatMessage {
                    role: "user",
                    content: &request.user,
                },
            ],
            temperature: request.temperature,
            max_tokens: request.max_tokens,
        };

        let response: ChatResponse = self.client.post_json("chat/completions", &body).await?;

        let choice = response
            .choices
            .into_iter()
            .next()
            .ok_or_else(|| OpenAiError::InvalidResponse("no choices returned".to_string()))?;

        if let Some(reason) = choice.finish_reason.as_deref() {
            tracing::debug!(finish_reason = reason, "completion finished");
        }

        choice
            .message
            .content
            .map(|c| c.trim().to_string())
            .filter(|c| !c.is_empty())
            .ok_or_else(|| OpenAiError::InvalidResponse("empty completion".to_string()))
    }
}

#[async_trait]
impl Generator for OpenAiGenerator {
    fn model_id(&self) -> &str {
        &self.model
    }

    async fn complete(&self, request: &CompletionRequest) -> RagResult<String> {
        self.call_chat_api(request)
            .await
            .map_err(|e| RagError::GenerationFailure(e.to_string()))
    }
}

// -- OpenAI API request/response types --

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: [ChatMessage<'a>; 2],
    temperature: f32,
    max_tokens: u32,
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'static str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatReply,
    #[serde(default)]
    finish_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ChatReply {
    #[serde(default)]
    content: Option<String>,
}
