//! Generative model port.

use async_trait::async_trait;

use crate::domain::errors::RagResult;

/// A single chat completion request.
#[derive(Debug, Clone, PartialEq)]
pub struct CompletionRequest {
    /// System instruction.
    pub system: String,
    /// User message (context plus question).
    pub user: String,
    /// Sampling temperature.
    pub temperature: f32,
    /// Upper bound on generated tokens.
    pub max_tokens: u32,
}

/// Trait for chat-completion backends.
#[async_trait]
pub trait Generator: Send + Sync {
    /// Model identifier used for completions.
    fn model_id(&self) -> &str;

    /// Run one completion and return the generated text.
    async fn complete(&self, request: &CompletionRequest) -> RagResult<String>;
}
