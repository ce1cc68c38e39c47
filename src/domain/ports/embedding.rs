//! Embedding provider port for semantic vector generation.
//!
//! Defines the trait for embedding providers that convert text into
//! dense vector representations for semantic similarity search.

use async_trait::async_trait;

use crate::domain::errors::RagResult;

/// Trait for embedding providers.
#[async_trait]
pub trait Embedder: Send + Sync {
    /// Provider name (e.g., "openai", "fake").
    fn name(&self) -> &'static str;

    /// Model identifier recorded alongside the store.
    fn model_id(&self) -> &str;

    /// Embedding dimension for this provider/model.
    fn dimension(&self) -> usize;

    /// Generate an embedding for a single text.
    ///
    /// Implementations return [`crate::domain::errors::RagError::EmbeddingFailure`]
    /// once their own retries are exhausted.
    async fn embed(&self, text: &str) -> RagResult<Vec<f32>>;
}
