//! Embedding service for bulk (build-time) and single (query-time) vectors.
//!
//! Bulk embedding favors a complete index over a correct one: a chunk whose
//! embedding fails is counted and stored as a zero vector. Query embedding
//! has no fallback.

use std::sync::Arc;

use crate::domain::errors::{RagError, RagResult};
use crate::domain::ports::Embedder;

/// Report from a bulk embedding run.
#[derive(Debug, Clone, Default)]
pub struct BulkEmbeddings {
    /// One vector per input, in input order.
    pub vectors: Vec<Vec<f32>>,
    /// Inputs replaced by a zero vector.
    pub failed: usize,
}

impl BulkEmbeddings {
    /// Inputs embedded successfully.
    pub fn succeeded(&self) -> usize {
        self.vectors.len() - self.failed
    }
}

/// Embedding service wrapping an [`Embedder`].
#[derive(Clone)]
pub struct EmbeddingService {
    provider: Arc<dyn Embedder>,
}

impl EmbeddingService {
    pub fn new(provider: Arc<dyn Embedder>) -> Self {
        Self { provider }
    }

    /// Provider name for diagnostics.
    pub fn provider_name(&self) -> &'static str {
        self.provider.name()
    }

    /// Model identifier recorded in the store.
    pub fn model_id(&self) -> &str {
        self.provider.model_id()
    }

    /// Embedding dimension.
    pub fn dimension(&self) -> usize {
        self.provider.dimension()
    }

    /// Embed a query. Any failure is returned to the caller.
    pub async fn embed_one(&self, text: &str) -> RagResult<Vec<f32>> {
        let vector = self.provider.embed(text).await?;
        self.check(&vector).map_err(RagError::EmbeddingFailure)?;
        Ok(vector)
    }

    /// Embed every text in order, substituting a zero vector for failures.
    ///
    /// `on_progress` is called with the number of texts processed so far.
    pub async fn embed_all<S, F>(&self, texts: &[S], mut on_progress: F) -> BulkEmbeddings
    where
        S: AsRef<str>,
        F: FnMut(usize),
    {
        let dimension = self.dimension();
        let mut report = BulkEmbeddings {
            vectors: Vec::with_capacity(texts.len()),
            failed: 0,
        };

        for (position, text) in texts.iter().enumerate() {
            let outcome = match self.provider.embed(text.as_ref()).await {
                Ok(vector) => self.check(&vector).map(|()| vector),
                Err(e) => Err(e.to_string()),
            };

            match outcome {
                Ok(vector) => report.vectors.push(vector),
                Err(reason) => {
                    tracing::warn!(position, error = %reason, "embedding failed, storing zero vector");
                    report.failed += 1;
                    report.vectors.push(vec![0.0; dimension]);
                }
            }

            on_progress(position + 1);
        }

        tracing::info!(
            provider = self.provider_name(),
            total = texts.len(),
            failed = report.failed,
            "bulk embedding complete"
        );

        report
    }

    fn check(&self, vector: &[f32]) -> Result<(), String> {
        if vector.len() != self.dimension() {
            return Err(format!(
                "expected {} dimensions, got {}",
                self.dimension(),
                vector.len()
            ));
        }
        if vector.iter().any(|x| !x.is_finite()) {
            return Err("embedding contains non-finite values".to_string());
        }
        Ok(())
    }
}
