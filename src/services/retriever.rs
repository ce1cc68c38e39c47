//! Query-time retrieval: embed the question, search the index and join the
//! hits back to their chunks.

use std::sync::Arc;

use tracing::instrument;

use super::embedding_service::EmbeddingService;
use crate::domain::errors::{RagError, RagResult};
use crate::domain::models::RetrievalResult;
use crate::infrastructure::vector::{normalize_l2, VectorStore};

/// Retriever over a loaded, read-only vector store
#[derive(Clone)]
pub struct Retriever {
    embeddings: EmbeddingService,
    store: Arc<VectorStore>,
}

impl Retriever {
    pub fn new(embeddings: EmbeddingService, store: Arc<VectorStore>) -> Self {
        Self { embeddings, store }
    }

    /// The underlying store
    pub fn store(&self) -> &VectorStore {
        &self.store
    }

    /// Top-`top_k` chunks for `question`, best first.
    ///
    /// # Errors
    /// `EmbeddingFailure` when the question cannot be embedded, `SearchFailure`
    /// when the index rejects the query vector.
    #[instrument(skip(self, question), fields(question_chars = question.chars().count()))]
    pub async fn retrieve(&self, question: &str, top_k: usize) -> RagResult<Vec<RetrievalResult>> {
        let mut query = self.embeddings.embed_one(question).await?;
        normalize_l2(&mut query);

        let hits = self
            .store
            .index()
            .search(&query, top_k)
            .map_err(|e| RagError::SearchFailure(e.to_string()))?;

        let results: Vec<RetrievalResult> = hits
            .into_iter()
            .filter_map(|hit| {
                let Some(chunk) = self.store.chunk(hit.ordinal) else {
                    tracing::warn!(ordinal = hit.ordinal, "search hit has no chunk, skipping");
                    return None;
                };
                Some(RetrievalResult {
                    text: chunk.text.clone(),
                    page_number: chunk.page_number,
                    similarity_score: hit.score,
                    chunk_index: chunk.chunk_index,
                })
            })
            .collect();

        tracing::debug!(
            results = results.len(),
            best = results.first().map(|r| r.similarity_score),
            "retrieval complete"
        );

        Ok(results)
    }

    /// Like [`Self::retrieve`], but logs failures and returns no results
    pub async fn search_similar_chunks(&self, question: &str, top_k: usize) -> Vec<RetrievalResult> {
        match self.retrieve(question, top_k).await {
            Ok(results) => results,
            Err(e) => {
                tracing::error!(error = %e, kind = e.kind(), "retrieval failed");
                Vec::new()
            }
        }
    }
}
