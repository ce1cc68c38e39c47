//! Build phase: document -> chunks -> vectors -> persisted store.

use std::sync::Arc;

use tracing::instrument;

use super::embedding_service::EmbeddingService;
use crate::domain::errors::{RagError, RagResult};
use crate::domain::models::config::StorageConfig;
use crate::domain::models::{BuildReport, Document};
use crate::domain::ports::Embedder;
use crate::infrastructure::vector::{Chunker, FlatIndex, StoreMetadata, VectorStore};

/// Builds and persists a vector store, replacing any previous one
pub struct IndexBuilder {
    chunker: Chunker,
    embeddings: EmbeddingService,
    storage: StorageConfig,
}

impl IndexBuilder {
    pub fn new(chunker: Chunker, embedder: Arc<dyn Embedder>, storage: StorageConfig) -> Self {
        Self {
            chunker,
            embeddings: EmbeddingService::new(embedder),
            storage,
        }
    }

    /// Number of chunks `document` would produce
    pub fn count_chunks(&self, document: &Document) -> usize {
        self.chunker.chunk_pages(&document.pages).len()
    }

    /// Chunk, embed, index and persist `document`.
    ///
    /// `on_progress` receives `(embedded, total)` after each chunk.
    ///
    /// # Errors
    /// `Document` when no chunk survives chunking, `EmbeddingFailure` when
    /// every chunk failed to embed, `Storage` when the store cannot be written.
    #[instrument(skip_all, fields(document = %document.name, pages = document.total_pages()))]
    pub async fn build<F>(&self, document: &Document, mut on_progress: F) -> RagResult<BuildReport>
    where
        F: FnMut(usize, usize),
    {
        let chunks = self.chunker.chunk_pages(&document.pages);
        if chunks.is_empty() {
            return Err(RagError::Document(format!(
                "{} produced no chunks longer than {} characters",
                document.name,
                self.chunker.config().min_chunk_chars
            )));
        }

        let total = chunks.len();
        tracing::info!(chunks = total, "embedding chunks");

        let texts: Vec<&str> = chunks.iter().map(|c| c.text.as_str()).collect();
        let embedded = self
            .embeddings
            .embed_all(&texts, |done| on_progress(done, total))
            .await;

        if embedded.succeeded() == 0 {
            return Err(RagError::EmbeddingFailure(format!(
                "all {total} chunk embeddings failed; check the embedding service"
            )));
        }

        let dimension = self.embeddings.dimension();
        let index = FlatIndex::build(dimension, embedded.vectors)
            .map_err(|e| RagError::Storage(format!("cannot index embeddings: {e}")))?;

        let total_chars: usize = chunks.iter().map(|c| c.char_len()).sum();
        let metadata = StoreMetadata::new(
            document.name.clone(),
            document.total_pages(),
            self.embeddings.model_id(),
            dimension,
        );
        let store = VectorStore::new(index, chunks, metadata)?;

        let index_path = self.storage.index_path();
        let chunks_path = self.storage.chunks_path();
        store.save(&index_path, &chunks_path).await?;

        let report = BuildReport {
            source_document: document.name.clone(),
            total_pages: document.total_pages(),
            total_chars: document.total_chars(),
            total_chunks: total,
            average_chunk_chars: total_chars / total,
            failed_embeddings: embedded.failed,
            dimension,
            embedding_model: self.embeddings.model_id().to_string(),
            index_path,
            chunks_path,
        };

        tracing::info!(
            chunks = report.total_chunks,
            failed = report.failed_embeddings,
            store_id = %store.metadata().store_id,
            "vector store built"
        );

        Ok(report)
    }
}
