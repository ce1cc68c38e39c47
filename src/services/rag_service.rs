//! RAG (Retrieval-Augmented Generation) service
//!
//! Query entry point over a loaded store. Each question runs
//! embed -> search -> filter -> generate to completion and always resolves
//! to an [`Answer`].

use std::sync::Arc;

use tracing::instrument;

use super::answer_generator::AnswerGenerator;
use super::context_builder::build_context;
use super::embedding_service::EmbeddingService;
use super::retriever::Retriever;
use crate::domain::errors::{RagError, RagResult};
use crate::domain::models::config::Config;
use crate::domain::models::{Answer, QueryOptions, RetrievalResult};
use crate::domain::ports::{Embedder, Generator};
use crate::infrastructure::vector::{StoreMetadata, VectorStore};

/// Question answering over a read-only vector store
pub struct RagService {
    retriever: Retriever,
    answers: AnswerGenerator,
    defaults: QueryOptions,
}

impl RagService {
    /// Load the persisted store named by `config` and wire the components.
    ///
    /// # Errors
    /// `MissingStore` when either store file is absent, `SearchFailure` when
    /// the files are corrupt, mismatched, or were built with a different
    /// embedding dimension.
    pub async fn open(
        config: &Config,
        embedder: Arc<dyn Embedder>,
        generator: Arc<dyn Generator>,
    ) -> RagResult<Self> {
        let store = VectorStore::load(
            &config.storage.index_path(),
            &config.storage.chunks_path(),
        )
        .await?;

        Self::from_store(store, config, embedder, generator)
    }

    /// Wire the components around an already-loaded store
    pub fn from_store(
        store: VectorStore,
        config: &Config,
        embedder: Arc<dyn Embedder>,
        generator: Arc<dyn Generator>,
    ) -> RagResult<Self> {
        let meta = store.metadata();
        if meta.dimension != embedder.dimension() {
            return Err(RagError::SearchFailure(format!(
                "store was built with {}-dimensional vectors but the embedder produces {}; rebuild the store",
                meta.dimension,
                embedder.dimension()
            )));
        }
        if meta.embedding_model != embedder.model_id() {
            tracing::warn!(
                store_model = %meta.embedding_model,
                embedder_model = embedder.model_id(),
                "store was built with a different embedding model"
            );
        }

        tracing::info!(
            chunks = store.len(),
            total_pages = meta.total_pages,
            document = %meta.source_document,
            "vector store ready"
        );

        Ok(Self {
            retriever: Retriever::new(EmbeddingService::new(embedder), Arc::new(store)),
            answers: AnswerGenerator::new(generator, &config.generation),
            defaults: config.retrieval.query_options(),
        })
    }

    /// Metadata of the loaded store
    pub fn metadata(&self) -> &StoreMetadata {
        self.retriever.store().metadata()
    }

    /// Number of chunks in the loaded store
    pub fn chunk_count(&self) -> usize {
        self.retriever.store().len()
    }

    /// Default per-query options from configuration
    pub const fn default_options(&self) -> QueryOptions {
        self.defaults
    }

    /// Answer `question` with the configured top-k and threshold
    pub async fn ask_question(&self, question: &str) -> Answer {
        self.ask_with(question, self.defaults).await
    }

    /// Answer `question` with explicit retrieval options.
    ///
    /// Never fails: retrieval and generation errors become degraded answers
    /// with no sources.
    #[instrument(skip(self, question), fields(top_k = options.top_k, threshold = options.threshold))]
    pub async fn ask_with(&self, question: &str, options: QueryOptions) -> Answer {
        let question = question.trim();
        if question.is_empty() {
            return self.answers.no_context_answer();
        }

        let retrieved = match self.retriever.retrieve(question, options.top_k).await {
            Ok(results) => results,
            Err(e) => {
                tracing::error!(error = %e, kind = e.kind(), "query retrieval failed");
                return self.answers.retrieval_failed_answer(&e);
            }
        };

        let context = build_context(&retrieved, options.threshold);
        if context.is_empty() {
            tracing::info!(retrieved = retrieved.len(), "no result cleared the threshold");
            return self.answers.no_context_answer().with_retrieved(retrieved);
        }

        let answer = self
            .answers
            .generate(question, &context, self.metadata().total_pages)
            .await
            .with_retrieved(retrieved);

        tracing::info!(
            outcome = %answer.outcome,
            sources = ?answer.source_pages,
            "question resolved"
        );

        answer
    }

    /// Retrieval only, for dry runs; errors are returned, not masked
    pub async fn search(&self, question: &str, top_k: usize) -> RagResult<Vec<RetrievalResult>> {
        self.retriever.retrieve(question, top_k).await
    }
}
