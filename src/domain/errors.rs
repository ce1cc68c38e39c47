//! Domain errors for the support RAG pipeline.

use std::path::PathBuf;

use thiserror::Error;

/// Failures that can occur while building or querying the knowledge base.
///
/// Query-time failures are caught at their component boundary and turned
/// into degraded answers; see [`crate::services::RagService::ask_question`].
#[derive(Debug, Error)]
pub enum RagError {
    #[error("Vector store not found at {path}. Run `support-rag build` first.")]
    MissingStore { path: PathBuf },

    #[error("Embedding failed: {0}")]
    EmbeddingFailure(String),

    #[error("Search failed: {0}")]
    SearchFailure(String),

    #[error("Generation failed: {0}")]
    GenerationFailure(String),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Document error: {0}")]
    Document(String),

    #[error("Storage error: {0}")]
    Storage(String),
}

pub type RagResult<T> = Result<T, RagError>;

impl RagError {
    /// Short, stable label for structured logs.
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::MissingStore { .. } => "missing_store",
            Self::EmbeddingFailure(_) => "embedding_failure",
            Self::SearchFailure(_) => "search_failure",
            Self::GenerationFailure(_) => "generation_failure",
            Self::InvalidConfig(_) => "invalid_config",
            Self::Document(_) => "document",
            Self::Storage(_) => "storage",
        }
    }
}

impl From<std::io::Error> for RagError {
    fn from(err: std::io::Error) -> Self {
        Self::Storage(err.to_string())
    }
}

impl From<serde_json::Error> for RagError {
    fn from(err: serde_json::Error) -> Self {
        Self::Storage(err.to_string())
    }
}
