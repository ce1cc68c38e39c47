//! Build report model

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Statistics gathered while building the vector store
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BuildReport {
    /// Source document file name
    pub source_document: String,

    /// Pages in the source document
    pub total_pages: usize,

    /// Characters across all pages
    pub total_chars: usize,

    /// Chunks written to the store
    pub total_chunks: usize,

    /// Mean chunk length in characters
    pub average_chunk_chars: usize,

    /// Chunks whose embedding failed and were stored as zero vectors
    pub failed_embeddings: usize,

    /// Vector dimension
    pub dimension: usize,

    /// Embedding model identifier
    pub embedding_model: String,

    /// Path of the persisted index file
    pub index_path: PathBuf,

    /// Path of the persisted chunk store file
    pub chunks_path: PathBuf,
}

impl BuildReport {
    /// Average number of chunks per page
    pub fn chunks_per_page(&self) -> f64 {
        if self.total_pages == 0 {
            0.0
        } else {
            self.total_chunks as f64 / self.total_pages as f64
        }
    }
}
