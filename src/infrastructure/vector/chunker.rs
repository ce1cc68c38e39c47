//! Fixed-window text chunking
//!
//! Cuts each page into character windows of `chunk_size`, starting every
//! `chunk_size - chunk_overlap` characters. Windows whose trimmed text is
//! `min_chunk_chars` or shorter are dropped without consuming a chunk index.

use crate::domain::errors::{RagError, RagResult};
use crate::domain::models::{Chunk, ChunkingConfig, Page};

/// Character-window chunker
#[derive(Debug, Clone)]
pub struct Chunker {
    config: ChunkingConfig,
}

impl Chunker {
    /// Create a new chunker with default configuration
    pub fn new() -> Self {
        Self {
            config: ChunkingConfig::default(),
        }
    }

    /// Create a new chunker with custom configuration
    pub fn with_config(config: ChunkingConfig) -> RagResult<Self> {
        config
            .validate()
            .map_err(|e| RagError::InvalidConfig(format!("chunking: {e}")))?;

        Ok(Self { config })
    }

    /// Active configuration
    pub const fn config(&self) -> &ChunkingConfig {
        &self.config
    }

    /// Chunk every page in order, numbering retained chunks from zero
    pub fn chunk_pages(&self, pages: &[Page]) -> Vec<Chunk> {
        let mut chunks = Vec::new();
        for page in pages {
            self.chunk_page_into(page, &mut chunks);
        }

        tracing::debug!(
            pages = pages.len(),
            chunks = chunks.len(),
            "chunked document"
        );

        chunks
    }

    fn chunk_page_into(&self, page: &Page, out: &mut Vec<Chunk>) {
        // Byte offset of every char boundary, plus the end of the string.
        let boundaries: Vec<usize> = page
            .text
            .char_indices()
            .map(|(idx, _)| idx)
            .chain(std::iter::once(page.text.len()))
            .collect();
        let char_len = boundaries.len() - 1;
        let step = self.config.step();

        let mut start = 0;
        while start < char_len {
            let end = (start + self.config.chunk_size).min(char_len);
            let text = &page.text[boundaries[start]..boundaries[end]];

            if text.trim().chars().count() > self.config.min_chunk_chars {
                out.push(Chunk {
                    text: text.to_string(),
                    page_number: page.page_number,
                    chunk_index: out.len(),
                    char_start: start,
                    char_end: end,
                });
            }

            start += step;
        }
    }
}

impl Default for Chunker {
    fn default() -> Self {
        Self::new()
    }
}
