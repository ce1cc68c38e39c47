//! Document and chunk domain models
//!
//! A document is an ordered list of pages. Each page is cut into overlapping
//! character windows; every retained window becomes a [`Chunk`] that remembers
//! where on its page it came from.

use serde::{Deserialize, Serialize};

/// A single page of extracted text
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Page {
    /// 1-based page number within the source document
    pub page_number: u32,

    /// Plain text extracted from the page
    pub text: String,
}

impl Page {
    /// Create a new page
    pub fn new(page_number: u32, text: impl Into<String>) -> Self {
        Self {
            page_number,
            text: text.into(),
        }
    }

    /// Number of characters (Unicode scalar values) on the page
    pub fn char_count(&self) -> usize {
        self.text.chars().count()
    }
}

/// An ingested document: a name plus its pages in order
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Document {
    /// File name of the source document (no directory)
    pub name: String,

    /// Pages in reading order
    pub pages: Vec<Page>,
}

impl Document {
    /// Create a new document
    pub fn new(name: impl Into<String>, pages: Vec<Page>) -> Self {
        Self {
            name: name.into(),
            pages,
        }
    }

    /// Total number of pages
    pub fn total_pages(&self) -> usize {
        self.pages.len()
    }

    /// Total number of characters across all pages
    pub fn total_chars(&self) -> usize {
        self.pages.iter().map(Page::char_count).sum()
    }
}

/// Configuration for fixed-size overlapping chunking
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct ChunkingConfig {
    /// Window length in characters
    #[serde(default = "default_chunk_size")]
    pub chunk_size: usize,

    /// Characters shared by consecutive windows
    #[serde(default = "default_chunk_overlap")]
    pub chunk_overlap: usize,

    /// Windows whose trimmed length is at or below this are dropped
    #[serde(default = "default_min_chunk_chars")]
    pub min_chunk_chars: usize,
}

const fn default_chunk_size() -> usize {
    500
}

const fn default_chunk_overlap() -> usize {
    100
}

const fn default_min_chunk_chars() -> usize {
    50
}

impl Default for ChunkingConfig {
    fn default() -> Self {
        Self {
            chunk_size: default_chunk_size(),
            chunk_overlap: default_chunk_overlap(),
            min_chunk_chars: default_min_chunk_chars(),
        }
    }
}

impl ChunkingConfig {
    /// Distance between the starts of consecutive windows.
    ///
    /// Only meaningful for a validated config (`chunk_overlap < chunk_size`).
    pub const fn step(&self) -> usize {
        self.chunk_size.saturating_sub(self.chunk_overlap)
    }

    /// Validate the chunking configuration
    pub fn validate(&self) -> Result<(), String> {
        if self.chunk_size == 0 {
            return Err("chunk_size must be greater than 0".to_string());
        }

        if self.chunk_overlap >= self.chunk_size {
            return Err(format!(
                "chunk_overlap ({}) must be less than chunk_size ({})",
                self.chunk_overlap, self.chunk_size
            ));
        }

        if self.min_chunk_chars >= self.chunk_size {
            return Err(format!(
                "min_chunk_chars ({}) must be less than chunk_size ({})",
                self.min_chunk_chars, self.chunk_size
            ));
        }

        Ok(())
    }
}

/// A retained window of page text, the atomic unit of retrieval
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Chunk {
    /// The window text, untrimmed
    pub text: String,

    /// Page the window was cut from
    pub page_number: u32,

    /// Position in the chunk sequence; equals the vector ordinal in the index
    pub chunk_index: usize,

    /// Character offset of the window start within its page
    pub char_start: usize,

    /// Character offset one past the window end within its page
    pub char_end: usize,
}

impl Chunk {
    /// Length of the chunk in characters
    pub fn char_len(&self) -> usize {
        self.char_end - self.char_start
    }

    /// Get a preview of the content (first 100 chars)
    pub fn preview(&self) -> String {
        preview(&self.text, 100)
    }
}

/// First `max_chars` characters of `text`, with "..." appended when cut.
pub fn preview(text: &str, max_chars: usize) -> String {
    match text.char_indices().nth(max_chars) {
        Some((byte_idx, _)) => format!("{}...", &text[..byte_idx]),
        None => text.to_string(),
    }
}
