//! Loader for already-extracted document text.
//!
//! Two layouts are accepted:
//! - plain UTF-8 text with pages separated by form feed (`\x0c`), as written
//!   by `pdftotext`;
//! - a `.json` array of `{ "page_number": n, "text": "..." }` objects.

use std::path::Path;

use async_trait::async_trait;

use crate::domain::errors::{RagError, RagResult};
use crate::domain::models::{Document, Page};
use crate::domain::ports::DocumentLoader;

const PAGE_SEPARATOR: char = '\x0c';

/// Form-feed text / JSON page loader
#[derive(Debug, Clone, Copy, Default)]
pub struct TextDocumentLoader;

impl TextDocumentLoader {
    /// Create a new loader
    pub const fn new() -> Self {
        Self
    }

    /// Split form-feed separated text into 1-based pages.
    ///
    /// A single trailing separator does not start an extra page.
    pub fn split_pages(text: &str) -> Vec<Page> {
        let body = text.strip_suffix(PAGE_SEPARATOR).unwrap_or(text);
        if body.is_empty() {
            return Vec::new();
        }

        body.split(PAGE_SEPARATOR)
            .zip(1_u32..)
            .map(|(page_text, page_number)| Page::new(page_number, page_text))
            .collect()
    }

    /// Parse JSON pages, ordering them by page number
    pub fn parse_json_pages(raw: &str) -> RagResult<Vec<Page>> {
        let mut pages: Vec<Page> = serde_json::from_str(raw)
            .map_err(|e| RagError::Document(format!("invalid page JSON: {e}")))?;

        if let Some(page) = pages.iter().find(|p| p.page_number == 0) {
            return Err(RagError::Document(format!(
                "page numbers are 1-based, found page 0 with {} chars",
                page.char_count()
            )));
        }

        pages.sort_by_key(|p| p.page_number);
        if pages.windows(2).any(|w| w[0].page_number == w[1].page_number) {
            return Err(RagError::Document("duplicate page numbers".to_string()));
        }

        Ok(pages)
    }
}

#[async_trait]
impl DocumentLoader for TextDocumentLoader {
    async fn load(&self, path: &Path) -> RagResult<Document> {
        let raw = tokio::fs::read_to_string(path)
            .await
            .map_err(|e| RagError::Document(format!("cannot read {}: {e}", path.display())))?;

        let is_json = path
            .extension()
            .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));

        let pages = if is_json {
            Self::parse_json_pages(&raw)?
        } else {
            Self::split_pages(&raw)
        };

        let name = path
            .file_name()
            .map_or_else(|| path.display().to_string(), |n| n.to_string_lossy().into_owned());

        tracing::info!(document = %name, pages = pages.len(), "document loaded");

        Ok(Document::new(name, pages))
    }
}
