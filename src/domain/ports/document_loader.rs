use std::path::Path;

use async_trait::async_trait;

use crate::domain::errors::RagResult;
use crate::domain::models::Document;

/// Source of page-by-page document text
///
/// Text extraction from the original file format happens outside this crate;
/// loaders only turn an extracted file into ordered pages.
#[async_trait]
pub trait DocumentLoader: Send + Sync {
    /// Load a document and return its pages in order
    async fn load(&self, path: &Path) -> RagResult<Document>;
}
