//! Vector infrastructure components
//!
//! Provides text chunking, the flat similarity index and the persisted
//! two-file vector store used for retrieval.

pub mod chunker;
pub mod index;
pub mod store;

pub use chunker::Chunker;
pub use index::{normalize_l2, FlatIndex, IndexError, SearchHit};
pub use store::{StoreError, StoreMetadata, VectorStore};
