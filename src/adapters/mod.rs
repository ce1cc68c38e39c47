//! Adapters implementing the domain ports
//!
//! - `openai`: shared HTTP client for OpenAI-compatible APIs
//! - `embeddings`: [`crate::domain::ports::Embedder`] over `/embeddings`
//! - `generation`: [`crate::domain::ports::Generator`] over `/chat/completions`
//! - `documents`: [`crate::domain::ports::DocumentLoader`] for extracted text

pub mod documents;
pub mod embeddings;
pub mod generation;
pub mod openai;

pub use documents::TextDocumentLoader;
pub use embeddings::OpenAiEmbedder;
pub use generation::OpenAiGenerator;
