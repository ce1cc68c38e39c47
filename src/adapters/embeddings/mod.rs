//! Embedding provider adapters.

pub mod openai;

pub use openai::OpenAiEmbedder;
