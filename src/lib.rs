//! support-rag - question answering over a support guide
//!
//! A minimal retrieval-augmented generation pipeline: the guide is cut into
//! overlapping character windows, embedded and stored in a flat inner-product
//! index; questions are embedded, matched against the index, filtered by
//! similarity and answered by a chat model from the retrieved context.
//!
//! # Architecture
//!
//! This crate follows Hexagonal Architecture principles:
//!
//! - **Domain Layer** (`domain`): models, error taxonomy and port traits
//! - **Adapter Layer** (`adapters`): OpenAI-compatible HTTP clients, document loading
//! - **Infrastructure Layer** (`infrastructure`): config, logging, retry, vector storage
//! - **Service Layer** (`services`): the retrieval pipeline and build phase
//! - **CLI Layer** (`cli`): command-line interface
//!
//! # Example
//!
//! ```ignore
//! use std::sync::Arc;
//! use support_rag::{ConfigLoader, OpenAiEmbedder, OpenAiGenerator, RagService};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = ConfigLoader::load()?;
//!     let embedder = Arc::new(OpenAiEmbedder::new(&config.embedding, &config.retry)?);
//!     let generator = Arc::new(OpenAiGenerator::new(&config.generation, &config.retry)?);
//!     let rag = RagService::open(&config, embedder, generator).await?;
//!
//!     let answer = rag.ask_question("How do I request VPN access?").await;
//!     println!("{}", answer.text);
//!     Ok(())
//! }
//! ```

pub mod adapters;
pub mod cli;
pub mod domain;
pub mod infrastructure;
pub mod services;

// Re-export commonly used types for convenience
pub use adapters::{OpenAiEmbedder, OpenAiGenerator, TextDocumentLoader};
pub use domain::models::{
    Answer, BuildReport, Chunk, ChunkingConfig, Config, Document, Page, QueryOptions,
    QueryOutcome, RetrievalResult,
};
pub use domain::ports::{CompletionRequest, DocumentLoader, Embedder, Generator};
pub use domain::{RagError, RagResult};
pub use infrastructure::config::{ConfigError, ConfigLoader};
pub use infrastructure::vector::{Chunker, FlatIndex, VectorStore};
pub use services::{IndexBuilder, RagService};
