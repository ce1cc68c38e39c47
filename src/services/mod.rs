//! Application services
//!
//! The retrieval pipeline, leaf first:
//! - `embedding_service`: bulk embedding with fallback, query embedding without
//! - `retriever`: query vector -> nearest chunks
//! - `context_builder`: threshold filter and page-tagged context
//! - `answer_generator`: prompts, completion and degraded replies
//! - `index_builder`: build phase
//! - `rag_service`: the `ask_question` entry point

pub mod answer_generator;
pub mod context_builder;
pub mod embedding_service;
pub mod index_builder;
pub mod rag_service;
pub mod retriever;

#[cfg(test)]
pub(crate) mod test_support;

pub use answer_generator::AnswerGenerator;
pub use context_builder::{build_context, AssembledContext, BLOCK_SEPARATOR};
pub use embedding_service::{BulkEmbeddings, EmbeddingService};
pub use index_builder::IndexBuilder;
pub use rag_service::RagService;
pub use retriever::Retriever;
