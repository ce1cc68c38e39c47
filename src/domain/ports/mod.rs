//! Port trait definitions (Hexagonal Architecture)
//!
//! This module defines async trait interfaces that infrastructure adapters must implement:
//! - Embedder: text to vector conversion
//! - Generator: chat completion for answer synthesis
//! - DocumentLoader: extracted document text to ordered pages
//!
//! These traits define the contracts that allow the domain to be independent
//! of specific infrastructure implementations.

pub mod document_loader;
pub mod embedding;
pub mod generator;

pub use document_loader::DocumentLoader;
pub use embedding::Embedder;
pub use generator::{CompletionRequest, Generator};
