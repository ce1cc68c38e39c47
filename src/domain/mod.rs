//! Domain layer for the support RAG pipeline
//!
//! This module contains core models, the error taxonomy and the port traits
//! that external services are reached through.

pub mod errors;
pub mod models;
pub mod ports;

// Re-export error types for convenient access
pub use errors::{RagError, RagResult};
