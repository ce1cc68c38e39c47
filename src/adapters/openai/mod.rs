//! OpenAI-compatible HTTP client shared by the embedding and chat adapters.

pub mod client;
pub mod errors;

pub use client::{OpenAiClient, OpenAiSettings};
pub use errors::OpenAiError;
