//! Subcommand handlers.

pub mod ask;
pub mod build;
pub mod search;

use std::sync::Arc;

use anyhow::{Context, Result};

use crate::adapters::{OpenAiEmbedder, OpenAiGenerator};
use crate::domain::models::Config;
use crate::services::RagService;

/// Open the persisted store with the configured OpenAI adapters
pub(crate) async fn open_service(config: &Config) -> Result<RagService> {
    let embedder = OpenAiEmbedder::new(&config.embedding, &config.retry)
        .context("Failed to set up the embedding client")?;
    let generator = OpenAiGenerator::new(&config.generation, &config.retry)
        .context("Failed to set up the chat client")?;

    let service = RagService::open(config, Arc::new(embedder), Arc::new(generator)).await?;
    Ok(service)
}
