use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};

use crate::adapters::{OpenAiEmbedder, TextDocumentLoader};
use crate::cli::output::{output, BuildOutput};
use crate::cli::progress::create_progress_bar;
use crate::cli::types::BuildArgs;
use crate::domain::models::Config;
use crate::domain::ports::DocumentLoader;
use crate::infrastructure::vector::Chunker;
use crate::services::IndexBuilder;

/// Handle `support-rag build`
pub async fn execute(args: BuildArgs, config: &Config, json: bool) -> Result<()> {
    let document_path = args
        .document
        .unwrap_or_else(|| PathBuf::from(&config.storage.document_path));

    let document = TextDocumentLoader::new()
        .load(&document_path)
        .await
        .context("Failed to load the support document")?;

    let embedder = OpenAiEmbedder::new(&config.embedding, &config.retry)
        .context("Failed to set up the embedding client")?;
    let chunker = Chunker::with_config(config.chunking.clone())?;
    let builder = IndexBuilder::new(chunker, Arc::new(embedder), config.storage.clone());

    let pb = create_progress_bar(builder.count_chunks(&document) as u64, json);
    pb.set_message("embedding chunks");

    let result = builder
        .build(&document, |done, _total| pb.set_position(done as u64))
        .await;
    pb.finish_and_clear();

    let report = result.context("Failed to build the vector store")?;
    output(&BuildOutput::from(report), json);

    Ok(())
}
