use anyhow::{Context, Result};

use super::open_service;
use crate::cli::output::{output, SearchOutput};
use crate::cli::types::SearchArgs;
use crate::domain::models::Config;

/// Handle `support-rag search`
pub async fn execute(args: SearchArgs, config: &Config, json: bool) -> Result<()> {
    let service = open_service(config).await?;
    let options = service
        .default_options()
        .with_top_k(args.top_k.map(|k| k as usize));

    let results = service
        .search(&args.question, options.top_k)
        .await
        .context("Search failed")?;

    output(
        &SearchOutput::new(&args.question, &results, options.threshold),
        json,
    );

    Ok(())
}
