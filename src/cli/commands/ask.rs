use anyhow::{bail, Result};

use super::open_service;
use crate::cli::output::{output, AskOutput};
use crate::cli::types::AskArgs;
use crate::domain::models::Config;

/// Handle `support-rag ask`
pub async fn execute(args: AskArgs, config: &Config, json: bool) -> Result<()> {
    if let Some(threshold) = args.threshold {
        if !(-1.0..=1.0).contains(&threshold) {
            bail!("--threshold must be within [-1, 1], got {threshold}");
        }
    }

    let service = open_service(config).await?;
    let options = service
        .default_options()
        .with_top_k(args.top_k.map(|k| k as usize))
        .with_threshold(args.threshold);

    let answer = service.ask_with(&args.question, options).await;

    output(
        &AskOutput::new(
            &args.question,
            answer,
            args.show_context,
            config.retrieval.preview_count,
        ),
        json,
    );

    Ok(())
}
