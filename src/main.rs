//! support-rag CLI entry point.

use anyhow::Result;
use clap::Parser;

use support_rag::cli::{commands, handle_error, Cli, Commands};
use support_rag::infrastructure::config::ConfigLoader;
use support_rag::infrastructure::logging::LoggerImpl;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    let json = cli.json;

    if let Err(err) = run(cli).await {
        handle_error(err, json);
    }
}

async fn run(cli: Cli) -> Result<()> {
    let config = match cli.config.as_deref() {
        Some(path) => ConfigLoader::load_from_file(path)?,
        None => ConfigLoader::load()?,
    };

    let _logger = LoggerImpl::init(&config.logging)?;

    match cli.command {
        Commands::Build(args) => commands::build::execute(args, &config, cli.json).await,
        Commands::Ask(args) => commands::ask::execute(args, &config, cli.json).await,
        Commands::Search(args) => commands::search::execute(args, &config, cli.json).await,
    }
}
