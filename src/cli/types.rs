//! CLI type definitions
//!
//! This module contains clap command structures that define the CLI interface.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "support-rag")]
#[command(about = "Answer questions about a support guide with retrieval-augmented generation", long_about = None)]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Output in JSON format
    #[arg(short, long, global = true)]
    pub json: bool,

    /// Configuration file (defaults to .support-rag/config.yaml and local.yaml)
    #[arg(short, long, global = true, env = "SUPPORT_RAG_CONFIG")]
    pub config: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Chunk, embed and index the support document
    Build(BuildArgs),

    /// Answer a question from the indexed document
    Ask(AskArgs),

    /// Show the chunks most similar to a question, without generating
    Search(SearchArgs),
}

#[derive(Args, Debug)]
pub struct BuildArgs {
    /// Extracted document text (form-feed separated pages, or a .json page list)
    #[arg(short, long)]
    pub document: Option<PathBuf>,
}

#[derive(Args, Debug)]
pub struct AskArgs {
    /// The question to answer
    pub question: String,

    /// Number of chunks to retrieve
    #[arg(short = 'k', long, value_parser = clap::value_parser!(u32).range(1..))]
    pub top_k: Option<u32>,

    /// Similarity a chunk must exceed to be used as context
    #[arg(short, long, allow_negative_numbers = true)]
    pub threshold: Option<f32>,

    /// Print the best retrieved chunks with their scores
    #[arg(long)]
    pub show_context: bool,
}

#[derive(Args, Debug)]
pub struct SearchArgs {
    /// The question to search for
    pub question: String,

    /// Number of chunks to retrieve
    #[arg(short = 'k', long, value_parser = clap::value_parser!(u32).range(1..))]
    pub top_k: Option<u32>,
}
