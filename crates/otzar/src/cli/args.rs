//! Clap argument definitions for the `otzar` CLI.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

/// Top-level CLI options.
#[derive(Parser)]
#[command(name = "otzar")]
#[command(about = "Full-text search over a Hebrew book corpus")]
pub struct Cli {
    /// Subcommand to execute.
    #[command(subcommand)]
    pub command: Commands,
}

/// Available subcommands.
#[derive(Subcommand)]
pub enum Commands {
    /// Build the search index from a source database
    Build(BuildCommand),
    /// Search the index and print a JSON response
    Search(SearchCommand),
}

/// Arguments for `otzar build`.
#[derive(Args, Debug, Clone)]
pub struct BuildCommand {
    /// Path to the source SQLite database
    #[arg(long)]
    pub db: PathBuf,

    /// Path to the output index directory (truncated if it exists)
    #[arg(long)]
    pub index: PathBuf,
}

/// Arguments for `otzar search`.
#[derive(Args, Debug, Clone)]
pub struct SearchCommand {
    /// Query text
    pub query: String,

    /// Path to the index directory
    #[arg(long)]
    pub index: PathBuf,

    /// Maximum results to return [default: 50]
    #[arg(short = 'n', long)]
    pub limit: Option<usize>,

    /// Restrict results to an exact book title
    #[arg(long)]
    pub book: Option<String>,

    /// Restrict results to categories whose path contains this text
    #[arg(long)]
    pub category: Option<String>,

    /// Enable `*` and `?` wildcard operators in the query
    #[arg(long)]
    pub wildcard: bool,
}
