//! DocSage CLI — the main entry point.
//!
//! Commands:
//! - `ingest` — Build the vector index from the document corpus
//! - `chat`   — Interactive chat or single-question mode
//! - `status` — Show settings and index health

use clap::{Parser, Subcommand};
use std::path::PathBuf;

mod commands;

#[derive(Parser)]
#[command(
    name = "docsage",
    about = "DocSage — conversational question answering over your documents",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Build or rebuild the vector index from the document corpus
    Ingest {
        /// PDF to ingest (defaults to the configured document)
        #[arg(short, long)]
        file: Option<PathBuf>,
    },

    /// Chat with the document assistant
    Chat {
        /// Ask a single question instead of entering interactive mode
        #[arg(short, long)]
        message: Option<String>,
    },

    /// Show settings and index health
    Status,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(filter)),
        )
        .with_target(false)
        .init();

    match cli.command {
        Commands::Ingest { file } => commands::ingest::run(file).await?,
        Commands::Chat { message } => commands::chat::run(message).await?,
        Commands::Status => commands::status::run().await?,
    }

    Ok(())
}
