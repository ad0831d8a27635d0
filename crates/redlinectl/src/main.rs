//! Redline Control - CLI driver for the contract analysis pipeline.
//!
//! Thin presentation glue: reads a document, builds the review service from
//! environment configuration once, runs one analysis, prints the validated
//! report as JSON.

mod commands;

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing::Level;

#[derive(Parser)]
#[command(name = "redlinectl")]
#[command(about = "Redline - validated contract analysis", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Compare a contract document against a standard playbook
    Compare {
        /// Path to the contract document (plain text)
        #[arg(long)]
        document: PathBuf,

        /// Path to the playbook JSON file
        #[arg(long)]
        playbook: PathBuf,
    },

    /// Scan a contract document for risk findings
    Risks {
        /// Path to the contract document (plain text)
        #[arg(long)]
        document: PathBuf,

        /// Jurisdiction hint, e.g. "Norway"
        #[arg(long)]
        jurisdiction: Option<String>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_max_level(Level::INFO)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Compare { document, playbook } => commands::compare(document, playbook).await,
        Commands::Risks { document, jurisdiction } => {
            commands::risks(document, jurisdiction).await
        }
    }
}
