//! # citegroup CLI (`cite`)
//!
//! Reads a chat message (or a bare citation list), groups its citations by
//! document, and prints them ranked by relevance.
//!
//! ## Usage
//!
//! ```bash
//! cite [--config ./config/cite.toml] <command>
//! ```
//!
//! ## Commands
//!
//! | Command | Description |
//! |---------|-------------|
//! | `cite group <source>` | Ranked per-document listing (text or JSON) |
//! | `cite summary <source>` | One-line count summary |
//!
//! `<source>` is a file path, `-` for stdin, or an `http(s)://` URL.
//! Set `RUST_LOG=debug` for diagnostics on stderr.

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

use citegroup::config;
use citegroup::group_cmd::{self, OutputFormat};

/// citegroup CLI — group and rank RAG citations by document.
#[derive(Parser)]
#[command(
    name = "cite",
    about = "Group, rank, and summarize RAG citations from chat message payloads",
    version
)]
struct Cli {
    /// Path to configuration file (TOML).
    ///
    /// Defaults to `./config/cite.toml` when that file exists, otherwise
    /// built-in defaults are used.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Group citations by document and print them ranked.
    Group {
        /// Payload source: file path, `-` for stdin, or an http(s) URL.
        source: String,

        /// Output format: `text` or `json`.
        #[arg(long, default_value = "text")]
        format: OutputFormat,

        /// Chunk page to show for each document (1-based).
        #[arg(long, default_value_t = 1)]
        page: usize,

        /// Chunks per page (overrides `[display].page_size`).
        #[arg(long)]
        page_size: Option<usize>,
    },

    /// Print the one-line summary ("3 документа, 7 фрагментов").
    Summary {
        /// Payload source: file path, `-` for stdin, or an http(s) URL.
        source: String,
    },
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_tracing();
    let cli = Cli::parse();

    let cfg = config::resolve_config(cli.config.as_deref())?;

    match cli.command {
        Commands::Group {
            source,
            format,
            page,
            page_size,
        } => {
            group_cmd::run_group(&cfg, &source, format, page, page_size).await?;
        }
        Commands::Summary { source } => {
            group_cmd::run_summary(&cfg, &source).await?;
        }
    }

    Ok(())
}
