use std::path::PathBuf;

use clap::{Parser, Subcommand};
use quote_core::OutputFormat;

#[derive(Parser)]
#[command(name = "quotes", version)]
#[command(about = "Quote Widget: local quotes kept in sync with a remote server")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Config file (defaults to ~/.config/quote-widget/config.toml)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Override the durable storage directory
    #[arg(long, global = true)]
    pub data_dir: Option<PathBuf>,

    /// Override the session storage directory
    #[arg(long, global = true)]
    pub session_dir: Option<PathBuf>,

    /// Output format (text or json)
    #[arg(long, global = true, default_value = "text")]
    pub format: OutputFormat,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Show quotes in the selected category
    List {
        /// Show this category instead of the persisted selection
        #[arg(long)]
        category: Option<String>,
    },

    /// Show a random quote from the selected category
    Random,

    /// Show the last quote viewed in this session
    Last,

    /// Add a quote and send it to the server
    Add {
        #[arg(long)]
        text: String,

        #[arg(long)]
        category: String,
    },

    /// List categories, marking the selected one
    Categories,

    /// Select a category ("all" clears the filter) and list its quotes
    Filter { category: String },

    /// Write all quotes to a JSON file
    Export {
        #[arg(short, long, default_value = "quotes.json")]
        output: PathBuf,
    },

    /// Append quotes from a JSON file
    Import { path: PathBuf },

    /// Run one reconciliation with the server
    Sync,

    /// Sync periodically; type "sync" to sync now, "quit" to stop
    Watch {
        /// Seconds between syncs (defaults to sync.interval_seconds)
        #[arg(long)]
        interval: Option<u64>,
    },

    /// Show/manage configuration
    Config {
        #[command(subcommand)]
        cmd: ConfigCommands,
    },
}

#[derive(Subcommand)]
pub enum ConfigCommands {
    /// Show effective configuration
    Show,
    /// Write a commented config template
    Init {
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
}
