//! CLI definitions for comoderator.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

/// Meeting chat co-moderator.
#[derive(Parser)]
#[command(name = "comoderator")]
#[command(about = "Joins a web meeting as a bot and answers chat questions")]
#[command(version)]
pub(crate) struct Cli {
    /// Configuration file path
    #[arg(short, long, default_value = "config/default.toml", global = true)]
    pub config: PathBuf,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub(crate) enum Commands {
    /// Join a meeting and answer chat questions until Ctrl-C
    Join {
        /// Meeting link, e.g. https://zoom.us/wc/join/123456789
        meeting_link: String,

        /// Session identifier (default: random UUID)
        #[arg(long)]
        session_id: Option<String>,
    },

    /// Print the effective selector catalog
    Selectors {
        /// Output format
        #[arg(long, value_enum, default_value_t = OutputFormat::Toml)]
        format: OutputFormat,
    },

    /// Validate the configuration file
    CheckConfig,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub(crate) enum OutputFormat {
    Toml,
    Json,
}
