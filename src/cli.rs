use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "ebookai", version, about = "EbookAI content engine")]
pub struct Cli {
    /// Configuration file path
    #[arg(short, long, default_value = "ebookai.toml", global = true)]
    pub config: PathBuf,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Estimate the cost of a generation job before submitting it
    Estimate {
        /// Provider name (openai, anthropic, openrouter)
        #[arg(short, long)]
        provider: Option<String>,

        /// Model name
        #[arg(short, long)]
        model: Option<String>,

        /// Number of chapters
        #[arg(long, default_value = "10")]
        chapters: u32,

        /// Topics per chapter
        #[arg(long, default_value = "5")]
        topics: u32,

        /// Target words per topic
        #[arg(long)]
        words_per_topic: Option<u32>,

        /// Images per chapter
        #[arg(long, default_value = "0")]
        images_per_chapter: u32,

        /// Include the knowledge-base retrieval surcharge
        #[arg(long)]
        rag: bool,

        /// Emit the breakdown as JSON instead of a table
        #[arg(long)]
        json: bool,
    },

    /// Score a content file for readability and structure
    Score {
        /// Path to the content file ('-' for stdin)
        file: PathBuf,

        /// Emit metrics and suggestions as JSON
        #[arg(long)]
        json: bool,
    },

    /// Score several variation files and pick the best per metric
    Compare {
        /// Content files, one per variation, in generation order
        #[arg(required = true, num_args = 2..)]
        files: Vec<PathBuf>,
    },

    /// Configuration management commands
    Config {
        #[command(subcommand)]
        action: ConfigCommands,
    },

    /// Show version information
    Version,
}

#[derive(Subcommand, Debug, Clone)]
pub enum ConfigCommands {
    /// Display the effective configuration
    Show,

    /// Validate the configuration file
    Validate,
}
