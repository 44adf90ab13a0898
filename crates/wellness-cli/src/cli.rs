//! CLI argument definitions using clap
//!
//! This module contains all the clap structs and enums for parsing CLI arguments.
//! The actual command implementations are in the `commands` module.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

/// Wellness - AI-assisted journal analytics
#[derive(Parser)]
#[command(name = "wellness")]
#[command(about = "Mood, health and activity analytics for your journal", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Config file (defaults to the data-dir override, then built-in defaults)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// Where entries come from and how far back to look
#[derive(Args, Debug, Clone, Default)]
pub struct SourceArgs {
    /// Days of entries to analyze (defaults to `analysis.days_back`)
    #[arg(short, long)]
    pub days: Option<u32>,

    /// Read entries from a JSON file instead of the configured store
    #[arg(short, long)]
    pub file: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Analyze recent entries and compose the wellness report
    Analyze {
        #[command(flatten)]
        source: SourceArgs,

        /// Report path (defaults to `report.path`)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Print the report without saving it
        #[arg(long)]
        no_save: bool,

        /// Print the analysis result as JSON instead of the report
        #[arg(long)]
        json: bool,

        /// Skip the AI narrative
        #[arg(long)]
        no_ai: bool,
    },

    /// List normalized entries with their scores
    Entries {
        #[command(flatten)]
        source: SourceArgs,
    },

    /// Export the mood/health score series as CSV
    Export {
        #[command(flatten)]
        source: SourceArgs,

        /// Output file (defaults to stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Score the polarity of a piece of text
    Sentiment {
        /// Text to score
        text: String,
    },

    /// Check config, environment and narrative backend
    Check,

    /// Show the resolved configuration
    Config,
}
