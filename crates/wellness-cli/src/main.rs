//! Wellness CLI - AI-assisted journal analytics
//!
//! Usage:
//!   wellness analyze --days 30      Analyze entries and save the report
//!   wellness entries                List normalized entries with scores
//!   wellness export -o scores.csv   Export the score series as CSV
//!   wellness check                  Verify config, keys and AI backend

mod cli;
mod commands;


use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use cli::*;

#[tokio::main]
async fn main() -> Result<()> {
    // API keys may live in a local .env file
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    // Set up logging
    // Priority: RUST_LOG env var > --verbose flag > default (info)
    let filter = if std::env::var("RUST_LOG").is_ok() {
        EnvFilter::from_default_env()
    } else if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_target(false).compact())
        .init();

    let config = commands::load_config(cli.config.as_deref())?;

    match cli.command {
        Commands::Analyze {
            source,
            output,
            no_save,
            json,
            no_ai,
        } => {
            let secrets = wellness_core::Secrets::from_env();
            commands::cmd_analyze(
                &config,
                &secrets,
                &source,
                output.as_deref(),
                no_save,
                json,
                no_ai,
            )
            .await
        }
        Commands::Entries { source } => {
            let secrets = wellness_core::Secrets::from_env();
            commands::cmd_entries(&config, &secrets, &source).await
        }
        Commands::Export { source, output } => {
            let secrets = wellness_core::Secrets::from_env();
            commands::cmd_export(&config, &secrets, &source, output.as_deref()).await
        }
        Commands::Sentiment { text } => commands::cmd_sentiment(&text),
        Commands::Check => {
            let secrets = wellness_core::Secrets::from_env();
            commands::cmd_check(&config, &secrets).await
        }
        Commands::Config => commands::cmd_config(&config),
    }
}
