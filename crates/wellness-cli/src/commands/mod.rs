//! CLI command implementations
//!
//! Commands are organized by domain:
//! - `analyze` - Full analysis run and report
//! - `entries` - Entry listing and CSV export
//! - `sentiment` - Ad-hoc polarity scoring
//! - `status` - Config display and environment/backend checks
//!
//! Shared helpers for loading config and opening collaborators live here.

pub mod analyze;
pub mod entries;
pub mod sentiment;
pub mod status;

// Re-export command functions for main.rs
pub use analyze::*;
pub use entries::*;
pub use sentiment::*;
pub use status::*;

use std::path::Path;

use anyhow::{Context, Result};
use chrono::{Local, NaiveDate};
use wellness_core::config::StoreBackendKind;
use wellness_core::models::normalize_records;
use wellness_core::{
    AIClient, EntryStore, JournalEntry, LexiconScorer, Secrets, StoreClient, TrackerConfig,
};

use crate::cli::SourceArgs;

/// Load config and apply environment overrides
pub fn load_config(path: Option<&Path>) -> Result<TrackerConfig> {
    let mut config = TrackerConfig::load(path).context("Failed to load config")?;
    config
        .apply_env()
        .context("Invalid environment override")?;
    Ok(config)
}

/// Config with the `--file` store override applied
pub fn effective_config(config: &TrackerConfig, source: &SourceArgs) -> TrackerConfig {
    let mut config = config.clone();
    if let Some(file) = &source.file {
        config.store.backend = StoreBackendKind::File;
        config.store.file = file.clone();
    }
    config
}

pub fn open_store(config: &TrackerConfig, secrets: &Secrets) -> Result<StoreClient> {
    StoreClient::from_config(&config.store, secrets).context("Failed to open journal store")
}

pub fn open_narrator(config: &TrackerConfig, secrets: &Secrets) -> Result<AIClient> {
    AIClient::from_config(&config.narrative, secrets.openai_api_key.as_deref())
        .context("Failed to configure narrative backend")
}

pub fn lexicon() -> Result<LexiconScorer> {
    LexiconScorer::new().context("Failed to build sentiment lexicon")
}

pub fn today() -> NaiveDate {
    Local::now().date_naive()
}

/// Fetch and normalize entries for the source window
///
/// Unlike a full analysis run, a failed fetch is an error here.
pub async fn fetch_entries(
    config: &TrackerConfig,
    secrets: &Secrets,
    source: &SourceArgs,
) -> Result<Vec<JournalEntry>> {
    let store = open_store(config, secrets)?;
    let since = config.since(today(), source.days)?;
    let records = store
        .fetch_entries(since)
        .await
        .with_context(|| format!("Failed to fetch entries from {}", store.describe()))?;
    Ok(normalize_records(records))
}

/// Truncate a string to a maximum number of characters, adding "..." if truncated
pub fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        s.to_string()
    } else {
        let kept: String = s.chars().take(max.saturating_sub(3)).collect();
        format!("{}...", kept)
    }
}
