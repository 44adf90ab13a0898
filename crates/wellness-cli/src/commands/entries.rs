//! Entry listing and score export commands

use std::fs::File;
use std::io::{self, Write};
use std::path::Path;

use anyhow::{Context, Result};
use wellness_core::export::{score_rows, write_score_csv};
use wellness_core::{Secrets, TrackerConfig};

use super::{effective_config, fetch_entries, lexicon, truncate};
use crate::cli::SourceArgs;

/// List normalized entries, oldest first, with scores and text polarity
pub async fn cmd_entries(
    config: &TrackerConfig,
    secrets: &Secrets,
    source: &SourceArgs,
) -> Result<()> {
    let config = effective_config(config, source);
    let entries = fetch_entries(&config, secrets, source).await?;

    if entries.is_empty() {
        println!("No journal entries found.");
        return Ok(());
    }

    let scorer = lexicon()?;
    let rows = score_rows(&entries, &scorer);

    // score_rows sorts; match rows back to their text for the listing
    let mut sorted: Vec<_> = entries.iter().collect();
    sorted.sort_by_key(|e| e.recorded_at);

    println!(
        "{:<10}  {:<3}  {:<14}  {:<12}  {:>9}  Activities",
        "Date", "Day", "Mood", "Health", "Sentiment"
    );
    println!("{}", "─".repeat(76));

    for (row, entry) in rows.iter().zip(sorted) {
        println!(
            "{:<10}  {:<3}  {:<14}  {:<12}  {:>9}  {}",
            row.date,
            row.weekday,
            format!("{} ({})", row.mood, row.mood_score),
            format!("{} ({})", row.health, row.health_score),
            row.sentiment,
            truncate(&entry.activities, 24)
        );
    }

    println!();
    println!("{} entries", rows.len());
    Ok(())
}

/// Export the chronologically sorted score series as CSV
///
/// Writes to `output` when given, otherwise to stdout.
pub async fn cmd_export(
    config: &TrackerConfig,
    secrets: &Secrets,
    source: &SourceArgs,
    output: Option<&Path>,
) -> Result<()> {
    let config = effective_config(config, source);
    let entries = fetch_entries(&config, secrets, source).await?;
    let rows = score_rows(&entries, &lexicon()?);

    match output {
        Some(path) => {
            let file = File::create(path)
                .with_context(|| format!("Failed to create output file: {}", path.display()))?;
            write_score_csv(file, &rows).context("Failed to write CSV")?;
            println!("✅ Exported {} entries to {}", rows.len(), path.display());
        }
        None => {
            let stdout = io::stdout();
            let mut handle = stdout.lock();
            write_score_csv(&mut handle, &rows).context("Failed to write CSV")?;
            handle.flush()?;
        }
    }

    Ok(())
}
