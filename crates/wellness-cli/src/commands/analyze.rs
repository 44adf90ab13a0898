//! Analyze command implementation

use std::fs;
use std::path::Path;

use anyhow::{bail, Context, Result};
use chrono::Local;
use tracing::info;
use wellness_core::config::env;
use wellness_core::{AnalysisOrchestrator, Secrets, TrackerConfig};

use super::{effective_config, lexicon, open_narrator, open_store, today};
use crate::cli::SourceArgs;

/// Run the full analysis pipeline and print (and save) the report
///
/// With `json`, the analysis result is printed instead of the report. The
/// report file is still written unless `no_save` is set or there were no
/// entries.
pub async fn cmd_analyze(
    config: &TrackerConfig,
    secrets: &Secrets,
    source: &SourceArgs,
    output: Option<&Path>,
    no_save: bool,
    json: bool,
    no_ai: bool,
) -> Result<()> {
    let config = effective_config(config, source);

    let mut missing = secrets.missing(&config);
    if no_ai {
        missing.retain(|var| *var != env::OPENAI_API_KEY);
    }
    if !missing.is_empty() {
        bail!(
            "Missing env vars: {}\nSet them in the environment or a .env file.",
            missing.join(", ")
        );
    }

    let store = open_store(&config, secrets)?;
    let mut orchestrator = AnalysisOrchestrator::new(store, lexicon()?);
    if !no_ai {
        orchestrator = orchestrator.with_narrator(open_narrator(&config, secrets)?);
    }

    let since = config.since(today(), source.days)?;
    info!(
        since = %since,
        ai = orchestrator.has_narrator(),
        "Analyzing journal entries"
    );
    let run = orchestrator.run(since, Local::now().naive_local()).await;

    if json {
        let body = serde_json::to_string_pretty(&run.result)
            .context("Failed to serialize analysis result")?;
        println!("{}", body);
    } else {
        println!("{}", run.report);
    }

    if run.result.is_none() || no_save {
        return Ok(());
    }

    let path = output.unwrap_or(config.report.path.as_path());
    fs::write(path, &run.report)
        .with_context(|| format!("Failed to write report: {}", path.display()))?;

    if json {
        info!(path = %path.display(), "Report saved");
    } else {
        println!();
        println!("✅ Report saved to {}", path.display());
    }

    Ok(())
}
