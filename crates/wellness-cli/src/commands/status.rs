//! Status-related command implementations (check, config)

use anyhow::{Context, Result};
use wellness_core::config::StoreBackendKind;
use wellness_core::{AIBackend, Secrets, TrackerConfig};

use super::open_narrator;

/// Check config, required environment variables and narrative backend health
///
/// Fails when a required variable is missing. An unreachable narrative
/// backend is reported but not fatal, since analysis still runs without it.
pub async fn cmd_check(config: &TrackerConfig, secrets: &Secrets) -> Result<()> {
    println!();
    println!("🩺 Wellness Check");
    println!("   ─────────────────────────────────────────────────────────────");
    println!("   Config: {}", config.source);
    println!("   Store: {}", describe_store(config));

    let narrator = open_narrator(config, secrets)?;
    println!(
        "   Narrative: {} ({} @ {})",
        narrator.backend_name(),
        narrator.model(),
        narrator.host()
    );
    println!();

    let missing = secrets.missing(config);
    if !missing.is_empty() {
        println!("   ❌ Missing env: {}", missing.join(", "));
        println!("      Copy .env.example to .env and fill values.");
        println!();
        anyhow::bail!("Missing env vars: {}", missing.join(", "));
    }
    println!("   ✅ Env OK");

    if config.store.backend == StoreBackendKind::File && !config.store.file.exists() {
        println!(
            "   ⚠️  Journal file not found: {}",
            config.store.file.display()
        );
    }

    if narrator.health_check().await {
        println!("   ✅ Narrative backend reachable");
    } else {
        println!("   ⚠️  {}", unreachable_notice(narrator.host()));
    }

    println!();
    Ok(())
}

/// Print the resolved config as JSON
pub fn cmd_config(config: &TrackerConfig) -> Result<()> {
    println!("# Source: {}", config.source);
    let body = serde_json::to_string_pretty(config).context("Failed to serialize config")?;
    println!("{}", body);
    Ok(())
}

/// Warning shown when the narrative backend fails its health check
pub fn unreachable_notice(host: &str) -> String {
    format!(
        "Narrative backend unreachable at {} (reports will show \"AI analysis failed\")",
        host
    )
}

fn describe_store(config: &TrackerConfig) -> String {
    match config.store.backend {
        StoreBackendKind::Notion => format!("notion (API {})", config.store.notion_version),
        StoreBackendKind::File => format!("file {}", config.store.file.display()),
    }
}
