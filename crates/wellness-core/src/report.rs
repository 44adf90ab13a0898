//! Plain-text report composition
//!
//! Output is a pure function of its inputs, including the header timestamp,
//! so composing twice with the same arguments yields identical text.

use chrono::NaiveDateTime;

use crate::analytics::AnalysisResult;
use crate::models::JournalEntry;

/// The whole report when there is nothing to analyze
pub const EMPTY_REPORT: &str = "No journal entries found.";

const NOT_ENOUGH_DATA: &str = "Not enough data for pattern analysis";
const NONE_DETECTED: &str = "None detected";

/// Compose the human-readable report
///
/// An empty `entries` slice yields [`EMPTY_REPORT`] regardless of `result`.
pub fn compose(
    entries: &[JournalEntry],
    result: &AnalysisResult,
    generated_at: NaiveDateTime,
) -> String {
    let (Some(start), Some(end)) = (
        entries.iter().map(JournalEntry::date).min(),
        entries.iter().map(JournalEntry::date).max(),
    ) else {
        return EMPTY_REPORT.to_string();
    };

    let sentiment = &result.sentiment;
    let trends = &result.trends;

    let mut lines = vec![
        format!(
            "AI Wellness Journal Report - {}",
            generated_at.format("%Y-%m-%d %H:%M:%S")
        ),
        format!(
            "Entries analyzed: {} (Range: {} to {})",
            entries.len(),
            start.format("%Y-%m-%d"),
            end.format("%Y-%m-%d")
        ),
        String::new(),
        "AI Insights:".to_string(),
        result.narrative.display_text(),
        String::new(),
        format!("Average sentiment: {:.2}", sentiment.average_sentiment),
        format!("Average mood score: {:.2}", sentiment.average_mood_score),
        format!(
            "Mood trend: {} ({:.2})",
            trends.mood.direction, trends.mood.slope
        ),
        format!(
            "Health trend: {} ({:.2})",
            trends.health.direction, trends.health.slope
        ),
        "Patterns:".to_string(),
    ];

    if result.patterns.patterns.is_empty() {
        let placeholder = if result.patterns.is_insufficient() {
            NOT_ENOUGH_DATA
        } else {
            NONE_DETECTED
        };
        lines.push(format!("- {}", placeholder));
    } else {
        lines.extend(result.patterns.patterns.iter().map(|p| format!("- {}", p)));
    }

    lines.join("\n")
}
