//! Narrative prompt construction
//!
//! The narrative generator sees only the most recent entries. Trends and
//! patterns still cover the whole window.

use serde::Serialize;

use crate::models::JournalEntry;

/// Maximum number of entries rendered into the prompt
pub const PROMPT_ENTRY_LIMIT: usize = 10;

/// Fixed role instruction for the narrative generator
pub const SYSTEM_PROMPT: &str =
    "You are an AI wellness coach providing concise, actionable insights from journals.";

const HEADER: &str = "Analyze these journal entries and provide insights:\n";

const REQUESTS: &str = "Please provide:\n\
1) Mood pattern analysis\n\
2) Health trend observations\n\
3) Activity-mood correlations\n\
4) 3 concrete recommendations\n\
5) Any concerning patterns";

/// A rendered system/user prompt pair
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NarrativePrompt {
    pub system: String,
    pub user: String,
}

/// Render the narrative prompt for the most recent entries
///
/// Entries are sorted (stable, by timestamp) on a copy before the last
/// [`PROMPT_ENTRY_LIMIT`] are taken.
pub fn build_narrative_prompt(entries: &[JournalEntry]) -> NarrativePrompt {
    let mut sorted: Vec<&JournalEntry> = entries.iter().collect();
    sorted.sort_by_key(|e| e.recorded_at);
    let recent = &sorted[sorted.len().saturating_sub(PROMPT_ENTRY_LIMIT)..];

    let mut lines = Vec::with_capacity(recent.len() * 5 + 2);
    lines.push(HEADER.to_string());
    for entry in recent {
        lines.push(format!("Date: {}", entry.date().format("%Y-%m-%d")));
        lines.push(format!("Mood: {}", entry.mood));
        lines.push(format!("Health: {}", entry.health));
        lines.push(format!("Activities: {}", entry.activities));
        lines.push(format!("Notes: {}\n", entry.notes));
    }
    lines.push(REQUESTS.to_string());

    NarrativePrompt {
        system: SYSTEM_PROMPT.to_string(),
        user: lines.join("\n"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Health, Mood};
    use chrono::NaiveDate;

    fn entry(day: u32) -> JournalEntry {
        JournalEntry::new(
            NaiveDate::from_ymd_opt(2025, 3, day).unwrap(),
            Mood::Calm,
            Health::Good,
        )
        .with_activities(format!("activity {}", day))
        .with_notes(format!("note {}", day))
    }

    #[test]
    fn test_single_entry_layout() {
        let prompt = build_narrative_prompt(&[entry(4)]);
        assert_eq!(prompt.system, SYSTEM_PROMPT);
        assert_eq!(
            prompt.user,
            "Analyze these journal entries and provide insights:\n\n\
             Date: 2025-03-04\n\
             Mood: Calm\n\
             Health: Good\n\
             Activities: activity 4\n\
             Notes: note 4\n\n\
             Please provide:\n\
             1) Mood pattern analysis\n\
             2) Health trend observations\n\
             3) Activity-mood correlations\n\
             4) 3 concrete recommendations\n\
             5) Any concerning patterns"
        );
    }

    #[test]
    fn test_keeps_ten_most_recent() {
        // Reverse order on input
        let entries: Vec<JournalEntry> = (1..=14).rev().map(entry).collect();
        let prompt = build_narrative_prompt(&entries);

        assert_eq!(prompt.user.matches("Date: ").count(), PROMPT_ENTRY_LIMIT);
        assert!(!prompt.user.contains("Date: 2025-03-04\n"));
        assert!(prompt.user.contains("Date: 2025-03-05\n"));

        let first = prompt.user.find("2025-03-05").unwrap();
        let last = prompt.user.find("2025-03-14").unwrap();
        assert!(first < last);
    }

    #[test]
    fn test_empty_entries_still_renders_frame() {
        let prompt = build_narrative_prompt(&[]);
        assert!(prompt.user.starts_with(HEADER));
        assert!(prompt.user.ends_with("5) Any concerning patterns"));
    }
}
