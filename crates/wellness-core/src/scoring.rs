//! Ordinal score tables for mood and health labels
//!
//! Scores are only meaningful relative to each other (averages, trend
//! direction). The tables are fixed for the lifetime of the process.

use serde::Serialize;

use crate::models::{Health, JournalEntry, Mood};

impl Mood {
    /// Ordinal mood score in `1..=4`
    pub fn score(&self) -> u8 {
        match self {
            Mood::Happy | Mood::Excited | Mood::Grateful => 4,
            Mood::Content | Mood::Calm => 3,
            Mood::Neutral | Mood::Tired => 2,
            Mood::Anxious | Mood::Sad | Mood::Stressed | Mood::Frustrated | Mood::Overwhelmed => 1,
        }
    }
}

impl Health {
    /// Ordinal health score in `1..=5`
    pub fn score(&self) -> u8 {
        match self {
            Health::Excellent => 5,
            Health::Good => 4,
            Health::Fair => 3,
            Health::Poor => 2,
            Health::Sick => 1,
        }
    }
}

/// Score pair for a single entry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct EntryScores {
    pub mood: u8,
    pub health: u8,
}

/// Map an entry to its `(mood, health)` scores
pub fn score(entry: &JournalEntry) -> EntryScores {
    EntryScores {
        mood: entry.mood.score(),
        health: entry.health.score(),
    }
}

/// An entry annotated with its scores
#[derive(Debug, Clone, Copy)]
pub struct ScoredEntry<'a> {
    pub entry: &'a JournalEntry,
    pub mood_score: u8,
    pub health_score: u8,
}

impl<'a> ScoredEntry<'a> {
    pub fn new(entry: &'a JournalEntry) -> Self {
        let scores = score(entry);
        Self {
            entry,
            mood_score: scores.mood,
            health_score: scores.health,
        }
    }
}

/// Annotate every entry with its scores, preserving input order
pub fn annotate(entries: &[JournalEntry]) -> Vec<ScoredEntry<'_>> {
    entries.iter().map(ScoredEntry::new).collect()
}

/// Stable sort by recording time; entries with equal timestamps keep their order
pub fn sort_chronologically(scored: &mut [ScoredEntry<'_>]) {
    scored.sort_by_key(|s| s.entry.recorded_at);
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn test_mood_scores() {
        assert_eq!(Mood::Happy.score(), 4);
        assert_eq!(Mood::Excited.score(), 4);
        assert_eq!(Mood::Grateful.score(), 4);
        assert_eq!(Mood::Content.score(), 3);
        assert_eq!(Mood::Calm.score(), 3);
        assert_eq!(Mood::Neutral.score(), 2);
        assert_eq!(Mood::Tired.score(), 2);
        for mood in [
            Mood::Anxious,
            Mood::Sad,
            Mood::Stressed,
            Mood::Frustrated,
            Mood::Overwhelmed,
        ] {
            assert_eq!(mood.score(), 1);
        }
    }

    #[test]
    fn test_health_scores() {
        let scores: Vec<u8> = Health::all().iter().map(|h| h.score()).collect();
        assert_eq!(scores, vec![5, 4, 3, 2, 1]);
    }

    #[test]
    fn test_defaults_score_as_neutral_and_fair() {
        let entry = JournalEntry::new(
            NaiveDate::from_ymd_opt(2025, 1, 1).unwrap(),
            Mood::normalize(Some("??")),
            Health::normalize(None),
        );
        assert_eq!(score(&entry), EntryScores { mood: 2, health: 3 });
    }

    #[test]
    fn test_sort_is_stable_for_equal_dates() {
        let day = |d| NaiveDate::from_ymd_opt(2025, 3, d).unwrap();
        let entries = vec![
            JournalEntry::new(day(5), Mood::Sad, Health::Poor).with_source_id("late"),
            JournalEntry::new(day(2), Mood::Happy, Health::Good).with_source_id("first"),
            JournalEntry::new(day(2), Mood::Calm, Health::Good).with_source_id("second"),
        ];

        let mut scored = annotate(&entries);
        sort_chronologically(&mut scored);

        let ids: Vec<&str> = scored.iter().map(|s| s.entry.source_id.as_str()).collect();
        assert_eq!(ids, vec!["first", "second", "late"]);
        // Input collection untouched
        assert_eq!(entries[0].source_id, "late");
    }
}
