//! Pattern mining over mood scores
//!
//! Two independent detectors feed one flat list of sentences:
//! - **Weekday split**: mean mood on weekends (Sat/Sun) vs weekdays
//! - **Activity correlation**: mean mood of entries whose activities mention
//!   one of a fixed set of keywords
//!
//! The weekday sentence (if any) comes first, then activity sentences in
//! keyword-list order.

use chrono::{Datelike, Weekday};
use serde::Serialize;

use crate::scoring::ScoredEntry;

use super::types::PatternSummary;

/// Fewer entries than this yields an insufficient-data summary
pub const MIN_PATTERN_ENTRIES: usize = 3;

/// Weekend/weekday means must differ by more than this
pub const WEEKDAY_GAP: f64 = 0.5;

/// Keywords matched (case-insensitive substring) against activities
pub const ACTIVITY_KEYWORDS: [&str; 10] = [
    "exercise",
    "workout",
    "walk",
    "run",
    "yoga",
    "meditation",
    "work",
    "meeting",
    "social",
    "friend",
];

/// A keyword needs at least this many matching entries to be judged
pub const MIN_KEYWORD_MATCHES: usize = 2;

/// Mean mood above this boosts mood
pub const BOOST_THRESHOLD: f64 = 3.0;

/// Mean mood below this lowers mood
pub const LOWER_THRESHOLD: f64 = 2.0;

/// Mood scores collected for one keyword
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct KeywordBucket {
    pub keyword: &'static str,
    pub scores: Vec<u8>,
}

impl KeywordBucket {
    pub fn mean(&self) -> Option<f64> {
        mean(&self.scores)
    }

    /// Pattern sentence for this keyword, if its mean crosses a threshold
    pub fn sentence(&self) -> Option<String> {
        if self.scores.len() < MIN_KEYWORD_MATCHES {
            return None;
        }
        let avg = self.mean()?;
        if avg > BOOST_THRESHOLD {
            Some(format!("'{}' tends to boost mood.", self.keyword))
        } else if avg < LOWER_THRESHOLD {
            Some(format!("'{}' tends to lower mood.", self.keyword))
        } else {
            None
        }
    }
}

/// Per-keyword score buckets, always in [`ACTIVITY_KEYWORDS`] order
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct KeywordBuckets {
    buckets: Vec<KeywordBucket>,
}

impl Default for KeywordBuckets {
    fn default() -> Self {
        Self::new()
    }
}

impl KeywordBuckets {
    pub fn new() -> Self {
        Self {
            buckets: ACTIVITY_KEYWORDS
                .iter()
                .map(|&keyword| KeywordBucket {
                    keyword,
                    scores: Vec::new(),
                })
                .collect(),
        }
    }

    /// Add an entry's mood score to every keyword its activities mention
    pub fn record(&mut self, activities: &str, mood_score: u8) {
        let lowered = activities.to_lowercase();
        for bucket in &mut self.buckets {
            if lowered.contains(bucket.keyword) {
                bucket.scores.push(mood_score);
            }
        }
    }

    pub fn get(&self, keyword: &str) -> Option<&KeywordBucket> {
        self.buckets.iter().find(|b| b.keyword == keyword)
    }

    pub fn iter(&self) -> impl Iterator<Item = &KeywordBucket> {
        self.buckets.iter()
    }
}

fn mean(scores: &[u8]) -> Option<f64> {
    if scores.is_empty() {
        return None;
    }
    let total: f64 = scores.iter().map(|&s| f64::from(s)).sum();
    Some(total / scores.len() as f64)
}

fn is_weekend(entry: &ScoredEntry<'_>) -> bool {
    matches!(entry.entry.date().weekday(), Weekday::Sat | Weekday::Sun)
}

/// Compare mean mood on weekends against weekdays
pub fn weekday_pattern(scored: &[ScoredEntry<'_>]) -> Option<String> {
    let (weekend, weekday): (Vec<&ScoredEntry<'_>>, Vec<&ScoredEntry<'_>>) =
        scored.iter().partition(|s| is_weekend(s));

    let weekend_scores: Vec<u8> = weekend.iter().map(|s| s.mood_score).collect();
    let weekday_scores: Vec<u8> = weekday.iter().map(|s| s.mood_score).collect();

    let weekend_avg = mean(&weekend_scores)?;
    let weekday_avg = mean(&weekday_scores)?;

    if weekend_avg > weekday_avg + WEEKDAY_GAP {
        Some("Higher mood on weekends.".to_string())
    } else if weekday_avg > weekend_avg + WEEKDAY_GAP {
        Some("Higher mood on weekdays.".to_string())
    } else {
        None
    }
}

/// Bucket mood scores by activity keyword
pub fn keyword_buckets(scored: &[ScoredEntry<'_>]) -> KeywordBuckets {
    let mut buckets = KeywordBuckets::new();
    for s in scored {
        buckets.record(&s.entry.activities, s.mood_score);
    }
    buckets
}

/// Activity sentences in keyword-list order
pub fn activity_patterns(scored: &[ScoredEntry<'_>]) -> Vec<String> {
    keyword_buckets(scored)
        .iter()
        .filter_map(KeywordBucket::sentence)
        .collect()
}

/// Run both detectors over chronologically sorted entries
pub fn mine(sorted: &[ScoredEntry<'_>]) -> PatternSummary {
    if sorted.len() < MIN_PATTERN_ENTRIES {
        tracing::debug!(
            entries = sorted.len(),
            "Not enough entries for pattern analysis"
        );
        return PatternSummary::insufficient_data();
    }

    let mut patterns = Vec::new();
    if let Some(sentence) = weekday_pattern(sorted) {
        patterns.push(sentence);
    }
    patterns.extend(activity_patterns(sorted));

    PatternSummary::analyzed(patterns)
}
