//! Sentiment aggregation
//!
//! Combines per-entry text polarity with mood scores into plain,
//! unweighted averages.

use crate::polarity::PolarityScorer;
use crate::scoring::ScoredEntry;

use super::types::SentimentSummary;

/// Polarity of an entry's activities and notes
///
/// Empty text scores `0.0` without consulting the scorer.
pub fn entry_polarity(entry: &ScoredEntry<'_>, scorer: &dyn PolarityScorer) -> f64 {
    let text = entry.entry.text();
    if text.is_empty() {
        0.0
    } else {
        scorer.polarity(&text)
    }
}

/// Summarize sentiment and mood over the collection
pub fn summarize(scored: &[ScoredEntry<'_>], scorer: &dyn PolarityScorer) -> SentimentSummary {
    if scored.is_empty() {
        return SentimentSummary::default();
    }

    let n = scored.len() as f64;
    let sentiment_total: f64 = scored.iter().map(|s| entry_polarity(s, scorer)).sum();
    let mood_total: f64 = scored.iter().map(|s| f64::from(s.mood_score)).sum();

    SentimentSummary {
        average_sentiment: sentiment_total / n,
        average_mood_score: mood_total / n,
        total_entries: scored.len(),
    }
}
