//! Analytics Engine - Journal Wellness Signals
//!
//! Pure transformations from a collection of normalized journal entries into
//! quantitative signals. No I/O happens here; the external polarity scorer is
//! passed in as a trait object.
//!
//! ## Stages
//!
//! - **Sentiment** - mean text polarity and mean mood score
//! - **Trend** - least-squares slope of mood and health over time
//! - **Patterns** - weekday/weekend split and activity keyword correlation
//!
//! ## Usage
//!
//! ```rust,ignore
//! use wellness_core::analytics;
//! use wellness_core::polarity::LexiconScorer;
//!
//! let scorer = LexiconScorer::new()?;
//! let signals = analytics::analyze(&entries, &scorer);
//! let result = signals.with_narrative(Narrative::Unavailable);
//! ```

pub mod patterns;
pub mod sentiment;
pub mod trend;
pub mod types;

pub use patterns::{KeywordBucket, KeywordBuckets, ACTIVITY_KEYWORDS, MIN_PATTERN_ENTRIES};
pub use trend::TREND_THRESHOLD;
pub use types::{
    AnalysisResult, Narrative, PatternStatus, PatternSummary, SentimentSummary, Trend,
    TrendDirection, TrendSummary,
};

use serde::Serialize;

use crate::models::JournalEntry;
use crate::polarity::PolarityScorer;
use crate::scoring::{annotate, sort_chronologically};

/// Signals computed from one entry collection, before a narrative is attached
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Signals {
    pub sentiment: SentimentSummary,
    pub trends: TrendSummary,
    pub patterns: PatternSummary,
}

impl Signals {
    pub fn with_narrative(self, narrative: Narrative) -> AnalysisResult {
        AnalysisResult {
            sentiment: self.sentiment,
            trends: self.trends,
            patterns: self.patterns,
            narrative,
        }
    }
}

/// Run every analytic stage over `entries`
///
/// Entries may arrive in any order. Trends and patterns run on a stable
/// chronological sort; the caller's slice is left untouched.
pub fn analyze(entries: &[JournalEntry], scorer: &dyn PolarityScorer) -> Signals {
    let mut scored = annotate(entries);
    sort_chronologically(&mut scored);

    let sentiment = sentiment::summarize(&scored, scorer);
    let trends = trend::detect(&scored);
    let patterns = patterns::mine(&scored);

    tracing::debug!(
        entries = scored.len(),
        patterns = patterns.patterns.len(),
        mood_trend = %trends.mood.direction,
        health_trend = %trends.health.direction,
        "Computed journal signals"
    );

    Signals {
        sentiment,
        trends,
        patterns,
    }
}
