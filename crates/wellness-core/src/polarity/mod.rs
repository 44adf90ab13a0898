//! Text polarity scoring
//!
//! The sentiment aggregator only depends on the [`PolarityScorer`] trait, so
//! any per-text scorer returning a compound score in `[-1, 1]` can be plugged
//! in. [`LexiconScorer`] is the built-in word-valence implementation.

mod lexicon;
mod words;

pub use lexicon::LexiconScorer;

/// Scores the sentiment polarity of a text blob
pub trait PolarityScorer: Send + Sync {
    /// Compound polarity in `[-1, 1]` (negative to positive)
    fn polarity(&self, text: &str) -> f64;
}

/// Scorer returning the same polarity for every text (tests, dry runs)
#[derive(Debug, Clone, Copy, Default)]
pub struct FixedScorer(pub f64);

impl PolarityScorer for FixedScorer {
    fn polarity(&self, _text: &str) -> f64 {
        self.0
    }
}
