//! Sentiment command implementation

use anyhow::Result;
use wellness_core::PolarityScorer;

use super::lexicon;

/// Label for a compound polarity score
pub fn polarity_label(score: f64) -> &'static str {
    if score >= 0.05 {
        "positive"
    } else if score <= -0.05 {
        "negative"
    } else {
        "neutral"
    }
}

/// Print the lexicon polarity of `text`
pub fn cmd_sentiment(text: &str) -> Result<()> {
    let scorer = lexicon()?;
    let score = scorer.polarity(text);
    println!("{:.4} ({})", score, polarity_label(score));
    Ok(())
}
