//! Lexicon-based polarity scorer
//!
//! Sums word valences with a few local adjustments and squashes the total
//! into a compound score:
//! - boosters/dampeners up to three tokens before a word shift its intensity
//! - a negation up to three tokens before a word flips and damps it
//! - trailing exclamation marks add emphasis in the direction of the sum

use std::collections::{HashMap, HashSet};

use regex::Regex;

use crate::error::Result;

use super::words::{BOOSTERS, DAMPENERS, NEGATIONS, VALENCES};
use super::PolarityScorer;

/// Intensity shift applied by a booster or dampener
const BOOST_INCREMENT: f64 = 0.293;
/// Scale applied to a negated word
const NEGATION_SCALAR: f64 = -0.74;
/// Emphasis per exclamation mark (capped at four)
const EXCLAMATION_EMPHASIS: f64 = 0.292;
const MAX_EXCLAMATIONS: usize = 4;
/// Normalization constant for the compound score
const ALPHA: f64 = 15.0;
/// How far back modifiers are searched
const MODIFIER_WINDOW: usize = 3;

/// Word-valence polarity scorer
pub struct LexiconScorer {
    valences: HashMap<String, f64>,
    boosters: HashSet<&'static str>,
    dampeners: HashSet<&'static str>,
    negations: HashSet<&'static str>,
    tokenizer: Regex,
}

impl LexiconScorer {
    /// Create a scorer with the default journal lexicon
    pub fn new() -> Result<Self> {
        Ok(Self {
            valences: VALENCES
                .iter()
                .map(|(w, v)| (w.to_string(), *v))
                .collect(),
            boosters: BOOSTERS.iter().copied().collect(),
            dampeners: DAMPENERS.iter().copied().collect(),
            negations: NEGATIONS.iter().copied().collect(),
            tokenizer: Regex::new(r"[a-z]+(?:'[a-z]+)?")?,
        })
    }

    /// Add or replace a word valence (`[-4, 4]` scale)
    pub fn with_word(mut self, word: &str, valence: f64) -> Self {
        self.valences.insert(word.to_lowercase(), valence);
        self
    }

    /// Number of words in the lexicon
    pub fn len(&self) -> usize {
        self.valences.len()
    }

    pub fn is_empty(&self) -> bool {
        self.valences.is_empty()
    }

    fn is_negation(&self, token: &str) -> bool {
        self.negations.contains(token) || token.ends_with("n't")
    }

    /// Valence of the token at `idx`, adjusted by the modifiers before it
    fn adjusted_valence(&self, tokens: &[&str], idx: usize) -> Option<f64> {
        let mut valence = *self.valences.get(tokens[idx])?;
        let sign = valence.signum();

        let start = idx.saturating_sub(MODIFIER_WINDOW);
        let mut negated = false;
        for (distance, prev) in tokens[start..idx].iter().rev().enumerate() {
            // Modifiers further away count for less
            let decay = 1.0 - 0.05 * distance as f64;
            if self.boosters.contains(prev) {
                valence += sign * BOOST_INCREMENT * decay;
            } else if self.dampeners.contains(prev) {
                valence -= sign * BOOST_INCREMENT * decay;
            }
            if self.is_negation(prev) {
                negated = true;
            }
        }

        if negated {
            valence *= NEGATION_SCALAR;
        }
        Some(valence)
    }
}

impl PolarityScorer for LexiconScorer {
    fn polarity(&self, text: &str) -> f64 {
        let lowered = text.to_lowercase();
        let tokens: Vec<&str> = self
            .tokenizer
            .find_iter(&lowered)
            .map(|m| m.as_str())
            .collect();

        let mut sum: f64 = (0..tokens.len())
            .filter_map(|i| self.adjusted_valence(&tokens, i))
            .sum();

        if sum == 0.0 {
            return 0.0;
        }

        let exclamations = lowered.matches('!').count().min(MAX_EXCLAMATIONS);
        sum += sum.signum() * EXCLAMATION_EMPHASIS * exclamations as f64;

        (sum / (sum * sum + ALPHA).sqrt()).clamp(-1.0, 1.0)
    }
}
