//! Core types for the analytics engine

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Sentiment and mood averages over an entry collection
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct SentimentSummary {
    /// Mean text polarity in `[-1, 1]`
    pub average_sentiment: f64,
    /// Mean mood score in `[1, 4]`
    pub average_mood_score: f64,
    pub total_entries: usize,
}

/// Direction of a score series over time
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TrendDirection {
    Improving,
    Declining,
    Stable,
}

impl TrendDirection {
    pub fn as_str(&self) -> &'static str {
        match self {
            TrendDirection::Improving => "improving",
            TrendDirection::Declining => "declining",
            TrendDirection::Stable => "stable",
        }
    }
}

impl fmt::Display for TrendDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for TrendDirection {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "improving" => Ok(TrendDirection::Improving),
            "declining" => Ok(TrendDirection::Declining),
            "stable" => Ok(TrendDirection::Stable),
            _ => Err(format!("Unknown trend direction: {}", s)),
        }
    }
}

/// Classified regression slope of one series
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Trend {
    pub direction: TrendDirection,
    pub slope: f64,
}

/// Trends for the mood and health series
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TrendSummary {
    pub mood: Trend,
    pub health: Trend,
}

/// Whether the pattern miner had enough entries to run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PatternStatus {
    Analyzed,
    InsufficientData,
}

impl PatternStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            PatternStatus::Analyzed => "analyzed",
            PatternStatus::InsufficientData => "insufficient_data",
        }
    }
}

impl fmt::Display for PatternStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Detected behavioral patterns, as human-readable sentences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PatternSummary {
    pub status: PatternStatus,
    /// Weekday pattern first, then activity patterns in keyword order
    pub patterns: Vec<String>,
}

impl PatternSummary {
    pub fn insufficient_data() -> Self {
        Self {
            status: PatternStatus::InsufficientData,
            patterns: Vec::new(),
        }
    }

    pub fn analyzed(patterns: Vec<String>) -> Self {
        Self {
            status: PatternStatus::Analyzed,
            patterns,
        }
    }

    pub fn is_insufficient(&self) -> bool {
        self.status == PatternStatus::InsufficientData
    }
}

/// Narrative text from the external generator
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", content = "text", rename_all = "snake_case")]
pub enum Narrative {
    /// Text returned by the generator, inserted verbatim
    Generated(String),
    /// No generator configured, or it returned nothing
    Unavailable,
    /// The generator call failed; carries the error message
    Failed(String),
}

impl Narrative {
    /// Text block shown in reports
    pub fn display_text(&self) -> String {
        match self {
            Narrative::Generated(text) => text.clone(),
            Narrative::Unavailable => "No AI insights".to_string(),
            Narrative::Failed(message) => format!("AI analysis failed: {}", message),
        }
    }
}

/// Everything derived from one analysis run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisResult {
    pub sentiment: SentimentSummary,
    pub trends: TrendSummary,
    pub patterns: PatternSummary,
    pub narrative: Narrative,
}
