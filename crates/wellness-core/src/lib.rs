//! Wellness Core Library
//!
//! Shared functionality for the wellness journal tracker:
//! - Entry normalization (mood/health labels, date parsing)
//! - Score mapping for mood and health labels
//! - Analytics engine: sentiment, OLS trends, weekday/activity patterns
//! - Lexicon-based text polarity scoring
//! - Pluggable narrative backends (OpenAI-compatible, Ollama)
//! - Journal stores (Notion database, JSON file)
//! - Plain-text report composition and run orchestration
//! - CSV export of the score series

pub mod ai;
pub mod analytics;
pub mod config;
pub mod error;
pub mod export;
pub mod models;
pub mod orchestrator;
pub mod polarity;
pub mod prompts;
pub mod report;
pub mod scoring;
pub mod store;

/// Test utilities including mock narrative and Notion servers
#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;

pub use ai::{AIBackend, AIClient, MockBackend, OllamaBackend, OpenAICompatibleBackend};
pub use analytics::{
    AnalysisResult, Narrative, PatternStatus, PatternSummary, SentimentSummary, Trend,
    TrendDirection, TrendSummary,
};
pub use config::{Secrets, TrackerConfig};
pub use error::{Error, Result};
pub use export::ScoreRow;
pub use models::{Health, JournalEntry, Mood, RawRecord};
pub use orchestrator::{AnalysisOrchestrator, AnalysisRun};
pub use polarity::{LexiconScorer, PolarityScorer};
pub use prompts::{build_narrative_prompt, NarrativePrompt};
pub use scoring::ScoredEntry;
pub use store::{EntryStore, FileStore, MemoryStore, NotionStore, StoreClient};
