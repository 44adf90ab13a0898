//! Analysis Orchestrator
//!
//! Sequences one run: fetch → normalize → analyze → narrate → compose.
//! External failures degrade the run instead of aborting it:
//! - a failed fetch is logged and treated as an empty collection
//! - a failed narrative is carried inline as [`Narrative::Failed`]

use std::sync::Arc;

use chrono::{NaiveDate, NaiveDateTime};
use serde::Serialize;
use tracing::{debug, info, warn};

use crate::ai::AIBackend;
use crate::analytics::{self, AnalysisResult, Narrative};
use crate::models::{normalize_records, JournalEntry};
use crate::polarity::PolarityScorer;
use crate::prompts::build_narrative_prompt;
use crate::report::{self, EMPTY_REPORT};
use crate::store::EntryStore;

/// Everything one run produced
#[derive(Debug, Clone, Serialize)]
pub struct AnalysisRun {
    /// Normalized entries, in store order
    pub entries: Vec<JournalEntry>,
    /// `None` when there were no entries to analyze
    pub result: Option<AnalysisResult>,
    pub report: String,
}

/// Drives the store, the analytics and the narrative backend for one run
pub struct AnalysisOrchestrator {
    store: Arc<dyn EntryStore>,
    scorer: Arc<dyn PolarityScorer>,
    narrator: Option<Arc<dyn AIBackend>>,
}

impl AnalysisOrchestrator {
    /// Create an orchestrator without a narrative backend
    pub fn new(store: impl EntryStore + 'static, scorer: impl PolarityScorer + 'static) -> Self {
        Self {
            store: Arc::new(store),
            scorer: Arc::new(scorer),
            narrator: None,
        }
    }

    pub fn with_narrator(mut self, narrator: impl AIBackend + 'static) -> Self {
        self.narrator = Some(Arc::new(narrator));
        self
    }

    pub fn has_narrator(&self) -> bool {
        self.narrator.is_some()
    }

    /// Fetch and normalize entries dated after `since`
    ///
    /// A fetch error is logged and yields an empty collection.
    pub async fn load_entries(&self, since: NaiveDate) -> Vec<JournalEntry> {
        let records = match self.store.fetch_entries(since).await {
            Ok(records) => records,
            Err(e) => {
                warn!(
                    store = %self.store.describe(),
                    error = %e,
                    "Failed to fetch journal entries"
                );
                Vec::new()
            }
        };
        normalize_records(records)
    }

    /// Run the full pipeline for entries dated after `since`
    pub async fn run(&self, since: NaiveDate, generated_at: NaiveDateTime) -> AnalysisRun {
        debug!(since = %since, store = %self.store.describe(), "Fetching journal entries");
        let entries = self.load_entries(since).await;
        self.analyze_entries(entries, generated_at).await
    }

    /// Run the pipeline over already-normalized entries
    pub async fn analyze_entries(
        &self,
        entries: Vec<JournalEntry>,
        generated_at: NaiveDateTime,
    ) -> AnalysisRun {
        if entries.is_empty() {
            info!("No journal entries found");
            return AnalysisRun {
                entries,
                result: None,
                report: EMPTY_REPORT.to_string(),
            };
        }

        let signals = analytics::analyze(&entries, self.scorer.as_ref());
        let narrative = self.narrate(&entries).await;
        let result = signals.with_narrative(narrative);
        let report = report::compose(&entries, &result, generated_at);

        info!(
            entries = entries.len(),
            patterns = result.patterns.patterns.len(),
            "Analysis complete"
        );

        AnalysisRun {
            entries,
            result: Some(result),
            report,
        }
    }

    async fn narrate(&self, entries: &[JournalEntry]) -> Narrative {
        let Some(narrator) = self.narrator.as_ref() else {
            return Narrative::Unavailable;
        };

        let prompt = build_narrative_prompt(entries);
        debug!(model = %narrator.model(), host = %narrator.host(), "Requesting narrative");

        match narrator.generate_narrative(&prompt).await {
            Ok(text) if text.trim().is_empty() => Narrative::Unavailable,
            Ok(text) => Narrative::Generated(text),
            Err(e) => {
                warn!(error = %e, "Narrative generation failed");
                Narrative::Failed(e.to_string())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ai::MockBackend;
    use crate::analytics::TrendDirection;
    use crate::error::{Error, Result};
    use crate::models::RawRecord;
    use crate::polarity::FixedScorer;
    use crate::store::MemoryStore;
    use async_trait::async_trait;

    struct BrokenStore;

    #[async_trait]
    impl EntryStore for BrokenStore {
        async fn fetch_entries(&self, _since: NaiveDate) -> Result<Vec<RawRecord>> {
            Err(Error::external("Notion", "API error 503"))
        }

        fn describe(&self) -> String {
            "broken".to_string()
        }
    }

    fn record(id: &str, date: &str, mood: &str, activities: &str) -> RawRecord {
        RawRecord {
            source_id: id.to_string(),
            date: Some(date.to_string()),
            mood: Some(mood.to_string()),
            health: Some("Good".to_string()),
            activities: activities.to_string(),
            notes: String::new(),
        }
    }

    fn store() -> MemoryStore {
        MemoryStore::new(vec![
            record("1", "2025-09-08", "Sad", "meeting"),
            record("2", "2025-09-09", "Neutral", "meeting"),
            record("3", "2025-09-10", "Happy", "walk"),
        ])
    }

    fn since() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 9, 1).unwrap()
    }

    fn now() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2025, 9, 11)
            .unwrap()
            .and_hms_opt(8, 0, 0)
            .unwrap()
    }

    #[tokio::test]
    async fn test_run_with_narrator() {
        let mock = MockBackend::new().with_narrative("Meetings drain you.");
        let orchestrator =
            AnalysisOrchestrator::new(store(), FixedScorer(0.25)).with_narrator(mock.clone());

        let run = orchestrator.run(since(), now()).await;
        let result = run.result.unwrap();

        assert_eq!(run.entries.len(), 3);
        assert_eq!(mock.call_count(), 1);
        assert_eq!(result.narrative, Narrative::Generated("Meetings drain you.".into()));
        assert_eq!(result.trends.mood.direction, TrendDirection::Improving);
        assert_eq!(result.patterns.patterns, vec!["'meeting' tends to lower mood."]);
        assert!(run.report.contains("AI Insights:\nMeetings drain you.\n"));
        assert!(run.report.starts_with("AI Wellness Journal Report - 2025-09-11 08:00:00"));
    }

    #[tokio::test]
    async fn test_run_without_narrator() {
        let orchestrator = AnalysisOrchestrator::new(store(), FixedScorer(0.0));
        assert!(!orchestrator.has_narrator());

        let run = orchestrator.run(since(), now()).await;
        assert_eq!(run.result.unwrap().narrative, Narrative::Unavailable);
        assert!(run.report.contains("No AI insights"));
    }

    #[tokio::test]
    async fn test_narrative_failure_is_inline() {
        let orchestrator = AnalysisOrchestrator::new(store(), FixedScorer(0.0))
            .with_narrator(MockBackend::failing("rate limited"));

        let run = orchestrator.run(since(), now()).await;
        let result = run.result.unwrap();
        assert_eq!(
            result.narrative,
            Narrative::Failed("Mock error: rate limited".into())
        );
        // The rest of the pipeline still ran
        assert_eq!(result.sentiment.total_entries, 3);
        assert!(run.report.contains("AI analysis failed: Mock error: rate limited"));
    }

    #[tokio::test]
    async fn test_blank_narrative_is_unavailable() {
        let orchestrator = AnalysisOrchestrator::new(store(), FixedScorer(0.0))
            .with_narrator(MockBackend::new().with_narrative("  \n"));
        let run = orchestrator.run(since(), now()).await;
        assert_eq!(run.result.unwrap().narrative, Narrative::Unavailable);
    }

    #[tokio::test]
    async fn test_fetch_failure_is_empty_run() {
        let mock = MockBackend::new();
        let orchestrator =
            AnalysisOrchestrator::new(BrokenStore, FixedScorer(0.0)).with_narrator(mock.clone());

        let run = orchestrator.run(since(), now()).await;
        assert!(run.entries.is_empty());
        assert!(run.result.is_none());
        assert_eq!(run.report, EMPTY_REPORT);
        assert_eq!(mock.call_count(), 0);
    }

    #[tokio::test]
    async fn test_malformed_records_are_skipped() {
        let mut records = store();
        records.push(RawRecord {
            source_id: "bad".to_string(),
            date: Some("not a date".to_string()),
            ..Default::default()
        });
        let orchestrator = AnalysisOrchestrator::new(records, FixedScorer(0.0));

        let run = orchestrator.run(since(), now()).await;
        assert_eq!(run.entries.len(), 3);
        assert!(run.entries.iter().all(|e| e.source_id != "bad"));
    }

    #[tokio::test]
    async fn test_run_is_idempotent() {
        let orchestrator = AnalysisOrchestrator::new(store(), FixedScorer(0.4))
            .with_narrator(MockBackend::new());
        let first = orchestrator.run(since(), now()).await;
        let second = orchestrator.run(since(), now()).await;
        assert_eq!(first.report, second.report);
        assert_eq!(first.result, second.result);
    }
}
