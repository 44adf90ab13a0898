//! Score series export
//!
//! Writes the chronologically sorted mood/health series with per-entry text
//! polarity as CSV, one row per entry:
//!
//! ```text
//! date,weekday,mood,mood_score,health,health_score,sentiment
//! 2025-03-01,Sat,Happy,4,Good,4,0.5719
//! ```

use std::io::Write;

use serde::Serialize;

use crate::analytics::sentiment::entry_polarity;
use crate::error::{Error, Result};
use crate::models::{Health, JournalEntry, Mood};
use crate::polarity::PolarityScorer;
use crate::scoring::{annotate, sort_chronologically};

/// CSV column names, in [`ScoreRow`] field order
pub const SCORE_CSV_HEADER: [&str; 7] = [
    "date",
    "weekday",
    "mood",
    "mood_score",
    "health",
    "health_score",
    "sentiment",
];

/// One exported data point
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScoreRow {
    pub date: String,
    pub weekday: String,
    pub mood: Mood,
    pub mood_score: u8,
    pub health: Health,
    pub health_score: u8,
    /// Text polarity, four decimals
    pub sentiment: String,
}

/// Build export rows in chronological order
pub fn score_rows(entries: &[JournalEntry], scorer: &dyn PolarityScorer) -> Vec<ScoreRow> {
    let mut scored = annotate(entries);
    sort_chronologically(&mut scored);

    scored
        .iter()
        .map(|s| ScoreRow {
            date: s.entry.date().format("%Y-%m-%d").to_string(),
            weekday: s.entry.date().format("%a").to_string(),
            mood: s.entry.mood,
            mood_score: s.mood_score,
            health: s.entry.health,
            health_score: s.health_score,
            sentiment: format!("{:.4}", entry_polarity(s, scorer)),
        })
        .collect()
}

/// Write rows as CSV (with header) to `writer`
///
/// The header is written even when there are no rows.
pub fn write_score_csv<W: Write>(writer: W, rows: &[ScoreRow]) -> Result<()> {
    let mut csv_writer = csv::Writer::from_writer(writer);
    if rows.is_empty() {
        csv_writer.write_record(SCORE_CSV_HEADER)?;
    }
    for row in rows {
        csv_writer.serialize(row)?;
    }
    csv_writer.flush()?;
    Ok(())
}

/// Render rows as a CSV string
pub fn score_csv(rows: &[ScoreRow]) -> Result<String> {
    let mut buf = Vec::new();
    write_score_csv(&mut buf, rows)?;
    String::from_utf8(buf).map_err(|e| Error::InvalidData(format!("CSV is not UTF-8: {}", e)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::polarity::FixedScorer;
    use chrono::NaiveDate;

    #[test]
    fn test_rows_are_chronological() {
        let entries = vec![
            JournalEntry::new(
                NaiveDate::from_ymd_opt(2025, 3, 2).unwrap(),
                Mood::Tired,
                Health::Poor,
            ),
            JournalEntry::new(
                NaiveDate::from_ymd_opt(2025, 3, 1).unwrap(),
                Mood::Happy,
                Health::Good,
            )
            .with_notes("great hike"),
        ];
        let rows = score_rows(&entries, &FixedScorer(0.5));

        assert_eq!(rows[0].date, "2025-03-01");
        assert_eq!(rows[0].weekday, "Sat");
        assert_eq!(rows[0].mood_score, 4);
        assert_eq!(rows[0].sentiment, "0.5000");
        // Empty text scores zero without the scorer
        assert_eq!(rows[1].sentiment, "0.0000");
        assert_eq!(rows[1].health_score, 2);
    }

    #[test]
    fn test_csv_layout() {
        let entries = vec![JournalEntry::new(
            NaiveDate::from_ymd_opt(2025, 3, 3).unwrap(),
            Mood::Calm,
            Health::Excellent,
        )];
        let csv = score_csv(&score_rows(&entries, &FixedScorer(0.0))).unwrap();
        assert_eq!(
            csv,
            "date,weekday,mood,mood_score,health,health_score,sentiment\n\
             2025-03-03,Mon,Calm,3,Excellent,5,0.0000\n"
        );
    }

    #[test]
    fn test_empty_export_has_header() {
        assert_eq!(
            score_csv(&[]).unwrap(),
            "date,weekday,mood,mood_score,health,health_score,sentiment\n"
        );
    }
}
