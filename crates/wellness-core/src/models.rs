//! Journal entry model and ingestion-time normalization
//!
//! Records arrive from a journal store as loosely-typed [`RawRecord`]s. They are
//! normalized exactly once into [`JournalEntry`] values:
//! - mood/health labels become tagged enums (unknown or missing labels fall back
//!   to `Neutral` / `Fair`)
//! - the date string is parsed into a timestamp; records without a usable date
//!   are skipped
//!
//! Everything downstream assumes entries are valid.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime};
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Mood label recorded with an entry
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Mood {
    Happy,
    Excited,
    Grateful,
    Content,
    #[default]
    Neutral,
    Calm,
    Tired,
    Anxious,
    Sad,
    Stressed,
    Frustrated,
    Overwhelmed,
}

impl Mood {
    pub fn as_str(&self) -> &'static str {
        match self {
            Mood::Happy => "Happy",
            Mood::Excited => "Excited",
            Mood::Grateful => "Grateful",
            Mood::Content => "Content",
            Mood::Neutral => "Neutral",
            Mood::Calm => "Calm",
            Mood::Tired => "Tired",
            Mood::Anxious => "Anxious",
            Mood::Sad => "Sad",
            Mood::Stressed => "Stressed",
            Mood::Frustrated => "Frustrated",
            Mood::Overwhelmed => "Overwhelmed",
        }
    }

    /// All mood labels in their canonical order
    pub fn all() -> &'static [Mood] {
        &[
            Mood::Happy,
            Mood::Excited,
            Mood::Grateful,
            Mood::Content,
            Mood::Neutral,
            Mood::Calm,
            Mood::Tired,
            Mood::Anxious,
            Mood::Sad,
            Mood::Stressed,
            Mood::Frustrated,
            Mood::Overwhelmed,
        ]
    }

    /// Normalize an optional label, falling back to `Neutral`
    pub fn normalize(label: Option<&str>) -> Self {
        label
            .and_then(|l| l.trim().parse().ok())
            .unwrap_or(Mood::Neutral)
    }
}

impl fmt::Display for Mood {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Mood {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Mood::all()
            .iter()
            .copied()
            .find(|m| m.as_str() == s)
            .ok_or_else(|| format!("Unknown mood: {}", s))
    }
}

/// Health status recorded with an entry
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Health {
    Excellent,
    Good,
    #[default]
    Fair,
    Poor,
    Sick,
}

impl Health {
    pub fn as_str(&self) -> &'static str {
        match self {
            Health::Excellent => "Excellent",
            Health::Good => "Good",
            Health::Fair => "Fair",
            Health::Poor => "Poor",
            Health::Sick => "Sick",
        }
    }

    pub fn all() -> &'static [Health] {
        &[
            Health::Excellent,
            Health::Good,
            Health::Fair,
            Health::Poor,
            Health::Sick,
        ]
    }

    /// Normalize an optional label, falling back to `Fair`
    pub fn normalize(label: Option<&str>) -> Self {
        label
            .and_then(|l| l.trim().parse().ok())
            .unwrap_or(Health::Fair)
    }
}

impl fmt::Display for Health {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Health {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Health::all()
            .iter()
            .copied()
            .find(|h| h.as_str() == s)
            .ok_or_else(|| format!("Unknown health status: {}", s))
    }
}

/// A record as returned by a journal store, before normalization
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawRecord {
    /// Identifier of the record in its store (e.g. Notion page id)
    pub source_id: String,
    /// ISO date or datetime string
    #[serde(default)]
    pub date: Option<String>,
    #[serde(default)]
    pub mood: Option<String>,
    #[serde(default)]
    pub health: Option<String>,
    #[serde(default)]
    pub activities: String,
    #[serde(default)]
    pub notes: String,
}

/// One normalized journal record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JournalEntry {
    /// When the entry was recorded (wall-clock time of the record)
    pub recorded_at: NaiveDateTime,
    pub mood: Mood,
    pub health: Health,
    pub activities: String,
    pub notes: String,
    /// Weak reference back to the originating record
    pub source_id: String,
}

impl JournalEntry {
    /// Create an entry dated at midnight of `date`
    pub fn new(date: NaiveDate, mood: Mood, health: Health) -> Self {
        Self {
            recorded_at: date.and_time(NaiveTime::MIN),
            mood,
            health,
            activities: String::new(),
            notes: String::new(),
            source_id: String::new(),
        }
    }

    pub fn with_activities(mut self, activities: impl Into<String>) -> Self {
        self.activities = activities.into();
        self
    }

    pub fn with_notes(mut self, notes: impl Into<String>) -> Self {
        self.notes = notes.into();
        self
    }

    pub fn with_source_id(mut self, source_id: impl Into<String>) -> Self {
        self.source_id = source_id.into();
        self
    }

    /// Calendar date of the entry
    pub fn date(&self) -> NaiveDate {
        self.recorded_at.date()
    }

    /// Free text fed to the polarity scorer: activities and notes joined
    pub fn text(&self) -> String {
        format!("{} {}", self.activities, self.notes)
            .trim()
            .to_string()
    }

    /// Normalize a raw store record
    ///
    /// Fails with [`Error::MalformedRecord`] when the date is missing or unparseable.
    /// Mood and health labels never fail; unknown values take their defaults.
    pub fn from_raw(raw: RawRecord) -> Result<Self> {
        let date = raw
            .date
            .as_deref()
            .map(str::trim)
            .filter(|d| !d.is_empty())
            .ok_or_else(|| {
                Error::MalformedRecord(format!("record {} has no date", raw.source_id))
            })?;

        let recorded_at = parse_entry_timestamp(date).ok_or_else(|| {
            Error::MalformedRecord(format!(
                "record {} has unparseable date '{}'",
                raw.source_id, date
            ))
        })?;

        Ok(Self {
            recorded_at,
            mood: Mood::normalize(raw.mood.as_deref()),
            health: Health::normalize(raw.health.as_deref()),
            activities: raw.activities,
            notes: raw.notes,
            source_id: raw.source_id,
        })
    }
}

/// Parse the date forms journal stores emit
///
/// Accepts `YYYY-MM-DD`, RFC 3339 (`Z` or an offset; the wall-clock time in that
/// offset is kept) and naive `YYYY-MM-DDTHH:MM:SS[.fff]`.
pub fn parse_entry_timestamp(s: &str) -> Option<NaiveDateTime> {
    if let Ok(date) = NaiveDate::parse_from_str(s, "%Y-%m-%d") {
        return Some(date.and_time(NaiveTime::MIN));
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.naive_local());
    }
    NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S%.f").ok()
}

/// Normalize a batch of records, skipping malformed ones
///
/// Order of the surviving records is preserved.
pub fn normalize_records(records: Vec<RawRecord>) -> Vec<JournalEntry> {
    let total = records.len();
    let entries: Vec<JournalEntry> = records
        .into_iter()
        .filter_map(|raw| match JournalEntry::from_raw(raw) {
            Ok(entry) => Some(entry),
            Err(e) => {
                tracing::warn!(error = %e, "Skipping journal record");
                None
            }
        })
        .collect();

    tracing::debug!(
        fetched = total,
        kept = entries.len(),
        "Normalized journal records"
    );
    entries
}
