//! Journal entry stores
//!
//! A store returns loosely-typed [`RawRecord`]s dated strictly after a
//! cutoff, oldest first. Normalization into entries happens afterwards, in
//! [`crate::models::normalize_records`].
//!
//! - `NotionStore`: a Notion database queried over HTTP
//! - `FileStore`: a JSON array of records on disk
//! - `MemoryStore`: a fixed record list (tests, demos)

mod file;
mod memory;
mod notion;

pub use file::FileStore;
pub use memory::MemoryStore;
pub use notion::{NotionStore, NOTION_API_BASE};

use async_trait::async_trait;
use chrono::NaiveDate;

use crate::config::{env, Secrets, StoreBackendKind, StoreConfig};
use crate::error::{Error, Result};
use crate::models::{parse_entry_timestamp, RawRecord};

/// Source of raw journal records
#[async_trait]
pub trait EntryStore: Send + Sync {
    /// Records dated strictly after `since`, in ascending date order
    async fn fetch_entries(&self, since: NaiveDate) -> Result<Vec<RawRecord>>;

    /// Human-readable description for logs and status output
    fn describe(&self) -> String;
}

/// Concrete store enum, mirroring [`crate::ai::AIClient`]
#[derive(Clone)]
pub enum StoreClient {
    Notion(NotionStore),
    File(FileStore),
    Memory(MemoryStore),
}

impl StoreClient {
    /// Create the configured store
    ///
    /// The Notion store needs `NOTION_API_KEY` and `NOTION_DATABASE_ID`.
    pub fn from_config(config: &StoreConfig, secrets: &Secrets) -> Result<Self> {
        match config.backend {
            StoreBackendKind::Notion => {
                let api_key = secrets
                    .notion_api_key
                    .as_deref()
                    .ok_or_else(|| Error::Config(format!("{} is not set", env::NOTION_API_KEY)))?;
                let database_id = secrets.notion_database_id.as_deref().ok_or_else(|| {
                    Error::Config(format!("{} is not set", env::NOTION_DATABASE_ID))
                })?;
                Ok(StoreClient::Notion(
                    NotionStore::new(api_key, database_id)?
                        .with_version(&config.notion_version)
                        .with_page_size(config.page_size),
                ))
            }
            StoreBackendKind::File => Ok(StoreClient::File(FileStore::new(&config.file))),
        }
    }
}

#[async_trait]
impl EntryStore for StoreClient {
    async fn fetch_entries(&self, since: NaiveDate) -> Result<Vec<RawRecord>> {
        match self {
            StoreClient::Notion(s) => s.fetch_entries(since).await,
            StoreClient::File(s) => s.fetch_entries(since).await,
            StoreClient::Memory(s) => s.fetch_entries(since).await,
        }
    }

    fn describe(&self) -> String {
        match self {
            StoreClient::Notion(s) => s.describe(),
            StoreClient::File(s) => s.describe(),
            StoreClient::Memory(s) => s.describe(),
        }
    }
}

/// Keep records dated strictly after `since` and order them oldest first
///
/// Records without a parseable date are kept (in front, input order) so
/// ingestion can report and skip them.
pub(crate) fn select_since(records: Vec<RawRecord>, since: NaiveDate) -> Vec<RawRecord> {
    let mut keyed: Vec<_> = records
        .into_iter()
        .map(|r| (r.date.as_deref().map(str::trim).and_then(parse_entry_timestamp), r))
        .filter(|(ts, _)| ts.map_or(true, |ts| ts.date() > since))
        .collect();
    keyed.sort_by_key(|(ts, _)| *ts);
    keyed.into_iter().map(|(_, r)| r).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn record(id: &str, date: Option<&str>) -> RawRecord {
        RawRecord {
            source_id: id.to_string(),
            date: date.map(str::to_string),
            ..Default::default()
        }
    }

    #[test]
    fn test_select_since_is_strict_and_sorted() {
        let since = NaiveDate::from_ymd_opt(2025, 5, 10).unwrap();
        let records = vec![
            record("c", Some("2025-05-12")),
            record("cutoff", Some("2025-05-10T23:00:00")),
            record("a", Some("2025-05-11T08:00:00Z")),
            record("old", Some("2025-05-01")),
            record("b", Some("2025-05-11T09:00:00")),
        ];
        let ids: Vec<String> = select_since(records, since)
            .into_iter()
            .map(|r| r.source_id)
            .collect();
        assert_eq!(ids, vec!["a", "b", "c"]);
    }

    #[test]
    fn test_select_since_keeps_undated_records() {
        let since = NaiveDate::from_ymd_opt(2025, 5, 10).unwrap();
        let records = vec![
            record("dated", Some("2025-05-11")),
            record("undated", None),
            record("garbled", Some("yesterday")),
        ];
        let ids: Vec<String> = select_since(records, since)
            .into_iter()
            .map(|r| r.source_id)
            .collect();
        assert_eq!(ids, vec!["undated", "garbled", "dated"]);
    }

    #[test]
    fn test_from_config_notion_requires_secrets() {
        let config = crate::config::TrackerConfig::default().store;
        let err = StoreClient::from_config(&config, &Secrets::default())
            .err()
            .unwrap();
        assert!(err.to_string().contains("NOTION_API_KEY"));

        let secrets = Secrets {
            notion_api_key: Some("secret_x".into()),
            ..Default::default()
        };
        let err = StoreClient::from_config(&config, &secrets).err().unwrap();
        assert!(err.to_string().contains("NOTION_DATABASE_ID"));
    }

    #[test]
    fn test_from_config_file() {
        let mut config = crate::config::TrackerConfig::default().store;
        config.backend = StoreBackendKind::File;
        config.file = PathBuf::from("/data/journal.json");

        let store = StoreClient::from_config(&config, &Secrets::default()).unwrap();
        assert!(matches!(store, StoreClient::File(_)));
        assert_eq!(store.describe(), "file /data/journal.json");
    }
}
