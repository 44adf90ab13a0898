//! JSON file store

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use chrono::NaiveDate;

use crate::error::{Error, Result};
use crate::models::RawRecord;

use super::{select_since, EntryStore};

/// Journal records kept as a JSON array on disk
///
/// ```json
/// [{"source_id": "1", "date": "2025-03-02", "mood": "Calm", "health": "Good",
///   "activities": "walk", "notes": ""}]
/// ```
#[derive(Debug, Clone)]
pub struct FileStore {
    path: PathBuf,
}

impl FileStore {
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read every record in the file, unfiltered
    pub fn read_all(&self) -> Result<Vec<RawRecord>> {
        if !self.path.exists() {
            return Err(Error::NotFound(format!(
                "journal file {}",
                self.path.display()
            )));
        }
        let content = std::fs::read_to_string(&self.path)?;
        Ok(serde_json::from_str(&content)?)
    }
}

#[async_trait]
impl EntryStore for FileStore {
    async fn fetch_entries(&self, since: NaiveDate) -> Result<Vec<RawRecord>> {
        let records = self.read_all()?;
        let total = records.len();
        let selected = select_since(records, since);
        tracing::debug!(
            path = %self.path.display(),
            total,
            selected = selected.len(),
            "Read journal file"
        );
        Ok(selected)
    }

    fn describe(&self) -> String {
        format!("file {}", self.path.display())
    }
}
