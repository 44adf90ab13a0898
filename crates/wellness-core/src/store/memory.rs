//! In-memory store

use async_trait::async_trait;
use chrono::NaiveDate;

use crate::error::Result;
use crate::models::RawRecord;

use super::{select_since, EntryStore};

/// Fixed list of records, filtered like any other store
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    records: Vec<RawRecord>,
}

impl MemoryStore {
    pub fn new(records: Vec<RawRecord>) -> Self {
        Self { records }
    }

    pub fn push(&mut self, record: RawRecord) {
        self.records.push(record);
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

#[async_trait]
impl EntryStore for MemoryStore {
    async fn fetch_entries(&self, since: NaiveDate) -> Result<Vec<RawRecord>> {
        Ok(select_since(self.records.clone(), since))
    }

    fn describe(&self) -> String {
        format!("memory ({} records)", self.records.len())
    }
}
