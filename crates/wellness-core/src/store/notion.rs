//! Notion database store
//!
//! Queries `POST /v1/databases/{id}/query` with an `after` date filter and an
//! ascending date sort, following `next_cursor` until `has_more` is false.
//!
//! Page properties map to record fields:
//! - `Date` (date) → `date`
//! - `Mood` (select) → `mood`
//! - `Health Status` (select) → `health`
//! - `Activities`, `Notes` (rich text, plain text joined by spaces)

use std::time::Duration;

use async_trait::async_trait;
use chrono::NaiveDate;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{debug, warn};

use crate::error::{Error, Result};
use crate::models::RawRecord;

use super::EntryStore;

pub const NOTION_API_BASE: &str = "https://api.notion.com";

const SERVICE: &str = "Notion";
const DEFAULT_VERSION: &str = "2022-06-28";
const DEFAULT_PAGE_SIZE: u32 = 100;
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Journal entries stored in a Notion database
#[derive(Clone)]
pub struct NotionStore {
    http_client: Client,
    base_url: String,
    api_key: String,
    database_id: String,
    notion_version: String,
    page_size: u32,
}

impl NotionStore {
    pub fn new(api_key: &str, database_id: &str) -> Result<Self> {
        Ok(Self {
            http_client: Client::builder().timeout(REQUEST_TIMEOUT).build()?,
            base_url: NOTION_API_BASE.to_string(),
            api_key: api_key.to_string(),
            database_id: database_id.to_string(),
            notion_version: DEFAULT_VERSION.to_string(),
            page_size: DEFAULT_PAGE_SIZE,
        })
    }

    /// Point at a different API host (mock servers)
    pub fn with_base_url(mut self, base_url: &str) -> Self {
        self.base_url = base_url.trim_end_matches('/').to_string();
        self
    }

    pub fn with_version(mut self, version: &str) -> Self {
        self.notion_version = version.to_string();
        self
    }

    /// Page size per query (Notion caps this at 100)
    pub fn with_page_size(mut self, page_size: u32) -> Self {
        self.page_size = page_size.clamp(1, 100);
        self
    }

    async fn query_page(&self, since: NaiveDate, cursor: Option<String>) -> Result<QueryResponse> {
        let request = QueryRequest {
            filter: DateFilter {
                property: "Date",
                date: DateCondition {
                    after: since.format("%Y-%m-%d").to_string(),
                },
            },
            sorts: vec![Sort {
                property: "Date",
                direction: "ascending",
            }],
            page_size: self.page_size,
            start_cursor: cursor,
        };

        let response = self
            .http_client
            .post(format!(
                "{}/v1/databases/{}/query",
                self.base_url, self.database_id
            ))
            .header("Authorization", format!("Bearer {}", self.api_key))
            .header("Notion-Version", &self.notion_version)
            .json(&request)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(Error::external(
                SERVICE,
                format!("API error {}: {}", status, body),
            ));
        }

        Ok(response.json().await?)
    }
}

#[async_trait]
impl EntryStore for NotionStore {
    async fn fetch_entries(&self, since: NaiveDate) -> Result<Vec<RawRecord>> {
        let mut records = Vec::new();
        let mut cursor = None;
        let mut pages = 0;

        loop {
            let response = self.query_page(since, cursor).await?;
            pages += 1;
            records.extend(response.results.into_iter().filter_map(parse_page));

            match (response.has_more, response.next_cursor) {
                (true, Some(next)) => cursor = Some(next),
                _ => break,
            }
        }

        debug!(
            records = records.len(),
            pages,
            since = %since,
            "Fetched Notion journal pages"
        );
        Ok(records)
    }

    fn describe(&self) -> String {
        format!("notion database {}", self.database_id)
    }
}

#[derive(Debug, Serialize)]
struct QueryRequest {
    filter: DateFilter,
    sorts: Vec<Sort>,
    page_size: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    start_cursor: Option<String>,
}

#[derive(Debug, Serialize)]
struct DateFilter {
    property: &'static str,
    date: DateCondition,
}

#[derive(Debug, Serialize)]
struct DateCondition {
    after: String,
}

#[derive(Debug, Serialize)]
struct Sort {
    property: &'static str,
    direction: &'static str,
}

#[derive(Debug, Deserialize)]
struct QueryResponse {
    #[serde(default)]
    results: Vec<Value>,
    #[serde(default)]
    has_more: bool,
    next_cursor: Option<String>,
}

#[derive(Debug, Deserialize)]
struct NotionPage {
    id: String,
    #[serde(default)]
    properties: PageProperties,
}

#[derive(Debug, Default, Deserialize)]
struct PageProperties {
    #[serde(rename = "Date")]
    date: Option<DateProperty>,
    #[serde(rename = "Mood")]
    mood: Option<SelectProperty>,
    #[serde(rename = "Health Status")]
    health: Option<SelectProperty>,
    #[serde(rename = "Activities")]
    activities: Option<RichTextProperty>,
    #[serde(rename = "Notes")]
    notes: Option<RichTextProperty>,
}

#[derive(Debug, Deserialize)]
struct DateProperty {
    date: Option<DateValue>,
}

#[derive(Debug, Deserialize)]
struct DateValue {
    start: Option<String>,
}

#[derive(Debug, Deserialize)]
struct SelectProperty {
    select: Option<SelectOption>,
}

#[derive(Debug, Deserialize)]
struct SelectOption {
    name: String,
}

#[derive(Debug, Deserialize)]
struct RichTextProperty {
    #[serde(default)]
    rich_text: Vec<RichText>,
}

#[derive(Debug, Deserialize)]
struct RichText {
    plain_text: String,
}

impl RichTextProperty {
    fn joined(&self) -> String {
        self.rich_text
            .iter()
            .map(|t| t.plain_text.as_str())
            .collect::<Vec<_>>()
            .join(" ")
    }
}

/// Decode one page; a page that does not fit the schema is skipped
fn parse_page(page: Value) -> Option<RawRecord> {
    let id = page["id"].as_str().unwrap_or("<unknown>").to_string();
    match serde_json::from_value::<NotionPage>(page) {
        Ok(page) => Some(page.into_record()),
        Err(e) => {
            warn!(page = %id, error = %e, "Skipping malformed Notion page");
            None
        }
    }
}

impl NotionPage {
    fn into_record(self) -> RawRecord {
        let props = self.properties;
        let select = |p: Option<SelectProperty>| p.and_then(|p| p.select).map(|s| s.name);
        let text = |p: Option<RichTextProperty>| p.map(|p| p.joined()).unwrap_or_default();

        RawRecord {
            source_id: self.id,
            date: props.date.and_then(|d| d.date).and_then(|d| d.start),
            mood: select(props.mood),
            health: select(props.health),
            activities: text(props.activities),
            notes: text(props.notes),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_to_record() {
        let json = r#"{
            "object": "page",
            "id": "page-1",
            "properties": {
                "Date": {"type": "date", "date": {"start": "2025-04-02", "end": null}},
                "Mood": {"type": "select", "select": {"id": "x", "name": "Grateful", "color": "green"}},
                "Health Status": {"type": "select", "select": {"name": "Good"}},
                "Activities": {"type": "rich_text", "rich_text": [
                    {"type": "text", "plain_text": "yoga,"},
                    {"type": "text", "plain_text": "walk"}
                ]},
                "Notes": {"type": "rich_text", "rich_text": []},
                "Title": {"type": "title", "title": []}
            }
        }"#;

        let page: NotionPage = serde_json::from_str(json).unwrap();
        let record = page.into_record();
        assert_eq!(record.source_id, "page-1");
        assert_eq!(record.date.as_deref(), Some("2025-04-02"));
        assert_eq!(record.mood.as_deref(), Some("Grateful"));
        assert_eq!(record.health.as_deref(), Some("Good"));
        assert_eq!(record.activities, "yoga, walk");
        assert_eq!(record.notes, "");
    }

    #[test]
    fn test_page_with_empty_properties() {
        let json = r#"{
            "id": "page-2",
            "properties": {
                "Date": {"date": null},
                "Mood": {"select": null}
            }
        }"#;
        let record = serde_json::from_str::<NotionPage>(json)
            .unwrap()
            .into_record();
        assert!(record.date.is_none());
        assert!(record.mood.is_none());
        assert!(record.health.is_none());
        assert_eq!(record.activities, "");
    }

    #[test]
    fn test_null_date_start_is_undated() {
        let page = serde_json::json!({
            "id": "page-3",
            "properties": {"Date": {"type": "date", "date": {"start": null}}}
        });
        let record = parse_page(page).unwrap();
        assert_eq!(record.source_id, "page-3");
        assert!(record.date.is_none());
    }

    #[test]
    fn test_malformed_page_skipped_in_batch() {
        let body = serde_json::json!({
            "results": [
                {"id": "good-1", "properties": {"Date": {"date": {"start": "2025-04-01"}}}},
                {"id": "bad", "properties": {"Mood": {"select": "Happy"}}},
                {"id": "good-2", "properties": {"Date": {"date": {"start": "2025-04-02"}}}}
            ],
            "has_more": false,
            "next_cursor": null
        });
        let response: QueryResponse = serde_json::from_value(body).unwrap();
        let ids: Vec<String> = response
            .results
            .into_iter()
            .filter_map(parse_page)
            .map(|r| r.source_id)
            .collect();
        assert_eq!(ids, vec!["good-1", "good-2"]);
    }

    #[test]
    fn test_query_request_serialization() {
        let request = QueryRequest {
            filter: DateFilter {
                property: "Date",
                date: DateCondition {
                    after: "2025-03-01".to_string(),
                },
            },
            sorts: vec![Sort {
                property: "Date",
                direction: "ascending",
            }],
            page_size: 100,
            start_cursor: None,
        };
        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(json["filter"]["property"], "Date");
        assert_eq!(json["filter"]["date"]["after"], "2025-03-01");
        assert_eq!(json["sorts"][0]["direction"], "ascending");
        assert!(json.get("start_cursor").is_none());
    }

    #[test]
    fn test_page_size_clamped() {
        let store = NotionStore::new("secret", "db").unwrap().with_page_size(500);
        assert_eq!(store.page_size, 100);
        assert_eq!(store.describe(), "notion database db");
    }
}
