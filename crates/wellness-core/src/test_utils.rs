//! Test utilities for wellness-core
//!
//! Mock HTTP servers for the external collaborators, so the HTTP adapters can
//! be exercised end to end without network access:
//! - [`MockChatServer`]: OpenAI chat completions and Ollama generate endpoints
//! - [`MockNotionServer`]: the Notion database query endpoint

use std::net::SocketAddr;
use std::sync::{Arc, Mutex};

use axum::{
    extract::{Json, Path, State},
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post},
    Router,
};
use serde::Deserialize;
use serde_json::{json, Value};
use tokio::sync::oneshot;

/// Bind an app on an ephemeral port and serve it until the sender fires
async fn spawn_server(app: Router) -> (SocketAddr, oneshot::Sender<()>) {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    let (shutdown_tx, shutdown_rx) = oneshot::channel();

    tokio::spawn(async move {
        axum::serve(listener, app)
            .with_graceful_shutdown(async {
                shutdown_rx.await.ok();
            })
            .await
            .unwrap();
    });

    (addr, shutdown_tx)
}

/// A request captured by a mock server
#[derive(Debug, Clone)]
pub struct RecordedRequest {
    pub path: String,
    pub authorization: Option<String>,
    pub body: Value,
}

fn record(log: &Mutex<Vec<RecordedRequest>>, path: String, headers: &HeaderMap, body: &Value) {
    let authorization = headers
        .get("authorization")
        .and_then(|v| v.to_str().ok())
        .map(str::to_string);
    log.lock().unwrap().push(RecordedRequest {
        path,
        authorization,
        body: body.clone(),
    });
}

// =============================================================================
// Narrative servers
// =============================================================================

struct ChatState {
    reply: String,
    failure: Option<StatusCode>,
    requests: Mutex<Vec<RecordedRequest>>,
}

/// Mock narrative server speaking both the OpenAI and Ollama dialects
pub struct MockChatServer {
    addr: SocketAddr,
    state: Arc<ChatState>,
    shutdown_tx: Option<oneshot::Sender<()>>,
}

impl MockChatServer {
    /// Start a server that answers every prompt with `reply`
    pub async fn start(reply: &str) -> Self {
        Self::start_with(reply, None).await
    }

    /// Start a server that fails every generate call with `status`
    pub async fn start_failing(status: StatusCode) -> Self {
        Self::start_with("", Some(status)).await
    }

    async fn start_with(reply: &str, failure: Option<StatusCode>) -> Self {
        let state = Arc::new(ChatState {
            reply: reply.to_string(),
            failure,
            requests: Mutex::new(Vec::new()),
        });

        let app = Router::new()
            .route("/v1/chat/completions", post(handle_chat_completions))
            .route("/v1/models", get(handle_models))
            .route("/api/generate", post(handle_generate))
            .route("/api/tags", get(handle_tags))
            .with_state(state.clone());

        let (addr, shutdown_tx) = spawn_server(app).await;

        Self {
            addr,
            state,
            shutdown_tx: Some(shutdown_tx),
        }
    }

    /// Get the base URL for this mock server
    pub fn url(&self) -> String {
        format!("http://{}", self.addr)
    }

    /// Generate requests received so far
    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.state.requests.lock().unwrap().clone()
    }

    /// Stop the mock server
    pub fn stop(&mut self) {
        if let Some(tx) = self.shutdown_tx.take() {
            let _ = tx.send(());
        }
    }
}

impl Drop for MockChatServer {
    fn drop(&mut self) {
        self.stop();
    }
}

async fn handle_chat_completions(
    State(state): State<Arc<ChatState>>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> Response {
    record(&state.requests, "/v1/chat/completions".into(), &headers, &body);

    if let Some(status) = state.failure {
        return (status, Json(json!({"error": {"message": "mock failure"}}))).into_response();
    }

    Json(json!({
        "id": "chatcmpl-mock",
        "object": "chat.completion",
        "model": body["model"],
        "choices": [{
            "index": 0,
            "message": {"role": "assistant", "content": state.reply},
            "finish_reason": "stop"
        }]
    }))
    .into_response()
}

async fn handle_models() -> Json<Value> {
    Json(json!({"object": "list", "data": [{"id": "gpt-4o-mini", "object": "model"}]}))
}

async fn handle_generate(
    State(state): State<Arc<ChatState>>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> Response {
    record(&state.requests, "/api/generate".into(), &headers, &body);

    if let Some(status) = state.failure {
        return (status, Json(json!({"error": "mock failure"}))).into_response();
    }

    Json(json!({
        "model": body["model"],
        "response": state.reply,
        "done": true
    }))
    .into_response()
}

async fn handle_tags() -> Json<Value> {
    Json(json!({"models": [{"name": "llama3.2:latest", "size": 4_000_000_000u64}]}))
}

// =============================================================================
// Notion server
// =============================================================================

struct NotionState {
    token: String,
    pages: Vec<Value>,
    requests: Mutex<Vec<RecordedRequest>>,
}

/// Mock Notion database holding a fixed list of pages
///
/// Applies the `after` date filter, sorts ascending by date and paginates by
/// `page_size` with numeric cursors. Requests without `Bearer {token}` get 401.
pub struct MockNotionServer {
    addr: SocketAddr,
    state: Arc<NotionState>,
    shutdown_tx: Option<oneshot::Sender<()>>,
}

impl MockNotionServer {
    pub async fn start(token: &str, pages: Vec<Value>) -> Self {
        let state = Arc::new(NotionState {
            token: token.to_string(),
            pages,
            requests: Mutex::new(Vec::new()),
        });

        let app = Router::new()
            .route("/v1/databases/:id/query", post(handle_query))
            .with_state(state.clone());

        let (addr, shutdown_tx) = spawn_server(app).await;

        Self {
            addr,
            state,
            shutdown_tx: Some(shutdown_tx),
        }
    }

    pub fn url(&self) -> String {
        format!("http://{}", self.addr)
    }

    /// Query requests received so far
    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.state.requests.lock().unwrap().clone()
    }

    pub fn stop(&mut self) {
        if let Some(tx) = self.shutdown_tx.take() {
            let _ = tx.send(());
        }
    }
}

impl Drop for MockNotionServer {
    fn drop(&mut self) {
        self.stop();
    }
}

#[derive(Debug, Deserialize)]
struct QueryBody {
    filter: Option<Value>,
    page_size: Option<usize>,
    start_cursor: Option<String>,
}

fn page_date(page: &Value) -> Option<&str> {
    page["properties"]["Date"]["date"]["start"].as_str()
}

async fn handle_query(
    State(state): State<Arc<NotionState>>,
    Path(database_id): Path<String>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> Response {
    record(
        &state.requests,
        format!("/v1/databases/{}/query", database_id),
        &headers,
        &body,
    );

    let expected = format!("Bearer {}", state.token);
    let authorized = headers
        .get("authorization")
        .and_then(|v| v.to_str().ok())
        .is_some_and(|v| v == expected);
    if !authorized {
        return (
            StatusCode::UNAUTHORIZED,
            Json(json!({"object": "error", "code": "unauthorized"})),
        )
            .into_response();
    }

    let query: QueryBody = match serde_json::from_value(body) {
        Ok(q) => q,
        Err(e) => {
            return (
                StatusCode::BAD_REQUEST,
                Json(json!({"object": "error", "message": e.to_string()})),
            )
                .into_response()
        }
    };

    let after = query
        .filter
        .as_ref()
        .and_then(|f| f["date"]["after"].as_str())
        .map(str::to_string);

    // ISO dates compare correctly as strings on their date prefix
    let mut matching: Vec<&Value> = state
        .pages
        .iter()
        .filter(|p| match (&after, page_date(p)) {
            (Some(after), Some(date)) => date.get(..10).unwrap_or(date) > after.as_str(),
            (Some(_), None) => false,
            (None, _) => true,
        })
        .collect();
    matching.sort_by(|a, b| page_date(a).cmp(&page_date(b)));

    let page_size = query.page_size.unwrap_or(100).max(1);
    let start: usize = query
        .start_cursor
        .and_then(|c| c.parse().ok())
        .unwrap_or(0);
    let end = (start + page_size).min(matching.len());
    let results: Vec<&Value> = matching.get(start..end).unwrap_or_default().to_vec();
    let has_more = end < matching.len();
    let next_cursor = has_more.then(|| end.to_string());

    Json(json!({
        "object": "list",
        "results": results,
        "has_more": has_more,
        "next_cursor": next_cursor,
    }))
    .into_response()
}

/// Build a Notion page object with the journal database's properties
pub fn notion_page(
    id: &str,
    date: Option<&str>,
    mood: Option<&str>,
    health: Option<&str>,
    activities: &str,
    notes: &str,
) -> Value {
    let rich_text = |text: &str| {
        if text.is_empty() {
            json!({"type": "rich_text", "rich_text": []})
        } else {
            json!({"type": "rich_text", "rich_text": [{"type": "text", "plain_text": text}]})
        }
    };
    let select = |name: Option<&str>| match name {
        Some(name) => json!({"type": "select", "select": {"name": name}}),
        None => json!({"type": "select", "select": null}),
    };

    json!({
        "object": "page",
        "id": id,
        "properties": {
            "Date": {"type": "date", "date": date.map(|d| json!({"start": d}))},
            "Mood": select(mood),
            "Health Status": select(health),
            "Activities": rich_text(activities),
            "Notes": rich_text(notes),
        }
    })
}
