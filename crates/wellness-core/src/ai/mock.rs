//! Mock backend for testing
//!
//! Returns canned narrative text (or a configured failure) without a network.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use async_trait::async_trait;

use crate::error::{Error, Result};
use crate::prompts::NarrativePrompt;

use super::AIBackend;

pub const MOCK_NARRATIVE: &str =
    "Mood is steadier on days with movement. Keep the evening walks and protect sleep.";

/// Mock AI backend for testing
///
/// Clones share one call counter, so a test can hand a clone to the
/// orchestrator and still observe how often it was called.
#[derive(Clone)]
pub struct MockBackend {
    /// Whether health_check should return true
    pub healthy: bool,
    narrative: String,
    failure: Option<String>,
    calls: Arc<AtomicUsize>,
}

impl Default for MockBackend {
    fn default() -> Self {
        Self::new()
    }
}

impl MockBackend {
    /// Create a new mock backend (healthy by default)
    pub fn new() -> Self {
        Self {
            healthy: true,
            narrative: MOCK_NARRATIVE.to_string(),
            failure: None,
            calls: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// Create an unhealthy mock backend
    pub fn unhealthy() -> Self {
        Self {
            healthy: false,
            ..Self::new()
        }
    }

    /// Return `text` from every generate call
    pub fn with_narrative(mut self, text: &str) -> Self {
        self.narrative = text.to_string();
        self
    }

    /// Fail every generate call with `message`
    pub fn failing(message: &str) -> Self {
        Self {
            failure: Some(message.to_string()),
            ..Self::new()
        }
    }

    /// Number of generate calls so far
    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl AIBackend for MockBackend {
    async fn generate_narrative(&self, _prompt: &NarrativePrompt) -> Result<String> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        match self.failure {
            Some(ref message) => Err(Error::external("Mock", message.clone())),
            None => Ok(self.narrative.clone()),
        }
    }

    async fn health_check(&self) -> bool {
        self.healthy
    }

    fn model(&self) -> &str {
        "mock"
    }

    fn host(&self) -> &str {
        "mock://localhost"
    }
}
