//! Pluggable narrative backend abstraction
//!
//! The narrative generator turns a rendered prompt into free-form coaching
//! text. Its output is never parsed; the report embeds it verbatim.
//!
//! # Architecture
//!
//! - `AIBackend` trait: defines the interface for all narrative backends
//! - `AIClient` enum: concrete wrapper providing Clone + compile-time dispatch
//! - Backend implementations: `OpenAICompatibleBackend`, `OllamaBackend`, `MockBackend`
//!
//! # Usage
//!
//! ```rust,ignore
//! let config = TrackerConfig::load(None)?;
//! let secrets = Secrets::from_env();
//! let ai = AIClient::from_config(&config.narrative, secrets.openai_api_key.as_deref())?;
//!
//! let prompt = build_narrative_prompt(&entries);
//! let text = ai.generate_narrative(&prompt).await?;
//! ```
//!
//! Each call is a single attempt bounded by the configured timeout.

mod mock;
mod ollama;
mod openai_compatible;

pub use mock::MockBackend;
pub use ollama::OllamaBackend;
pub use openai_compatible::OpenAICompatibleBackend;

use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;

use crate::config::{NarrativeBackendKind, NarrativeConfig};
use crate::error::Result;
use crate::prompts::NarrativePrompt;

/// Sampling limits sent with every narrative request
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GenerationOptions {
    pub max_tokens: u32,
    pub temperature: f32,
}

impl Default for GenerationOptions {
    fn default() -> Self {
        Self {
            max_tokens: 500,
            temperature: 0.7,
        }
    }
}

impl From<&NarrativeConfig> for GenerationOptions {
    fn from(config: &NarrativeConfig) -> Self {
        Self {
            max_tokens: config.max_tokens,
            temperature: config.temperature,
        }
    }
}

/// Trait defining the interface for all narrative backends
///
/// Backends should be Send + Sync to allow use across async tasks.
#[async_trait]
pub trait AIBackend: Send + Sync {
    /// Generate narrative text for a rendered prompt
    async fn generate_narrative(&self, prompt: &NarrativePrompt) -> Result<String>;

    /// Check if the backend is available
    async fn health_check(&self) -> bool;

    /// Get the model name
    fn model(&self) -> &str;

    /// Get the host URL (for logging)
    fn host(&self) -> &str;
}

/// Concrete AI client enum
///
/// Provides Clone and compile-time dispatch without Box<dyn> overhead.
#[derive(Clone)]
pub enum AIClient {
    /// OpenAI chat completions (or any compatible server)
    OpenAICompatible(OpenAICompatibleBackend),
    /// Ollama backend (HTTP API)
    Ollama(OllamaBackend),
    /// Mock backend for testing
    Mock(MockBackend),
}

impl AIClient {
    /// Create a client for the configured backend
    ///
    /// `api_key` is only used by the OpenAI-compatible backend.
    pub fn from_config(config: &NarrativeConfig, api_key: Option<&str>) -> Result<Self> {
        let http_client = http_client(config.timeout)?;
        let options = GenerationOptions::from(config);

        let client = match config.backend {
            NarrativeBackendKind::OpenAI => {
                let mut backend = OpenAICompatibleBackend::with_client(
                    http_client,
                    &config.host,
                    &config.model,
                )
                .with_options(options);
                if let Some(key) = api_key {
                    backend = backend.with_api_key(key);
                }
                AIClient::OpenAICompatible(backend)
            }
            NarrativeBackendKind::Ollama => AIClient::Ollama(
                OllamaBackend::with_client(http_client, &config.host, &config.model)
                    .with_options(options),
            ),
            NarrativeBackendKind::Mock => AIClient::Mock(MockBackend::new()),
        };

        tracing::debug!(
            backend = %config.backend,
            model = %client.model(),
            host = %client.host(),
            "Configured narrative backend"
        );
        Ok(client)
    }

    /// Create a mock backend for testing
    pub fn mock() -> Self {
        AIClient::Mock(MockBackend::new())
    }

    /// Short backend name for status output
    pub fn backend_name(&self) -> &'static str {
        match self {
            AIClient::OpenAICompatible(_) => NarrativeBackendKind::OpenAI.as_str(),
            AIClient::Ollama(_) => NarrativeBackendKind::Ollama.as_str(),
            AIClient::Mock(_) => NarrativeBackendKind::Mock.as_str(),
        }
    }
}

// Implement AIBackend for AIClient by delegating to the inner backend
#[async_trait]
impl AIBackend for AIClient {
    async fn generate_narrative(&self, prompt: &NarrativePrompt) -> Result<String> {
        match self {
            AIClient::OpenAICompatible(b) => b.generate_narrative(prompt).await,
            AIClient::Ollama(b) => b.generate_narrative(prompt).await,
            AIClient::Mock(b) => b.generate_narrative(prompt).await,
        }
    }

    async fn health_check(&self) -> bool {
        match self {
            AIClient::OpenAICompatible(b) => b.health_check().await,
            AIClient::Ollama(b) => b.health_check().await,
            AIClient::Mock(b) => b.health_check().await,
        }
    }

    fn model(&self) -> &str {
        match self {
            AIClient::OpenAICompatible(b) => b.model(),
            AIClient::Ollama(b) => b.model(),
            AIClient::Mock(b) => b.model(),
        }
    }

    fn host(&self) -> &str {
        match self {
            AIClient::OpenAICompatible(b) => b.host(),
            AIClient::Ollama(b) => b.host(),
            AIClient::Mock(b) => b.host(),
        }
    }
}

/// HTTP client with a whole-request timeout
pub(crate) fn http_client(timeout: Duration) -> Result<Client> {
    Ok(Client::builder().timeout(timeout).build()?)
}
