//! Ollama backend implementation
//!
//! HTTP client for the Ollama generate API. The system prompt travels in the
//! request's `system` field instead of being concatenated into the prompt.

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{Error, Result};
use crate::prompts::NarrativePrompt;

use super::{AIBackend, GenerationOptions};

const SERVICE: &str = "Ollama";

/// Ollama backend
#[derive(Clone)]
pub struct OllamaBackend {
    http_client: Client,
    base_url: String,
    default_model: String,
    options: GenerationOptions,
}

impl OllamaBackend {
    /// Create a new Ollama backend
    pub fn new(base_url: &str, default_model: &str) -> Self {
        Self::with_client(Client::new(), base_url, default_model)
    }

    /// Create with a preconfigured HTTP client (timeouts)
    pub fn with_client(http_client: Client, base_url: &str, default_model: &str) -> Self {
        Self {
            http_client,
            base_url: base_url.trim_end_matches('/').to_string(),
            default_model: default_model.to_string(),
            options: GenerationOptions::default(),
        }
    }

    pub fn with_options(mut self, options: GenerationOptions) -> Self {
        self.options = options;
        self
    }
}

/// Request to Ollama API
#[derive(Debug, Serialize)]
struct OllamaRequest {
    model: String,
    prompt: String,
    system: String,
    stream: bool,
    options: OllamaOptions,
}

#[derive(Debug, Serialize)]
struct OllamaOptions {
    num_predict: u32,
    temperature: f32,
}

/// Response from Ollama API
#[derive(Debug, Deserialize)]
struct OllamaResponse {
    response: String,
}

#[async_trait]
impl AIBackend for OllamaBackend {
    async fn generate_narrative(&self, prompt: &NarrativePrompt) -> Result<String> {
        let request = OllamaRequest {
            model: self.default_model.clone(),
            prompt: prompt.user.clone(),
            system: prompt.system.clone(),
            stream: false,
            options: OllamaOptions {
                num_predict: self.options.max_tokens,
                temperature: self.options.temperature,
            },
        };

        let response = self
            .http_client
            .post(format!("{}/api/generate", self.base_url))
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

        let ollama_response: OllamaResponse = response.json().await?;
        debug!(
            chars = ollama_response.response.len(),
            model = %self.default_model,
            "Ollama narrative response"
        );

        Ok(ollama_response.response)
    }

    async fn health_check(&self) -> bool {
        match self
            .http_client
            .get(format!("{}/api/tags", self.base_url))
            .send()
            .await
        {
            Ok(resp) => resp.status().is_success(),
            Err(_) => false,
        }
    }

    fn model(&self) -> &str {
        &self.default_model
    }

    fn host(&self) -> &str {
        &self.base_url
    }
}
