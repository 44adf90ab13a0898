//! OpenAI-compatible backend implementation
//!
//! Works with api.openai.com and any server that implements the chat
//! completions API (vLLM, LocalAI, llama-server, Docker Model Runner).

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{Error, Result};
use crate::prompts::NarrativePrompt;

use super::{AIBackend, GenerationOptions};

const SERVICE: &str = "OpenAI";

/// OpenAI-compatible backend
///
/// Sends the system and user prompt as two chat messages to
/// `{host}/v1/chat/completions`. The bearer header is only sent when an
/// API key is configured, so keyless local servers work too.
#[derive(Clone)]
pub struct OpenAICompatibleBackend {
    http_client: Client,
    base_url: String,
    model: String,
    api_key: Option<String>,
    options: GenerationOptions,
}

impl OpenAICompatibleBackend {
    /// Create a new OpenAI-compatible backend
    pub fn new(base_url: &str, model: &str) -> Self {
        Self::with_client(Client::new(), base_url, model)
    }

    /// Create with a preconfigured HTTP client (timeouts)
    pub fn with_client(http_client: Client, base_url: &str, model: &str) -> Self {
        Self {
            http_client,
            base_url: base_url.trim_end_matches('/').to_string(),
            model: model.to_string(),
            api_key: None,
            options: GenerationOptions::default(),
        }
    }

    pub fn with_api_key(mut self, api_key: &str) -> Self {
        self.api_key = Some(api_key.to_string());
        self
    }

    pub fn with_options(mut self, options: GenerationOptions) -> Self {
        self.options = options;
        self
    }

    fn authorize(&self, req: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        match self.api_key {
            Some(ref api_key) => req.header("Authorization", format!("Bearer {}", api_key)),
            None => req,
        }
    }

    /// Make a chat completion request
    async fn chat_completion(&self, messages: Vec<ChatMessage>) -> Result<String> {
        let request = ChatCompletionRequest {
            model: self.model.clone(),
            messages,
            temperature: Some(self.options.temperature),
            max_tokens: Some(self.options.max_tokens),
            stream: false,
        };

        let response = self
            .authorize(
                self.http_client
                    .post(format!("{}/v1/chat/completions", self.base_url)),
            )
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

        let chat_response: ChatCompletionResponse = response.json().await?;

        chat_response
            .choices
            .into_iter()
            .next()
            .map(|c| c.message.content.unwrap_or_default())
            .ok_or_else(|| Error::external(SERVICE, "No choices in response"))
    }
}

/// Chat completion request
#[derive(Debug, Serialize)]
struct ChatCompletionRequest {
    model: String,
    messages: Vec<ChatMessage>,
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    max_tokens: Option<u32>,
    stream: bool,
}

#[derive(Debug, Serialize)]
struct ChatMessage {
    role: String,
    content: String,
}

impl ChatMessage {
    fn system(content: &str) -> Self {
        Self {
            role: "system".to_string(),
            content: content.to_string(),
        }
    }

    fn user(content: &str) -> Self {
        Self {
            role: "user".to_string(),
            content: content.to_string(),
        }
    }
}

#[derive(Debug, Deserialize)]
struct ChatCompletionResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatResponseMessage,
}

#[derive(Debug, Deserialize)]
struct ChatResponseMessage {
    // null when the model refuses or only calls tools
    content: Option<String>,
}

#[async_trait]
impl AIBackend for OpenAICompatibleBackend {
    async fn generate_narrative(&self, prompt: &NarrativePrompt) -> Result<String> {
        let messages = vec![
            ChatMessage::system(&prompt.system),
            ChatMessage::user(&prompt.user),
        ];
        let text = self.chat_completion(messages).await?;
        debug!(chars = text.len(), model = %self.model, "OpenAI narrative response");
        Ok(text)
    }

    async fn health_check(&self) -> bool {
        // Try /v1/models first (standard OpenAI endpoint)
        if let Ok(resp) = self
            .authorize(self.http_client.get(format!("{}/v1/models", self.base_url)))
            .send()
            .await
        {
            if resp.status().is_success() {
                return true;
            }
        }

        // Try /health (common for Docker Model Runner, LocalAI)
        if let Ok(resp) = self
            .http_client
            .get(format!("{}/health", self.base_url))
            .send()
            .await
        {
            if resp.status().is_success() {
                return true;
            }
        }

        false
    }

    fn model(&self) -> &str {
        &self.model
    }

    fn host(&self) -> &str {
        &self.base_url
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_backend_new() {
        let backend = OpenAICompatibleBackend::new("https://api.openai.com", "gpt-4o-mini");
        assert_eq!(backend.model(), "gpt-4o-mini");
        assert_eq!(backend.host(), "https://api.openai.com");
        assert!(backend.api_key.is_none());
    }

    #[test]
    fn test_backend_new_trims_trailing_slash() {
        let backend = OpenAICompatibleBackend::new("http://localhost:12434/", "llama3.2");
        assert_eq!(backend.host(), "http://localhost:12434");
    }

    #[test]
    fn test_backend_with_api_key() {
        let backend =
            OpenAICompatibleBackend::new("https://api.openai.com", "gpt-4o").with_api_key("sk-1");
        assert_eq!(backend.api_key, Some("sk-1".to_string()));
    }

    #[tokio::test]
    async fn test_health_check_unreachable() {
        let backend = OpenAICompatibleBackend::new("http://127.0.0.1:9", "gpt-4o-mini");
        assert!(!backend.health_check().await);
    }

    #[tokio::test]
    async fn test_generate_unreachable_is_error() {
        let backend = OpenAICompatibleBackend::new("http://127.0.0.1:9", "gpt-4o-mini");
        let prompt = NarrativePrompt {
            system: "s".into(),
            user: "u".into(),
        };
        assert!(matches!(
            backend.generate_narrative(&prompt).await,
            Err(Error::Http(_))
        ));
    }

    #[test]
    fn test_chat_completion_request_serialization() {
        let request = ChatCompletionRequest {
            model: "gpt-4o-mini".to_string(),
            messages: vec![ChatMessage::system("coach"), ChatMessage::user("entries")],
            temperature: Some(0.7),
            max_tokens: Some(500),
            stream: false,
        };

        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(json["model"], "gpt-4o-mini");
        assert_eq!(json["messages"][0]["role"], "system");
        assert_eq!(json["messages"][0]["content"], "coach");
        assert_eq!(json["messages"][1]["role"], "user");
        assert_eq!(json["max_tokens"], 500);
        // Use approximate comparison for floating point
        let temp = json["temperature"].as_f64().unwrap();
        assert!((temp - 0.7).abs() < 0.001);
        assert_eq!(json["stream"], false);
    }

    #[test]
    fn test_optional_fields_omitted() {
        let request = ChatCompletionRequest {
            model: "m".to_string(),
            messages: vec![],
            temperature: None,
            max_tokens: None,
            stream: false,
        };
        let json = serde_json::to_value(&request).unwrap();
        assert!(json.get("temperature").is_none());
        assert!(json.get("max_tokens").is_none());
    }

    #[test]
    fn test_chat_completion_response_deserialization() {
        let json = r#"{
            "id": "chatcmpl-123",
            "object": "chat.completion",
            "created": 1677652288,
            "model": "gpt-4o-mini",
            "choices": [{
                "index": 0,
                "message": {
                    "role": "assistant",
                    "content": "Your mood lifts after walks."
                },
                "finish_reason": "stop"
            }]
        }"#;

        let response: ChatCompletionResponse = serde_json::from_str(json).unwrap();
        assert_eq!(response.choices.len(), 1);
        assert_eq!(
            response.choices[0].message.content.as_deref(),
            Some("Your mood lifts after walks.")
        );
    }

    #[test]
    fn test_null_content_deserializes() {
        let json = r#"{"choices": [{"message": {"role": "assistant", "content": null}}]}"#;
        let response: ChatCompletionResponse = serde_json::from_str(json).unwrap();
        assert!(response.choices[0].message.content.is_none());
    }
}
