//! Groq chat-completions client.
//!
//! Implements the ChatClient trait against Groq's OpenAI-compatible API.
//! One request per question, no retries: a failed call is terminal for the
//! question, and the caller sees the raw status and body.

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::debug;
use url::Url;

use crate::error::{Result, Talk2DataError};
use crate::llm::types::Message;
use crate::llm::ChatClient;

/// Groq chat-completions endpoint.
const GROQ_API_URL: &str = "https://api.groq.com/openai/v1/chat/completions";

/// Default model identifier.
const DEFAULT_MODEL: &str = "llama-3.3-70b-versatile";

/// Groq client configuration.
#[derive(Debug, Clone)]
pub struct GroqConfig {
    /// Bearer credential for authentication.
    pub api_key: String,
    /// Model identifier sent with each request.
    pub model: String,
    /// Chat-completions endpoint URL.
    pub api_url: String,
}

impl GroqConfig {
    /// Creates a new config with the given API key and model.
    pub fn new(api_key: impl Into<String>, model: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            model: model.into(),
            api_url: GROQ_API_URL.to_string(),
        }
    }

    /// Overrides the endpoint URL. The URL is validated at client creation.
    pub fn with_api_url(mut self, api_url: impl Into<String>) -> Self {
        self.api_url = api_url.into();
        self
    }
}

/// Groq chat-completions client.
#[derive(Debug, Clone)]
pub struct GroqClient {
    config: GroqConfig,
    client: Client,
}

impl GroqClient {
    /// Creates a new Groq client with the given configuration.
    ///
    /// No request timeout is configured; the call blocks until the API
    /// responds or the transport fails.
    pub fn new(config: GroqConfig) -> Result<Self> {
        Url::parse(&config.api_url)
            .map_err(|e| Talk2DataError::config(format!("Invalid API URL: {e}")))?;

        let client = Client::builder()
            .build()
            .map_err(|e| Talk2DataError::transport(format!("Failed to create HTTP client: {e}")))?;

        Ok(Self { config, client })
    }

    /// Creates a client from environment variables.
    ///
    /// Reads `GROQ_API_KEY` for the credential. Optionally reads
    /// `GROQ_MODEL` and `GROQ_API_URL`.
    pub fn from_env() -> Result<Self> {
        let api_key = std::env::var("GROQ_API_KEY")
            .map_err(|_| Talk2DataError::config("GROQ_API_KEY environment variable not set"))?;

        let model = std::env::var("GROQ_MODEL").unwrap_or_else(|_| DEFAULT_MODEL.to_string());

        let mut config = GroqConfig::new(api_key, model);
        if let Ok(api_url) = std::env::var("GROQ_API_URL") {
            config = config.with_api_url(api_url);
        }

        Self::new(config)
    }

    /// Converts internal messages to the wire format.
    fn convert_messages(messages: &[Message]) -> Vec<ChatMessage> {
        messages
            .iter()
            .map(|m| ChatMessage {
                role: m.role.as_str().to_string(),
                content: m.content.clone(),
            })
            .collect()
    }
}

#[async_trait]
impl ChatClient for GroqClient {
    async fn complete(&self, messages: &[Message]) -> Result<String> {
        let request = ChatRequest {
            model: self.config.model.clone(),
            messages: Self::convert_messages(messages),
        };

        debug!("Chat request to {} ({})", self.config.api_url, self.config.model);

        let response = self
            .client
            .post(&self.config.api_url)
            .header("Authorization", format!("Bearer {}", self.config.api_key))
            .header("Content-Type", "application/json")
            .json(&request)
            .send()
            .await
            .map_err(|e| Talk2DataError::transport(format!("Request failed: {e}")))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| Talk2DataError::transport(format!("Failed to read response: {e}")))?;

        if !status.is_success() {
            return Err(Talk2DataError::transport(format!(
                "{} - {}",
                status.as_u16(),
                body
            )));
        }

        let response: ChatResponse = serde_json::from_str(&body)
            .map_err(|e| Talk2DataError::transport(format!("Failed to parse response: {e}")))?;

        response
            .choices
            .into_iter()
            .next()
            .map(|c| c.message.content)
            .ok_or_else(|| Talk2DataError::transport("No choices in API response"))
    }
}

// Wire types for the OpenAI-compatible chat-completions API.

#[derive(Debug, Serialize)]
struct ChatRequest {
    model: String,
    messages: Vec<ChatMessage>,
}

#[derive(Debug, Serialize, Deserialize)]
struct ChatMessage {
    role: String,
    content: String,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatMessage,
}
