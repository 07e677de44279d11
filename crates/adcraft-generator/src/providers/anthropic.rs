//! Anthropic Messages API adapter.

use async_trait::async_trait;
use reqwest::Client;
use serde::Serialize;

use super::{
    build_http_client, completion_text, normalise_base_url, send_json, CompletionProvider,
    TEMPERATURE,
};
use crate::error::GenerationError;

const DEFAULT_BASE_URL: &str = "https://api.anthropic.com";
const API_VERSION: &str = "2023-06-01";
const MODEL: &str = "claude-3-haiku-20240307";
const MAX_TOKENS: u32 = 1000;
const COMPLETION_POINTER: &str = "/content/0/text";

pub struct AnthropicProvider {
    client: Client,
    api_key: String,
    endpoint: String,
}

#[derive(Serialize)]
struct MessagesRequest<'a> {
    model: &'static str,
    max_tokens: u32,
    temperature: f32,
    messages: [Message<'a>; 1],
}

#[derive(Serialize)]
struct Message<'a> {
    role: &'static str,
    content: &'a str,
}

impl AnthropicProvider {
    /// Creates an adapter pointed at the production Anthropic API.
    ///
    /// # Errors
    ///
    /// Returns [`GenerationError::Network`] if the HTTP client cannot be built.
    pub fn new(api_key: &str, user_agent: &str) -> Result<Self, GenerationError> {
        Self::with_base_url(api_key, user_agent, DEFAULT_BASE_URL)
    }

    /// Creates an adapter with a custom base URL (for testing with wiremock).
    ///
    /// # Errors
    ///
    /// Returns [`GenerationError::Network`] if the HTTP client cannot be built.
    pub fn with_base_url(
        api_key: &str,
        user_agent: &str,
        base_url: &str,
    ) -> Result<Self, GenerationError> {
        Ok(Self {
            client: build_http_client("anthropic", user_agent)?,
            api_key: api_key.to_owned(),
            endpoint: format!("{}/v1/messages", normalise_base_url(base_url)),
        })
    }
}

#[async_trait]
impl CompletionProvider for AnthropicProvider {
    fn name(&self) -> &str {
        "anthropic"
    }

    fn model(&self) -> &str {
        MODEL
    }

    async fn complete(&self, prompt: &str) -> Result<String, GenerationError> {
        let payload = MessagesRequest {
            model: MODEL,
            max_tokens: MAX_TOKENS,
            temperature: TEMPERATURE,
            messages: [Message {
                role: "user",
                content: prompt,
            }],
        };

        let request = self
            .client
            .post(&self.endpoint)
            .header("x-api-key", &self.api_key)
            .header("anthropic-version", API_VERSION)
            .json(&payload);

        let body = send_json(self.name(), request).await?;
        completion_text(self.name(), &body, COMPLETION_POINTER)
    }
}
