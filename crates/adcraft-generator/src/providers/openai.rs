//! `OpenAI` Chat Completions adapter.

use async_trait::async_trait;
use reqwest::Client;
use serde::Serialize;

use super::{
    build_http_client, completion_text, normalise_base_url, send_json, CompletionProvider,
    TEMPERATURE,
};
use crate::error::GenerationError;

const DEFAULT_BASE_URL: &str = "https://api.openai.com";
const MODEL: &str = "gpt-4o-mini";
const MAX_TOKENS: u32 = 1000;
const COMPLETION_POINTER: &str = "/choices/0/message/content";

pub struct OpenAiProvider {
    client: Client,
    api_key: String,
    endpoint: String,
}

#[derive(Serialize)]
struct ChatRequest<'a> {
    model: &'static str,
    max_tokens: u32,
    temperature: f32,
    messages: [ChatMessage<'a>; 1],
}

#[derive(Serialize)]
struct ChatMessage<'a> {
    role: &'static str,
    content: &'a str,
}

impl OpenAiProvider {
    /// Creates an adapter pointed at the production `OpenAI` API.
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
            client: build_http_client("openai", user_agent)?,
            api_key: api_key.to_owned(),
            endpoint: format!("{}/v1/chat/completions", normalise_base_url(base_url)),
        })
    }
}

#[async_trait]
impl CompletionProvider for OpenAiProvider {
    fn name(&self) -> &str {
        "openai"
    }

    fn model(&self) -> &str {
        MODEL
    }

    async fn complete(&self, prompt: &str) -> Result<String, GenerationError> {
        let payload = ChatRequest {
            model: MODEL,
            max_tokens: MAX_TOKENS,
            temperature: TEMPERATURE,
            messages: [ChatMessage {
                role: "user",
                content: prompt,
            }],
        };

        let request = self
            .client
            .post(&self.endpoint)
            .bearer_auth(&self.api_key)
            .json(&payload);

        let body = send_json(self.name(), request).await?;
        completion_text(self.name(), &body, COMPLETION_POINTER)
    }
}
