//! Google Gemini `generateContent` adapter.

use async_trait::async_trait;
use reqwest::Client;
use serde::Serialize;

use super::{
    build_http_client, completion_text, normalise_base_url, send_json, CompletionProvider,
    TEMPERATURE,
};
use crate::error::GenerationError;

const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com";
const MODEL: &str = "gemini-pro";
const MAX_OUTPUT_TOKENS: u32 = 2048;
const COMPLETION_POINTER: &str = "/candidates/0/content/parts/0/text";

const SAFETY_CATEGORIES: [&str; 4] = [
    "HARM_CATEGORY_HARASSMENT",
    "HARM_CATEGORY_HATE_SPEECH",
    "HARM_CATEGORY_SEXUALLY_EXPLICIT",
    "HARM_CATEGORY_DANGEROUS_CONTENT",
];

pub struct GeminiProvider {
    client: Client,
    api_key: String,
    endpoint: String,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentRequest<'a> {
    contents: [Content<'a>; 1],
    generation_config: GenerationConfig,
    safety_settings: Vec<SafetySetting>,
}

#[derive(Serialize)]
struct Content<'a> {
    parts: [Part<'a>; 1],
}

#[derive(Serialize)]
struct Part<'a> {
    text: &'a str,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig {
    temperature: f32,
    top_k: u32,
    top_p: f32,
    max_output_tokens: u32,
}

#[derive(Serialize)]
struct SafetySetting {
    category: &'static str,
    threshold: &'static str,
}

impl GeminiProvider {
    /// Creates an adapter pointed at the production Gemini API.
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
            client: build_http_client("gemini", user_agent)?,
            api_key: api_key.to_owned(),
            endpoint: format!(
                "{}/v1beta/models/{MODEL}:generateContent",
                normalise_base_url(base_url)
            ),
        })
    }

    fn request_body(prompt: &str) -> GenerateContentRequest<'_> {
        GenerateContentRequest {
            contents: [Content {
                parts: [Part { text: prompt }],
            }],
            generation_config: GenerationConfig {
                temperature: TEMPERATURE,
                top_k: 1,
                top_p: 1.0,
                max_output_tokens: MAX_OUTPUT_TOKENS,
            },
            safety_settings: SAFETY_CATEGORIES
                .iter()
                .map(|&category| SafetySetting {
                    category,
                    threshold: "BLOCK_MEDIUM_AND_ABOVE",
                })
                .collect(),
        }
    }
}

#[async_trait]
impl CompletionProvider for GeminiProvider {
    fn name(&self) -> &str {
        "gemini"
    }

    fn model(&self) -> &str {
        MODEL
    }

    async fn complete(&self, prompt: &str) -> Result<String, GenerationError> {
        // The key travels as a query parameter, so the URL is never logged.
        let request = self
            .client
            .post(&self.endpoint)
            .query(&[("key", self.api_key.as_str())])
            .json(&Self::request_body(prompt));

        let body = send_json(self.name(), request).await?;
        completion_text(self.name(), &body, COMPLETION_POINTER)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn request_body_uses_bounded_sampling_settings() {
        let body = serde_json::to_value(GeminiProvider::request_body("hi")).unwrap();
        assert_eq!(body["contents"][0]["parts"][0]["text"], "hi");
        assert_eq!(body["generationConfig"]["maxOutputTokens"], 2048);
        assert_eq!(body["generationConfig"]["topK"], 1);
        assert_eq!(body["safetySettings"].as_array().unwrap().len(), 4);
        assert_eq!(
            body["safetySettings"][0]["threshold"],
            "BLOCK_MEDIUM_AND_ABOVE"
        );
    }

    #[test]
    fn endpoint_includes_model() {
        let provider =
            GeminiProvider::with_base_url("k", "ua", "http://localhost:9999/").unwrap();
        assert_eq!(
            provider.endpoint,
            "http://localhost:9999/v1beta/models/gemini-pro:generateContent"
        );
    }
}
