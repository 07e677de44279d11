//! The generation gateway: one provider call, one parsed JSON answer.

use std::sync::Arc;

use adcraft_core::{AppConfig, LlmProviderKind};
use serde::de::DeserializeOwned;

use crate::error::GenerationError;
use crate::extract::parse_completion;
use crate::providers::{AnthropicProvider, CompletionProvider, GeminiProvider, OpenAiProvider};

/// Sends prompts to a single configured provider and parses the answer.
///
/// The gateway performs exactly one provider request per call. It does not
/// retry, cache or substitute fallback content; every failure is returned
/// as a typed [`GenerationError`].
#[derive(Clone)]
pub struct GenerationGateway {
    provider: Arc<dyn CompletionProvider>,
}

impl std::fmt::Debug for GenerationGateway {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GenerationGateway")
            .field("provider", &self.provider.name())
            .field("model", &self.provider.model())
            .finish()
    }
}

impl GenerationGateway {
    #[must_use]
    pub fn new(provider: Arc<dyn CompletionProvider>) -> Self {
        Self { provider }
    }

    /// Build the gateway for the provider selected in `config`.
    ///
    /// # Errors
    ///
    /// - [`GenerationError::Configuration`] if the provider's API key is unset.
    /// - [`GenerationError::Network`] if the HTTP client cannot be built.
    pub fn from_config(config: &AppConfig) -> Result<Self, GenerationError> {
        let kind = config.llm_provider;
        let api_key = config
            .llm_api_key()
            .ok_or_else(|| GenerationError::Configuration {
                provider: kind.to_string(),
                env_var: kind.api_key_var().to_owned(),
            })?;
        let user_agent = config.llm_user_agent.as_str();

        let provider: Arc<dyn CompletionProvider> = match kind {
            LlmProviderKind::Gemini => Arc::new(GeminiProvider::new(api_key, user_agent)?),
            LlmProviderKind::Anthropic => Arc::new(AnthropicProvider::new(api_key, user_agent)?),
            LlmProviderKind::OpenAi => Arc::new(OpenAiProvider::new(api_key, user_agent)?),
        };

        tracing::debug!(provider = provider.name(), model = provider.model(), "generation gateway ready");
        Ok(Self::new(provider))
    }

    #[must_use]
    pub fn provider_name(&self) -> &str {
        self.provider.name()
    }

    #[must_use]
    pub fn model(&self) -> &str {
        self.provider.model()
    }

    /// Send `prompt` and parse the first JSON object in the completion as `T`.
    ///
    /// # Errors
    ///
    /// - [`GenerationError::InvalidInput`] if `prompt` is blank.
    /// - Any provider error (see [`CompletionProvider::complete`]).
    /// - [`GenerationError::MalformedContent`] if the completion holds no
    ///   JSON object or the object does not match `T`.
    pub async fn complete_json<T: DeserializeOwned>(&self, prompt: &str) -> Result<T, GenerationError> {
        if prompt.trim().is_empty() {
            return Err(GenerationError::InvalidInput("prompt is empty".to_owned()));
        }

        let text = self.provider.complete(prompt).await?;
        tracing::debug!(
            provider = self.provider.name(),
            completion_len = text.len(),
            "received completion"
        );

        parse_completion(&text).inspect_err(|e| {
            tracing::warn!(provider = self.provider.name(), error = %e, "completion could not be parsed");
        })
    }
}
