//! Completion provider adapters.
//!
//! Each adapter knows one vendor's request body, auth header and response
//! shape, and reduces a call to `complete(prompt) -> text`. HTTP status
//! classification is shared so every provider maps failures onto the same
//! [`GenerationError`] variants.

mod anthropic;
mod gemini;
mod openai;

use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, StatusCode};
use serde_json::Value;

use crate::error::GenerationError;

pub use anthropic::AnthropicProvider;
pub use gemini::GeminiProvider;
pub use openai::OpenAiProvider;

/// Sampling temperature used by every adapter.
pub const TEMPERATURE: f32 = 0.7;

/// Longest error body excerpt written to the log.
const MAX_LOGGED_BODY_CHARS: usize = 500;

/// A single-shot text completion backend.
#[async_trait]
pub trait CompletionProvider: Send + Sync {
    /// Provider identifier, e.g. `"gemini"`.
    fn name(&self) -> &str;

    /// Fixed model identifier sent with every request.
    fn model(&self) -> &str;

    /// Send `prompt` and return the raw completion text.
    async fn complete(&self, prompt: &str) -> Result<String, GenerationError>;
}

/// Build the shared `reqwest` client.
///
/// No request deadline is configured; the client defaults apply.
pub(crate) fn build_http_client(provider: &str, user_agent: &str) -> Result<Client, GenerationError> {
    Client::builder()
        .user_agent(user_agent)
        .build()
        .map_err(|source| GenerationError::Network {
            provider: provider.to_owned(),
            source,
        })
}

/// Normalise a base URL so path segments can be appended with a single `/`.
pub(crate) fn normalise_base_url(base_url: &str) -> String {
    base_url.trim_end_matches('/').to_owned()
}

/// Send a prepared request and return the JSON body of a 2xx response.
///
/// # Errors
///
/// - [`GenerationError::Network`] if no response arrives.
/// - A status-specific variant for non-2xx responses (see [`classify_status`]).
/// - [`GenerationError::InvalidResponseShape`] if a 2xx body is not JSON.
pub(crate) async fn send_json(provider: &str, request: RequestBuilder) -> Result<Value, GenerationError> {
    let response = request
        .send()
        .await
        .map_err(|source| GenerationError::Network {
            provider: provider.to_owned(),
            source,
        })?;

    let status = response.status();
    if !status.is_success() {
        let retry_after_secs = response
            .headers()
            .get(reqwest::header::RETRY_AFTER)
            .and_then(|v| v.to_str().ok())
            .and_then(|s| s.trim().parse::<u64>().ok());
        let body = response.text().await.unwrap_or_default();
        tracing::warn!(
            provider,
            status = status.as_u16(),
            body = %truncate(&body, MAX_LOGGED_BODY_CHARS),
            "completion request failed"
        );
        return Err(classify_status(provider, status, retry_after_secs));
    }

    let body = response
        .text()
        .await
        .map_err(|source| GenerationError::Network {
            provider: provider.to_owned(),
            source,
        })?;

    serde_json::from_str(&body).map_err(|e| GenerationError::InvalidResponseShape {
        provider: provider.to_owned(),
        detail: format!("body is not JSON: {e}"),
    })
}

/// Map a non-2xx status onto the failure taxonomy.
///
/// 401 is an authentication failure, 429 a rate limit, 5xx an outage.
/// Everything else (400, 403, 404, ...) is reported with its raw status.
pub(crate) fn classify_status(
    provider: &str,
    status: StatusCode,
    retry_after_secs: Option<u64>,
) -> GenerationError {
    let provider = provider.to_owned();
    match status {
        StatusCode::UNAUTHORIZED => GenerationError::Authentication { provider },
        StatusCode::TOO_MANY_REQUESTS => GenerationError::RateLimited {
            provider,
            retry_after_secs,
        },
        s if s.is_server_error() => GenerationError::ProviderUnavailable {
            provider,
            status: s.as_u16(),
        },
        s => GenerationError::UnexpectedStatus {
            provider,
            status: s.as_u16(),
        },
    }
}

/// Pull a non-empty completion string out of a response body via a JSON pointer.
///
/// # Errors
///
/// Returns [`GenerationError::InvalidResponseShape`] if the pointer does not
/// resolve to a string, or the string is blank.
pub(crate) fn completion_text(
    provider: &str,
    body: &Value,
    pointer: &str,
) -> Result<String, GenerationError> {
    match body.pointer(pointer).and_then(Value::as_str) {
        Some(text) if !text.trim().is_empty() => Ok(text.to_owned()),
        Some(_) => Err(GenerationError::InvalidResponseShape {
            provider: provider.to_owned(),
            detail: format!("completion at {pointer} is empty"),
        }),
        None => Err(GenerationError::InvalidResponseShape {
            provider: provider.to_owned(),
            detail: format!("missing {pointer}"),
        }),
    }
}

fn truncate(s: &str, max_chars: usize) -> &str {
    match s.char_indices().nth(max_chars) {
        Some((idx, _)) => &s[..idx],
        None => s,
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn status_401_is_authentication() {
        let err = classify_status("gemini", StatusCode::UNAUTHORIZED, None);
        assert!(matches!(err, GenerationError::Authentication { .. }));
    }

    #[test]
    fn status_429_is_rate_limited_with_hint() {
        let err = classify_status("gemini", StatusCode::TOO_MANY_REQUESTS, Some(30));
        assert!(matches!(
            err,
            GenerationError::RateLimited {
                retry_after_secs: Some(30),
                ..
            }
        ));
    }

    #[test]
    fn status_5xx_is_provider_unavailable() {
        for code in [500, 502, 503, 504] {
            let status = StatusCode::from_u16(code).unwrap();
            let err = classify_status("openai", status, None);
            assert!(
                matches!(err, GenerationError::ProviderUnavailable { status, .. } if status == code),
                "expected ProviderUnavailable for {code}, got {err:?}"
            );
        }
    }

    #[test]
    fn other_statuses_are_unexpected() {
        let err = classify_status("anthropic", StatusCode::FORBIDDEN, None);
        assert!(matches!(
            err,
            GenerationError::UnexpectedStatus { status: 403, .. }
        ));
    }

    #[test]
    fn completion_text_reads_pointer() {
        let body = json!({ "content": [{ "text": "hello" }] });
        assert_eq!(
            completion_text("anthropic", &body, "/content/0/text").unwrap(),
            "hello"
        );
    }

    #[test]
    fn completion_text_missing_is_invalid_shape() {
        let body = json!({ "content": [] });
        let err = completion_text("anthropic", &body, "/content/0/text").unwrap_err();
        assert!(matches!(err, GenerationError::InvalidResponseShape { .. }));
    }

    #[test]
    fn completion_text_blank_is_invalid_shape() {
        let body = json!({ "content": [{ "text": "  " }] });
        let err = completion_text("anthropic", &body, "/content/0/text").unwrap_err();
        assert!(matches!(err, GenerationError::InvalidResponseShape { .. }));
    }

    #[test]
    fn truncate_respects_char_boundaries() {
        assert_eq!(truncate("héllo", 2), "hé");
        assert_eq!(truncate("abc", 10), "abc");
    }

    #[test]
    fn base_url_trailing_slashes_are_removed() {
        assert_eq!(normalise_base_url("http://localhost:8080//"), "http://localhost:8080");
    }
}
