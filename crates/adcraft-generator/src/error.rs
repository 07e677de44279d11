use thiserror::Error;

/// Every way a generation request can fail.
///
/// Nothing in this crate substitutes placeholder copy for a failure; each
/// variant reaches the caller so the user sees what actually went wrong.
#[derive(Debug, Error)]
pub enum GenerationError {
    /// The selected provider has no API key configured.
    #[error("{provider} is not configured: {env_var} is not set")]
    Configuration { provider: String, env_var: String },

    /// HTTP 401 from the provider.
    #[error("{provider} rejected the API credentials (HTTP 401)")]
    Authentication { provider: String },

    /// HTTP 429 from the provider.
    #[error("{provider} rate limit exceeded (HTTP 429)")]
    RateLimited {
        provider: String,
        retry_after_secs: Option<u64>,
    },

    /// HTTP 5xx from the provider.
    #[error("{provider} is temporarily unavailable (HTTP {status})")]
    ProviderUnavailable { provider: String, status: u16 },

    /// Any other non-2xx status.
    #[error("{provider} returned unexpected HTTP status {status}")]
    UnexpectedStatus { provider: String, status: u16 },

    /// 2xx response whose body lacks the completion fields.
    #[error("{provider} returned an invalid response: {detail}")]
    InvalidResponseShape { provider: String, detail: String },

    /// The completion text is not the JSON document the prompt asked for.
    #[error("generated content is malformed: {reason}")]
    MalformedContent { reason: String },

    /// Transport failure before any HTTP response arrived.
    #[error("network error talking to {provider}: {source}")]
    Network {
        provider: String,
        #[source]
        source: reqwest::Error,
    },

    /// The caller supplied an unusable prompt or profile.
    #[error("invalid input: {0}")]
    InvalidInput(String),
}

impl GenerationError {
    /// Short message suitable for showing to the end user.
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            GenerationError::Configuration { .. } => {
                "AI service configuration error - the API key is missing.".to_string()
            }
            GenerationError::Authentication { .. } => {
                "AI service authentication failed - please contact support.".to_string()
            }
            GenerationError::RateLimited {
                retry_after_secs: Some(secs),
                ..
            } => format!("AI service is busy - please try again in {secs} seconds."),
            GenerationError::RateLimited { .. } => {
                "AI service is busy - please try again shortly.".to_string()
            }
            GenerationError::ProviderUnavailable { .. } => {
                "AI service is temporarily unavailable - please try again later.".to_string()
            }
            GenerationError::UnexpectedStatus { status, .. } => {
                format!("AI service error (HTTP {status}) - please try again.")
            }
            GenerationError::InvalidResponseShape { .. } => {
                "AI service returned an invalid response - please try again.".to_string()
            }
            GenerationError::MalformedContent { .. } => {
                "AI service returned malformed content - please try again.".to_string()
            }
            GenerationError::Network { .. } => {
                "Could not reach the AI service - check your connection and try again."
                    .to_string()
            }
            GenerationError::InvalidInput(reason) => format!("Please check your details: {reason}."),
        }
    }

    /// Whether a caller may reasonably retry the same request by hand.
    ///
    /// The gateway itself never retries.
    #[must_use]
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            GenerationError::RateLimited { .. }
                | GenerationError::ProviderUnavailable { .. }
                | GenerationError::Network { .. }
                | GenerationError::MalformedContent { .. }
        )
    }

    pub(crate) fn malformed(reason: impl Into<String>) -> Self {
        GenerationError::MalformedContent {
            reason: reason.into(),
        }
    }
}
