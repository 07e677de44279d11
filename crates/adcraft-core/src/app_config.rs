#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Environment {
    Development,
    Test,
    Production,
}

impl std::fmt::Display for Environment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Environment::Development => write!(f, "development"),
            Environment::Test => write!(f, "test"),
            Environment::Production => write!(f, "production"),
        }
    }
}

/// Which completion provider the generation gateway talks to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LlmProviderKind {
    Gemini,
    Anthropic,
    OpenAi,
}

impl LlmProviderKind {
    /// Name of the environment variable holding this provider's API key.
    #[must_use]
    pub fn api_key_var(self) -> &'static str {
        match self {
            LlmProviderKind::Gemini => "GEMINI_API_KEY",
            LlmProviderKind::Anthropic => "ANTHROPIC_API_KEY",
            LlmProviderKind::OpenAi => "OPENAI_API_KEY",
        }
    }
}

impl std::fmt::Display for LlmProviderKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LlmProviderKind::Gemini => write!(f, "gemini"),
            LlmProviderKind::Anthropic => write!(f, "anthropic"),
            LlmProviderKind::OpenAi => write!(f, "openai"),
        }
    }
}

#[derive(Clone)]
pub struct AppConfig {
    pub env: Environment,
    pub log_level: String,
    pub llm_provider: LlmProviderKind,
    pub gemini_api_key: Option<String>,
    pub anthropic_api_key: Option<String>,
    pub openai_api_key: Option<String>,
    pub llm_user_agent: String,
    pub database_url: Option<String>,
    pub db_max_connections: u32,
    pub db_min_connections: u32,
    pub db_acquire_timeout_secs: u64,
}

impl AppConfig {
    /// The API key configured for the selected provider, if any.
    #[must_use]
    pub fn llm_api_key(&self) -> Option<&str> {
        let key = match self.llm_provider {
            LlmProviderKind::Gemini => self.gemini_api_key.as_deref(),
            LlmProviderKind::Anthropic => self.anthropic_api_key.as_deref(),
            LlmProviderKind::OpenAi => self.openai_api_key.as_deref(),
        };
        key.filter(|k| !k.trim().is_empty())
    }
}

impl std::fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let redact = |v: &Option<String>| v.as_ref().map(|_| "[redacted]");
        f.debug_struct("AppConfig")
            .field("env", &self.env)
            .field("log_level", &self.log_level)
            .field("llm_provider", &self.llm_provider)
            .field("gemini_api_key", &redact(&self.gemini_api_key))
            .field("anthropic_api_key", &redact(&self.anthropic_api_key))
            .field("openai_api_key", &redact(&self.openai_api_key))
            .field("llm_user_agent", &self.llm_user_agent)
            .field("database_url", &redact(&self.database_url))
            .field("db_max_connections", &self.db_max_connections)
            .field("db_min_connections", &self.db_min_connections)
            .field("db_acquire_timeout_secs", &self.db_acquire_timeout_secs)
            .finish()
    }
}
