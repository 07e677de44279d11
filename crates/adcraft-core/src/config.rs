use crate::app_config::{AppConfig, Environment, LlmProviderKind};
use crate::ConfigError;

/// Load application configuration from environment variables.
///
/// Calls `dotenvy::dotenv().ok()` to load `.env` files before reading env vars.
///
/// # Errors
///
/// Returns `ConfigError` if values are present but invalid.
pub fn load_app_config() -> Result<AppConfig, ConfigError> {
    dotenvy::dotenv().ok();
    load_app_config_from_env()
}

/// Load application configuration from environment variables already in the process.
///
/// Unlike [`load_app_config`], this does NOT load `.env` files.
///
/// # Errors
///
/// Returns `ConfigError` if values are present but invalid.
pub fn load_app_config_from_env() -> Result<AppConfig, ConfigError> {
    build_app_config(|key| std::env::var(key))
}

/// Build application configuration using the provided env-var lookup function.
///
/// Provider API keys are optional here. A missing key for the selected
/// provider is reported by the generation gateway when it is constructed, so
/// the rest of the application (listing or deleting records) still works
/// without one.
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    let optional = |var: &str| -> Option<String> {
        lookup(var).ok().filter(|v| !v.trim().is_empty())
    };

    let or_default = |var: &str, default: &str| -> String {
        lookup(var).unwrap_or_else(|_| default.to_string())
    };

    let parse_u32 = |var: &str, default: &str| -> Result<u32, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<u32>().map_err(|e| ConfigError::InvalidEnvVar {
            var: var.to_string(),
            reason: e.to_string(),
        })
    };

    let parse_u64 = |var: &str, default: &str| -> Result<u64, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<u64>().map_err(|e| ConfigError::InvalidEnvVar {
            var: var.to_string(),
            reason: e.to_string(),
        })
    };

    let env = parse_environment(&or_default("ADCRAFT_ENV", "development"))?;
    let log_level = or_default("ADCRAFT_LOG_LEVEL", "info");
    let llm_provider = parse_provider(&or_default("ADCRAFT_LLM_PROVIDER", "gemini"))?;
    let llm_user_agent = or_default("ADCRAFT_LLM_USER_AGENT", "adcraft/0.1 (content-generation)");

    let db_max_connections = parse_u32("ADCRAFT_DB_MAX_CONNECTIONS", "5")?;
    let db_min_connections = parse_u32("ADCRAFT_DB_MIN_CONNECTIONS", "1")?;
    let db_acquire_timeout_secs = parse_u64("ADCRAFT_DB_ACQUIRE_TIMEOUT_SECS", "10")?;

    if db_min_connections > db_max_connections {
        return Err(ConfigError::InvalidEnvVar {
            var: "ADCRAFT_DB_MIN_CONNECTIONS".to_string(),
            reason: format!(
                "min connections ({db_min_connections}) exceeds max connections ({db_max_connections})"
            ),
        });
    }

    Ok(AppConfig {
        env,
        log_level,
        llm_provider,
        gemini_api_key: optional("GEMINI_API_KEY"),
        anthropic_api_key: optional("ANTHROPIC_API_KEY"),
        openai_api_key: optional("OPENAI_API_KEY"),
        llm_user_agent,
        database_url: optional("DATABASE_URL"),
        db_max_connections,
        db_min_connections,
        db_acquire_timeout_secs,
    })
}

fn parse_environment(s: &str) -> Result<Environment, ConfigError> {
    match s {
        "development" => Ok(Environment::Development),
        "test" => Ok(Environment::Test),
        "production" => Ok(Environment::Production),
        other => Err(ConfigError::InvalidEnvVar {
            var: "ADCRAFT_ENV".to_string(),
            reason: format!("unknown environment '{other}'"),
        }),
    }
}

fn parse_provider(s: &str) -> Result<LlmProviderKind, ConfigError> {
    match s.trim().to_ascii_lowercase().as_str() {
        "gemini" => Ok(LlmProviderKind::Gemini),
        "anthropic" | "claude" => Ok(LlmProviderKind::Anthropic),
        "openai" => Ok(LlmProviderKind::OpenAi),
        other => Err(ConfigError::InvalidEnvVar {
            var: "ADCRAFT_LLM_PROVIDER".to_string(),
            reason: format!("unknown provider '{other}' (expected gemini, anthropic or openai)"),
        }),
    }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
