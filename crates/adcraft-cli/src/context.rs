//! Process-wide handles built once at startup and passed to every command.

use std::sync::Arc;

use adcraft_core::AppConfig;
use adcraft_db::DbError;
use adcraft_generator::{GenerationError, GenerationGateway};
use sqlx::PgPool;
use tokio::sync::OnceCell;

/// Configuration, the generation gateway and the database pool.
///
/// Either handle may be unavailable: a missing API key surfaces as a
/// [`GenerationError::Configuration`] on first use, and the pool is only
/// connected (and migrated) when a command first asks for it.
#[derive(Debug, Clone)]
pub(crate) struct AppContext {
    pub(crate) config: Arc<AppConfig>,
    gateway: Option<GenerationGateway>,
    pool: Arc<OnceCell<PgPool>>,
}

impl AppContext {
    /// Build the gateway when a credential is present. No database I/O
    /// happens here.
    ///
    /// # Errors
    ///
    /// Returns an error if the provider's HTTP client cannot be built.
    pub(crate) fn init(config: AppConfig) -> anyhow::Result<Self> {
        let gateway = match GenerationGateway::from_config(&config) {
            Ok(gateway) => Some(gateway),
            Err(GenerationError::Configuration { provider, env_var }) => {
                tracing::warn!(
                    %provider,
                    %env_var,
                    "no API key configured; content generation is unavailable"
                );
                None
            }
            Err(e) => return Err(e.into()),
        };

        Ok(Self {
            config: Arc::new(config),
            gateway,
            pool: Arc::new(OnceCell::new()),
        })
    }

    /// Context with explicit handles and no I/O.
    #[cfg(test)]
    pub(crate) fn from_parts(
        config: AppConfig,
        gateway: Option<GenerationGateway>,
        pool: Option<PgPool>,
    ) -> Self {
        Self {
            config: Arc::new(config),
            gateway,
            pool: Arc::new(OnceCell::new_with(pool)),
        }
    }

    /// The gateway, or the configuration error deferred from startup.
    ///
    /// # Errors
    ///
    /// Returns [`GenerationError::Configuration`] naming the provider's
    /// API-key variable when no gateway was built.
    pub(crate) fn generation_gateway(&self) -> Result<&GenerationGateway, GenerationError> {
        self.gateway
            .as_ref()
            .ok_or_else(|| GenerationError::Configuration {
                provider: self.config.llm_provider.to_string(),
                env_var: self.config.llm_provider.api_key_var().to_owned(),
            })
    }

    /// The database pool, connected and migrated on first call.
    ///
    /// A failed connection is not cached; the next call tries again.
    ///
    /// # Errors
    ///
    /// Returns [`DbError::MissingDatabaseUrl`] when storage is not configured,
    /// or the connection or migration failure.
    pub(crate) async fn pool(&self) -> Result<&PgPool, DbError> {
        self.pool
            .get_or_try_init(|| async {
                let pool = adcraft_db::connect_pool_from_config(&self.config).await?;
                let applied = adcraft_db::run_migrations(&pool).await?;
                tracing::info!(applied, "database ready");
                Ok::<_, DbError>(pool)
            })
            .await
    }
}
