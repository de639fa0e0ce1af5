//! Application state - shared across all handlers.

use std::sync::Arc;

use petmatch_core::ports::{PasswordHasher, ResetMailer, RevocationStore, TokenCodec,
    UserDirectory};
use petmatch_core::service::CredentialService;
use petmatch_infra::{Argon2PasswordHasher, InMemoryRevocationStore, InMemoryUserDirectory,
    JwtTokenCodec, LogResetMailer, ResetLink, WebhookResetMailer};

use crate::config::AppConfig;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub credentials: Arc<CredentialService>,
}

impl AppState {
    /// Build the application state with appropriate implementations.
    pub async fn new(config: &AppConfig) -> Self {
        let directory = Self::directory(config).await;
        let revocation = Self::revocation(config).await;

        let hasher: Arc<dyn PasswordHasher> = Arc::new(Argon2PasswordHasher::new());
        let codec: Arc<dyn TokenCodec> = Arc::new(JwtTokenCodec::from_env());

        let link = ResetLink::from_env();
        let mailer: Arc<dyn ResetMailer> = match &config.mail_webhook_url {
            Some(url) => Arc::new(WebhookResetMailer::new(url.clone(), link)),
            None => {
                tracing::info!("MAIL_WEBHOOK_URL not set. Reset emails are logged, not sent.");
                Arc::new(LogResetMailer::new(link))
            }
        };

        let credentials = Arc::new(CredentialService::new(
            directory, revocation, hasher, codec, mailer,
        ));

        tracing::info!("Application state initialized");

        Self { credentials }
    }

    #[cfg(feature = "postgres")]
    async fn directory(config: &AppConfig) -> Arc<dyn UserDirectory> {
        use petmatch_infra::{DatabaseConfig, PostgresUserDirectory};

        let Some(url) = &config.database_url else {
            tracing::warn!("DATABASE_URL not set. Running with the in-memory user directory.");
            return Arc::new(InMemoryUserDirectory::new());
        };

        let db_config = DatabaseConfig {
            url: url.clone(),
            max_connections: config.db_max_connections,
            min_connections: config.db_min_connections,
        };

        match db_config.connect().await {
            Ok(conn) => Arc::new(PostgresUserDirectory::new(conn)),
            Err(e) => {
                tracing::error!(
                    "Failed to connect to database: {}. Using in-memory fallback.",
                    e
                );
                Arc::new(InMemoryUserDirectory::new())
            }
        }
    }

    #[cfg(not(feature = "postgres"))]
    async fn directory(_config: &AppConfig) -> Arc<dyn UserDirectory> {
        tracing::info!("Running without postgres feature - using in-memory user directory");
        Arc::new(InMemoryUserDirectory::new())
    }

    #[cfg(feature = "redis")]
    async fn revocation(config: &AppConfig) -> Arc<dyn RevocationStore> {
        use petmatch_infra::RedisRevocationStore;

        if config.redis_url.is_none() {
            tracing::warn!("REDIS_URL not set. Running with the in-memory revocation store.");
            return Arc::new(InMemoryRevocationStore::new());
        }

        match RedisRevocationStore::from_env().await {
            Ok(store) => Arc::new(store),
            Err(e) => {
                tracing::error!(
                    "Failed to connect to Redis: {}. Using in-memory fallback.",
                    e
                );
                Arc::new(InMemoryRevocationStore::new())
            }
        }
    }

    #[cfg(not(feature = "redis"))]
    async fn revocation(_config: &AppConfig) -> Arc<dyn RevocationStore> {
        tracing::info!("Running without redis feature - using in-memory revocation store");
        Arc::new(InMemoryRevocationStore::new())
    }

    /// Fully in-memory state for tests.
    #[cfg(test)]
    pub fn in_memory() -> Self {
        use petmatch_infra::JwtConfig;

        let credentials = Arc::new(CredentialService::new(
            Arc::new(InMemoryUserDirectory::new()),
            Arc::new(InMemoryRevocationStore::new()),
            Arc::new(Argon2PasswordHasher::new()),
            Arc::new(JwtTokenCodec::new(JwtConfig {
                secret: "test-secret-key".to_string(),
                ..JwtConfig::default()
            })),
            Arc::new(LogResetMailer::new(ResetLink::new(
                "http://localhost:3000",
                "reset-password",
            ))),
        ));

        Self { credentials }
    }
}
