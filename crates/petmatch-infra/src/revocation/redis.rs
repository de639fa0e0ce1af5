//! Redis revocation store with connection pooling.

use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use redis::aio::ConnectionManager;
use redis::{AsyncCommands, Client};

use petmatch_core::ports::{RevocationError, RevocationStore};

const KEY_PREFIX: &str = "revoked:";

/// Redis connection configuration.
#[derive(Debug, Clone)]
pub struct RedisConfig {
    /// Redis URL (e.g., redis://localhost:6379)
    pub url: String,
    /// Connection timeout
    pub connect_timeout: Duration,
}

impl Default for RedisConfig {
    fn default() -> Self {
        Self {
            url: "redis://localhost:6379".to_string(),
            connect_timeout: Duration::from_secs(5),
        }
    }
}

impl RedisConfig {
    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        Self {
            url: std::env::var("REDIS_URL")
                .unwrap_or_else(|_| "redis://localhost:6379".to_string()),
            connect_timeout: Duration::from_secs(
                std::env::var("REDIS_CONNECT_TIMEOUT_SECS")
                    .ok()
                    .and_then(|s| s.parse().ok())
                    .unwrap_or(5),
            ),
        }
    }
}

/// Redis-backed revocation store.
///
/// Entries are written with `SET .. EX`, so Redis itself expires them at the
/// token's natural `exp` and the set never grows unbounded. Read failures
/// propagate: a store fault must never be reported as "not revoked".
pub struct RedisRevocationStore {
    conn: ConnectionManager,
}

impl RedisRevocationStore {
    pub async fn new(config: RedisConfig) -> Result<Self, RevocationError> {
        let client = Client::open(config.url.as_str())
            .map_err(|e| RevocationError::Connection(e.to_string()))?;

        // Use timeout to prevent hanging if Redis is unreachable
        let conn_manager_fut = ConnectionManager::new(client);
        let conn = tokio::time::timeout(config.connect_timeout, conn_manager_fut)
            .await
            .map_err(|_| RevocationError::Connection("Connection timed out".to_string()))?
            .map_err(|e| RevocationError::Connection(e.to_string()))?;

        tracing::info!(url = %config.url, "Connected to Redis revocation store");

        Ok(Self { conn })
    }

    /// Create from environment configuration.
    pub async fn from_env() -> Result<Self, RevocationError> {
        Self::new(RedisConfig::from_env()).await
    }

    fn key(token: &str) -> String {
        format!("{KEY_PREFIX}{token}")
    }
}

#[async_trait]
impl RevocationStore for RedisRevocationStore {
    async fn revoke(
        &self,
        token: &str,
        expires_at: DateTime<Utc>,
    ) -> Result<(), RevocationError> {
        let remaining = (expires_at - Utc::now()).num_seconds();
        if remaining <= 0 {
            // token already past its natural expiry; an entry would be garbage
            return Ok(());
        }

        let mut conn = self.conn.clone();
        conn.set_ex::<_, _, ()>(Self::key(token), 1, remaining as u64)
            .await
            .map_err(|e| RevocationError::Operation(e.to_string()))?;

        Ok(())
    }

    async fn is_revoked(&self, token: &str) -> Result<bool, RevocationError> {
        let mut conn = self.conn.clone();
        conn.exists::<_, bool>(Self::key(token))
            .await
            .map_err(|e| RevocationError::Operation(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration as ChronoDuration;

    async fn get_test_store() -> Option<RedisRevocationStore> {
        let config = RedisConfig {
            url: std::env::var("REDIS_URL")
                .unwrap_or_else(|_| "redis://localhost:6389".to_string()),
            connect_timeout: Duration::from_secs(1),
        };

        RedisRevocationStore::new(config).await.ok()
    }

    #[tokio::test]
    async fn revoke_and_query() {
        let store = match get_test_store().await {
            Some(s) => s,
            None => {
                tracing::warn!("Redis not available, skipping test");
                return;
            }
        };

        let expires_at = Utc::now() + ChronoDuration::minutes(1);

        store.revoke("test_token", expires_at).await.unwrap();
        store.revoke("test_token", expires_at).await.unwrap();
        assert!(store.is_revoked("test_token").await.unwrap());
        assert!(!store.is_revoked("other_token").await.unwrap());
    }

    #[tokio::test]
    async fn entries_expire_with_the_token() {
        let store = match get_test_store().await {
            Some(s) => s,
            None => return,
        };

        store
            .revoke("ttl_token", Utc::now() + ChronoDuration::seconds(1))
            .await
            .unwrap();
        assert!(store.is_revoked("ttl_token").await.unwrap());

        tokio::time::sleep(Duration::from_millis(1500)).await;
        assert!(!store.is_revoked("ttl_token").await.unwrap());
    }

    #[tokio::test]
    async fn revoking_an_already_expired_token_is_a_no_op() {
        let store = match get_test_store().await {
            Some(s) => s,
            None => return,
        };

        store
            .revoke("stale_token", Utc::now() - ChronoDuration::seconds(10))
            .await
            .unwrap();
        assert!(!store.is_revoked("stale_token").await.unwrap());
    }
}
