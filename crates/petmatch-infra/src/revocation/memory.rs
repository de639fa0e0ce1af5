//! In-memory revocation store - used for tests and when Redis is unavailable.

use std::collections::HashMap;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tokio::sync::RwLock;

use petmatch_core::ports::{RevocationError, RevocationStore};

/// In-memory revoked-token set using a HashMap with async RwLock.
///
/// Entries whose `expires_at` has passed are purged lazily on read.
/// Note: Data is lost on process restart.
pub struct InMemoryRevocationStore {
    entries: RwLock<HashMap<String, DateTime<Utc>>>,
}

impl InMemoryRevocationStore {
    pub fn new() -> Self {
        Self {
            entries: RwLock::new(HashMap::new()),
        }
    }
}

impl Default for InMemoryRevocationStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl RevocationStore for InMemoryRevocationStore {
    async fn revoke(
        &self,
        token: &str,
        expires_at: DateTime<Utc>,
    ) -> Result<(), RevocationError> {
        let mut entries = self.entries.write().await;
        // idempotent: a token already revoked keeps its original expiry
        entries.entry(token.to_string()).or_insert(expires_at);
        Ok(())
    }

    async fn is_revoked(&self, token: &str) -> Result<bool, RevocationError> {
        {
            let entries = self.entries.read().await;
            match entries.get(token) {
                Some(expires_at) if *expires_at > Utc::now() => return Ok(true),
                Some(_) => {}
                None => return Ok(false),
            }
        }

        // entry outlived its token; drop it with a write lock
        let mut entries = self.entries.write().await;
        entries.remove(token);
        Ok(false)
    }
}
