//! Revoked-token registry port.

use async_trait::async_trait;
use chrono::{DateTime, Utc};

/// Durable set of revoked token values with automatic expiry.
///
/// Entries are keyed by the literal token string and become irrelevant once
/// the token's own `exp` passes; implementations may purge them lazily or
/// eagerly but must never report a token revoked past `expires_at`.
#[async_trait]
pub trait RevocationStore: Send + Sync {
    /// Insert a revocation entry. Idempotent: revoking an already-revoked
    /// token is a no-op, never an error.
    async fn revoke(&self, token: &str, expires_at: DateTime<Utc>)
    -> Result<(), RevocationError>;

    /// True while a matching entry exists and `expires_at` has not passed.
    /// Store faults propagate; callers must not treat them as "not revoked".
    async fn is_revoked(&self, token: &str) -> Result<bool, RevocationError>;
}

/// Revocation store errors.
#[derive(Debug, thiserror::Error)]
pub enum RevocationError {
    #[error("Connection failed: {0}")]
    Connection(String),

    #[error("Operation failed: {0}")]
    Operation(String),
}
