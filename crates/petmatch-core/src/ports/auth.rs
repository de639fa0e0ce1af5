//! Authentication ports: password hashing and the token codec.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::UserType;
use crate::error::RepoError;
use crate::ports::revocation::{RevocationError, RevocationStore};

/// Which flow a token belongs to. Stored in the `type` claim.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TokenKind {
    Access,
    Reset,
}

/// Claims recovered from a signed token.
///
/// `subject` is the raw `sub` claim; an empty string means the claim was
/// absent. [`TokenCodec::validate`] rejects such tokens with
/// [`AuthError::MissingSubject`].
#[derive(Debug, Clone)]
pub struct TokenClaims {
    pub subject: String,
    pub kind: TokenKind,
    /// `user_type` claim; present on access tokens only.
    pub user_type: Option<UserType>,
    /// Expiry as a Unix timestamp.
    pub expires_at: i64,
}

/// Password hashing service.
///
/// Hashing is deliberately CPU-expensive; implementations must offload the
/// digest to a blocking pool so it never stalls the cooperative runtime.
#[async_trait]
pub trait PasswordHasher: Send + Sync {
    /// Hash a plain text password with a fresh random salt.
    async fn hash(&self, password: &str) -> Result<String, AuthError>;

    /// Verify a password against a stored hash. A malformed stored hash is
    /// a verification failure, not a fault.
    async fn verify(&self, password: &str, hash: &str) -> Result<bool, AuthError>;
}

/// Token codec: issues, decodes, and validates signed expiring tokens.
#[async_trait]
pub trait TokenCodec: Send + Sync {
    /// Issue an access token carrying the subject id, its user type, and a
    /// fresh `jti`.
    fn issue_access(&self, credential_id: Uuid, user_type: UserType)
    -> Result<String, AuthError>;

    /// Issue a short-lived password-reset token for the subject id.
    fn issue_reset(&self, credential_id: Uuid) -> Result<String, AuthError>;

    /// Verify signature and expiry, returning the claims.
    /// Fails with [`AuthError::MalformedToken`] on a bad signature or
    /// structure, [`AuthError::ExpiredToken`] once `exp` has passed.
    fn decode(&self, token: &str) -> Result<TokenClaims, AuthError>;

    /// Verify the signature but not expiry. Logout uses this to recover
    /// `exp` for revocation bookkeeping from a token that may already have
    /// expired, whatever its kind.
    fn decode_for_revocation(&self, token: &str) -> Result<TokenClaims, AuthError>;

    /// Full validation for authenticated flows. Check order is fixed so a
    /// given bad input always yields the same error: signature/expiry,
    /// then revocation, then subject presence, then kind.
    async fn validate(
        &self,
        token: &str,
        expected: TokenKind,
        revocation: &dyn RevocationStore,
    ) -> Result<TokenClaims, AuthError> {
        let claims = self.decode(token)?;

        if revocation.is_revoked(token).await? {
            return Err(AuthError::TokenRevoked);
        }
        if claims.subject.is_empty() {
            return Err(AuthError::MissingSubject);
        }
        if claims.kind != expected {
            return Err(AuthError::WrongTokenType);
        }

        Ok(claims)
    }
}

/// Authentication errors.
///
/// Messages are user-facing; they never name which internal check failed
/// beyond what the taxonomy itself reveals.
#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    #[error("Invalid email or password.")]
    InvalidCredentials,

    #[error("Email already registered.")]
    EmailTaken,

    #[error("Invalid token.")]
    MalformedToken,

    #[error("Token has expired.")]
    ExpiredToken,

    #[error("Token has been revoked.")]
    TokenRevoked,

    #[error("Invalid token type.")]
    WrongTokenType,

    #[error("Invalid token payload.")]
    MissingSubject,

    #[error("Invalid or expired token.")]
    InvalidOrExpiredToken,

    #[error("Current password is incorrect.")]
    CurrentPasswordIncorrect,

    #[error("User not found.")]
    SubjectNotFound,

    #[error("Hashing error: {0}")]
    Hashing(String),

    #[error("Store error: {0}")]
    Store(String),
}

impl From<RepoError> for AuthError {
    fn from(err: RepoError) -> Self {
        AuthError::Store(err.to_string())
    }
}

// Fail-closed: a revocation store fault aborts the operation rather than
// treating the token as not-revoked.
impl From<RevocationError> for AuthError {
    fn from(err: RevocationError) -> Self {
        AuthError::Store(err.to_string())
    }
}
