//! Credential service - orchestrates the token and password lifecycle.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::domain::{Credential, NewProfile, UserType, normalize_email};
use crate::error::RepoError;
use crate::ports::{
    AuthError, CredentialChanges, PasswordHasher, ResetMailer, RevocationStore, TokenClaims,
    TokenCodec, TokenKind, UserDirectory,
};

/// A credential together with a freshly issued access token.
#[derive(Debug, Clone)]
pub struct AuthSession {
    pub credential: Credential,
    pub token: String,
}

/// Result of access-token introspection.
///
/// `user_type` is read from the token claims, not re-fetched from the
/// directory; the directory lookup only confirms the subject still exists.
#[derive(Debug, Clone)]
pub struct TokenIntrospection {
    pub subject_id: Uuid,
    pub user_type: UserType,
}

/// Orchestrates registration, login, logout, password reset/change and
/// token verification over injected stores and collaborators.
pub struct CredentialService {
    directory: Arc<dyn UserDirectory>,
    revocation: Arc<dyn RevocationStore>,
    hasher: Arc<dyn PasswordHasher>,
    codec: Arc<dyn TokenCodec>,
    mailer: Arc<dyn ResetMailer>,
}

impl CredentialService {
    pub fn new(
        directory: Arc<dyn UserDirectory>,
        revocation: Arc<dyn RevocationStore>,
        hasher: Arc<dyn PasswordHasher>,
        codec: Arc<dyn TokenCodec>,
        mailer: Arc<dyn ResetMailer>,
    ) -> Self {
        Self {
            directory,
            revocation,
            hasher,
            codec,
            mailer,
        }
    }

    /// Register a new credential and log it in.
    ///
    /// The duplicate-email pre-check is a fast path; the store's unique
    /// index is what actually enforces uniqueness under concurrent
    /// registration, surfaced here as [`AuthError::EmailTaken`].
    pub async fn register(
        &self,
        mut profile: NewProfile,
        password: &str,
        user_type: UserType,
    ) -> Result<AuthSession, AuthError> {
        profile.email = normalize_email(&profile.email);

        if self.directory.find_by_email(&profile.email).await?.is_some() {
            return Err(AuthError::EmailTaken);
        }

        let password_hash = self.hasher.hash(password).await?;
        let credential = Credential::new(profile, password_hash, user_type);

        let credential = match self.directory.create(credential).await {
            Ok(created) => created,
            Err(RepoError::Constraint(_)) => return Err(AuthError::EmailTaken),
            Err(err) => return Err(err.into()),
        };

        let token = self
            .codec
            .issue_access(credential.id, credential.user_type)?;

        tracing::info!(credential_id = %credential.id, user_type = %credential.user_type, "registered new credential");

        Ok(AuthSession { credential, token })
    }

    /// Verify a password and issue an access token.
    ///
    /// An unknown email and a wrong password produce the identical error so
    /// responses cannot be used to probe which addresses are registered.
    pub async fn login(&self, email: &str, password: &str) -> Result<AuthSession, AuthError> {
        let email = normalize_email(email);

        let credential = self
            .directory
            .find_by_email(&email)
            .await?
            .ok_or(AuthError::InvalidCredentials)?;

        let valid = self
            .hasher
            .verify(password, &credential.password_hash)
            .await?;
        if !valid {
            return Err(AuthError::InvalidCredentials);
        }

        let token = self
            .codec
            .issue_access(credential.id, credential.user_type)?;

        Ok(AuthSession { credential, token })
    }

    /// Revoke a token, whatever its kind.
    ///
    /// Expiry is not enforced here: a user logging out after their token
    /// lapsed still gets a clean logout. Only an invalid signature or
    /// structure is rejected.
    pub async fn logout(&self, token: &str) -> Result<(), AuthError> {
        let claims = self
            .codec
            .decode_for_revocation(token)
            .map_err(|_| AuthError::InvalidOrExpiredToken)?;

        self.revocation
            .revoke(token, claim_expiry(&claims))
            .await?;

        Ok(())
    }

    /// Change the password of an authenticated credential.
    ///
    /// The caller's current access token stays valid afterwards; only the
    /// stored hash changes.
    pub async fn change_password(
        &self,
        credential: &Credential,
        current_password: &str,
        new_password: &str,
    ) -> Result<(), AuthError> {
        let valid = self
            .hasher
            .verify(current_password, &credential.password_hash)
            .await?;
        if !valid {
            return Err(AuthError::CurrentPasswordIncorrect);
        }

        let new_hash = self.hasher.hash(new_password).await?;
        self.directory
            .update(credential.id, CredentialChanges::password_hash(new_hash))
            .await?
            .ok_or(AuthError::SubjectNotFound)?;

        Ok(())
    }

    /// Start a password reset.
    ///
    /// Always succeeds. Lookup misses, token issuance faults, and delivery
    /// failures are logged and swallowed so the response never reveals
    /// whether the address is registered.
    pub async fn forgot_password(&self, email: &str) {
        let email = normalize_email(email);

        let credential = match self.directory.find_by_email(&email).await {
            Ok(Some(credential)) => credential,
            Ok(None) => return,
            Err(err) => {
                tracing::warn!(error = %err, "directory lookup failed during password reset");
                return;
            }
        };

        let reset_token = match self.codec.issue_reset(credential.id) {
            Ok(token) => token,
            Err(err) => {
                tracing::warn!(error = %err, "failed to issue reset token");
                return;
            }
        };

        if let Err(err) = self
            .mailer
            .send_password_reset(&credential.email, &reset_token)
            .await
        {
            tracing::warn!(error = %err, "failed to deliver password reset message");
        }
    }

    /// Consume a reset token and set a new password.
    ///
    /// The token is revoked immediately after the password is persisted so
    /// it cannot be replayed within its remaining TTL.
    pub async fn reset_password(&self, token: &str, new_password: &str) -> Result<(), AuthError> {
        let claims = self
            .codec
            .validate(token, TokenKind::Reset, self.revocation.as_ref())
            .await?;

        let subject_id =
            Uuid::parse_str(&claims.subject).map_err(|_| AuthError::MissingSubject)?;

        let new_hash = self.hasher.hash(new_password).await?;
        self.directory
            .update(subject_id, CredentialChanges::password_hash(new_hash))
            .await?
            .ok_or(AuthError::SubjectNotFound)?;

        self.revocation.revoke(token, claim_expiry(&claims)).await?;

        tracing::info!(credential_id = %subject_id, "password reset completed");

        Ok(())
    }

    /// Validate an access token and confirm its subject still exists.
    pub async fn verify_token(&self, token: &str) -> Result<TokenIntrospection, AuthError> {
        let claims = self
            .codec
            .validate(token, TokenKind::Access, self.revocation.as_ref())
            .await
            .map_err(|err| match err {
                AuthError::MissingSubject => AuthError::InvalidOrExpiredToken,
                other => other,
            })?;

        let subject_id =
            Uuid::parse_str(&claims.subject).map_err(|_| AuthError::InvalidOrExpiredToken)?;

        self.directory
            .find_by_id(subject_id)
            .await?
            .ok_or(AuthError::InvalidOrExpiredToken)?;

        let user_type = claims.user_type.ok_or(AuthError::InvalidOrExpiredToken)?;

        Ok(TokenIntrospection {
            subject_id,
            user_type,
        })
    }

    /// Fetch a credential by id, for transport-layer extractors.
    pub async fn credential_by_id(&self, id: Uuid) -> Result<Option<Credential>, AuthError> {
        Ok(self.directory.find_by_id(id).await?)
    }
}

/// Revocation entries outlive the token at most until its own `exp`.
/// An out-of-range timestamp falls back to now, which only shortens the
/// entry's life.
fn claim_expiry(claims: &TokenClaims) -> DateTime<Utc> {
    DateTime::<Utc>::from_timestamp(claims.expires_at, 0).unwrap_or_else(Utc::now)
}
