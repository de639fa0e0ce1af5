//! User directory port.

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::Credential;
use crate::error::RepoError;

/// Partial update applied to a stored credential. Only the fields the core
/// mutates are represented; profile CRUD lives outside this crate.
#[derive(Debug, Clone, Default)]
pub struct CredentialChanges {
    pub password_hash: Option<String>,
}

impl CredentialChanges {
    pub fn password_hash(hash: impl Into<String>) -> Self {
        Self {
            password_hash: Some(hash.into()),
        }
    }
}

/// User directory with domain-specific lookups.
///
/// Email normalization (trim + lowercase) is the caller's responsibility
/// before every lookup or write. Unique-email enforcement is atomic at the
/// store level; `create` surfaces a duplicate as [`RepoError::Constraint`].
#[async_trait]
pub trait UserDirectory: Send + Sync {
    /// Find a credential by its unique ID.
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Credential>, RepoError>;

    /// Find a credential by normalized email address.
    async fn find_by_email(&self, email: &str) -> Result<Option<Credential>, RepoError>;

    /// Persist a new credential.
    async fn create(&self, credential: Credential) -> Result<Credential, RepoError>;

    /// Apply a partial update, returning the updated credential, or `None`
    /// if the id is unknown.
    async fn update(
        &self,
        id: Uuid,
        changes: CredentialChanges,
    ) -> Result<Option<Credential>, RepoError>;

    /// Delete a credential by its ID.
    async fn delete(&self, id: Uuid) -> Result<(), RepoError>;
}
