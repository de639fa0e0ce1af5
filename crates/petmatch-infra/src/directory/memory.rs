//! In-memory user directory - used for tests and when Postgres is not configured.

use std::collections::HashMap;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;
use uuid::Uuid;

use petmatch_core::domain::{Credential, normalize_email};
use petmatch_core::error::RepoError;
use petmatch_core::ports::{CredentialChanges, UserDirectory};

#[derive(Default)]
struct Inner {
    by_id: HashMap<Uuid, Credential>,
    email_to_id: HashMap<String, Uuid>,
}

/// HashMap-backed user directory behind an async RwLock.
///
/// Uniqueness is enforced under the single write lock, giving the same
/// atomic create semantics the production store gets from its unique index.
/// Note: Data is lost on process restart.
pub struct InMemoryUserDirectory {
    inner: RwLock<Inner>,
}

impl InMemoryUserDirectory {
    pub fn new() -> Self {
        Self {
            inner: RwLock::new(Inner::default()),
        }
    }
}

impl Default for InMemoryUserDirectory {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl UserDirectory for InMemoryUserDirectory {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Credential>, RepoError> {
        Ok(self.inner.read().await.by_id.get(&id).cloned())
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<Credential>, RepoError> {
        let inner = self.inner.read().await;
        let id = inner.email_to_id.get(&normalize_email(email));
        Ok(id.and_then(|id| inner.by_id.get(id)).cloned())
    }

    async fn create(&self, credential: Credential) -> Result<Credential, RepoError> {
        let mut inner = self.inner.write().await;
        let email = normalize_email(&credential.email);

        if inner.email_to_id.contains_key(&email) {
            return Err(RepoError::Constraint("Email already exists".to_string()));
        }

        inner.email_to_id.insert(email, credential.id);
        inner.by_id.insert(credential.id, credential.clone());
        Ok(credential)
    }

    async fn update(
        &self,
        id: Uuid,
        changes: CredentialChanges,
    ) -> Result<Option<Credential>, RepoError> {
        let mut inner = self.inner.write().await;
        let Some(credential) = inner.by_id.get_mut(&id) else {
            return Ok(None);
        };

        if let Some(hash) = changes.password_hash {
            credential.password_hash = hash;
        }
        credential.updated_at = Utc::now();

        Ok(Some(credential.clone()))
    }

    async fn delete(&self, id: Uuid) -> Result<(), RepoError> {
        let mut inner = self.inner.write().await;
        let Some(credential) = inner.by_id.remove(&id) else {
            return Err(RepoError::NotFound);
        };
        inner.email_to_id.remove(&normalize_email(&credential.email));
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use petmatch_core::domain::{NewProfile, UserType};

    fn credential(email: &str) -> Credential {
        Credential::new(
            NewProfile {
                name: "Alice".into(),
                email: email.into(),
                phone: "5551234567".into(),
                address: "1 Main Street".into(),
                locality: None,
            },
            "digest".into(),
            UserType::Owner,
        )
    }

    #[tokio::test]
    async fn email_uniqueness_is_case_insensitive() {
        let directory = InMemoryUserDirectory::new();
        directory.create(credential("a@b.com")).await.unwrap();

        let err = directory.create(credential("A@B.COM")).await.unwrap_err();
        assert!(matches!(err, RepoError::Constraint(_)));
    }

    #[tokio::test]
    async fn lookups_normalize_the_email() {
        let directory = InMemoryUserDirectory::new();
        let created = directory.create(credential("a@b.com")).await.unwrap();

        let found = directory.find_by_email(" A@b.Com ").await.unwrap().unwrap();
        assert_eq!(found.id, created.id);
    }

    #[tokio::test]
    async fn update_replaces_the_password_hash() {
        let directory = InMemoryUserDirectory::new();
        let created = directory.create(credential("a@b.com")).await.unwrap();

        let updated = directory
            .update(created.id, CredentialChanges::password_hash("new-digest"))
            .await
            .unwrap()
            .unwrap();
        assert_eq!(updated.password_hash, "new-digest");

        let missing = directory
            .update(Uuid::new_v4(), CredentialChanges::password_hash("x"))
            .await
            .unwrap();
        assert!(missing.is_none());
    }

    #[tokio::test]
    async fn delete_frees_the_email() {
        let directory = InMemoryUserDirectory::new();
        let created = directory.create(credential("a@b.com")).await.unwrap();

        directory.delete(created.id).await.unwrap();
        assert!(directory.find_by_email("a@b.com").await.unwrap().is_none());
        directory.create(credential("a@b.com")).await.unwrap();
    }
}
