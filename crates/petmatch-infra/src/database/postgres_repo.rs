//! PostgreSQL user directory implementation.

use async_trait::async_trait;
use chrono::Utc;
use sea_orm::{ActiveModelTrait, ColumnTrait, DbConn, EntityTrait, IntoActiveModel, QueryFilter,
    Set};
use uuid::Uuid;

use petmatch_core::domain::Credential;
use petmatch_core::error::RepoError;
use petmatch_core::ports::{CredentialChanges, UserDirectory};

use super::entity::user::{self, Entity as UserEntity};

/// Mask email for logging to avoid PII in logs.
fn mask_email(email: &str) -> String {
    if let Some(at_pos) = email.find('@') {
        let (local, domain) = email.split_at(at_pos);
        let masked_local = if local.len() > 1 {
            format!("{}***", &local[..1])
        } else {
            "***".to_string()
        };
        format!("{}{}", masked_local, domain)
    } else {
        "***".to_string()
    }
}

/// PostgreSQL user directory.
///
/// The `users.email` unique index is what enforces uniqueness under
/// concurrent registration; `create` surfaces its violation as a
/// constraint error.
pub struct PostgresUserDirectory {
    db: DbConn,
}

impl PostgresUserDirectory {
    pub fn new(db: DbConn) -> Self {
        Self { db }
    }
}

#[async_trait]
impl UserDirectory for PostgresUserDirectory {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Credential>, RepoError> {
        let result = UserEntity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| RepoError::Query(e.to_string()))?;

        result.map(Credential::try_from).transpose()
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<Credential>, RepoError> {
        tracing::debug!(user_email = %mask_email(email), "Finding credential by email");

        let result = UserEntity::find()
            .filter(user::Column::Email.eq(email))
            .one(&self.db)
            .await
            .map_err(|e| RepoError::Query(e.to_string()))?;

        result.map(Credential::try_from).transpose()
    }

    async fn create(&self, credential: Credential) -> Result<Credential, RepoError> {
        let active_model: user::ActiveModel = credential.into();

        let model = active_model.insert(&self.db).await.map_err(|e| {
            let err_str = e.to_string();
            if err_str.contains("duplicate") || err_str.contains("unique") {
                RepoError::Constraint("Email already exists".to_string())
            } else {
                RepoError::Query(err_str)
            }
        })?;

        Credential::try_from(model)
    }

    async fn update(
        &self,
        id: Uuid,
        changes: CredentialChanges,
    ) -> Result<Option<Credential>, RepoError> {
        let Some(model) = UserEntity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| RepoError::Query(e.to_string()))?
        else {
            return Ok(None);
        };

        let mut active_model = model.into_active_model();
        if let Some(hash) = changes.password_hash {
            active_model.password_hash = Set(hash);
        }
        active_model.updated_at = Set(Utc::now().into());

        let updated = active_model
            .update(&self.db)
            .await
            .map_err(|e| RepoError::Query(e.to_string()))?;

        Ok(Some(Credential::try_from(updated)?))
    }

    async fn delete(&self, id: Uuid) -> Result<(), RepoError> {
        let result = UserEntity::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(|e| RepoError::Query(e.to_string()))?;

        if result.rows_affected == 0 {
            return Err(RepoError::NotFound);
        }

        Ok(())
    }
}
