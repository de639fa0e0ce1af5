//! Credential entity for SeaORM.

use sea_orm::Set;
use sea_orm::entity::prelude::*;

use petmatch_core::domain::Credential;
use petmatch_core::error::RepoError;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "users")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub name: String,
    #[sea_orm(unique)]
    pub email: String,
    pub password_hash: String,
    pub phone: String,
    pub address: String,
    pub user_type: String,
    pub locality: Option<String>,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

/// Conversion from SeaORM Model to the domain Credential.
/// Fallible: a row with an unknown `user_type` is a data fault.
impl TryFrom<Model> for Credential {
    type Error = RepoError;

    fn try_from(model: Model) -> Result<Self, Self::Error> {
        let user_type = model
            .user_type
            .parse()
            .map_err(|e: String| RepoError::Query(e))?;

        Ok(Self {
            id: model.id,
            name: model.name,
            email: model.email,
            password_hash: model.password_hash,
            phone: model.phone,
            address: model.address,
            user_type,
            locality: model.locality,
            created_at: model.created_at.into(),
            updated_at: model.updated_at.into(),
        })
    }
}

/// Conversion from the domain Credential to a SeaORM ActiveModel.
impl From<Credential> for ActiveModel {
    fn from(credential: Credential) -> Self {
        Self {
            id: Set(credential.id),
            name: Set(credential.name),
            email: Set(credential.email),
            password_hash: Set(credential.password_hash),
            phone: Set(credential.phone),
            address: Set(credential.address),
            user_type: Set(credential.user_type.to_string()),
            locality: Set(credential.locality),
            created_at: Set(credential.created_at.into()),
            updated_at: Set(credential.updated_at.into()),
        }
    }
}
