use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Role tag carried inside access tokens and stored on every credential.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UserType {
    Owner,
    Clinic,
}

impl UserType {
    pub fn as_str(&self) -> &'static str {
        match self {
            UserType::Owner => "owner",
            UserType::Clinic => "clinic",
        }
    }
}

impl std::fmt::Display for UserType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for UserType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "owner" => Ok(UserType::Owner),
            "clinic" => Ok(UserType::Clinic),
            other => Err(format!("unknown user type: {other}")),
        }
    }
}

/// Credential entity - a registered user and their password hash.
///
/// `password_hash` never leaves the core; response DTOs carry no such field.
/// `locality` is present on clinic accounts only.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Credential {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub password_hash: String,
    pub phone: String,
    pub address: String,
    pub user_type: UserType,
    pub locality: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Credential {
    /// Create a new credential with generated ID and timestamps.
    /// The email must already be normalized by the caller.
    pub fn new(profile: NewProfile, password_hash: String, user_type: UserType) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            name: profile.name,
            email: profile.email,
            password_hash,
            phone: profile.phone,
            address: profile.address,
            user_type,
            locality: profile.locality,
            created_at: now,
            updated_at: now,
        }
    }
}

/// Profile fields collected at registration, minus any secret material.
#[derive(Debug, Clone)]
pub struct NewProfile {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub address: String,
    pub locality: Option<String>,
}

/// Trim + lowercase, applied before every directory lookup or write.
pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_email() {
        assert_eq!(normalize_email("  A@B.Com "), "a@b.com");
    }

    #[test]
    fn test_user_type_round_trip() {
        assert_eq!("clinic".parse::<UserType>().unwrap(), UserType::Clinic);
        assert_eq!(UserType::Owner.as_str(), "owner");
        assert!("admin".parse::<UserType>().is_err());
    }
}
