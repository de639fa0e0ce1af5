//! Argon2 password hashing implementation.

use argon2::{
    Argon2,
    password_hash::{PasswordHash, PasswordHasher as _, PasswordVerifier, SaltString,
        rand_core::OsRng},
};
use async_trait::async_trait;

use petmatch_core::ports::{AuthError, PasswordHasher};

/// Argon2-based password hasher.
///
/// The digest runs on the blocking pool: Argon2 is tuned to take real CPU
/// time, and running it inline would stall the async executor for every
/// concurrent request.
pub struct Argon2PasswordHasher {
    argon2: Argon2<'static>,
}

impl Argon2PasswordHasher {
    pub fn new() -> Self {
        Self {
            argon2: Argon2::default(),
        }
    }
}

impl Default for Argon2PasswordHasher {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl PasswordHasher for Argon2PasswordHasher {
    async fn hash(&self, password: &str) -> Result<String, AuthError> {
        let argon2 = self.argon2.clone();
        let password = password.to_owned();

        tokio::task::spawn_blocking(move || {
            let salt = SaltString::generate(&mut OsRng);
            argon2
                .hash_password(password.as_bytes(), &salt)
                .map(|h| h.to_string())
                .map_err(|e| AuthError::Hashing(e.to_string()))
        })
        .await
        .map_err(|e| AuthError::Hashing(e.to_string()))?
    }

    async fn verify(&self, password: &str, hash: &str) -> Result<bool, AuthError> {
        let argon2 = self.argon2.clone();
        let password = password.to_owned();
        let hash = hash.to_owned();

        tokio::task::spawn_blocking(move || {
            // A stored hash we cannot parse is a verification failure, not
            // a fault: login must degrade to "invalid credentials".
            let Ok(parsed_hash) = PasswordHash::new(&hash) else {
                return Ok(false);
            };

            Ok(argon2
                .verify_password(password.as_bytes(), &parsed_hash)
                .is_ok())
        })
        .await
        .map_err(|e| AuthError::Hashing(e.to_string()))?
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn hash_and_verify() {
        let hasher = Argon2PasswordHasher::new();
        let password = "secure_password_123";

        let hash = hasher.hash(password).await.unwrap();
        assert!(hasher.verify(password, &hash).await.unwrap());
        assert!(!hasher.verify("wrong_password", &hash).await.unwrap());
    }

    #[tokio::test]
    async fn same_password_hashes_differently() {
        let hasher = Argon2PasswordHasher::new();

        let a = hasher.hash("secure_password_123").await.unwrap();
        let b = hasher.hash("secure_password_123").await.unwrap();

        assert_ne!(a, b);
        assert!(hasher.verify("secure_password_123", &a).await.unwrap());
        assert!(hasher.verify("secure_password_123", &b).await.unwrap());
    }

    #[tokio::test]
    async fn malformed_stored_hash_fails_verification() {
        let hasher = Argon2PasswordHasher::new();
        assert!(!hasher.verify("anything", "not-a-phc-string").await.unwrap());
    }
}
