//! # PetMatch Infrastructure
//!
//! Concrete implementations of the ports defined in `petmatch-core`.
//! This crate contains the token codec, password hashing, the user
//! directory and revocation stores, and the reset mailer.
//!
//! ## Feature Flags
//!
//! - `full` (default) - All features enabled
//! - `minimal` - No external stores, in-memory only
//! - `postgres` - PostgreSQL user directory via SeaORM
//! - `redis` - Redis revocation store

pub mod auth;
pub mod directory;
pub mod mailer;
pub mod revocation;

#[cfg(feature = "postgres")]
pub mod database;

// Re-exports - In-Memory
pub use directory::InMemoryUserDirectory;
pub use revocation::InMemoryRevocationStore;

pub use auth::{Argon2PasswordHasher, JwtConfig, JwtTokenCodec};
pub use mailer::{LogResetMailer, ResetLink, WebhookResetMailer};

// Re-exports - external stores
#[cfg(feature = "postgres")]
pub use database::{DatabaseConfig, PostgresUserDirectory};
#[cfg(feature = "redis")]
pub use revocation::{RedisConfig, RedisRevocationStore};
