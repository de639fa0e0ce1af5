//! Ports - trait definitions for external dependencies.
//! These are the "interfaces" that infrastructure must implement.

mod auth;
mod directory;
mod mailer;
mod revocation;

pub use auth::{AuthError, PasswordHasher, TokenClaims, TokenCodec, TokenKind};
pub use directory::{CredentialChanges, UserDirectory};
pub use mailer::{MailerError, ResetMailer};
pub use revocation::{RevocationError, RevocationStore};
