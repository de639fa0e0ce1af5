//! Business-logic services orchestrating the ports.

mod credentials;

pub use credentials::{AuthSession, CredentialService, TokenIntrospection};
