//! Password-reset notification port.

use async_trait::async_trait;

/// Delivers password-reset messages.
///
/// The credential service swallows delivery failures so a caller can never
/// learn from the response whether an address is registered.
#[async_trait]
pub trait ResetMailer: Send + Sync {
    /// Deliver a reset message carrying the token, or return an error to be
    /// logged and discarded by the caller.
    async fn send_password_reset(&self, email: &str, reset_token: &str)
    -> Result<(), MailerError>;
}

/// Mailer errors.
#[derive(Debug, thiserror::Error)]
pub enum MailerError {
    #[error("Delivery failed: {0}")]
    Delivery(String),

    #[error("Message rendering failed: {0}")]
    Render(String),
}
