//! Local dev sender that logs the reset link instead of sending real email.

use async_trait::async_trait;

use petmatch_core::ports::{MailerError, ResetMailer};

use super::ResetLink;

pub struct LogResetMailer {
    link: ResetLink,
}

impl LogResetMailer {
    pub fn new(link: ResetLink) -> Self {
        Self { link }
    }
}

#[async_trait]
impl ResetMailer for LogResetMailer {
    async fn send_password_reset(
        &self,
        email: &str,
        reset_token: &str,
    ) -> Result<(), MailerError> {
        tracing::info!(
            to_email = %email,
            reset_link = %self.link.for_token(reset_token),
            "password reset send stub"
        );
        Ok(())
    }
}
