//! Mail-API sender: POSTs the rendered message to an external delivery
//! webhook.

use async_trait::async_trait;
use serde::Serialize;

use petmatch_core::ports::{MailerError, ResetMailer};

use super::ResetLink;

#[derive(Serialize)]
struct ResetMessage<'a> {
    to: &'a str,
    subject: &'a str,
    reset_link: String,
}

pub struct WebhookResetMailer {
    client: reqwest::Client,
    webhook_url: String,
    link: ResetLink,
}

impl WebhookResetMailer {
    pub fn new(webhook_url: impl Into<String>, link: ResetLink) -> Self {
        Self {
            client: reqwest::Client::new(),
            webhook_url: webhook_url.into(),
            link,
        }
    }
}

#[async_trait]
impl ResetMailer for WebhookResetMailer {
    async fn send_password_reset(
        &self,
        email: &str,
        reset_token: &str,
    ) -> Result<(), MailerError> {
        let message = ResetMessage {
            to: email,
            subject: "Restablecimiento de contraseña - PetMatch",
            reset_link: self.link.for_token(reset_token),
        };

        let response = self
            .client
            .post(&self.webhook_url)
            .json(&message)
            .send()
            .await
            .map_err(|e| MailerError::Delivery(e.to_string()))?;

        if !response.status().is_success() {
            return Err(MailerError::Delivery(format!(
                "mail webhook returned {}",
                response.status()
            )));
        }

        Ok(())
    }
}
