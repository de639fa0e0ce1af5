//! Password-reset mailer implementations.
//!
//! Both senders receive the raw reset token and turn it into the frontend
//! reset link; how the message leaves the process differs. `LogResetMailer`
//! is the local-dev sender, `WebhookResetMailer` hands the message to an
//! external mail API.

mod log;
mod webhook;

pub use log::LogResetMailer;
pub use webhook::WebhookResetMailer;

/// Builds the link a reset message points the user at.
#[derive(Debug, Clone)]
pub struct ResetLink {
    frontend_url: String,
    reset_path: String,
}

impl ResetLink {
    pub fn new(frontend_url: impl Into<String>, reset_path: impl Into<String>) -> Self {
        Self {
            frontend_url: frontend_url.into(),
            reset_path: reset_path.into(),
        }
    }

    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        Self {
            frontend_url: std::env::var("FRONTEND_URL")
                .unwrap_or_else(|_| "http://localhost:3000".to_string()),
            reset_path: std::env::var("RESET_PASSWORD_PATH")
                .unwrap_or_else(|_| "reset-password".to_string()),
        }
    }

    pub fn for_token(&self, token: &str) -> String {
        format!(
            "{}/{}/{token}",
            self.frontend_url.trim_end_matches('/'),
            self.reset_path.trim_matches('/'),
        )
    }
}
