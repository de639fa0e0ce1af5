//! Standardized API response types.
//!
//! Every body carries a `success` flag; failures add a short message and
//! never include stack traces or internal identifiers.

use serde::{Deserialize, Serialize};

/// Bare `{success, message}` body for operations with no payload.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BaseResponse {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl BaseResponse {
    pub fn ok(message: impl Into<String>) -> Self {
        Self {
            success: true,
            message: Some(message.into()),
        }
    }
}

/// Failure body: `{success: false, message}` plus field errors for
/// validation failures.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub success: bool,

    /// A short, human-readable summary of the failure.
    pub message: String,

    /// Per-field validation errors, when applicable.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub errors: Option<Vec<FieldError>>,
}

impl ErrorResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            success: false,
            message: message.into(),
            errors: None,
        }
    }

    pub fn validation(errors: Vec<FieldError>) -> Self {
        Self {
            success: false,
            message: "Validation failed.".to_string(),
            errors: Some(errors),
        }
    }

    pub fn internal_error() -> Self {
        Self::new("Internal server error.")
    }
}

/// A single field-level validation error.
///
/// The offending input is echoed back for convenience, except for secret
/// fields: anything whose name or message mentions a password or token is
/// redacted at construction, so a secret can never leave through here.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FieldError {
    pub field: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub input: Option<String>,
}

impl FieldError {
    pub fn new(
        field: impl Into<String>,
        message: impl Into<String>,
        input: Option<&str>,
    ) -> Self {
        let field = field.into();
        let message = message.into();

        let sensitive = [&field, &message]
            .iter()
            .any(|s| {
                let lower = s.to_lowercase();
                lower.contains("password") || lower.contains("token")
            });

        Self {
            input: if sensitive {
                None
            } else {
                input.map(str::to_owned)
            },
            field,
            message,
        }
    }
}
