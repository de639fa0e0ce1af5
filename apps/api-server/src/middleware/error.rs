//! Error handling - maps service errors onto `{success: false, ...}` bodies.

use actix_web::{HttpResponse, ResponseError, http::StatusCode};
use std::fmt;

use petmatch_core::ports::AuthError;
use petmatch_shared::{ErrorResponse, FieldError};

/// Application-level error type for the HTTP boundary.
#[derive(Debug)]
pub enum AppError {
    Auth(AuthError),
    Validation(Vec<FieldError>),
    MissingAuth,
    Internal(String),
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::Auth(err) => write!(f, "{}", err),
            AppError::Validation(errors) => write!(f, "Validation failed ({} errors)", errors.len()),
            AppError::MissingAuth => write!(f, "Authentication required."),
            AppError::Internal(msg) => write!(f, "Internal error: {}", msg),
        }
    }
}

impl ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        match self {
            AppError::Auth(err) => match err {
                AuthError::EmailTaken => StatusCode::BAD_REQUEST,
                AuthError::SubjectNotFound => StatusCode::NOT_FOUND,
                AuthError::Hashing(_) | AuthError::Store(_) => {
                    StatusCode::INTERNAL_SERVER_ERROR
                }
                // every other kind is an authentication failure
                _ => StatusCode::UNAUTHORIZED,
            },
            AppError::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
            AppError::MissingAuth => StatusCode::UNAUTHORIZED,
            AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let body = match self {
            AppError::Auth(err) => match err {
                AuthError::Hashing(msg) | AuthError::Store(msg) => {
                    // internal faults are logged, never echoed
                    tracing::error!("Internal auth error: {}", msg);
                    ErrorResponse::internal_error()
                }
                other => ErrorResponse::new(other.to_string()),
            },
            AppError::Validation(errors) => ErrorResponse::validation(errors.clone()),
            AppError::MissingAuth => ErrorResponse::new("Authentication required."),
            AppError::Internal(msg) => {
                tracing::error!("Internal error: {}", msg);
                ErrorResponse::internal_error()
            }
        };

        HttpResponse::build(self.status_code()).json(body)
    }
}

impl From<AuthError> for AppError {
    fn from(err: AuthError) -> Self {
        AppError::Auth(err)
    }
}

impl From<Vec<FieldError>> for AppError {
    fn from(errors: Vec<FieldError>) -> Self {
        AppError::Validation(errors)
    }
}

/// Result type alias for handlers.
pub type AppResult<T> = Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn auth_failures_map_to_401() {
        assert_eq!(
            AppError::from(AuthError::InvalidCredentials).status_code(),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(
            AppError::from(AuthError::TokenRevoked).status_code(),
            StatusCode::UNAUTHORIZED
        );
    }

    #[test]
    fn email_taken_maps_to_400() {
        assert_eq!(
            AppError::from(AuthError::EmailTaken).status_code(),
            StatusCode::BAD_REQUEST
        );
    }

    #[test]
    fn store_faults_map_to_500() {
        assert_eq!(
            AppError::from(AuthError::Store("down".into())).status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }
}
