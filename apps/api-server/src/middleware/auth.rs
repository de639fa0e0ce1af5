//! Authentication extractors.

use actix_web::{FromRequest, HttpRequest, dev::Payload, http::header, web};
use futures::future::LocalBoxFuture;
use std::future::{Ready, ready};

use petmatch_core::domain::UserType;

use crate::middleware::error::AppError;
use crate::state::AppState;

/// Raw Bearer token, for endpoints that operate on the token itself
/// (logout, verify) rather than on the identity behind it.
pub struct BearerToken(pub String);

impl FromRequest for BearerToken {
    type Error = AppError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        ready(bearer_token(req).map(BearerToken))
    }
}

/// Authenticated user identity extractor.
///
/// Validates the access token against the revocation registry and confirms
/// the subject still exists before the handler runs:
/// ```ignore
/// async fn protected_route(identity: Identity) -> impl Responder {
///     format!("Hello, {}!", identity.credential_id)
/// }
/// ```
#[derive(Debug, Clone)]
pub struct Identity {
    pub credential_id: uuid::Uuid,
    pub user_type: UserType,
}

impl FromRequest for Identity {
    type Error = AppError;
    type Future = LocalBoxFuture<'static, Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        let state = req.app_data::<web::Data<AppState>>().cloned();
        let token = bearer_token(req);

        Box::pin(async move {
            let Some(state) = state else {
                tracing::error!("AppState not found in app data");
                return Err(AppError::Internal("Server configuration error".to_string()));
            };

            let introspection = state.credentials.verify_token(&token?).await?;

            Ok(Identity {
                credential_id: introspection.subject_id,
                user_type: introspection.user_type,
            })
        })
    }
}

fn bearer_token(req: &HttpRequest) -> Result<String, AppError> {
    let auth_header = req
        .headers()
        .get(header::AUTHORIZATION)
        .ok_or(AppError::MissingAuth)?;

    let auth_str = auth_header
        .to_str()
        .map_err(|_| AppError::MissingAuth)?;

    auth_str
        .strip_prefix("Bearer ")
        .map(str::to_owned)
        .ok_or(AppError::MissingAuth)
}
