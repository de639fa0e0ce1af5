//! Authentication handlers.

use actix_web::{HttpResponse, web};

use petmatch_core::domain::{Credential, NewProfile, UserType};
use petmatch_shared::BaseResponse;
use petmatch_shared::dto::{
    AuthResponse, ChangePasswordRequest, ForgotPasswordRequest, LoginRequest, ProfileResponse,
    RegisterClinicRequest, RegisterOwnerRequest, ResetPasswordRequest,
    TokenVerificationResponse, digits_only,
};

use crate::middleware::auth::{BearerToken, Identity};
use crate::middleware::error::{AppError, AppResult};
use crate::state::AppState;

/// The one place a credential is shaped for the outside world.
fn profile_response(credential: &Credential) -> ProfileResponse {
    match credential.user_type {
        UserType::Owner => ProfileResponse::Owner {
            id: credential.id.to_string(),
            name: credential.name.clone(),
            email: credential.email.clone(),
            phone: credential.phone.clone(),
            address: credential.address.clone(),
            created_at: credential.created_at.to_rfc3339(),
            updated_at: credential.updated_at.to_rfc3339(),
        },
        UserType::Clinic => ProfileResponse::Clinic {
            id: credential.id.to_string(),
            name: credential.name.clone(),
            email: credential.email.clone(),
            phone: credential.phone.clone(),
            address: credential.address.clone(),
            locality: credential.locality.clone().unwrap_or_default(),
            created_at: credential.created_at.to_rfc3339(),
            updated_at: credential.updated_at.to_rfc3339(),
        },
    }
}

async fn register(
    state: &AppState,
    profile: NewProfile,
    password: &str,
    user_type: UserType,
) -> AppResult<HttpResponse> {
    let session = state.credentials.register(profile, password, user_type).await?;

    Ok(HttpResponse::Created().json(AuthResponse {
        success: true,
        token: session.token,
        user: profile_response(&session.credential),
    }))
}

/// POST /api/v1/auth/register/owner
pub async fn register_owner(
    state: web::Data<AppState>,
    body: web::Json<RegisterOwnerRequest>,
) -> AppResult<HttpResponse> {
    let req = body.into_inner();
    req.validate()?;

    let profile = NewProfile {
        name: req.name.trim().to_string(),
        email: req.email,
        phone: digits_only(&req.phone),
        address: req.address.trim().to_string(),
        locality: None,
    };

    register(&state, profile, &req.password, UserType::Owner).await
}

/// POST /api/v1/auth/register/clinic
pub async fn register_clinic(
    state: web::Data<AppState>,
    body: web::Json<RegisterClinicRequest>,
) -> AppResult<HttpResponse> {
    let req = body.into_inner();
    req.validate()?;

    let profile = NewProfile {
        name: req.name.trim().to_string(),
        email: req.email,
        phone: digits_only(&req.phone),
        address: req.address.trim().to_string(),
        locality: Some(req.locality.trim().to_string()),
    };

    register(&state, profile, &req.password, UserType::Clinic).await
}

/// POST /api/v1/auth/login
pub async fn login(
    state: web::Data<AppState>,
    body: web::Json<LoginRequest>,
) -> AppResult<HttpResponse> {
    let req = body.into_inner();

    let session = state.credentials.login(&req.email, &req.password).await?;

    Ok(HttpResponse::Ok().json(AuthResponse {
        success: true,
        token: session.token,
        user: profile_response(&session.credential),
    }))
}

/// POST /api/v1/auth/logout
pub async fn logout(state: web::Data<AppState>, token: BearerToken) -> AppResult<HttpResponse> {
    state.credentials.logout(&token.0).await?;

    Ok(HttpResponse::Ok().json(BaseResponse::ok("Logged out successfully.")))
}

/// POST /api/v1/auth/forgot-password
pub async fn forgot_password(
    state: web::Data<AppState>,
    body: web::Json<ForgotPasswordRequest>,
) -> AppResult<HttpResponse> {
    let req = body.into_inner();
    req.validate()?;

    state.credentials.forgot_password(&req.email).await;

    // identical body whether or not the email is registered
    Ok(HttpResponse::Ok().json(BaseResponse::ok("Password reset email sent.")))
}

/// POST /api/v1/auth/reset-password
pub async fn reset_password(
    state: web::Data<AppState>,
    body: web::Json<ResetPasswordRequest>,
) -> AppResult<HttpResponse> {
    let req = body.into_inner();
    req.validate()?;

    state
        .credentials
        .reset_password(req.token.trim(), &req.new_password)
        .await?;

    Ok(HttpResponse::Ok().json(BaseResponse::ok("Password updated successfully.")))
}

/// PUT /api/v1/auth/change-password - Protected route
pub async fn change_password(
    state: web::Data<AppState>,
    identity: Identity,
    body: web::Json<ChangePasswordRequest>,
) -> AppResult<HttpResponse> {
    let req = body.into_inner();
    req.validate()?;

    let credential = state
        .credentials
        .credential_by_id(identity.credential_id)
        .await?
        .ok_or(AppError::MissingAuth)?;

    state
        .credentials
        .change_password(&credential, &req.current_password, &req.new_password)
        .await?;

    tracing::info!(
        credential_id = %identity.credential_id,
        user_type = %identity.user_type,
        "password changed"
    );

    Ok(HttpResponse::Ok().json(BaseResponse::ok("Password changed successfully.")))
}

/// POST /api/v1/auth/verify-token
pub async fn verify_token(
    state: web::Data<AppState>,
    token: BearerToken,
) -> AppResult<HttpResponse> {
    let introspection = state.credentials.verify_token(&token.0).await?;

    Ok(HttpResponse::Ok().json(TokenVerificationResponse {
        success: true,
        user_id: introspection.subject_id.to_string(),
        user_type: introspection.user_type.to_string(),
    }))
}

#[cfg(test)]
mod tests {
    use actix_web::{App, test, web};
    use serde_json::{Value, json};

    use crate::handlers::configure_routes;
    use crate::state::AppState;

    macro_rules! spawn_app {
        () => {
            test::init_service(
                App::new()
                    .app_data(web::Data::new(AppState::in_memory()))
                    .configure(configure_routes),
            )
            .await
        };
    }

    fn owner_payload(email: &str) -> Value {
        json!({
            "name": "Alice",
            "email": email,
            "password": "Abcd1234",
            "confirmPassword": "Abcd1234",
            "phone": "(555) 123-4567",
            "address": "1 Main Street"
        })
    }

    #[actix_web::test]
    async fn register_login_logout_flow() {
        let app = spawn_app!();

        let resp = test::TestRequest::post()
            .uri("/api/v1/auth/register/owner")
            .set_json(owner_payload("a@b.com"))
            .send_request(&app)
            .await;
        assert_eq!(resp.status(), 201);
        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["success"], true);
        assert_eq!(body["user"]["userType"], "owner");
        let token = body["token"].as_str().unwrap().to_owned();

        // the issued token introspects back to the same user
        let resp = test::TestRequest::post()
            .uri("/api/v1/auth/verify-token")
            .insert_header(("Authorization", format!("Bearer {token}")))
            .send_request(&app)
            .await;
        assert_eq!(resp.status(), 200);
        let verified: Value = test::read_body_json(resp).await;
        assert_eq!(verified["user_id"], body["user"]["id"]);

        let resp = test::TestRequest::post()
            .uri("/api/v1/auth/logout")
            .insert_header(("Authorization", format!("Bearer {token}")))
            .send_request(&app)
            .await;
        assert_eq!(resp.status(), 200);

        // revoked on logout: introspection now fails
        let resp = test::TestRequest::post()
            .uri("/api/v1/auth/verify-token")
            .insert_header(("Authorization", format!("Bearer {token}")))
            .send_request(&app)
            .await;
        assert_eq!(resp.status(), 401);
    }

    #[actix_web::test]
    async fn login_failures_are_indistinguishable() {
        let app = spawn_app!();

        test::TestRequest::post()
            .uri("/api/v1/auth/register/owner")
            .set_json(owner_payload("a@b.com"))
            .send_request(&app)
            .await;

        let wrong_password = test::TestRequest::post()
            .uri("/api/v1/auth/login")
            .set_json(json!({"email": "a@b.com", "password": "wrong"}))
            .send_request(&app)
            .await;
        assert_eq!(wrong_password.status(), 401);
        let wrong_body: Value = test::read_body_json(wrong_password).await;

        let unknown_email = test::TestRequest::post()
            .uri("/api/v1/auth/login")
            .set_json(json!({"email": "nobody@b.com", "password": "Abcd1234"}))
            .send_request(&app)
            .await;
        assert_eq!(unknown_email.status(), 401);
        let unknown_body: Value = test::read_body_json(unknown_email).await;

        assert_eq!(wrong_body, unknown_body);
    }

    #[actix_web::test]
    async fn duplicate_registration_is_rejected() {
        let app = spawn_app!();

        test::TestRequest::post()
            .uri("/api/v1/auth/register/owner")
            .set_json(owner_payload("a@b.com"))
            .send_request(&app)
            .await;

        let resp = test::TestRequest::post()
            .uri("/api/v1/auth/register/owner")
            .set_json(owner_payload("A@B.com"))
            .send_request(&app)
            .await;
        assert_eq!(resp.status(), 400);
        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["success"], false);
        assert_eq!(body["message"], "Email already registered.");
    }

    #[actix_web::test]
    async fn clinic_registration_carries_locality() {
        let app = spawn_app!();

        let resp = test::TestRequest::post()
            .uri("/api/v1/auth/register/clinic")
            .set_json(json!({
                "name": "Clinica San Martin",
                "email": "clinic@b.com",
                "password": "Abcd1234",
                "confirmPassword": "Abcd1234",
                "phone": "5551234567",
                "address": "42 Vet Street",
                "locality": "Centro"
            }))
            .send_request(&app)
            .await;
        assert_eq!(resp.status(), 201);
        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["user"]["userType"], "clinic");
        assert_eq!(body["user"]["locality"], "Centro");
    }

    #[actix_web::test]
    async fn weak_password_fails_validation_without_echoing_it() {
        let app = spawn_app!();

        let mut payload = owner_payload("a@b.com");
        payload["password"] = json!("weak");
        payload["confirmPassword"] = json!("weak");

        let resp = test::TestRequest::post()
            .uri("/api/v1/auth/register/owner")
            .set_json(payload)
            .send_request(&app)
            .await;
        assert_eq!(resp.status(), 422);

        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["success"], false);
        for error in body["errors"].as_array().unwrap() {
            assert!(error.get("input").is_none());
        }
    }

    #[actix_web::test]
    async fn forgot_password_response_is_constant() {
        let app = spawn_app!();

        test::TestRequest::post()
            .uri("/api/v1/auth/register/owner")
            .set_json(owner_payload("a@b.com"))
            .send_request(&app)
            .await;

        let mut bodies = Vec::new();
        for email in ["a@b.com", "nobody@b.com"] {
            let resp = test::TestRequest::post()
                .uri("/api/v1/auth/forgot-password")
                .set_json(json!({"email": email}))
                .send_request(&app)
                .await;
            assert_eq!(resp.status(), 200);
            bodies.push(test::read_body_json::<Value, _>(resp).await);
        }
        assert_eq!(bodies[0], bodies[1]);
    }

    #[actix_web::test]
    async fn change_password_requires_current_and_keeps_session() {
        let app = spawn_app!();

        let resp = test::TestRequest::post()
            .uri("/api/v1/auth/register/owner")
            .set_json(owner_payload("a@b.com"))
            .send_request(&app)
            .await;
        let body: Value = test::read_body_json(resp).await;
        let token = body["token"].as_str().unwrap().to_owned();

        let resp = test::TestRequest::put()
            .uri("/api/v1/auth/change-password")
            .insert_header(("Authorization", format!("Bearer {token}")))
            .set_json(json!({
                "currentPassword": "wrong",
                "newPassword": "Newpass12",
                "confirmPassword": "Newpass12"
            }))
            .send_request(&app)
            .await;
        assert_eq!(resp.status(), 401);

        let resp = test::TestRequest::put()
            .uri("/api/v1/auth/change-password")
            .insert_header(("Authorization", format!("Bearer {token}")))
            .set_json(json!({
                "currentPassword": "Abcd1234",
                "newPassword": "Newpass12",
                "confirmPassword": "Newpass12"
            }))
            .send_request(&app)
            .await;
        assert_eq!(resp.status(), 200);

        // the access token issued before the change still works
        let resp = test::TestRequest::post()
            .uri("/api/v1/auth/verify-token")
            .insert_header(("Authorization", format!("Bearer {token}")))
            .send_request(&app)
            .await;
        assert_eq!(resp.status(), 200);
    }
}
