//! HTTP handlers and route configuration.

mod auth;
mod health;

use actix_web::web;

/// Configure all application routes.
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api")
            // Public routes
            .route("/health", web::get().to(health::health_check))
            // Auth routes
            .service(
                web::scope("/v1/auth")
                    .route("/register/owner", web::post().to(auth::register_owner))
                    .route("/register/clinic", web::post().to(auth::register_clinic))
                    .route("/login", web::post().to(auth::login))
                    .route("/logout", web::post().to(auth::logout))
                    .route("/forgot-password", web::post().to(auth::forgot_password))
                    .route("/reset-password", web::post().to(auth::reset_password))
                    .route("/change-password", web::put().to(auth::change_password))
                    .route("/verify-token", web::post().to(auth::verify_token)),
            ),
    );
}
