//! JWT token codec implementation.

use async_trait::async_trait;
use chrono::{TimeDelta, Utc};
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use petmatch_core::domain::UserType;
use petmatch_core::ports::{AuthError, TokenClaims, TokenCodec, TokenKind};

/// JWT codec configuration. HS256 with a process-wide secret.
#[derive(Debug, Clone)]
pub struct JwtConfig {
    pub secret: String,
    pub access_ttl_minutes: i64,
    pub reset_ttl_minutes: i64,
}

impl Default for JwtConfig {
    fn default() -> Self {
        Self {
            secret: "change-me-in-production".to_string(),
            access_ttl_minutes: 30,
            reset_ttl_minutes: 15,
        }
    }
}

/// Internal JWT claims structure for serialization.
///
/// `sub` defaults to empty when absent so token-shape problems surface as
/// `MissingSubject` during validation rather than a decode failure.
#[derive(Debug, Serialize, Deserialize)]
struct Claims {
    #[serde(default)]
    sub: String,
    #[serde(rename = "type")]
    kind: TokenKind,
    #[serde(rename = "userType", skip_serializing_if = "Option::is_none")]
    user_type: Option<UserType>,
    exp: i64, // expiration timestamp
    #[serde(skip_serializing_if = "Option::is_none")]
    iat: Option<i64>, // issued at
    #[serde(skip_serializing_if = "Option::is_none")]
    jti: Option<String>, // unique token id, access tokens only
}

impl From<Claims> for TokenClaims {
    fn from(claims: Claims) -> Self {
        Self {
            subject: claims.sub,
            kind: claims.kind,
            user_type: claims.user_type,
            expires_at: claims.exp,
        }
    }
}

/// JWT-based token codec.
pub struct JwtTokenCodec {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    config: JwtConfig,
}

impl JwtTokenCodec {
    pub fn new(config: JwtConfig) -> Self {
        let encoding_key = EncodingKey::from_secret(config.secret.as_bytes());
        let decoding_key = DecodingKey::from_secret(config.secret.as_bytes());

        Self {
            encoding_key,
            decoding_key,
            config,
        }
    }

    pub fn from_env() -> Self {
        let secret =
            std::env::var("JWT_SECRET").unwrap_or_else(|_| "change-me-in-production".to_string());

        // Warn if using default secret in production
        if secret == "change-me-in-production" {
            let is_production = std::env::var("RUST_ENV")
                .map(|v| v == "production" || v == "prod")
                .unwrap_or(false);

            if is_production {
                tracing::error!(
                    "SECURITY: Using default JWT secret in production! Set JWT_SECRET environment variable."
                );
            } else {
                tracing::warn!("Using default JWT secret. Set JWT_SECRET for production use.");
            }
        }

        let config = JwtConfig {
            secret,
            access_ttl_minutes: std::env::var("ACCESS_TOKEN_EXPIRE_MINUTES")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(30),
            reset_ttl_minutes: std::env::var("RESET_TOKEN_EXPIRE_MINUTES")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(15),
        };
        Self::new(config)
    }

    fn sign(&self, claims: &Claims) -> Result<String, AuthError> {
        encode(&Header::default(), claims, &self.encoding_key)
            .map_err(|_| AuthError::MalformedToken)
    }

    fn decode_with(&self, token: &str, validation: &Validation) -> Result<Claims, AuthError> {
        decode::<Claims>(token, &self.decoding_key, validation)
            .map(|data| data.claims)
            .map_err(|e| match e.kind() {
                jsonwebtoken::errors::ErrorKind::ExpiredSignature => AuthError::ExpiredToken,
                _ => AuthError::MalformedToken,
            })
    }
}

#[async_trait]
impl TokenCodec for JwtTokenCodec {
    fn issue_access(
        &self,
        credential_id: Uuid,
        user_type: UserType,
    ) -> Result<String, AuthError> {
        let now = Utc::now();
        let exp = now + TimeDelta::minutes(self.config.access_ttl_minutes);

        self.sign(&Claims {
            sub: credential_id.to_string(),
            kind: TokenKind::Access,
            user_type: Some(user_type),
            exp: exp.timestamp(),
            iat: Some(now.timestamp()),
            jti: Some(Uuid::new_v4().to_string()),
        })
    }

    fn issue_reset(&self, credential_id: Uuid) -> Result<String, AuthError> {
        let exp = Utc::now() + TimeDelta::minutes(self.config.reset_ttl_minutes);

        self.sign(&Claims {
            sub: credential_id.to_string(),
            kind: TokenKind::Reset,
            user_type: None,
            exp: exp.timestamp(),
            iat: None,
            jti: None,
        })
    }

    fn decode(&self, token: &str) -> Result<TokenClaims, AuthError> {
        let mut validation = Validation::default();
        validation.leeway = 0;

        self.decode_with(token, &validation).map(Into::into)
    }

    fn decode_for_revocation(&self, token: &str) -> Result<TokenClaims, AuthError> {
        let mut validation = Validation::default();
        validation.validate_exp = false;
        validation.required_spec_claims.clear();

        self.decode_with(token, &validation).map(Into::into)
    }
}
