//! Data Transfer Objects - request/response types for the API.
//!
//! Field names on the wire are camelCase to match the frontend contract.

use serde::{Deserialize, Serialize};

use crate::response::FieldError;

/// Keep only ASCII digits; phone numbers are stored digits-only.
pub fn digits_only(value: &str) -> String {
    value.chars().filter(|c| c.is_ascii_digit()).collect()
}

fn validate_password(field: &str, value: &str, errors: &mut Vec<FieldError>) {
    if value.len() < 8 {
        errors.push(FieldError::new(
            field,
            "Password must be at least 8 characters long.",
            Some(value),
        ));
    }
    if !value.chars().any(|c| c.is_ascii_uppercase()) {
        errors.push(FieldError::new(
            field,
            "Password must contain at least one uppercase letter.",
            Some(value),
        ));
    }
    if !value.chars().any(|c| c.is_ascii_lowercase()) {
        errors.push(FieldError::new(
            field,
            "Password must contain at least one lowercase letter.",
            Some(value),
        ));
    }
    if !value.chars().any(|c| c.is_ascii_digit()) {
        errors.push(FieldError::new(
            field,
            "Password must contain at least one number.",
            Some(value),
        ));
    }
}

fn validate_confirm(password: &str, confirm: &str, errors: &mut Vec<FieldError>) {
    if password != confirm {
        errors.push(FieldError::new(
            "confirmPassword",
            "Passwords do not match.",
            Some(confirm),
        ));
    }
}

fn validate_email(value: &str, errors: &mut Vec<FieldError>) {
    let trimmed = value.trim();
    if trimmed.is_empty() || !trimmed.contains('@') {
        errors.push(FieldError::new(
            "email",
            "Invalid email address.",
            Some(value),
        ));
    }
}

fn validate_profile(
    name: &str,
    phone: &str,
    address: &str,
    errors: &mut Vec<FieldError>,
) {
    if name.trim().len() < 2 {
        errors.push(FieldError::new(
            "name",
            "Name must be at least 2 characters long.",
            Some(name),
        ));
    }
    if digits_only(phone).len() < 10 {
        errors.push(FieldError::new(
            "phone",
            "Phone number should be at least 10 digits long.",
            Some(phone),
        ));
    }
    if address.trim().len() < 5 {
        errors.push(FieldError::new(
            "address",
            "Address must be at least 5 characters long.",
            Some(address),
        ));
    }
}

/// Request to register a pet owner.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterOwnerRequest {
    pub name: String,
    pub email: String,
    pub password: String,
    pub confirm_password: String,
    pub phone: String,
    pub address: String,
}

impl RegisterOwnerRequest {
    pub fn validate(&self) -> Result<(), Vec<FieldError>> {
        let mut errors = Vec::new();
        validate_email(&self.email, &mut errors);
        validate_password("password", &self.password, &mut errors);
        validate_confirm(&self.password, &self.confirm_password, &mut errors);
        validate_profile(&self.name, &self.phone, &self.address, &mut errors);
        if errors.is_empty() { Ok(()) } else { Err(errors) }
    }
}

/// Request to register a clinic. Adds the clinic's locality.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterClinicRequest {
    pub name: String,
    pub email: String,
    pub password: String,
    pub confirm_password: String,
    pub phone: String,
    pub address: String,
    pub locality: String,
}

impl RegisterClinicRequest {
    pub fn validate(&self) -> Result<(), Vec<FieldError>> {
        let mut errors = Vec::new();
        validate_email(&self.email, &mut errors);
        validate_password("password", &self.password, &mut errors);
        validate_confirm(&self.password, &self.confirm_password, &mut errors);
        validate_profile(&self.name, &self.phone, &self.address, &mut errors);
        if self.locality.trim().len() < 2 {
            errors.push(FieldError::new(
                "locality",
                "Locality is required.",
                Some(self.locality.as_str()),
            ));
        }
        if errors.is_empty() { Ok(()) } else { Err(errors) }
    }
}

/// Request to login.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Request to start a password reset.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ForgotPasswordRequest {
    pub email: String,
}

impl ForgotPasswordRequest {
    pub fn validate(&self) -> Result<(), Vec<FieldError>> {
        let mut errors = Vec::new();
        validate_email(&self.email, &mut errors);
        if errors.is_empty() { Ok(()) } else { Err(errors) }
    }
}

/// Request to consume a reset token.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResetPasswordRequest {
    pub token: String,
    pub new_password: String,
    pub confirm_password: String,
}

impl ResetPasswordRequest {
    pub fn validate(&self) -> Result<(), Vec<FieldError>> {
        let mut errors = Vec::new();
        if self.token.trim().is_empty() {
            errors.push(FieldError::new(
                "token",
                "Token is required.",
                Some(self.token.as_str()),
            ));
        }
        validate_password("newPassword", &self.new_password, &mut errors);
        validate_confirm(&self.new_password, &self.confirm_password, &mut errors);
        if errors.is_empty() { Ok(()) } else { Err(errors) }
    }
}

/// Request to change the password of the authenticated user.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChangePasswordRequest {
    pub current_password: String,
    pub new_password: String,
    pub confirm_password: String,
}

impl ChangePasswordRequest {
    pub fn validate(&self) -> Result<(), Vec<FieldError>> {
        let mut errors = Vec::new();
        if self.current_password.is_empty() {
            errors.push(FieldError::new(
                "currentPassword",
                "Current password is required.",
                Some(self.current_password.as_str()),
            ));
        }
        validate_password("newPassword", &self.new_password, &mut errors);
        validate_confirm(&self.new_password, &self.confirm_password, &mut errors);
        if errors.is_empty() { Ok(()) } else { Err(errors) }
    }
}

/// Public view of a credential. Tagged by user type; `locality` exists on
/// clinics only. The password hash has no representation here.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "userType", rename_all = "lowercase")]
pub enum ProfileResponse {
    #[serde(rename_all = "camelCase")]
    Owner {
        id: String,
        name: String,
        email: String,
        phone: String,
        address: String,
        created_at: String,
        updated_at: String,
    },
    #[serde(rename_all = "camelCase")]
    Clinic {
        id: String,
        name: String,
        email: String,
        phone: String,
        address: String,
        locality: String,
        created_at: String,
        updated_at: String,
    },
}

/// Successful register/login response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthResponse {
    pub success: bool,
    pub token: String,
    pub user: ProfileResponse,
}

/// Token introspection response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenVerificationResponse {
    pub success: bool,
    pub user_id: String,
    pub user_type: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn owner_request() -> RegisterOwnerRequest {
        RegisterOwnerRequest {
            name: "Alice".into(),
            email: "a@b.com".into(),
            password: "Abcd1234".into(),
            confirm_password: "Abcd1234".into(),
            phone: "(555) 123-4567".into(),
            address: "1 Main Street".into(),
        }
    }

    #[test]
    fn owner_request_validates() {
        assert!(owner_request().validate().is_ok());
    }

    #[test]
    fn password_policy_is_enforced() {
        let mut req = owner_request();
        req.password = "abcd1234".into();
        req.confirm_password = "abcd1234".into();

        let errors = req.validate().unwrap_err();
        assert!(errors.iter().any(|e| e.message.contains("uppercase")));
    }

    #[test]
    fn mismatched_confirmation_is_rejected() {
        let mut req = owner_request();
        req.confirm_password = "Other1234".into();

        let errors = req.validate().unwrap_err();
        assert!(errors.iter().any(|e| e.field == "confirmPassword"));
    }

    #[test]
    fn password_errors_never_echo_the_input() {
        let mut req = owner_request();
        req.password = "short".into();
        req.confirm_password = "short".into();

        for error in req.validate().unwrap_err() {
            assert!(error.input.is_none(), "secret echoed for {}", error.field);
        }
    }

    #[test]
    fn phone_keeps_digits_only() {
        assert_eq!(digits_only("(555) 123-4567"), "5551234567");
    }

    #[test]
    fn profile_response_is_tagged_by_user_type() {
        let clinic = ProfileResponse::Clinic {
            id: "1".into(),
            name: "Vet".into(),
            email: "c@d.com".into(),
            phone: "5551234567".into(),
            address: "42 Vet Street".into(),
            locality: "Centro".into(),
            created_at: "2024-01-01T00:00:00Z".into(),
            updated_at: "2024-01-01T00:00:00Z".into(),
        };

        let json = serde_json::to_value(&clinic).unwrap();
        assert_eq!(json["userType"], "clinic");
        assert_eq!(json["locality"], "Centro");
        assert!(json.get("passwordHash").is_none());
    }
}
