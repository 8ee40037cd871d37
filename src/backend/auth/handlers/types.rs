/**
 * Authentication Handler Types
 *
 * Request and response bodies for signup, login and the token endpoints.
 */

use serde::{Deserialize, Serialize};

use crate::shared::error::SharedError;
use crate::shared::messaging::{validate_phone, User};

/// Minimum password length accepted at signup
pub const MIN_PASSWORD_LEN: usize = 8;

/// Sign up request (`POST /user/signup`)
#[derive(Deserialize, Serialize, Debug, Clone, Default)]
#[serde(rename_all = "camelCase")]
pub struct SignupRequest {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub email: Option<String>,
    /// Plaintext password, hashed before storage and never logged
    #[serde(default)]
    pub password: String,
    #[serde(default)]
    pub about: Option<String>,
}

impl SignupRequest {
    pub fn validate(&self) -> Result<(), SharedError> {
        if self.name.trim().is_empty() {
            return Err(SharedError::validation("name", "Name is required"));
        }
        validate_phone(&self.phone)?;
        if let Some(email) = self.email() {
            if !email.contains('@') {
                return Err(SharedError::validation("email", "Invalid email format"));
            }
        }
        if self.password.chars().count() < MIN_PASSWORD_LEN {
            return Err(SharedError::validation(
                "password",
                "Password must be at least 8 characters",
            ));
        }
        Ok(())
    }

    /// Email with blank values treated as absent
    pub fn email(&self) -> Option<&str> {
        self.email.as_deref().map(str::trim).filter(|e| !e.is_empty())
    }
}

/// Login request (`POST /user/login`); the identifier is an email or a phone number
#[derive(Deserialize, Serialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct LoginRequest {
    #[serde(default)]
    pub identifier: String,
    #[serde(default)]
    pub password: String,
}

/// Signup response
#[derive(Serialize, Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct SignupResponse {
    pub message: String,
    pub user: User,
    pub token: String,
}

/// Login response
#[derive(Serialize, Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct LoginResponse {
    pub token: String,
    pub user_id: String,
}

/// Body of `POST /api/auth/token`
#[derive(Deserialize, Serialize, Debug, Default)]
#[serde(rename_all = "camelCase")]
pub struct TokenRequest {
    #[serde(default)]
    pub user_id: Option<String>,
}

#[derive(Serialize, Deserialize, Debug)]
pub struct TokenResponse {
    pub token: String,
}

/// Response of `GET /api/auth/validate`
#[derive(Serialize, Deserialize, Debug)]
pub struct ValidateTokenResponse {
    pub valid: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user: Option<User>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

/// Plain `{ "message": ... }` acknowledgement
#[derive(Serialize, Deserialize, Debug)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}
