//! User Data Structure
//!
//! A registered user plus the request/response bodies of the user endpoints.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::shared::error::SharedError;

/// A registered user
///
/// The password hash never leaves the backend, so it has no field here.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct User {
    /// Store-assigned user ID
    pub id: String,
    /// Display name
    pub name: String,
    /// E.164 phone number, unique across users
    pub phone: String,
    /// Email address, present for credentialed users
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    /// Free-form status text
    #[serde(default)]
    pub about: String,
    /// Avatar URL or reference
    #[serde(default)]
    pub avatar: Option<String>,
    #[serde(default)]
    pub online: bool,
    pub created_at: DateTime<Utc>,
}

/// Check a phone number against the E.164 shape `^\+[1-9]\d{1,14}$`
pub fn is_valid_phone(phone: &str) -> bool {
    let Some(digits) = phone.strip_prefix('+') else {
        return false;
    };
    let mut chars = digits.chars();
    match chars.next() {
        Some('1'..='9') => {}
        _ => return false,
    }
    (2..=15).contains(&digits.len()) && chars.all(|c| c.is_ascii_digit())
}

/// Validate a phone number, returning a `ValidationError` on failure
pub fn validate_phone(phone: &str) -> Result<(), SharedError> {
    if is_valid_phone(phone) {
        Ok(())
    } else {
        Err(SharedError::validation("phone", "Invalid phone number format"))
    }
}

/// Request body for `POST /api/users`
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateUserRequest {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub avatar: Option<String>,
}

impl CreateUserRequest {
    pub fn validate(&self) -> Result<(), SharedError> {
        if self.name.trim().is_empty() {
            return Err(SharedError::validation("name", "Name is required"));
        }
        validate_phone(&self.phone)
    }
}

/// Request body for `PUT /api/users/{userId}`; absent fields are left untouched
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateUserRequest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub about: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avatar: Option<String>,
}

impl UpdateUserRequest {
    pub fn validate(&self) -> Result<(), SharedError> {
        if let Some(name) = &self.name {
            if name.trim().is_empty() {
                return Err(SharedError::validation("name", "Name cannot be empty"));
            }
        }
        if let Some(phone) = &self.phone {
            validate_phone(phone)?;
        }
        Ok(())
    }
}

/// Response of `GET /api/users/validate/{phone}`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ValidatePhoneResponse {
    pub valid: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exists: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}
