/**
 * Auth Service
 *
 * Signup, login and token lifecycle on top of the `users` table and the
 * token registry.
 *
 * # Security
 *
 * - Passwords are hashed with bcrypt before storage
 * - Plaintext passwords are never logged
 * - Every credential mismatch returns the same `Auth failed` error
 * - Logins for unknown or password-less accounts still run one bcrypt
 *   verification, against a throwaway hash of the configured cost
 */

use std::sync::{Arc, OnceLock};

use sqlx::SqlitePool;

use crate::backend::auth::handlers::types::SignupRequest;
use crate::backend::auth::sessions::TokenRegistry;
use crate::backend::auth::users::{self, NewUser, UserRecord};
use crate::backend::error::BackendError;
use crate::shared::messaging::User;

#[derive(Clone)]
pub struct AuthService {
    pool: SqlitePool,
    tokens: TokenRegistry,
    bcrypt_cost: u32,
    dummy_hash: Arc<OnceLock<Option<String>>>,
}

impl AuthService {
    pub fn new(pool: SqlitePool, tokens: TokenRegistry, bcrypt_cost: u32) -> Self {
        Self {
            pool,
            tokens,
            bcrypt_cost,
            dummy_hash: Arc::default(),
        }
    }

    /// Hash verified in place of a missing one, built on first use
    fn dummy_hash(&self) -> Option<&str> {
        self.dummy_hash
            .get_or_init(|| bcrypt::hash("yapyap-no-such-account", self.bcrypt_cost).ok())
            .as_deref()
    }

    pub fn tokens(&self) -> &TokenRegistry {
        &self.tokens
    }

    /// Register a credentialed user and issue a token for it
    pub async fn signup(&self, request: &SignupRequest) -> Result<(User, String), BackendError> {
        request.validate().map_err(|e| {
            tracing::warn!(field = ?e.field(), "Signup rejected: {}", e);
            e
        })?;

        if users::get_user_by_phone(&self.pool, &request.phone).await?.is_some() {
            tracing::warn!(phone = %request.phone, "Phone already registered");
            return Err(BackendError::conflict("Phone number already registered"));
        }
        if let Some(email) = request.email() {
            if users::get_user_by_email(&self.pool, email).await?.is_some() {
                tracing::warn!(email, "Email already registered");
                return Err(BackendError::conflict("Email already registered"));
            }
        }

        let password_hash = bcrypt::hash(&request.password, self.bcrypt_cost).map_err(|e| {
            tracing::error!("Failed to hash password: {:?}", e);
            e
        })?;

        let record = users::create_user(
            &self.pool,
            NewUser {
                name: request.name.trim().to_string(),
                phone: request.phone.clone(),
                email: request.email().map(str::to_string),
                password_hash: Some(password_hash),
                about: request.about.clone().unwrap_or_default(),
                avatar: None,
            },
        )
        .await
        .map_err(|e| BackendError::from_write(e, "Phone number or email already registered"))?;

        let token = self.tokens.issue(&record.id).await;
        tracing::info!(user_id = %record.id, "User signed up");
        Ok((record.into_user(), token))
    }

    /// Check credentials and issue a token; returns `(token, user_id)`
    pub async fn login(&self, identifier: &str, password: &str) -> Result<(String, String), BackendError> {
        let identifier = identifier.trim();
        if identifier.is_empty() || password.is_empty() {
            return Err(BackendError::auth_failed());
        }

        let record = if identifier.contains('@') {
            users::get_user_by_email(&self.pool, identifier).await?
        } else {
            users::get_user_by_phone(&self.pool, identifier).await?
        };

        let Some(UserRecord {
            id,
            password_hash: Some(hash),
            ..
        }) = record
        else {
            if let Some(dummy) = self.dummy_hash() {
                let _ = bcrypt::verify(password, dummy);
            }
            tracing::warn!("Login failed: unknown identifier or no password set");
            return Err(BackendError::auth_failed());
        };

        match bcrypt::verify(password, &hash) {
            Ok(true) => {}
            Ok(false) => {
                tracing::warn!(user_id = %id, "Login failed: wrong password");
                return Err(BackendError::auth_failed());
            }
            Err(e) => {
                tracing::error!(user_id = %id, "Stored password hash is unusable: {:?}", e);
                return Err(BackendError::auth_failed());
            }
        }

        let token = self.tokens.issue(&id).await;
        tracing::info!(user_id = %id, "User logged in");
        Ok((token, id))
    }

    /// Issue a token for an existing user
    pub async fn issue_token(&self, user_id: &str) -> Result<String, BackendError> {
        if user_id.is_empty() {
            return Err(BackendError::validation("User ID is required"));
        }
        if !users::user_exists(&self.pool, user_id).await? {
            return Err(BackendError::not_found("User not found"));
        }
        Ok(self.tokens.issue(user_id).await)
    }

    /// Resolve a bearer token to its user
    pub async fn validate_token(&self, token: &str) -> Result<User, BackendError> {
        let user_id = self.tokens.validate(token).await.map_err(|rejection| {
            tracing::debug!(?rejection, "Token rejected");
            BackendError::invalid_token()
        })?;

        users::get_user_by_id(&self.pool, &user_id)
            .await?
            .map(UserRecord::into_user)
            .ok_or_else(|| BackendError::not_found("User not found"))
    }

    /// Delete a token; unknown tokens are ignored
    pub async fn logout(&self, token: &str) {
        self.tokens.revoke(token).await;
    }
}
