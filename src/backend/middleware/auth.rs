/**
 * Authentication Extractor
 *
 * Resolves the `Authorization: Bearer <token>` header through the token
 * registry and hands the authenticated user to the handler. Missing,
 * malformed, unknown and expired tokens are all rejected with the same 401.
 */

use axum::extract::FromRequestParts;
use axum::http::{header::AUTHORIZATION, request::Parts, HeaderMap};

use crate::backend::error::BackendError;
use crate::backend::server::state::AppState;
use crate::shared::messaging::User;

/// Authenticated caller
#[derive(Clone, Debug)]
pub struct AuthUser {
    pub user: User,
    /// The bearer token the request presented
    pub token: String,
}

/// Pull the bearer token out of the request headers
pub fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    headers
        .get(AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
        .and_then(|value| value.strip_prefix("Bearer "))
        .map(str::trim)
        .filter(|token| !token.is_empty())
}

impl FromRequestParts<AppState> for AuthUser {
    type Rejection = BackendError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        let token = bearer_token(&parts.headers).ok_or_else(|| {
            tracing::warn!("Missing or malformed Authorization header");
            BackendError::invalid_token()
        })?;

        let user = state.auth.validate_token(token).await.map_err(|e| match e {
            BackendError::NotFound { .. } => {
                tracing::warn!("Token belongs to a deleted user");
                BackendError::invalid_token()
            }
            other => other,
        })?;

        Ok(AuthUser {
            user,
            token: token.to_string(),
        })
    }
}
