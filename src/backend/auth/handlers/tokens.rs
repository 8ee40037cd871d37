/**
 * Token Handlers
 *
 * - `POST /api/auth/token` - issue a token for a user ID
 * - `GET /api/auth/validate` - resolve the bearer token to its user
 * - `DELETE /api/auth/token` - logout
 */

use axum::{
    extract::State,
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    Json,
};

use crate::backend::auth::handlers::types::{
    MessageResponse, TokenRequest, TokenResponse, ValidateTokenResponse,
};
use crate::backend::auth::service::AuthService;
use crate::backend::error::{BackendError, INVALID_TOKEN};
use crate::backend::middleware::{bearer_token, ApiJson, AuthUser};

pub async fn generate_token(
    State(auth): State<AuthService>,
    ApiJson(request): ApiJson<TokenRequest>,
) -> Result<Json<TokenResponse>, BackendError> {
    let user_id = request
        .user_id
        .filter(|id| !id.is_empty())
        .ok_or_else(|| BackendError::validation("User ID is required"))?;

    let token = auth.issue_token(&user_id).await?;
    Ok(Json(TokenResponse { token }))
}

/// Answers `{ valid: true, user }`, `401 { valid: false, message }`, or
/// `404 { valid: false, message }` when the token outlived its user
pub async fn validate_token(
    State(auth): State<AuthService>,
    headers: HeaderMap,
) -> Result<Response, BackendError> {
    let invalid = || {
        (
            StatusCode::UNAUTHORIZED,
            Json(ValidateTokenResponse {
                valid: false,
                user: None,
                message: Some(INVALID_TOKEN.to_string()),
            }),
        )
            .into_response()
    };

    let Some(token) = bearer_token(&headers) else {
        return Ok(invalid());
    };

    match auth.validate_token(token).await {
        Ok(user) => Ok(Json(ValidateTokenResponse {
            valid: true,
            user: Some(user),
            message: None,
        })
        .into_response()),
        Err(BackendError::Auth { .. }) => Ok(invalid()),
        Err(BackendError::NotFound { message }) => Ok((
            StatusCode::NOT_FOUND,
            Json(ValidateTokenResponse {
                valid: false,
                user: None,
                message: Some(message),
            }),
        )
            .into_response()),
        Err(e) => Err(e),
    }
}

pub async fn logout(
    State(auth): State<AuthService>,
    caller: AuthUser,
) -> Json<MessageResponse> {
    auth.logout(&caller.token).await;
    tracing::info!(user_id = %caller.user.id, "User logged out");
    Json(MessageResponse::new("Logged out successfully"))
}
