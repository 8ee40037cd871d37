//! User HTTP handlers
//!
//! `/api/users` endpoints. Creation here is the password-less variant used by
//! the token flow; credentialed accounts go through `/user/signup`.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use sqlx::SqlitePool;

use crate::backend::auth::handlers::types::MessageResponse;
use crate::backend::auth::service::AuthService;
use crate::backend::auth::users::{self, NewUser, UserRecord};
use crate::backend::error::BackendError;
use crate::backend::middleware::{ApiJson, AuthUser};
use crate::shared::messaging::{
    is_valid_phone, CreateUserRequest, UpdateUserRequest, User, ValidatePhoneResponse,
};

/// POST /api/users
pub async fn create_user(
    State(pool): State<SqlitePool>,
    ApiJson(request): ApiJson<CreateUserRequest>,
) -> Result<(StatusCode, Json<User>), BackendError> {
    request.validate()?;

    if users::get_user_by_phone(&pool, &request.phone).await?.is_some() {
        tracing::warn!(phone = %request.phone, "Phone already registered");
        return Err(BackendError::conflict("Phone number already registered"));
    }

    let record = users::create_user(
        &pool,
        NewUser {
            name: request.name.trim().to_string(),
            phone: request.phone,
            avatar: request.avatar,
            ..Default::default()
        },
    )
    .await
    .map_err(|e| BackendError::from_write(e, "Phone number already registered"))?;

    tracing::info!(user_id = %record.id, "User created");
    Ok((StatusCode::CREATED, Json(record.into_user())))
}

/// GET /api/users
pub async fn list_users(State(pool): State<SqlitePool>) -> Result<Json<Vec<User>>, BackendError> {
    let users = users::list_users(&pool).await?;
    Ok(Json(users.into_iter().map(UserRecord::into_user).collect()))
}

/// GET /api/users/validate/{phone}
pub async fn validate_phone(
    State(pool): State<SqlitePool>,
    Path(phone): Path<String>,
) -> Result<Response, BackendError> {
    if !is_valid_phone(&phone) {
        return Ok((
            StatusCode::BAD_REQUEST,
            Json(ValidatePhoneResponse {
                valid: false,
                exists: None,
                message: Some("Invalid phone number format".to_string()),
            }),
        )
            .into_response());
    }

    let exists = users::get_user_by_phone(&pool, &phone).await?.is_some();
    Ok(Json(ValidatePhoneResponse {
        valid: true,
        exists: Some(exists),
        message: None,
    })
    .into_response())
}

/// GET /api/users/{userId}
pub async fn get_user(
    State(pool): State<SqlitePool>,
    Path(user_id): Path<String>,
) -> Result<Json<User>, BackendError> {
    users::get_user_by_id(&pool, &user_id)
        .await?
        .map(|record| Json(record.into_user()))
        .ok_or_else(|| BackendError::not_found("User not found"))
}

fn ensure_self(caller: &AuthUser, user_id: &str) -> Result<(), BackendError> {
    if caller.user.id != user_id {
        tracing::warn!(caller = %caller.user.id, target = %user_id, "Refused to modify another user");
        return Err(BackendError::auth("Not authorized to modify this user"));
    }
    Ok(())
}

/// PUT /api/users/{userId}
pub async fn update_user(
    State(pool): State<SqlitePool>,
    caller: AuthUser,
    Path(user_id): Path<String>,
    ApiJson(changes): ApiJson<UpdateUserRequest>,
) -> Result<Json<User>, BackendError> {
    ensure_self(&caller, &user_id)?;
    changes.validate()?;

    let record = users::update_user(&pool, &user_id, &changes)
        .await
        .map_err(|e| BackendError::from_write(e, "Phone number or email already registered"))?
        .ok_or_else(|| BackendError::not_found("User not found"))?;

    Ok(Json(record.into_user()))
}

/// DELETE /api/users/{userId}
pub async fn delete_user(
    State(pool): State<SqlitePool>,
    State(auth): State<AuthService>,
    caller: AuthUser,
    Path(user_id): Path<String>,
) -> Result<Json<MessageResponse>, BackendError> {
    ensure_self(&caller, &user_id)?;

    if !users::delete_user(&pool, &user_id).await? {
        return Err(BackendError::not_found("User not found"));
    }
    auth.logout(&caller.token).await;

    tracing::info!(user_id = %user_id, "User deleted");
    Ok(Json(MessageResponse::new("User deleted successfully")))
}
