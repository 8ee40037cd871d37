/**
 * Login Handler
 *
 * `POST /user/login`
 *
 * The identifier is treated as an email when it contains `@`, otherwise as a
 * phone number. Unknown users, users without a password and wrong passwords
 * all produce the same 401 so callers cannot probe which accounts exist.
 */

use axum::{extract::State, Json};

use crate::backend::auth::handlers::types::{LoginRequest, LoginResponse};
use crate::backend::auth::service::AuthService;
use crate::backend::error::BackendError;
use crate::backend::middleware::ApiJson;

pub async fn login(
    State(auth): State<AuthService>,
    ApiJson(request): ApiJson<LoginRequest>,
) -> Result<Json<LoginResponse>, BackendError> {
    let (token, user_id) = auth.login(&request.identifier, &request.password).await?;
    Ok(Json(LoginResponse { token, user_id }))
}
