/**
 * Signup Handler
 *
 * `POST /user/signup`
 *
 * # Registration Process
 *
 * 1. Validate name, E.164 phone, optional email and password length
 * 2. Reject a phone or email that is already registered (409)
 * 3. Hash the password with bcrypt and create the user
 * 4. Issue a session token
 * 5. Return `201 { message, user, token }`
 */

use axum::{extract::State, http::StatusCode, Json};

use crate::backend::auth::handlers::types::{SignupRequest, SignupResponse};
use crate::backend::auth::service::AuthService;
use crate::backend::error::BackendError;
use crate::backend::middleware::ApiJson;

pub async fn signup(
    State(auth): State<AuthService>,
    ApiJson(request): ApiJson<SignupRequest>,
) -> Result<(StatusCode, Json<SignupResponse>), BackendError> {
    tracing::info!(phone = %request.phone, "Signup request");

    let (user, token) = auth.signup(&request).await?;

    Ok((
        StatusCode::CREATED,
        Json(SignupResponse {
            message: "User created successfully".to_string(),
            user,
            token,
        }),
    ))
}
