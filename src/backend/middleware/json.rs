/**
 * JSON Body Extractor
 *
 * Wraps `axum::Json` so that a body which fails to parse, has the wrong
 * content type or carries a mistyped field is answered with the same 400
 * error body as every other validation failure.
 */

use axum::extract::{FromRequest, Request};
use axum::Json;
use serde::de::DeserializeOwned;

use crate::backend::error::BackendError;

/// JSON request body
#[derive(Debug, Clone, Copy, Default)]
pub struct ApiJson<T>(pub T);

impl<T, S> FromRequest<S> for ApiJson<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = BackendError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state).await.map_err(|rejection| {
            tracing::debug!(error = %rejection, "Rejected request body");
            BackendError::from(rejection)
        })?;
        Ok(Self(value))
    }
}
