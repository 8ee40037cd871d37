/**
 * Error Conversion
 *
 * All backend errors implement `IntoResponse` from Axum, allowing them to be
 * returned directly from handlers.
 *
 * # Response Format
 *
 * ```json
 * { "message": "Chat not found", "status": 404 }
 * ```
 *
 * Server errors (500) carry a generic message plus an `error` detail string
 * and are logged before the response is built.
 */

use axum::{
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

use crate::backend::error::types::BackendError;

impl IntoResponse for BackendError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let message = self.message();

        let body = match self.detail() {
            Some(detail) => {
                tracing::error!(status = status.as_u16(), error = %detail, "Request failed");
                json!({
                    "message": message,
                    "status": status.as_u16(),
                    "error": detail,
                })
            }
            None => {
                tracing::debug!(status = status.as_u16(), %message, "Request rejected");
                json!({
                    "message": message,
                    "status": status.as_u16(),
                })
            }
        };

        (status, Json(body)).into_response()
    }
}
