/**
 * Error Conversion
 *
 * All backend errors implement `IntoResponse` from Axum, so handlers can
 * return `Result<_, BackendError>` directly.
 *
 * # Response Format
 *
 * ```json
 * {
 *   "error": "Form not found.",
 *   "status": 404
 * }
 * ```
 *
 * Server errors are logged with their underlying cause before the
 * response is built; the cause itself is not sent to the client.
 */

use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use crate::backend::error::types::BackendError;

impl IntoResponse for BackendError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let message = self.message();

        if status.is_server_error() {
            match std::error::Error::source(&self) {
                Some(cause) => tracing::error!("{}: {}", message, cause),
                None => tracing::error!("{}", message),
            }
        } else {
            tracing::debug!("Request rejected with {}: {}", status, message);
        }

        let body = serde_json::json!({
            "error": message,
            "status": status.as_u16(),
        });

        (status, Json(body)).into_response()
    }
}

impl From<JsonRejection> for BackendError {
    /// Malformed or non-JSON request bodies are validation errors
    fn from(rejection: JsonRejection) -> Self {
        BackendError::validation(format!("Invalid JSON body: {}", rejection.body_text()))
    }
}
