//! Maps the domain error taxonomy onto HTTP responses.
//!
//! Every failure body is JSON with a human-readable `error` field; no
//! raw store error ever crosses this boundary (the services already
//! converted them).

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use domains::AppError;
use serde_json::json;

pub type ApiResult<T> = std::result::Result<T, ApiError>;

#[derive(Debug)]
pub struct ApiError(pub AppError);

impl From<AppError> for ApiError {
    fn from(err: AppError) -> Self {
        Self(err)
    }
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self.0 {
            AppError::ValidationError(_) => StatusCode::BAD_REQUEST,
            AppError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            AppError::NotFound(_, _) => StatusCode::NOT_FOUND,
            AppError::Conflict(_) => StatusCode::CONFLICT,
            AppError::Transient(_) => StatusCode::SERVICE_UNAVAILABLE,
            AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        // The body carries the bare message, without the taxonomy
        // prefix; server-side detail goes to the log, not the client.
        let message = match self.0 {
            AppError::Transient(detail) => {
                tracing::warn!(%detail, "store temporarily unavailable");
                "store temporarily unavailable, safe to retry".to_string()
            }
            AppError::Internal(detail) => {
                tracing::error!(%detail, "request failed");
                "internal service error".to_string()
            }
            AppError::NotFound(entity, _) => format!("{entity} not found"),
            AppError::ValidationError(message)
            | AppError::Unauthorized(message)
            | AppError::Conflict(message) => message,
        };
        (status, Json(json!({ "error": message }))).into_response()
    }
}
