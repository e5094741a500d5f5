use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use waitline_core::queue::QueueError;
use waitline_core::storage::{repository_error_to_status_code, RepositoryError};

/// API error rendered as the uniform `{"error": "<message>"}` envelope.
///
/// Server-side failures (5xx) carry a generic message to the caller; the
/// underlying cause is logged and never leaked.
pub struct ApiError {
    status: StatusCode,
    message: String,
}

impl ApiError {
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            message: message.into(),
        }
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::NOT_FOUND,
            message: message.into(),
        }
    }

    pub fn internal(cause: impl std::fmt::Display) -> Self {
        tracing::error!(error = %cause, "Internal server error");
        Self {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            message: "Internal server error".to_string(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        if self.status.is_client_error() {
            tracing::warn!(status = %self.status, message = %self.message, "API error");
        }
        (
            self.status,
            Json(serde_json::json!({ "error": self.message })),
        )
            .into_response()
    }
}

impl From<RepositoryError> for ApiError {
    fn from(err: RepositoryError) -> Self {
        let code = repository_error_to_status_code(&err);
        let status = StatusCode::from_u16(code).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

        if status.is_server_error() {
            return Self::internal(err);
        }

        Self {
            status,
            message: err.to_string(),
        }
    }
}

impl From<QueueError> for ApiError {
    fn from(err: QueueError) -> Self {
        // Every queue validation error is the caller's fault.
        Self::bad_request(err.to_string())
    }
}
