use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};
use serde::Serialize;
use utoipa::ToSchema;

/// Standard error response body.
#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorResponse {
    /// Human-readable error message
    pub error: String,
}

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Missing places service key")]
    MissingServiceKey,

    /// Upstream returned a non-success status; relayed with its status and
    /// body untouched so the caller sees exactly what the provider said.
    #[error("Upstream error: HTTP {status}")]
    Upstream { status: u16, body: String },

    #[error("Upstream unavailable: {0}")]
    UpstreamUnavailable(String),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        match self {
            AppError::BadRequest(msg) => error_json(StatusCode::BAD_REQUEST, msg),
            AppError::MissingServiceKey => {
                error_json(StatusCode::INTERNAL_SERVER_ERROR, self.to_string())
            }
            AppError::Upstream { status, body } => {
                let status = StatusCode::from_u16(status).unwrap_or(StatusCode::BAD_GATEWAY);
                (status, [(header::CONTENT_TYPE, "application/json")], body).into_response()
            }
            AppError::UpstreamUnavailable(msg) => {
                tracing::error!("Places upstream unavailable: {}", msg);
                error_json(
                    StatusCode::BAD_GATEWAY,
                    "Failed to reach places provider".to_string(),
                )
            }
        }
    }
}

fn error_json(status: StatusCode, message: String) -> Response {
    (status, axum::Json(ErrorResponse { error: message })).into_response()
}
