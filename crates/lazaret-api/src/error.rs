//! HTTP error response conversion
//!
//! Handlers return `Result<impl IntoResponse, HttpAppError>`. `AppError`
//! values (and anything `Into<AppError>`) convert into `HttpAppError` so
//! they render consistently: status, structured body, logging.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use lazaret_core::{AppError, LogLevel};
use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error_message: String,
    /// Machine-readable error code for programmatic handling
    pub code: String,
}

/// Wrapper type for AppError to implement IntoResponse. Needed because of
/// Rust's orphan rules: IntoResponse is external and AppError lives in
/// lazaret-core.
#[derive(Debug)]
pub struct HttpAppError(pub AppError);

impl From<AppError> for HttpAppError {
    fn from(err: AppError) -> Self {
        HttpAppError(err)
    }
}

impl From<anyhow::Error> for HttpAppError {
    fn from(err: anyhow::Error) -> Self {
        HttpAppError(AppError::from(err))
    }
}

impl IntoResponse for HttpAppError {
    fn into_response(self) -> Response {
        let err = self.0;

        match err.log_level() {
            LogLevel::Debug => {
                tracing::debug!(error = %err, error_type = err.error_type(), "request failed")
            }
            LogLevel::Warn => {
                tracing::warn!(error = %err, error_type = err.error_type(), "request failed")
            }
            LogLevel::Error => {
                tracing::error!(error = %err, error_type = err.error_type(), "request failed")
            }
        }

        let status = StatusCode::from_u16(err.http_status_code())
            .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        let body = ErrorResponse {
            error_message: err.client_message(),
            code: err.error_code().to_string(),
        };

        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_storage_error_renders_as_500() {
        let response = HttpAppError(AppError::Storage("bucket unreachable".into())).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn test_invalid_input_renders_as_400() {
        let response = HttpAppError(AppError::InvalidInput("bad event".into())).into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }
}
