use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;

#[derive(Debug)]
pub enum AppError {
    MissingUrl,
    UnknownMode(String),
    Config(String),
    BrowserConfig(String),
    Browser(chromiumoxide::error::CdpError),
    IoError(std::io::Error),
    Internal(String),
}

/// Failure body shared by every error path: the `state` flag carries the
/// outcome, `msg` the client-facing text.
#[derive(Serialize)]
struct ErrorResponse {
    state: bool,
    msg: String,
}

impl AppError {
    /// Client-facing message. Validation problems are described in full;
    /// capture failures collapse to a generic line so internal detail
    /// never reaches the caller.
    fn client_msg(&self) -> String {
        match self {
            AppError::MissingUrl => "missing url parameter".to_string(),
            AppError::UnknownMode(mode) => {
                format!("unknown mode '{}', expected pc or mobile", mode)
            }
            AppError::Config(_)
            | AppError::BrowserConfig(_)
            | AppError::Browser(_)
            | AppError::IoError(_)
            | AppError::Internal(_) => "screenshot service error".to_string(),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        match &self {
            AppError::MissingUrl | AppError::UnknownMode(_) => {
                tracing::debug!("rejected request: {:?}", self);
            }
            AppError::Config(msg) | AppError::BrowserConfig(msg) | AppError::Internal(msg) => {
                tracing::error!("capture failed: {}", msg);
            }
            AppError::Browser(e) => tracing::error!("capture failed: {}", e),
            AppError::IoError(e) => tracing::error!("capture failed: {}", e),
        }

        // Logical failures still answer HTTP 200; callers key off `state`.
        let body = ErrorResponse {
            state: false,
            msg: self.client_msg(),
        };
        (StatusCode::OK, Json(body)).into_response()
    }
}

impl From<std::io::Error> for AppError {
    fn from(e: std::io::Error) -> Self {
        AppError::IoError(e)
    }
}

impl From<chromiumoxide::error::CdpError> for AppError {
    fn from(e: chromiumoxide::error::CdpError) -> Self {
        AppError::Browser(e)
    }
}
