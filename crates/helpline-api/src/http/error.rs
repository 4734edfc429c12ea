//! Application error type mapping to HTTP status codes and envelope format.

use axum::response::{IntoResponse, Response};

use helpline_types::error::StoreError;

use super::response::{ApiResponse, ErrorCode};

#[derive(Debug)]
pub enum AppError {
    /// Storage failure (lead record, feature log, knowledge corpus).
    Store(StoreError),
    /// Bad input from the caller.
    Validation(String),
}

impl From<StoreError> for AppError {
    fn from(e: StoreError) -> Self {
        match e {
            StoreError::InvalidSession(msg) => AppError::Validation(msg),
            other => AppError::Store(other),
        }
    }
}

impl AppError {
    pub fn code(&self) -> ErrorCode {
        match self {
            AppError::Validation(_) => ErrorCode::ValidationError,
            AppError::Store(_) => ErrorCode::StorageError,
        }
    }
}

impl std::fmt::Display for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AppError::Validation(msg) => f.write_str(msg),
            AppError::Store(e) => write!(f, "{e}"),
        }
    }
}

impl std::error::Error for AppError {}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let code = self.code();
        if code != ErrorCode::ValidationError {
            tracing::error!(error = %self, "request failed");
        }
        ApiResponse::failure(code, self.to_string(), uuid::Uuid::now_v7().to_string())
            .into_response()
    }
}
