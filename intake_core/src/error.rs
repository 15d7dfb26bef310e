//! Application error types and handling

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::store::StoreError;

pub type Result<T> = std::result::Result<T, AppError>;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Unauthorized")]
    Unauthorized,

    #[error("Storage error: {0}")]
    Storage(String),
}

impl AppError {
    /// Wraps a store failure behind a generic public message. The underlying
    /// error is logged here and never reaches the client.
    pub fn storage(message: &str, err: StoreError) -> Self {
        tracing::error!(error = %err, "{}", message);
        AppError::Storage(message.to_string())
    }

    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::Validation(_) | AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Unauthorized => StatusCode::UNAUTHORIZED,
            AppError::Storage(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();

        let error_message = match self {
            AppError::Unauthorized => return (status, "Unauthorized").into_response(),
            AppError::Validation(msg)
            | AppError::BadRequest(msg)
            | AppError::NotFound(msg)
            | AppError::Storage(msg) => msg,
        };

        (status, Json(json!({ "error": error_message }))).into_response()
    }
}
