use axum::{http::StatusCode, Json};
use serde::Serialize;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("path escapes workspace root: {0}")]
    PathEscape(String),
    #[error("file not found: {0}")]
    NotFound(String),
    #[error("not a regular file: {0}")]
    NotAFile(String),
    #[error("invalid pattern: {0}")]
    InvalidPattern(String),
    #[error("invalid params: {0}")]
    InvalidParams(String),
    #[error("unknown action: {0}")]
    UnknownAction(String),
    #[error("io failure: {0}")]
    Io(String),
}

#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub code: String,
    pub message: String,
}

impl AppError {
    pub fn code(&self) -> &'static str {
        match self {
            AppError::PathEscape(_) => "PathEscape",
            AppError::NotFound(_) => "NotFound",
            AppError::NotAFile(_) => "NotAFile",
            AppError::InvalidPattern(_) => "InvalidPattern",
            AppError::InvalidParams(_) => "InvalidParams",
            AppError::UnknownAction(_) => "UnknownAction",
            AppError::Io(_) => "Io",
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            AppError::PathEscape(_) => StatusCode::FORBIDDEN,
            AppError::NotFound(_) | AppError::UnknownAction(_) => StatusCode::NOT_FOUND,
            AppError::NotAFile(_) | AppError::InvalidPattern(_) | AppError::InvalidParams(_) => {
                StatusCode::BAD_REQUEST
            }
            AppError::Io(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

pub type AppResult<T> = Result<T, AppError>;

pub fn into_response(err: AppError) -> (StatusCode, Json<ErrorBody>) {
    let body = ErrorBody { code: err.code().to_string(), message: err.to_string() };
    (err.status(), Json(body))
}
