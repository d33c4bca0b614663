//! Error types for the app server: a small closed set of HTTP-facing
//! error kinds, each mapped to a status code and a stable error code.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;
use thiserror::Error;

/// Application error type. Variants line up with the five error kinds
/// observed at the HTTP boundary.
#[derive(Debug, Error)]
pub enum AppError {
    /// Malformed seed, bad query parameter, unknown period, bad date range.
    #[error("validation failed: {0}")]
    Validation(String),

    /// Unknown id, or a surface disabled by the seed configuration.
    #[error("not found: {0}")]
    NotFound(String),

    /// Missing or rejected credential.
    #[error("unauthorized: {0}")]
    Unauthorized(String),

    /// Duplicate primary key during insert. Internal only — generation
    /// runs single-threaded and exclusively, so this should never
    /// surface at the HTTP boundary; kept as a variant for the
    /// conversions from `cursor_sim_store::StoreError`.
    #[error("conflict: {0}")]
    Conflict(String),

    /// Export materialization failure, corpus decode failure, or any
    /// other unexpected internal condition.
    #[error("internal error: {0}")]
    Internal(String),
}

impl AppError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::Validation(_) => StatusCode::BAD_REQUEST,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            Self::Conflict(_) => StatusCode::CONFLICT,
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn error_code(&self) -> &'static str {
        match self {
            Self::Validation(_) => "validation_error",
            Self::NotFound(_) => "not_found",
            Self::Unauthorized(_) => "unauthorized",
            Self::Conflict(_) => "conflict",
            Self::Internal(_) => "internal_error",
        }
    }
}

/// Error response body.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: ErrorDetail,
}

#[derive(Debug, Serialize)]
pub struct ErrorDetail {
    pub code: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let body = ErrorResponse {
            error: ErrorDetail {
                code: self.error_code().to_string(),
                message: self.to_string(),
                details: None,
            },
        };
        (status, Json(body)).into_response()
    }
}

pub type AppResult<T> = Result<T, AppError>;

impl From<cursor_sim_store::StoreError> for AppError {
    fn from(error: cursor_sim_store::StoreError) -> Self {
        use cursor_sim_store::StoreError;
        match error {
            StoreError::Conflict { .. } => Self::Conflict(error.to_string()),
            StoreError::DanglingReference { .. } | StoreError::ReadOnly => Self::Internal(error.to_string()),
        }
    }
}

impl From<cursor_sim_analyzers::AnalyzerError> for AppError {
    fn from(error: cursor_sim_analyzers::AnalyzerError) -> Self {
        Self::Validation(error.to_string())
    }
}

impl From<cursor_sim_export::ExportError> for AppError {
    fn from(error: cursor_sim_export::ExportError) -> Self {
        use cursor_sim_export::ExportError;
        match error {
            ExportError::UnknownProgress(id) => Self::NotFound(format!("unknown progress id: {id}")),
            ExportError::UnknownFile(id) => Self::NotFound(format!("unknown file id: {id}")),
            ExportError::Materialization(_) => Self::Internal(error.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_codes_match_each_error_kind() {
        assert_eq!(AppError::Validation("x".into()).status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(AppError::NotFound("x".into()).status_code(), StatusCode::NOT_FOUND);
        assert_eq!(AppError::Unauthorized("x".into()).status_code(), StatusCode::UNAUTHORIZED);
        assert_eq!(AppError::Conflict("x".into()).status_code(), StatusCode::CONFLICT);
        assert_eq!(AppError::Internal("x".into()).status_code(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn error_codes_use_the_stable_vocabulary() {
        assert_eq!(AppError::Validation("x".into()).error_code(), "validation_error");
        assert_eq!(AppError::NotFound("x".into()).error_code(), "not_found");
        assert_eq!(AppError::Unauthorized("x".into()).error_code(), "unauthorized");
        assert_eq!(AppError::Internal("x".into()).error_code(), "internal_error");
    }
}
