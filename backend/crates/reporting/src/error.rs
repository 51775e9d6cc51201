//! Reporting Error Types
//!
//! Incident/Task error variants that integrate with the unified
//! `kernel::error::AppError` system.

use axum::extract::multipart::{MultipartError, MultipartRejection};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use kernel::error::{app_error::AppError, kind::ErrorKind};
use thiserror::Error;

/// Reporting-specific result type alias
pub type ReportResult<T> = Result<T, ReportError>;

/// Reporting-specific error variants
#[derive(Debug, Error)]
pub enum ReportError {
    /// Missing, empty or mistyped input
    #[error("{0}")]
    Validation(String),

    #[error("Incident not found")]
    IncidentNotFound,

    #[error("Task not found")]
    TaskNotFound,

    /// Upload exceeded the configured body limit
    #[error("Upload too large")]
    PayloadTooLarge,

    /// The image could not be written to the media directory
    #[error("Failed to store image: {0}")]
    Storage(#[source] std::io::Error),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl ReportError {
    /// Get the ErrorKind for this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            ReportError::Validation(_) => ErrorKind::BadRequest,
            ReportError::IncidentNotFound | ReportError::TaskNotFound => ErrorKind::NotFound,
            ReportError::PayloadTooLarge => ErrorKind::PayloadTooLarge,
            ReportError::Storage(_) | ReportError::Database(_) | ReportError::Internal(_) => {
                ErrorKind::InternalServerError
            }
        }
    }

    /// Get the HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        StatusCode::from_u16(self.kind().status_code())
            .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
    }

    /// Convert to AppError. Server-side details stay in the logs.
    pub fn to_app_error(&self) -> AppError {
        match self {
            ReportError::Storage(_) => AppError::internal("Failed to store image"),
            ReportError::Database(_) | ReportError::Internal(_) => {
                AppError::internal("Internal server error")
            }
            _ => AppError::new(self.kind(), self.to_string()),
        }
    }

    /// Shorthand for a validation failure
    pub fn validation(message: impl Into<String>) -> Self {
        ReportError::Validation(message.into())
    }

    /// Log the error with appropriate level
    fn log(&self) {
        match self {
            ReportError::Storage(e) => {
                tracing::error!(error = %e, "Media storage error");
            }
            ReportError::Database(e) => {
                tracing::error!(error = %e, "Reporting database error");
            }
            ReportError::Internal(msg) => {
                tracing::error!(message = %msg, "Reporting internal error");
            }
            _ => {
                tracing::debug!(error = %self, "Reporting error");
            }
        }
    }
}

impl From<MultipartRejection> for ReportError {
    fn from(rejection: MultipartRejection) -> Self {
        ReportError::Validation(rejection.body_text())
    }
}

impl From<MultipartError> for ReportError {
    fn from(err: MultipartError) -> Self {
        if err.status() == StatusCode::PAYLOAD_TOO_LARGE {
            ReportError::PayloadTooLarge
        } else {
            ReportError::Validation(err.body_text())
        }
    }
}

impl IntoResponse for ReportError {
    fn into_response(self) -> Response {
        self.log();
        self.to_app_error().into_response()
    }
}
