//! Vault Error Types
//!
//! Vault-specific error variants that integrate with the unified
//! `kernel::error::AppError` system. Form failures render as
//! `{"error": {field: [msg]}}`, everything else as problem JSON.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use kernel::error::{app_error::AppError, kind::ErrorKind};
use kernel::form::FieldErrors;
use thiserror::Error;

/// Vault-specific result type alias
pub type VaultResult<T> = Result<T, VaultError>;

#[derive(Debug, Error)]
pub enum VaultError {
    /// Per-field form validation failure
    #[error("Validation failed: {0}")]
    Validation(FieldErrors),

    /// Missing, not visible to the viewer, or not owned by the viewer
    #[error("{0} not found")]
    NotFound(&'static str),

    #[error("You cannot follow yourself")]
    CannotFollowSelf,

    /// Avatar store failure
    #[error("Storage error: {0}")]
    Storage(#[from] std::io::Error),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl VaultError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            VaultError::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
            VaultError::NotFound(_) => StatusCode::NOT_FOUND,
            VaultError::CannotFollowSelf => StatusCode::BAD_REQUEST,
            VaultError::Storage(_) | VaultError::Database(_) | VaultError::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            VaultError::Validation(_) => ErrorKind::UnprocessableEntity,
            VaultError::NotFound(_) => ErrorKind::NotFound,
            VaultError::CannotFollowSelf => ErrorKind::BadRequest,
            VaultError::Storage(_) | VaultError::Database(_) | VaultError::Internal(_) => {
                ErrorKind::InternalServerError
            }
        }
    }

    /// Single-field validation failure
    pub fn field(field: &str, message: impl Into<String>) -> Self {
        VaultError::Validation(FieldErrors::field(field, message))
    }

    pub fn to_app_error(&self) -> AppError {
        match self {
            // Don't leak paths or SQL
            VaultError::Storage(_) | VaultError::Database(_) | VaultError::Internal(_) => {
                AppError::internal("Internal server error")
            }
            _ => AppError::new(self.kind(), self.to_string()),
        }
    }

    fn log(&self) {
        match self {
            VaultError::Database(e) => {
                tracing::error!(error = %e, "Vault database error");
            }
            VaultError::Storage(e) => {
                tracing::error!(error = %e, "Avatar storage error");
            }
            VaultError::Internal(msg) => {
                tracing::error!(message = %msg, "Vault internal error");
            }
            _ => {
                tracing::debug!(error = %self, "Vault error");
            }
        }
    }
}

impl From<VaultError> for AppError {
    fn from(err: VaultError) -> Self {
        err.to_app_error()
    }
}

impl IntoResponse for VaultError {
    fn into_response(self) -> Response {
        self.log();

        match self {
            VaultError::Validation(errors) => {
                errors.into_response_with(StatusCode::UNPROCESSABLE_ENTITY)
            }
            VaultError::Database(e) => AppError::from(e).into_response(),
            other => other.to_app_error().into_response(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_codes() {
        assert_eq!(
            VaultError::field("content", "too short").status_code(),
            StatusCode::UNPROCESSABLE_ENTITY
        );
        assert_eq!(
            VaultError::NotFound("Prompt").status_code(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            VaultError::CannotFollowSelf.status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            VaultError::Internal("boom".into()).status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_not_found_message() {
        assert_eq!(VaultError::NotFound("Prompt").to_string(), "Prompt not found");
    }

    #[test]
    fn test_internal_details_hidden() {
        let app: AppError = VaultError::Internal("secret path".into()).into();
        assert_eq!(app.message(), "Internal server error");
    }
}
