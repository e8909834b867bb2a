//! Auth Error Types
//!
//! This module provides auth-specific error variants that integrate
//! with the unified `kernel::error::AppError` system. Errors a user can fix
//! from the sign-in/sign-up forms render as `{"error": {field: [msg]}}`;
//! everything else renders as RFC 7807 problem JSON.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use kernel::error::{app_error::AppError, kind::ErrorKind};
use kernel::form::FieldErrors;
use thiserror::Error;

/// Auth-specific result type alias
pub type AuthResult<T> = Result<T, AuthError>;

#[derive(Debug, Error)]
pub enum AuthError {
    /// Per-field form validation failure
    #[error("Validation failed: {0}")]
    Validation(FieldErrors),

    /// Unknown email or wrong password
    #[error("Invalid login credentials")]
    InvalidCredentials,

    #[error("Email not confirmed")]
    EmailNotConfirmed,

    /// Too many failed attempts
    #[error("Too many failed sign-in attempts. Try again later.")]
    AccountLocked,

    #[error("Too many requests. Please wait a few minutes and try again.")]
    RateLimited,

    #[error("Username is already taken")]
    UserNameTaken,

    #[error("User already registered")]
    EmailTaken,

    /// Session not found or expired
    #[error("Session not found or expired")]
    SessionInvalid,

    #[error("Session fingerprint mismatch")]
    SessionFingerprintMismatch,

    /// Unknown, expired or already used one-time token
    #[error("Invalid or expired token")]
    InvalidToken,

    #[error("Missing required header: {0}")]
    MissingHeader(&'static str),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl AuthError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            AuthError::Validation(_) | AuthError::UserNameTaken | AuthError::EmailTaken => {
                StatusCode::UNPROCESSABLE_ENTITY
            }
            AuthError::InvalidCredentials
            | AuthError::SessionInvalid
            | AuthError::SessionFingerprintMismatch => StatusCode::UNAUTHORIZED,
            AuthError::EmailNotConfirmed => StatusCode::FORBIDDEN,
            AuthError::AccountLocked => StatusCode::LOCKED,
            AuthError::RateLimited => StatusCode::TOO_MANY_REQUESTS,
            AuthError::InvalidToken | AuthError::MissingHeader(_) => StatusCode::BAD_REQUEST,
            AuthError::Database(_) | AuthError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            AuthError::Validation(_) | AuthError::UserNameTaken | AuthError::EmailTaken => {
                ErrorKind::UnprocessableEntity
            }
            AuthError::InvalidCredentials
            | AuthError::SessionInvalid
            | AuthError::SessionFingerprintMismatch => ErrorKind::Unauthorized,
            AuthError::EmailNotConfirmed | AuthError::AccountLocked => ErrorKind::Forbidden,
            AuthError::RateLimited => ErrorKind::TooManyRequests,
            AuthError::InvalidToken | AuthError::MissingHeader(_) => ErrorKind::BadRequest,
            AuthError::Database(_) | AuthError::Internal(_) => ErrorKind::InternalServerError,
        }
    }

    /// Errors shown next to form fields; `None` for everything else
    pub fn field_errors(&self) -> Option<FieldErrors> {
        match self {
            AuthError::Validation(errors) => Some(errors.clone()),
            AuthError::UserNameTaken => Some(FieldErrors::field("username", self.to_string())),
            AuthError::InvalidCredentials
            | AuthError::EmailNotConfirmed
            | AuthError::AccountLocked
            | AuthError::RateLimited
            | AuthError::EmailTaken => Some(FieldErrors::form(self.to_string())),
            _ => None,
        }
    }

    pub fn to_app_error(&self) -> AppError {
        AppError::new(self.kind(), self.to_string())
    }

    fn log(&self) {
        match self {
            AuthError::Database(e) => {
                tracing::error!(error = %e, "Auth database error");
            }
            AuthError::Internal(msg) => {
                tracing::error!(message = %msg, "Auth internal error");
            }
            AuthError::InvalidCredentials => {
                tracing::warn!("Invalid login attempt");
            }
            AuthError::AccountLocked => {
                tracing::warn!("Login attempt on locked account");
            }
            AuthError::RateLimited => {
                tracing::warn!("Auth rate limit exceeded");
            }
            AuthError::SessionFingerprintMismatch => {
                tracing::warn!("Session fingerprint mismatch detected");
            }
            _ => {
                tracing::debug!(error = %self, "Auth error");
            }
        }
    }
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        self.log();

        if let Some(errors) = self.field_errors() {
            return errors.into_response_with(self.status_code());
        }

        match self {
            AuthError::Database(e) => AppError::from(e).into_response(),
            other => other.to_app_error().into_response(),
        }
    }
}

impl From<platform::client::FingerprintError> for AuthError {
    fn from(err: platform::client::FingerprintError) -> Self {
        match err {
            platform::client::FingerprintError::MissingHeader(header) => {
                AuthError::MissingHeader(header)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_credentials_error_is_form_level() {
        let errors = AuthError::InvalidCredentials.field_errors().unwrap();
        assert_eq!(
            errors.get(kernel::form::FORM_FIELD),
            Some(&["Invalid login credentials".to_string()][..])
        );
        assert_eq!(
            AuthError::InvalidCredentials.status_code(),
            StatusCode::UNAUTHORIZED
        );
    }

    #[test]
    fn test_user_name_taken_targets_username_field() {
        let errors = AuthError::UserNameTaken.field_errors().unwrap();
        assert_eq!(
            errors.get("username"),
            Some(&["Username is already taken".to_string()][..])
        );
    }

    #[test]
    fn test_session_errors_are_problem_json() {
        assert!(AuthError::SessionInvalid.field_errors().is_none());
        assert_eq!(AuthError::InvalidToken.kind(), ErrorKind::BadRequest);
    }
}
