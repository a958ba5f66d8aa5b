//! Auth Error Types
//!
//! This module provides auth-specific error variants that integrate
//! with the unified `kernel::error::AppError` system.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use kernel::error::app_error::{AppError, FieldError};
use kernel::error::kind::ErrorKind;
use platform::token::TokenError;
use thiserror::Error;

/// Auth-specific result type alias
pub type AuthResult<T> = Result<T, AuthError>;

/// Auth-specific error variants
#[derive(Debug, Error)]
pub enum AuthError {
    /// One or more request fields failed validation
    #[error("Validation failed")]
    Validation(Vec<FieldError>),

    /// Request body could not be parsed
    #[error("Malformed request body: {0}")]
    MalformedBody(String),

    /// Email already registered
    #[error("User already exists")]
    DuplicateIdentity,

    /// Unknown email or wrong password (deliberately indistinguishable)
    #[error("Invalid credentials")]
    InvalidCredentials,

    /// No token on a protected route
    #[error("No token, authorization denied")]
    TokenMissing,

    /// Token could not be parsed
    #[error("Token is not valid")]
    TokenMalformed,

    /// Token signature does not match
    #[error("Token signature is invalid")]
    TokenInvalidSignature,

    /// Token past its expiry
    #[error("Token has expired")]
    TokenExpired,

    /// Token subject no longer exists
    #[error("User not found")]
    IdentityNotFound,

    /// Database error
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),
}

impl AuthError {
    /// Get the HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            AuthError::Validation(_)
            | AuthError::MalformedBody(_)
            | AuthError::DuplicateIdentity
            | AuthError::InvalidCredentials => StatusCode::BAD_REQUEST,
            AuthError::TokenMissing
            | AuthError::TokenMalformed
            | AuthError::TokenInvalidSignature
            | AuthError::TokenExpired => StatusCode::UNAUTHORIZED,
            AuthError::IdentityNotFound => StatusCode::NOT_FOUND,
            AuthError::Database(_) | AuthError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Get the ErrorKind for this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            AuthError::Validation(_)
            | AuthError::MalformedBody(_)
            | AuthError::DuplicateIdentity
            | AuthError::InvalidCredentials => ErrorKind::BadRequest,
            AuthError::TokenMissing
            | AuthError::TokenMalformed
            | AuthError::TokenInvalidSignature
            | AuthError::TokenExpired => ErrorKind::Unauthorized,
            AuthError::IdentityNotFound => ErrorKind::NotFound,
            AuthError::Database(_) | AuthError::Internal(_) => ErrorKind::InternalServerError,
        }
    }

    /// Convert to AppError
    ///
    /// Server errors are reduced to a generic message; their detail only
    /// reaches the logs.
    pub fn to_app_error(&self) -> AppError {
        match self {
            AuthError::Validation(fields) => AppError::new(self.kind(), self.to_string())
                .with_field_errors(fields.iter().cloned()),
            AuthError::TokenExpired => AppError::new(self.kind(), self.to_string())
                .with_action("Please sign in again"),
            AuthError::Database(_) | AuthError::Internal(_) => {
                AppError::new(self.kind(), "Internal server error")
            }
            _ => AppError::new(self.kind(), self.to_string()),
        }
    }

    /// Log the error with appropriate level
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
            AuthError::TokenInvalidSignature => {
                tracing::warn!("Token with invalid signature presented");
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
        self.to_app_error().into_response()
    }
}

impl From<TokenError> for AuthError {
    fn from(err: TokenError) -> Self {
        match err {
            TokenError::InvalidSignature => AuthError::TokenInvalidSignature,
            TokenError::Expired => AuthError::TokenExpired,
            TokenError::Malformed => AuthError::TokenMalformed,
            TokenError::SigningFailed(msg) => AuthError::Internal(msg),
            // Misconfiguration, never the client's fault
            err @ TokenError::WeakSecret { .. } => AuthError::Internal(err.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_codes() {
        assert_eq!(AuthError::DuplicateIdentity.status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(AuthError::InvalidCredentials.status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(AuthError::TokenMissing.status_code(), StatusCode::UNAUTHORIZED);
        assert_eq!(AuthError::TokenExpired.status_code(), StatusCode::UNAUTHORIZED);
        assert_eq!(AuthError::IdentityNotFound.status_code(), StatusCode::NOT_FOUND);
        assert_eq!(
            AuthError::Internal("boom".into()).status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_status_code_agrees_with_kind() {
        let errors = [
            AuthError::Validation(vec![]),
            AuthError::MalformedBody("x".into()),
            AuthError::DuplicateIdentity,
            AuthError::InvalidCredentials,
            AuthError::TokenMissing,
            AuthError::TokenMalformed,
            AuthError::TokenInvalidSignature,
            AuthError::TokenExpired,
            AuthError::IdentityNotFound,
            AuthError::Internal("x".into()),
        ];

        for err in errors {
            assert_eq!(err.status_code().as_u16(), err.kind().status_code());
        }
    }

    #[test]
    fn test_internal_detail_not_exposed() {
        let app_err = AuthError::Internal("connection refused at 10.0.0.5".into()).to_app_error();
        assert_eq!(app_err.message(), "Internal server error");
    }

    #[test]
    fn test_validation_carries_fields() {
        let err = AuthError::Validation(vec![FieldError::new("email", "Please include a valid email")]);
        let app_err = err.to_app_error();
        assert_eq!(app_err.field_errors().len(), 1);
        assert_eq!(app_err.field_errors()[0].field, "email");
    }

    #[test]
    fn test_token_error_mapping() {
        assert!(matches!(
            AuthError::from(TokenError::InvalidSignature),
            AuthError::TokenInvalidSignature
        ));
        assert!(matches!(AuthError::from(TokenError::Expired), AuthError::TokenExpired));
        assert!(matches!(AuthError::from(TokenError::Malformed), AuthError::TokenMalformed));
        assert!(matches!(
            AuthError::from(TokenError::SigningFailed("x".into())),
            AuthError::Internal(_)
        ));
        assert!(matches!(
            AuthError::from(TokenError::WeakSecret { min: 32, actual: 0 }),
            AuthError::Internal(_)
        ));
    }
}
