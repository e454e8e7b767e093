//! Auth Error Types
//!
//! This module provides auth-specific error variants that integrate
//! with the unified `kernel::error::AppError` system.
//!
//! Only unexpected failures live here. An invalid session token or a rejected
//! one-time code is a normal outcome of the flow, not an error.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use kernel::error::{app_error::AppError, kind::ErrorKind};
use thiserror::Error;

/// Auth-specific result type alias
pub type AuthResult<T> = Result<T, AuthError>;

/// Auth-specific error variants
#[derive(Debug, Error)]
pub enum AuthError {
    /// The identity verifier could not be reached or answered with an error status
    #[error("Identity verifier unavailable: {0}")]
    VerifierUnavailable(String),

    /// The identity verifier did not answer within the configured timeout
    #[error("Identity verifier timed out")]
    VerifierTimeout,

    /// Signing a new session token failed
    #[error("Session token signing failed: {0}")]
    TokenSigning(#[from] jsonwebtoken::errors::Error),

    /// Configuration could not be turned into a working value (URL joins etc.)
    #[error("Configuration error: {0}")]
    Configuration(String),
}

impl AuthError {
    /// Get the HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            AuthError::VerifierUnavailable(_) => StatusCode::BAD_GATEWAY,
            AuthError::VerifierTimeout => StatusCode::GATEWAY_TIMEOUT,
            AuthError::TokenSigning(_) | AuthError::Configuration(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    /// Get the ErrorKind for this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            AuthError::VerifierUnavailable(_) => ErrorKind::BadGateway,
            AuthError::VerifierTimeout => ErrorKind::GatewayTimeout,
            AuthError::TokenSigning(_) | AuthError::Configuration(_) => {
                ErrorKind::InternalServerError
            }
        }
    }

    /// Convert to the client-facing AppError
    ///
    /// The detail stays server-side as the error source: the client only sees
    /// the kind.
    pub fn into_app_error(self) -> AppError {
        let kind = self.kind();
        let retry = matches!(
            self,
            AuthError::VerifierUnavailable(_) | AuthError::VerifierTimeout
        );
        let err = AppError::new(kind, kind.as_str()).with_source(self);
        if retry {
            err.with_action("Please try signing in again later")
        } else {
            err
        }
    }

    /// Log the error with appropriate level
    fn log(&self) {
        match self {
            AuthError::VerifierUnavailable(detail) => {
                tracing::error!(detail = %detail, "Identity verifier request failed");
            }
            AuthError::VerifierTimeout => {
                tracing::error!("Identity verifier request timed out");
            }
            AuthError::TokenSigning(e) => {
                tracing::error!(error = %e, "Session token signing failed");
            }
            AuthError::Configuration(msg) => {
                tracing::error!(message = %msg, "Auth configuration error");
            }
        }
    }
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        self.log();
        self.into_app_error().into_response()
    }
}

impl From<reqwest::Error> for AuthError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            AuthError::VerifierTimeout
        } else {
            // The request URL carries the one-time code
            AuthError::VerifierUnavailable(err.without_url().to_string())
        }
    }
}

impl From<url::ParseError> for AuthError {
    fn from(err: url::ParseError) -> Self {
        AuthError::Configuration(err.to_string())
    }
}
