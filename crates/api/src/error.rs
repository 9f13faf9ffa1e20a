//! Unified error handling with Sentry integration.
//!
//! Provides a unified `AppError` type that captures server-class errors to
//! Sentry before responding to the client. All route handlers return
//! `Result<T, AppError>`. Client bodies are JSON `{"message": ...}` and
//! never carry internal detail.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use thiserror::Error;

use bistro_core::types::id::IdParseError;

use crate::db::StoreError;
use crate::services::stripe::GatewayError;
use crate::services::token::TokenError;

/// Application-level error type for the ordering API.
#[derive(Debug, Error)]
pub enum AppError {
    /// Request lacks a valid token.
    #[error("unauthenticated: {0}")]
    Unauthenticated(String),

    /// Authenticated, but lacking the role or ownership the route requires.
    #[error("forbidden: {0}")]
    Forbidden(String),

    /// Malformed identifier or body.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// Resource not found.
    #[error("not found: {0}")]
    NotFound(String),

    /// Payment gateway call failed.
    #[error("payment gateway error: {0}")]
    Upstream(#[from] GatewayError),

    /// Database operation failed.
    #[error("store error: {0}")]
    Store(#[from] StoreError),

    /// Internal server error.
    #[error("internal error: {0}")]
    Internal(String),
}

impl From<IdParseError> for AppError {
    fn from(err: IdParseError) -> Self {
        Self::InvalidArgument(err.to_string())
    }
}

impl From<TokenError> for AppError {
    fn from(err: TokenError) -> Self {
        Self::Unauthenticated(err.to_string())
    }
}

/// JSON error body; the only shape clients ever see on failure.
#[derive(Debug, Serialize)]
struct ErrorBody {
    message: String,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        // Capture server errors to Sentry
        if matches!(self, Self::Store(_) | Self::Internal(_) | Self::Upstream(_)) {
            let event_id = sentry::capture_error(&self);
            tracing::error!(
                error = %self,
                sentry_event_id = %event_id,
                "Request error"
            );
        }

        let status = match &self {
            Self::Unauthenticated(_) => StatusCode::UNAUTHORIZED,
            Self::Forbidden(_) => StatusCode::FORBIDDEN,
            Self::InvalidArgument(_) => StatusCode::BAD_REQUEST,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::Upstream(_) => StatusCode::BAD_GATEWAY,
            Self::Store(_) | Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };

        // Don't expose internal error details to clients
        let message = match &self {
            Self::Store(_) | Self::Internal(_) => "Internal server error".to_owned(),
            Self::Upstream(_) => "Payment service unavailable".to_owned(),
            Self::Unauthenticated(_) => "Unauthorized access".to_owned(),
            Self::Forbidden(_) => "Forbidden access".to_owned(),
            Self::InvalidArgument(msg) | Self::NotFound(msg) => msg.clone(),
        };

        (status, Json(ErrorBody { message })).into_response()
    }
}

/// Result type alias for `AppError`.
pub type Result<T> = std::result::Result<T, AppError>;

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn get_status(err: AppError) -> StatusCode {
        err.into_response().status()
    }

    #[test]
    fn test_app_error_display() {
        let err = AppError::NotFound("menu item".to_owned());
        assert_eq!(err.to_string(), "not found: menu item");

        let err = AppError::InvalidArgument("bad id".to_owned());
        assert_eq!(err.to_string(), "invalid argument: bad id");
    }

    #[test]
    fn test_app_error_status_codes() {
        assert_eq!(
            get_status(AppError::Unauthenticated("no header".to_owned())),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(
            get_status(AppError::Forbidden("not admin".to_owned())),
            StatusCode::FORBIDDEN
        );
        assert_eq!(
            get_status(AppError::InvalidArgument("bad".to_owned())),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            get_status(AppError::NotFound("gone".to_owned())),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            get_status(AppError::Internal("boom".to_owned())),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_malformed_id_maps_to_invalid_argument() {
        let err: AppError = "zzz".parse::<bistro_core::MenuItemId>().unwrap_err().into();
        assert_eq!(get_status(err), StatusCode::BAD_REQUEST);
    }
}
