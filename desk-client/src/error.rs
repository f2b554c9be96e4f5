//! Client error types

use shared::error::{AppError, ErrorCode};
use thiserror::Error;

/// Client error type
#[derive(Debug, Error)]
pub enum ClientError {
    /// HTTP request failed
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Invalid response format
    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    /// Authentication required
    #[error("Authentication required: {0}")]
    Unauthorized(String),

    /// Permission denied
    #[error("Permission denied: {0}")]
    Forbidden(String),

    /// Resource not found
    #[error("Not found: {0}")]
    NotFound(String),

    /// Validation error (400, 409, 422)
    #[error("Validation error: {0}")]
    Validation(String),

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),
}

/// Result type for client operations
pub type ClientResult<T> = Result<T, ClientError>;

impl From<ClientError> for AppError {
    fn from(err: ClientError) -> Self {
        match err {
            ClientError::Http(e) if e.is_timeout() => {
                AppError::with_message(ErrorCode::TimeoutError, e.to_string())
            }
            ClientError::Http(e) => match e.status() {
                Some(status) => AppError::with_message(ErrorCode::from_http_status(status), e.to_string()),
                None => AppError::network(e.to_string()),
            },
            ClientError::Unauthorized(msg) => AppError::with_message(ErrorCode::NotAuthenticated, msg),
            ClientError::Forbidden(msg) => AppError::permission_denied(msg),
            ClientError::NotFound(msg) => AppError::with_message(ErrorCode::NotFound, msg),
            ClientError::Validation(msg) => AppError::validation(msg),
            ClientError::Internal(msg) => AppError::internal(msg),
            ClientError::InvalidResponse(msg) => {
                AppError::with_message(ErrorCode::InvalidRequest, msg)
            }
            ClientError::Serialization(e) => {
                AppError::with_message(ErrorCode::InvalidRequest, e.to_string())
            }
            ClientError::Config(msg) => AppError::with_message(ErrorCode::ConfigError, msg),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_into_app_error() {
        let err: AppError = ClientError::Forbidden("Permission denied: edit_sale".into()).into();
        assert_eq!(err.code, ErrorCode::PermissionDenied);
        assert_eq!(err.message, "Permission denied: edit_sale");

        let err: AppError = ClientError::NotFound("Sale not found".into()).into();
        assert_eq!(err.code, ErrorCode::NotFound);

        let err: AppError = ClientError::Validation("Role name already exists".into()).into();
        assert_eq!(err.code, ErrorCode::ValidationFailed);

        let err: AppError = ClientError::Config("bad timeout".into()).into();
        assert_eq!(err.code, ErrorCode::ConfigError);
    }
}
