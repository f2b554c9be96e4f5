//! Console core error type

use shared::error::{AppError, ErrorCode};
use thiserror::Error;

/// Errors returned by the console core
///
/// A permission denial through [`crate::Guard`] is not an error; it is a
/// notice. `PermissionDenied` is only returned by data-loading calls such as
/// the role editor, which have nothing to render without the data.
#[derive(Debug, Error)]
pub enum DeskError {
    /// No principal is signed in
    #[error("Not signed in")]
    NotSignedIn,

    /// Caller lacks every one of the required permissions
    #[error("Permission denied: {0}")]
    PermissionDenied(String),

    /// Order is not in the in-memory list
    #[error("Order not found: {0}")]
    OrderNotFound(i64),

    /// Input rejected before any remote call
    #[error("Validation error: {0}")]
    Validation(String),

    /// Remote collaborator failed
    #[error(transparent)]
    Remote(#[from] AppError),
}

impl DeskError {
    /// Unified error code for this error
    pub fn code(&self) -> ErrorCode {
        match self {
            Self::NotSignedIn => ErrorCode::NotAuthenticated,
            Self::PermissionDenied(_) => ErrorCode::PermissionDenied,
            Self::OrderNotFound(_) => ErrorCode::OrderNotFound,
            Self::Validation(_) => ErrorCode::ValidationFailed,
            Self::Remote(e) => e.code,
        }
    }
}

/// Result type for console core operations
pub type DeskResult<T> = Result<T, DeskError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_remote_error_keeps_code() {
        let err: DeskError = AppError::new(ErrorCode::RoleIsSystem).into();
        assert_eq!(err.code(), ErrorCode::RoleIsSystem);
        assert_eq!(err.to_string(), "Cannot delete a system role");
    }

    #[test]
    fn test_local_error_codes() {
        assert_eq!(DeskError::NotSignedIn.code(), ErrorCode::NotAuthenticated);
        assert_eq!(DeskError::OrderNotFound(9).code(), ErrorCode::OrderNotFound);
        assert_eq!(
            DeskError::Validation("x".into()).code(),
            ErrorCode::ValidationFailed
        );
    }
}
