//! Error codes for SalesDesk
//!
//! One table drives the enum, its numeric value, the default message and
//! the reverse lookup, so a code cannot be added to one and missed in the
//! others. Ranges: 0xxx general, 1xxx auth, 2xxx permission, 4xxx order,
//! 8xxx role, 9xxx system.

use serde::{Deserialize, Serialize};
use std::fmt;

macro_rules! error_codes {
    ($( $(#[$doc:meta])* $name:ident = $value:literal => $message:literal, )+) => {
        /// Numeric error code, serialized as a bare `u16`
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        #[serde(into = "u16", try_from = "u16")]
        #[repr(u16)]
        pub enum ErrorCode {
            $( $(#[$doc])* $name = $value, )+
        }

        impl ErrorCode {
            /// Every defined code, in table order
            pub const ALL: &'static [ErrorCode] = &[$( ErrorCode::$name, )+];

            /// Default English message
            pub const fn message(&self) -> &'static str {
                match self {
                    $( ErrorCode::$name => $message, )+
                }
            }
        }

        impl TryFrom<u16> for ErrorCode {
            type Error = InvalidErrorCode;

            fn try_from(value: u16) -> Result<Self, Self::Error> {
                match value {
                    $( $value => Ok(ErrorCode::$name), )+
                    other => Err(InvalidErrorCode(other)),
                }
            }
        }
    };
}

error_codes! {
    Success = 0 => "OK",
    /// Input rejected before or by the backend
    ValidationFailed = 2 => "Validation failed",
    NotFound = 3 => "Resource not found",
    AlreadyExists = 4 => "Resource already exists",
    /// Backend answered something the client could not read
    InvalidRequest = 5 => "Invalid request",

    NotAuthenticated = 1001 => "Not signed in",

    PermissionDenied = 2001 => "Permission denied",
    /// Role editor without `manage_roles` / `manage_users`
    AdminRequired = 2003 => "Admin privileges required",

    /// Sale id not in the loaded order list
    OrderNotFound = 4001 => "Order not found",

    RoleIsSystem = 8104 => "Cannot delete a system role",
    RoleEmptyPermissions = 8105 => "Cannot strip all permissions from admin role",

    InternalError = 9001 => "Internal error",
    /// Backend unreachable
    NetworkError = 9003 => "Network error",
    TimeoutError = 9004 => "Request timed out",
    ConfigError = 9005 => "Configuration error",
}

impl ErrorCode {
    #[inline]
    pub const fn code(&self) -> u16 {
        *self as u16
    }

    #[inline]
    pub const fn is_success(&self) -> bool {
        matches!(self, ErrorCode::Success)
    }
}

impl From<ErrorCode> for u16 {
    fn from(code: ErrorCode) -> Self {
        code.code()
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// A `u16` that is not in the code table
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("invalid error code: {0}")]
pub struct InvalidErrorCode(pub u16);
