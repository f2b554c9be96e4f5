//! Shared types for SalesDesk
//!
//! Data models and the error system used by both the console core
//! and the backend client.

pub mod error;
pub mod models;

// Re-exports
pub use error::{AppError, AppResult, ErrorCategory, ErrorCode};
pub use http;
pub use serde::{Deserialize, Serialize};
