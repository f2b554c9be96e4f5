//! Data models
//!
//! Wire shapes of the backend's JSON. All IDs are `i64`.

pub mod permission;
pub mod role;
pub mod sale;
pub mod user;

// Re-exports
pub use permission::*;
pub use role::*;
pub use sale::*;
pub use user::*;
