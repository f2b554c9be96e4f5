//! SalesDesk client - HTTP client for the SalesDesk backend
//!
//! Provides the typed REST calls and plugs them into the console core as
//! its [`PermissionSource`](desk_core::PermissionSource),
//! [`RoleDirectory`](desk_core::RoleDirectory) and
//! [`OrderStore`](desk_core::OrderStore).

pub mod config;
pub mod error;
pub mod gateway;
pub mod http;
pub mod logger;

pub use config::ClientConfig;
pub use error::{ClientError, ClientResult};
pub use http::{HttpClient, USER_EMAIL_HEADER};
pub use logger::{init_logger, init_logger_with};
