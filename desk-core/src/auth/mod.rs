//! Authorization
//!
//! - [`permissions`] - permission keys and the any-of resolver
//! - [`session`] - session context and its lifecycle
//! - [`guard`] - guarded handlers and render gates
//! - [`roles`] - role editor for administrators

pub mod guard;
pub mod permissions;
pub mod roles;
pub mod session;

pub use guard::{Gate, Guard, Guarded};
pub use permissions::{Principal, Required, has_permission, permission_label};
pub use roles::{RoleDirectory, RoleEditor, role_key_for};
pub use session::{PermissionSource, SessionContext, SessionHandle, SessionManager};
