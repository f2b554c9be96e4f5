//! SalesDesk console core
//!
//! Client-side rules of the sales console:
//! - [`auth`] - permission resolution, session context, guarded actions, role editing
//! - [`orders`] - order status workflow, display tables, in-memory order book
//! - [`notice`] - transient notifications for the UI

pub mod auth;
pub mod error;
pub mod notice;
pub mod orders;

pub use auth::{
    Gate, Guard, Guarded, PermissionSource, Principal, Required, RoleDirectory, RoleEditor,
    SessionContext, SessionHandle, SessionManager, has_permission,
};
pub use error::{DeskError, DeskResult};
pub use notice::{Notice, NoticeBus, NoticeLevel};
pub use orders::{
    OrderAction, OrderBook, OrderDesk, OrderStore, allowed_transitions, available_actions,
    next_status, plan, previous_status,
};
