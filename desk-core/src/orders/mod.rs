//! Orders
//!
//! - [`workflow`] - status sequence, transitions, update planning
//! - [`display`] - labels, colors, timeline steps
//! - [`book`] - in-memory order list backed by the order store
//! - [`desk`] - permission-gated status actions

pub mod book;
pub mod desk;
pub mod display;
pub mod workflow;

pub use book::{OrderBook, OrderStore};
pub use desk::OrderDesk;
pub use display::{StatusColor, order_steps, status_color, status_label};
pub use workflow::{
    FORWARD_SEQUENCE, OrderAction, allowed_transitions, available_actions, next_status, plan,
    previous_status,
};
