//! Order desk: permission gate in front of the order book

use shared::models::Sale;

use super::book::{OrderBook, OrderStore};
use super::workflow::{OrderAction, available_actions};
use crate::auth::Guard;
use crate::auth::permissions::ORDER_STATUS_PERMISSIONS;
use crate::error::DeskResult;

/// Status actions as the UI triggers them
///
/// Every action first passes the guard; a denied action publishes the
/// denial notice and returns `Ok(None)` without touching the workflow.
pub struct OrderDesk<S> {
    guard: Guard,
    book: OrderBook<S>,
}

impl<S: OrderStore> OrderDesk<S> {
    pub fn new(guard: Guard, book: OrderBook<S>) -> Self {
        Self { guard, book }
    }

    pub fn book(&self) -> &OrderBook<S> {
        &self.book
    }

    pub fn book_mut(&mut self) -> &mut OrderBook<S> {
        &mut self.book
    }

    /// Buttons to enable for an order; empty without the status permission
    pub fn actions_for(&self, sale_id: i64) -> Vec<OrderAction> {
        if !self.guard.session().can(ORDER_STATUS_PERMISSIONS) {
            return Vec::new();
        }
        self.book
            .get(sale_id)
            .map(|o| available_actions(o.order_status))
            .unwrap_or_default()
    }

    pub async fn perform(&mut self, sale_id: i64, action: OrderAction) -> DeskResult<Option<Sale>> {
        if !self.guard.check(ORDER_STATUS_PERMISSIONS, None) {
            return Ok(None);
        }
        self.book.apply(sale_id, action).await
    }
}
