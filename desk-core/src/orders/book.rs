//! In-memory order list
//!
//! The list endpoint carries no status columns, so every order is held as
//! its full row and re-read before a status action is planned. Local state
//! changes only after the backend accepted the update. A failed read or
//! update leaves the list untouched, is logged, and is surfaced to the
//! caller and as an error notice; the user re-triggers the action to retry.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::{Local, NaiveDate};
use shared::error::AppResult;
use shared::models::{Sale, SaleSummary, SaleUpdate};

use super::display::status_label;
use super::workflow::{OrderAction, plan};
use crate::error::{DeskError, DeskResult};
use crate::notice::{Notice, NoticeBus};

/// Backend sale endpoints used by the workflow
#[async_trait]
pub trait OrderStore: Send + Sync {
    /// `GET /api/sales/`
    async fn list_sales(&self) -> AppResult<Vec<SaleSummary>>;

    /// `GET /api/sales/{id}`, the full row
    async fn get_sale(&self, sale_id: i64) -> AppResult<Sale>;

    /// `PUT /api/sales/{id}` with the whitelisted body
    async fn update_sale(&self, sale_id: i64, update: &SaleUpdate) -> AppResult<Sale>;
}

#[async_trait]
impl<T: OrderStore + ?Sized> OrderStore for Arc<T> {
    async fn list_sales(&self) -> AppResult<Vec<SaleSummary>> {
        (**self).list_sales().await
    }

    async fn get_sale(&self, sale_id: i64) -> AppResult<Sale> {
        (**self).get_sale(sale_id).await
    }

    async fn update_sale(&self, sale_id: i64, update: &SaleUpdate) -> AppResult<Sale> {
        (**self).update_sale(sale_id, update).await
    }
}

fn local_today() -> NaiveDate {
    Local::now().date_naive()
}

/// Orders currently shown by the console
pub struct OrderBook<S> {
    store: S,
    orders: Vec<Sale>,
    notices: NoticeBus,
    today: fn() -> NaiveDate,
}

impl<S: OrderStore> OrderBook<S> {
    pub fn new(store: S, notices: NoticeBus) -> Self {
        Self {
            store,
            orders: Vec::new(),
            notices,
            today: local_today,
        }
    }

    /// Override the date source used for date stamps
    pub fn with_clock(mut self, today: fn() -> NaiveDate) -> Self {
        self.today = today;
        self
    }

    pub fn orders(&self) -> &[Sale] {
        &self.orders
    }

    pub fn get(&self, sale_id: i64) -> Option<&Sale> {
        self.orders.iter().find(|o| o.sale_id == sale_id)
    }

    pub fn set_orders(&mut self, orders: Vec<Sale>) {
        self.orders = orders;
    }

    /// Replace the list with the backend's, one full row per listed sale
    pub async fn load(&mut self) -> DeskResult<usize> {
        let summaries = self.store.list_sales().await.inspect_err(|e| {
            tracing::error!(error = %e, "Failed to load orders");
        })?;

        let mut orders = Vec::with_capacity(summaries.len());
        for summary in &summaries {
            let mut order = self.store.get_sale(summary.sale_id).await.inspect_err(|e| {
                tracing::error!(sale_id = summary.sale_id, error = %e, "Failed to load order");
            })?;
            order.keep_joined_from_summary(summary);
            orders.push(order);
        }

        self.orders = orders;
        tracing::debug!(count = self.orders.len(), "Orders loaded");
        Ok(self.orders.len())
    }

    /// Re-read one order from the backend, keeping its joined fields
    pub async fn refresh(&mut self, sale_id: i64) -> DeskResult<&Sale> {
        let idx = self.index_of(sale_id)?;
        let mut fresh = self.store.get_sale(sale_id).await.inspect_err(|e| {
            tracing::error!(sale_id, error = %e, "Failed to reload order");
        })?;
        fresh.keep_joined(&self.orders[idx]);
        self.orders[idx] = fresh;
        Ok(&self.orders[idx])
    }

    fn index_of(&self, sale_id: i64) -> DeskResult<usize> {
        self.orders
            .iter()
            .position(|o| o.sale_id == sale_id)
            .ok_or(DeskError::OrderNotFound(sale_id))
    }

    fn publish_failure(&self, message: &str) {
        self.notices.publish(Notice::error(format!(
            "Failed to update order status: {message}"
        )));
    }

    /// Run `action` on one order
    ///
    /// The order is re-read first and the action planned on the stored
    /// status. Returns the updated order, or `None` when the action is not
    /// available in that status (nothing is sent).
    pub async fn apply(&mut self, sale_id: i64, action: OrderAction) -> DeskResult<Option<Sale>> {
        let idx = self.index_of(sale_id)?;
        let refreshed = self.refresh(sale_id).await.map(|_| ());
        if let Err(e) = refreshed {
            if let DeskError::Remote(remote) = &e {
                self.publish_failure(&remote.message);
            }
            return Err(e);
        }

        let current = self.orders[idx].order_status;
        let Some(update) = plan(&self.orders[idx], action, (self.today)()) else {
            tracing::debug!(sale_id, ?action, status = %current, "Action not available");
            return Ok(None);
        };

        if let Err(e) = self.store.update_sale(sale_id, &update).await {
            tracing::error!(
                sale_id,
                ?action,
                from = %current,
                to = %update.order_status,
                error = %e,
                "Order status update failed"
            );
            self.publish_failure(&e.message);
            return Err(e.into());
        }

        let order = &mut self.orders[idx];
        order.apply(&update);
        tracing::info!(sale_id, ?action, from = %current, to = %order.order_status, "Order status updated");
        self.notices.publish(Notice::success(format!(
            "Order marked as {}",
            status_label(order.order_status)
        )));
        Ok(Some(order.clone()))
    }

    pub async fn advance(&mut self, sale_id: i64) -> DeskResult<Option<Sale>> {
        self.apply(sale_id, OrderAction::Advance).await
    }

    pub async fn return_to_previous(&mut self, sale_id: i64) -> DeskResult<Option<Sale>> {
        self.apply(sale_id, OrderAction::ReturnToPrevious).await
    }

    pub async fn cancel(&mut self, sale_id: i64) -> DeskResult<Option<Sale>> {
        self.apply(sale_id, OrderAction::Cancel).await
    }

    pub async fn reprocess(&mut self, sale_id: i64) -> DeskResult<Option<Sale>> {
        self.apply(sale_id, OrderAction::Reprocess).await
    }
}
