//! Order status workflow
//!
//! Forward sequence: `pending → prepared_for_shipment → dispatch → delivered`.
//!
//! | Action | From | To |
//! |--------|------|----|
//! | Advance | any status with a successor in the sequence | the successor, stamping its date |
//! | ReturnToPrevious | any status with a predecessor | the predecessor |
//! | Cancel | anything but `delivered` / `cancelled` | `cancelled` |
//! | Reprocess | anything but `delivered` | `prepared_for_shipment`, shipment `returned` |
//!
//! Every caller asks this module which actions exist; none re-derives the
//! rules on its own.

use std::collections::BTreeSet;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use shared::models::{OrderStatus, Sale, SaleUpdate, ShipmentStatus};

/// The linear part of the lifecycle
pub const FORWARD_SEQUENCE: [OrderStatus; 4] = [
    OrderStatus::Pending,
    OrderStatus::PreparedForShipment,
    OrderStatus::Dispatch,
    OrderStatus::Delivered,
];

/// Index of `status` in [`FORWARD_SEQUENCE`]
pub fn position(status: OrderStatus) -> Option<usize> {
    FORWARD_SEQUENCE.iter().position(|s| *s == status)
}

/// Status immediately after `current`, if any
pub fn next_status(current: OrderStatus) -> Option<OrderStatus> {
    position(current).and_then(|i| FORWARD_SEQUENCE.get(i + 1).copied())
}

/// Status immediately before `current`, if any
pub fn previous_status(current: OrderStatus) -> Option<OrderStatus> {
    position(current)
        .and_then(|i| i.checked_sub(1))
        .map(|i| FORWARD_SEQUENCE[i])
}

/// User-triggered status change
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OrderAction {
    Advance,
    ReturnToPrevious,
    Cancel,
    Reprocess,
}

impl OrderAction {
    pub const ALL: [OrderAction; 4] = [
        OrderAction::Advance,
        OrderAction::ReturnToPrevious,
        OrderAction::Cancel,
        OrderAction::Reprocess,
    ];

    /// Button caption
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Advance => "Next Step",
            Self::ReturnToPrevious => "Return to Previous",
            Self::Cancel => "Cancel Order",
            Self::Reprocess => "Reprocess",
        }
    }

    /// Status this action leads to from `current`, `None` if unavailable
    pub fn target(&self, current: OrderStatus) -> Option<OrderStatus> {
        match self {
            Self::Advance => next_status(current),
            Self::ReturnToPrevious => previous_status(current),
            Self::Cancel => match current {
                OrderStatus::Delivered | OrderStatus::Cancelled => None,
                _ => Some(OrderStatus::Cancelled),
            },
            Self::Reprocess => match current {
                OrderStatus::Delivered => None,
                _ => Some(OrderStatus::PreparedForShipment),
            },
        }
    }
}

/// Actions to offer for an order in `current`
pub fn available_actions(current: OrderStatus) -> Vec<OrderAction> {
    OrderAction::ALL
        .into_iter()
        .filter(|action| action.target(current).is_some())
        .collect()
}

/// Every status reachable from `current` in one action
pub fn allowed_transitions(current: OrderStatus) -> BTreeSet<OrderStatus> {
    OrderAction::ALL
        .iter()
        .filter_map(|action| action.target(current))
        .collect()
}

/// Whitelisted update body for `action` on `order`
///
/// `None` when the action is not available in the order's current status;
/// the caller then does nothing.
pub fn plan(order: &Sale, action: OrderAction, today: NaiveDate) -> Option<SaleUpdate> {
    let target = action.target(order.order_status)?;
    let mut update = SaleUpdate::from(order);
    update.order_status = target;

    match action {
        OrderAction::Advance => match target {
            OrderStatus::PreparedForShipment => update.shipment_date = Some(today),
            OrderStatus::Dispatch => update.dispatch_date = Some(today),
            OrderStatus::Delivered => update.delivery_date = Some(today),
            _ => {}
        },
        OrderAction::Reprocess => update.shipment_status = ShipmentStatus::Returned,
        OrderAction::ReturnToPrevious | OrderAction::Cancel => {}
    }

    Some(update)
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::models::OrderStatus::*;

    fn order(status: OrderStatus) -> Sale {
        Sale {
            sale_id: 11,
            invoice_no: Some("INV-0011".into()),
            customer_id: 4,
            sale_date: "2026-10-10".into(),
            total_amount: 800.0,
            total_liters: 20.0,
            payment_status: "Pending".into(),
            notes: None,
            payment_terms: Some("30 days".into()),
            order_status: status,
            shipment_status: ShipmentStatus::NotShipped,
            shipment_date: None,
            dispatch_date: None,
            delivery_date: None,
            tracking_number: None,
            customer_name: Some("Kiran Shah".into()),
            mobile: Some("9000000000".into()),
            village: Some("Nadiad".into()),
            created_at: Some("2026-10-10T08:00:00".into()),
        }
    }

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 10, 19).unwrap()
    }

    #[test]
    fn test_next_status() {
        assert_eq!(next_status(Pending), Some(PreparedForShipment));
        assert_eq!(next_status(PreparedForShipment), Some(Dispatch));
        assert_eq!(next_status(Dispatch), Some(Delivered));
        assert_eq!(next_status(Delivered), None);
        assert_eq!(next_status(Cancelled), None);
    }

    #[test]
    fn test_previous_status() {
        assert_eq!(previous_status(Pending), None);
        assert_eq!(previous_status(PreparedForShipment), Some(Pending));
        assert_eq!(previous_status(Delivered), Some(Dispatch));
        assert_eq!(previous_status(Cancelled), None);
    }

    #[test]
    fn test_next_then_previous_round_trips() {
        for status in FORWARD_SEQUENCE {
            if let Some(next) = next_status(status) {
                assert_eq!(previous_status(next), Some(status));
            }
        }
    }

    #[test]
    fn test_available_actions() {
        use super::OrderAction::*;
        assert_eq!(available_actions(Pending), vec![Advance, Cancel, Reprocess]);
        assert_eq!(
            available_actions(Dispatch),
            vec![Advance, ReturnToPrevious, Cancel, Reprocess]
        );
        assert_eq!(available_actions(Delivered), vec![ReturnToPrevious]);
        assert_eq!(available_actions(Cancelled), vec![Reprocess]);
    }

    #[test]
    fn test_allowed_transitions() {
        assert_eq!(
            allowed_transitions(Pending),
            BTreeSet::from([PreparedForShipment, Cancelled])
        );
        assert_eq!(
            allowed_transitions(Dispatch),
            BTreeSet::from([PreparedForShipment, Delivered, Cancelled])
        );
        assert_eq!(allowed_transitions(Delivered), BTreeSet::from([Dispatch]));
        assert_eq!(
            allowed_transitions(Cancelled),
            BTreeSet::from([PreparedForShipment])
        );
    }

    #[test]
    fn test_advance_stamps_dates() {
        let update = plan(&order(Pending), OrderAction::Advance, today()).unwrap();
        assert_eq!(update.order_status, PreparedForShipment);
        assert_eq!(update.shipment_date, Some(today()));
        assert_eq!(
            serde_json::to_value(&update).unwrap()["shipment_date"],
            serde_json::json!("2026-10-19")
        );

        let update = plan(&order(PreparedForShipment), OrderAction::Advance, today()).unwrap();
        assert_eq!(update.order_status, Dispatch);
        assert_eq!(update.dispatch_date, Some(today()));
        assert_eq!(update.shipment_date, None);

        let update = plan(&order(Dispatch), OrderAction::Advance, today()).unwrap();
        assert_eq!(update.order_status, Delivered);
        assert_eq!(update.delivery_date, Some(today()));
    }

    #[test]
    fn test_advance_from_terminal_is_noop() {
        assert!(plan(&order(Delivered), OrderAction::Advance, today()).is_none());
        assert!(plan(&order(Cancelled), OrderAction::Advance, today()).is_none());
    }

    #[test]
    fn test_return_to_previous() {
        let update = plan(&order(Dispatch), OrderAction::ReturnToPrevious, today()).unwrap();
        assert_eq!(update.order_status, PreparedForShipment);
        assert_eq!(update.dispatch_date, None);
        assert!(plan(&order(Pending), OrderAction::ReturnToPrevious, today()).is_none());
    }

    #[test]
    fn test_cancel_guard() {
        let update = plan(&order(PreparedForShipment), OrderAction::Cancel, today()).unwrap();
        assert_eq!(update.order_status, Cancelled);
        assert!(plan(&order(Delivered), OrderAction::Cancel, today()).is_none());
        assert!(plan(&order(Cancelled), OrderAction::Cancel, today()).is_none());
    }

    #[test]
    fn test_reprocess() {
        let update = plan(&order(Cancelled), OrderAction::Reprocess, today()).unwrap();
        assert_eq!(update.order_status, PreparedForShipment);
        assert_eq!(update.shipment_status, ShipmentStatus::Returned);
        assert!(plan(&order(Delivered), OrderAction::Reprocess, today()).is_none());
    }

    #[test]
    fn test_plan_only_touches_whitelisted_fields() {
        for status in OrderStatus::ALL {
            for action in OrderAction::ALL {
                let Some(update) = plan(&order(status), action, today()) else {
                    continue;
                };
                let body = serde_json::to_value(&update).unwrap();
                for key in body.as_object().unwrap().keys() {
                    assert!(SaleUpdate::WRITABLE_FIELDS.contains(&key.as_str()));
                }
                assert_eq!(update.customer_id, 4);
                assert_eq!(update.payment_terms.as_deref(), Some("30 days"));
            }
        }
    }
}
