//! Display tables for order status chips and steppers

use serde::{Deserialize, Serialize};
use shared::models::{OrderStatus, ShipmentStatus};

use super::workflow::{FORWARD_SEQUENCE, position};

/// Palette slot of a status chip
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StatusColor {
    Default,
    Info,
    Primary,
    Warning,
    Success,
    Error,
}

pub const fn status_label(status: OrderStatus) -> &'static str {
    match status {
        OrderStatus::Pending => "Pending",
        OrderStatus::PreparedForShipment => "Prepared for Shipment",
        OrderStatus::Dispatch => "Dispatched",
        OrderStatus::Delivered => "Delivered",
        OrderStatus::Cancelled => "Cancelled",
    }
}

pub const fn status_color(status: OrderStatus) -> StatusColor {
    match status {
        OrderStatus::Pending => StatusColor::Warning,
        OrderStatus::PreparedForShipment => StatusColor::Info,
        OrderStatus::Dispatch => StatusColor::Primary,
        OrderStatus::Delivered => StatusColor::Success,
        OrderStatus::Cancelled => StatusColor::Error,
    }
}

pub const fn shipment_label(status: ShipmentStatus) -> &'static str {
    match status {
        ShipmentStatus::NotShipped => "Not Shipped",
        ShipmentStatus::Shipped => "Shipped",
        ShipmentStatus::Returned => "Returned",
    }
}

pub const fn shipment_color(status: ShipmentStatus) -> StatusColor {
    match status {
        ShipmentStatus::NotShipped => StatusColor::Default,
        ShipmentStatus::Shipped => StatusColor::Info,
        ShipmentStatus::Returned => StatusColor::Warning,
    }
}

/// One step of the order timeline
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OrderStep {
    pub status: OrderStatus,
    pub label: &'static str,
    pub completed: bool,
}

/// Timeline of [`FORWARD_SEQUENCE`] with completion marks
///
/// A step is completed when the current status is at or past it. Statuses
/// outside the sequence (`cancelled`) complete nothing.
pub fn order_steps(current: OrderStatus) -> Vec<OrderStep> {
    let reached = position(current);
    FORWARD_SEQUENCE
        .iter()
        .enumerate()
        .map(|(i, status)| OrderStep {
            status: *status,
            label: status_label(*status),
            completed: reached.is_some_and(|r| i <= r),
        })
        .collect()
}

/// Index of the active stepper step, `None` outside the sequence
pub fn active_step(current: OrderStatus) -> Option<usize> {
    position(current)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_labels_and_colors() {
        assert_eq!(status_label(OrderStatus::Pending), "Pending");
        assert_eq!(status_color(OrderStatus::Pending), StatusColor::Warning);
        assert_eq!(status_label(OrderStatus::Delivered), "Delivered");
        assert_eq!(status_color(OrderStatus::Delivered), StatusColor::Success);
        assert_eq!(status_color(OrderStatus::Cancelled), StatusColor::Error);
        assert_eq!(shipment_label(ShipmentStatus::Returned), "Returned");
        assert_eq!(shipment_color(ShipmentStatus::Returned), StatusColor::Warning);
    }

    #[test]
    fn test_delivered_completes_every_step() {
        let steps = order_steps(OrderStatus::Delivered);
        assert_eq!(steps.len(), 4);
        assert!(steps.iter().all(|s| s.completed));
    }

    #[test]
    fn test_steps_are_monotonic() {
        let steps = order_steps(OrderStatus::PreparedForShipment);
        let marks: Vec<bool> = steps.iter().map(|s| s.completed).collect();
        assert_eq!(marks, vec![true, true, false, false]);
        assert_eq!(active_step(OrderStatus::PreparedForShipment), Some(1));

        for status in OrderStatus::ALL {
            let marks: Vec<bool> = order_steps(status).iter().map(|s| s.completed).collect();
            assert!(marks.windows(2).all(|w| w[0] || !w[1]), "{status}: {marks:?}");
        }
    }

    #[test]
    fn test_cancelled_completes_nothing() {
        assert!(order_steps(OrderStatus::Cancelled).iter().all(|s| !s.completed));
        assert_eq!(active_step(OrderStatus::Cancelled), None);
    }
}
