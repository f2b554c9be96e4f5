//! Sale (order) Model

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

// ============================================================================
// Status Types
// ============================================================================

/// Order lifecycle status
///
/// `Pending → PreparedForShipment → Dispatch → Delivered` is the forward
/// sequence; `Cancelled` sits outside it.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum OrderStatus {
    /// Legacy rows carry the capitalised default `"Pending"`
    #[default]
    #[serde(alias = "Pending")]
    Pending,
    PreparedForShipment,
    Dispatch,
    Delivered,
    Cancelled,
}

impl OrderStatus {
    /// Every status, in declaration order
    pub const ALL: [OrderStatus; 5] = [
        OrderStatus::Pending,
        OrderStatus::PreparedForShipment,
        OrderStatus::Dispatch,
        OrderStatus::Delivered,
        OrderStatus::Cancelled,
    ];

    /// Wire value
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::PreparedForShipment => "prepared_for_shipment",
            Self::Dispatch => "dispatch",
            Self::Delivered => "delivered",
            Self::Cancelled => "cancelled",
        }
    }
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Unrecognised status string
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown status: {0}")]
pub struct UnknownStatus(pub String);

impl FromStr for OrderStatus {
    type Err = UnknownStatus;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" | "Pending" => Ok(Self::Pending),
            "prepared_for_shipment" => Ok(Self::PreparedForShipment),
            "dispatch" => Ok(Self::Dispatch),
            "delivered" => Ok(Self::Delivered),
            "cancelled" => Ok(Self::Cancelled),
            other => Err(UnknownStatus(other.to_string())),
        }
    }
}

/// Shipment marker carried next to the order status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ShipmentStatus {
    #[default]
    NotShipped,
    Shipped,
    /// Set when an order is reprocessed
    Returned,
}

impl ShipmentStatus {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::NotShipped => "not_shipped",
            Self::Shipped => "shipped",
            Self::Returned => "returned",
        }
    }
}

impl fmt::Display for ShipmentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ============================================================================
// Sale
// ============================================================================

fn default_payment_status() -> String {
    "Pending".to_string()
}

/// Row of `GET /api/sales/`
///
/// The list endpoint sends the invoice columns and the joined customer
/// fields only. It carries no order or shipment status, so it cannot drive
/// the status workflow; that needs the full [`Sale`] row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SaleSummary {
    pub sale_id: i64,
    #[serde(default)]
    pub invoice_no: Option<String>,
    pub customer_id: i64,
    pub sale_date: String,
    #[serde(default)]
    pub total_amount: f64,
    #[serde(default)]
    pub total_liters: f64,
    #[serde(default = "default_payment_status")]
    pub payment_status: String,
    #[serde(default)]
    pub notes: Option<String>,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub customer_name: Option<String>,
    #[serde(default)]
    pub village: Option<String>,
}

impl From<&Sale> for SaleSummary {
    fn from(sale: &Sale) -> Self {
        Self {
            sale_id: sale.sale_id,
            invoice_no: sale.invoice_no.clone(),
            customer_id: sale.customer_id,
            sale_date: sale.sale_date.clone(),
            total_amount: sale.total_amount,
            total_liters: sale.total_liters,
            payment_status: sale.payment_status.clone(),
            notes: sale.notes.clone(),
            created_at: sale.created_at.clone(),
            customer_name: sale.customer_name.clone(),
            village: sale.village.clone(),
        }
    }
}

/// Full sale row, as returned by `GET /api/sales/{id}` and `PUT /api/sales/{id}`
///
/// `order_status` and `shipment_status` are required: a row without them
/// is rejected rather than read as a pending order.
/// `customer_name`, `mobile`, `village` and `created_at` are joined or
/// server-generated and are never written back; see [`SaleUpdate`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Sale {
    pub sale_id: i64,
    #[serde(default)]
    pub invoice_no: Option<String>,
    pub customer_id: i64,
    pub sale_date: String,
    #[serde(default)]
    pub total_amount: f64,
    #[serde(default)]
    pub total_liters: f64,
    #[serde(default = "default_payment_status")]
    pub payment_status: String,
    #[serde(default)]
    pub notes: Option<String>,
    #[serde(default)]
    pub payment_terms: Option<String>,
    pub order_status: OrderStatus,
    pub shipment_status: ShipmentStatus,
    #[serde(default)]
    pub shipment_date: Option<NaiveDate>,
    #[serde(default)]
    pub dispatch_date: Option<NaiveDate>,
    #[serde(default)]
    pub delivery_date: Option<NaiveDate>,
    #[serde(default)]
    pub tracking_number: Option<String>,

    // === Read-only (joined / generated) ===
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub customer_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mobile: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub village: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
}

impl Sale {
    /// Copy the writable fields of `update` onto this sale, keeping joined fields
    pub fn apply(&mut self, update: &SaleUpdate) {
        self.invoice_no = update.invoice_no.clone();
        self.customer_id = update.customer_id;
        self.sale_date = update.sale_date.clone();
        self.total_amount = update.total_amount;
        self.total_liters = update.total_liters;
        self.payment_status = update.payment_status.clone();
        self.notes = update.notes.clone();
        self.payment_terms = update.payment_terms.clone();
        self.order_status = update.order_status;
        self.shipment_status = update.shipment_status;
        self.shipment_date = update.shipment_date;
        self.dispatch_date = update.dispatch_date;
        self.delivery_date = update.delivery_date;
        self.tracking_number = update.tracking_number.clone();
    }

    /// Fill joined fields this row lacks from `other`
    ///
    /// `GET /api/sales/{id}` returns the bare table row; the customer
    /// name and village come from the list join.
    pub fn keep_joined(&mut self, other: &Sale) {
        fill(&mut self.customer_name, &other.customer_name);
        fill(&mut self.mobile, &other.mobile);
        fill(&mut self.village, &other.village);
        fill(&mut self.created_at, &other.created_at);
    }

    /// [`keep_joined`](Self::keep_joined) from a list row
    pub fn keep_joined_from_summary(&mut self, summary: &SaleSummary) {
        fill(&mut self.customer_name, &summary.customer_name);
        fill(&mut self.village, &summary.village);
        fill(&mut self.created_at, &summary.created_at);
    }
}

fn fill(slot: &mut Option<String>, from: &Option<String>) {
    if slot.is_none() {
        slot.clone_from(from);
    }
}

/// Body of `PUT /api/sales/{id}`
///
/// Holds exactly the whitelisted writable columns. Joined fields have no
/// slot here, so they cannot be sent back to the write endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SaleUpdate {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub invoice_no: Option<String>,
    pub customer_id: i64,
    pub sale_date: String,
    pub total_amount: f64,
    pub total_liters: f64,
    pub payment_status: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub payment_terms: Option<String>,
    pub order_status: OrderStatus,
    pub shipment_status: ShipmentStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub shipment_date: Option<NaiveDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dispatch_date: Option<NaiveDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub delivery_date: Option<NaiveDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tracking_number: Option<String>,
}

impl SaleUpdate {
    /// Column names the write endpoint accepts
    pub const WRITABLE_FIELDS: &'static [&'static str] = &[
        "invoice_no",
        "customer_id",
        "sale_date",
        "total_amount",
        "total_liters",
        "payment_status",
        "notes",
        "payment_terms",
        "order_status",
        "shipment_status",
        "shipment_date",
        "dispatch_date",
        "delivery_date",
        "tracking_number",
    ];
}

impl From<&Sale> for SaleUpdate {
    fn from(sale: &Sale) -> Self {
        Self {
            invoice_no: sale.invoice_no.clone(),
            customer_id: sale.customer_id,
            sale_date: sale.sale_date.clone(),
            total_amount: sale.total_amount,
            total_liters: sale.total_liters,
            payment_status: sale.payment_status.clone(),
            notes: sale.notes.clone(),
            payment_terms: sale.payment_terms.clone(),
            order_status: sale.order_status,
            shipment_status: sale.shipment_status,
            shipment_date: sale.shipment_date,
            dispatch_date: sale.dispatch_date,
            delivery_date: sale.delivery_date,
            tracking_number: sale.tracking_number.clone(),
        }
    }
}

/// Response of `PUT /api/sales/{id}`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SaleUpdated {
    pub message: String,
    pub sale: Sale,
}

/// Line item of a sale
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SaleItem {
    #[serde(default)]
    pub sale_item_id: Option<i64>,
    pub product_id: i64,
    #[serde(default)]
    pub product_name: Option<String>,
    pub quantity: i64,
    pub rate: f64,
    pub amount: f64,
}

/// Response of `GET /api/sales/{id}`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SaleDetail {
    pub sale: Sale,
    #[serde(default)]
    pub items: Vec<SaleItem>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn joined_sale() -> Sale {
        serde_json::from_value(json!({
            "sale_id": 7,
            "invoice_no": "INV-0007",
            "customer_id": 3,
            "sale_date": "2026-10-01",
            "total_amount": 1250.0,
            "total_liters": 50.0,
            "payment_status": "Partial",
            "order_status": "dispatch",
            "shipment_status": "shipped",
            "shipment_date": "2026-10-02",
            "dispatch_date": "2026-10-03",
            "customer_name": "Ramesh Patel",
            "mobile": "9876500000",
            "village": "Anand",
            "created_at": "2026-10-01T09:00:00"
        }))
        .unwrap()
    }

    #[test]
    fn test_status_wire_values() {
        assert_eq!(
            serde_json::to_string(&OrderStatus::PreparedForShipment).unwrap(),
            "\"prepared_for_shipment\""
        );
        let legacy: OrderStatus = serde_json::from_str("\"Pending\"").unwrap();
        assert_eq!(legacy, OrderStatus::Pending);
        assert_eq!("cancelled".parse::<OrderStatus>(), Ok(OrderStatus::Cancelled));
        assert!("returned".parse::<OrderStatus>().is_err());
        for status in OrderStatus::ALL {
            assert_eq!(status.as_str().parse::<OrderStatus>(), Ok(status));
        }
    }

    #[test]
    fn test_sale_defaults_for_legacy_rows() {
        let sale: Sale = serde_json::from_value(json!({
            "sale_id": 1,
            "customer_id": 2,
            "sale_date": "2026-01-05",
            "order_status": "Pending",
            "shipment_status": "not_shipped"
        }))
        .unwrap();
        assert_eq!(sale.order_status, OrderStatus::Pending);
        assert_eq!(sale.shipment_status, ShipmentStatus::NotShipped);
        assert_eq!(sale.payment_status, "Pending");
        assert!(sale.customer_name.is_none());
    }

    #[test]
    fn test_list_row_is_not_a_full_sale() {
        let row = json!({
            "sale_id": 9,
            "invoice_no": "INV-0009",
            "customer_id": 4,
            "sale_date": "2026-10-05",
            "total_amount": 900.0,
            "total_liters": 30.0,
            "payment_status": "Pending",
            "notes": null,
            "created_at": "2026-10-05T10:00:00",
            "customer_name": "Kiran Shah",
            "village": "Nadiad"
        });

        let summary: SaleSummary = serde_json::from_value(row.clone()).unwrap();
        assert_eq!(summary.customer_name.as_deref(), Some("Kiran Shah"));
        assert!(serde_json::from_value::<Sale>(row).is_err());
    }

    #[test]
    fn test_keep_joined_fills_missing_only() {
        let joined = joined_sale();
        let mut bare = joined.clone();
        bare.customer_name = None;
        bare.village = Some("Petlad".into());

        bare.keep_joined(&joined);

        assert_eq!(bare.customer_name.as_deref(), Some("Ramesh Patel"));
        assert_eq!(bare.village.as_deref(), Some("Petlad"));
    }

    #[test]
    fn test_update_body_excludes_joined_fields() {
        let sale = joined_sale();
        let body = serde_json::to_value(SaleUpdate::from(&sale)).unwrap();
        let object = body.as_object().unwrap();

        for key in object.keys() {
            assert!(
                SaleUpdate::WRITABLE_FIELDS.contains(&key.as_str()),
                "unexpected field {key}"
            );
        }
        for joined in ["sale_id", "customer_name", "mobile", "village", "created_at"] {
            assert!(!object.contains_key(joined));
        }
        assert_eq!(object["dispatch_date"], json!("2026-10-03"));
    }

    #[test]
    fn test_apply_keeps_joined_fields() {
        let mut sale = joined_sale();
        let mut update = SaleUpdate::from(&sale);
        update.order_status = OrderStatus::Delivered;
        update.delivery_date = NaiveDate::from_ymd_opt(2026, 10, 19);

        sale.apply(&update);

        assert_eq!(sale.order_status, OrderStatus::Delivered);
        assert_eq!(sale.delivery_date, NaiveDate::from_ymd_opt(2026, 10, 19));
        assert_eq!(sale.customer_name.as_deref(), Some("Ramesh Patel"));
        assert_eq!(sale.village.as_deref(), Some("Anand"));
    }
}
