//! Orders, their line items and payments.
//!
//! JSON uses camelCase keys to match what the storefront expects.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Default status of a freshly created order.
pub const DEFAULT_ORDER_STATUS: &str = "quote";
/// Default order currency.
pub const DEFAULT_CURRENCY: &str = "AUD";
/// Default status of a freshly recorded payment.
pub const DEFAULT_PAYMENT_STATUS: &str = "pending";

/// A customer order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    /// Order id
    pub id: Uuid,
    /// Design project the order is for
    pub project_id: Uuid,
    /// Customer account
    pub account_id: Uuid,
    /// "quote", "pending", "paid", ...
    pub status: String,
    /// Sum of item prices in cents
    pub subtotal_cents: i64,
    /// Tax in cents
    pub tax_cents: i64,
    /// Subtotal plus tax
    pub total_cents: i64,
    /// ISO currency code
    pub currency: String,
    /// Invoice number once invoiced
    pub invoice_number: Option<String>,
    /// Creation time
    pub created_at: DateTime<Utc>,
    /// Last change
    pub updated_at: DateTime<Utc>,
}

impl Order {
    /// Creates a quote for a project with default status and currency.
    #[must_use]
    pub fn new(project_id: Uuid, account_id: Uuid) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            project_id,
            account_id,
            status: DEFAULT_ORDER_STATUS.to_string(),
            subtotal_cents: 0,
            tax_cents: 0,
            total_cents: 0,
            currency: DEFAULT_CURRENCY.to_string(),
            invoice_number: None,
            created_at: now,
            updated_at: now,
        }
    }

    /// Sets subtotal and tax; the total is their sum.
    #[must_use]
    pub fn with_amounts(mut self, subtotal_cents: i64, tax_cents: i64) -> Self {
        self.subtotal_cents = subtotal_cents;
        self.tax_cents = tax_cents;
        self.total_cents = subtotal_cents + tax_cents;
        self
    }

    /// Backdates the order, e.g. for imports.
    #[must_use]
    pub fn created_at(mut self, created_at: DateTime<Utc>) -> Self {
        self.created_at = created_at;
        self.updated_at = created_at;
        self
    }
}

/// A line item of an order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderItem {
    /// Item id
    pub id: Uuid,
    /// Owning order
    pub order_id: Uuid,
    /// Text shown on the invoice
    pub description: String,
    /// Units ordered
    pub quantity: i64,
    /// Price of one unit in cents
    pub unit_price_cents: i64,
    /// Free-form design data (product id, sizes, items)
    pub metadata: serde_json::Value,
}

impl OrderItem {
    /// A single-unit line item.
    #[must_use]
    pub fn new(order_id: Uuid, description: impl Into<String>, unit_price_cents: i64) -> Self {
        Self {
            id: Uuid::new_v4(),
            order_id,
            description: description.into(),
            quantity: 1,
            unit_price_cents,
            metadata: serde_json::Value::Object(serde_json::Map::new()),
        }
    }
}

/// A payment recorded against an order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Payment {
    /// Payment id
    pub id: Uuid,
    /// Order paid for
    pub order_id: Uuid,
    /// Payment provider ("stripe", "paypal", ...)
    pub provider: String,
    /// Provider's transaction id
    pub provider_ref: Option<String>,
    /// Amount in cents
    pub amount_cents: i64,
    /// ISO currency code
    pub currency: String,
    /// Provider status
    pub status: String,
    /// When the funds arrived
    pub received_at: Option<DateTime<Utc>>,
    /// Creation time
    pub created_at: DateTime<Utc>,
}

impl Payment {
    /// A pending payment in the default currency.
    #[must_use]
    pub fn new(order_id: Uuid, provider: impl Into<String>, amount_cents: i64) -> Self {
        Self {
            id: Uuid::new_v4(),
            order_id,
            provider: provider.into(),
            provider_ref: None,
            amount_cents,
            currency: DEFAULT_CURRENCY.to_string(),
            status: DEFAULT_PAYMENT_STATUS.to_string(),
            received_at: None,
            created_at: Utc::now(),
        }
    }
}

/// An order with its items and payments, as returned by the orders API.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderWithDetails {
    /// The order itself
    #[serde(flatten)]
    pub order: Order,
    /// Line items
    pub items: Vec<OrderItem>,
    /// Payments recorded
    pub payments: Vec<Payment>,
}
