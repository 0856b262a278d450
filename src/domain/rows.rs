//! Flattened row shapes
//!
//! One `OrderRow` per raw order and one `LineItemRow` per raw line item.
//! All optional fields are `None` when any link in the source access chain
//! was absent; monetary amounts pass through as unvalidated strings, reduced
//! to the `amount` of the `{amount, currency}` source shape.

use chrono::{DateTime, Utc};
use serde::Serialize;

/// One flattened order, keyed by the platform-assigned order id.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderRow {
    /// Platform order id (primary key)
    pub id: String,
    /// Human-facing order number
    pub number: Option<String>,
    pub created_date: Option<DateTime<Utc>>,
    pub updated_date: Option<DateTime<Utc>>,
    pub buyer_email: Option<String>,
    pub payment_status: Option<String>,
    pub fulfillment_status: Option<String>,
    /// Carried once at the order level; item amounts are currency-less
    pub currency: Option<String>,
    pub shipping_address_line: Option<String>,
    pub shipping_first_name: Option<String>,
    pub shipping_last_name: Option<String>,
    pub shipping_phone: Option<String>,
    pub subtotal_amount: Option<String>,
    pub shipping_amount: Option<String>,
    pub tax_amount: Option<String>,
    pub discount_amount: Option<String>,
    pub total_price_amount: Option<String>,
    pub total_amount: Option<String>,
    pub total_with_gift_card_amount: Option<String>,
    pub total_without_gift_card_amount: Option<String>,
    pub total_additional_fees_amount: Option<String>,
    pub paid_amount: Option<String>,
}

/// One flattened line item
///
/// Carries the owning order's id as a structural foreign key; there is no
/// independent identifier, uniqueness is positional (order, then emission
/// order within the order).
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LineItemRow {
    /// Foreign key to [`OrderRow::id`]
    pub order_id: String,
    pub product_name: Option<String>,
    pub catalog_item_id: Option<String>,
    pub quantity: Option<i32>,
    pub total_discount_amount: Option<String>,
    pub item_type_preset: Option<String>,
    pub price_amount: Option<String>,
    pub price_before_discounts_amount: Option<String>,
    pub total_price_before_tax_amount: Option<String>,
    pub total_price_after_tax_amount: Option<String>,
    pub payment_option: Option<String>,
    pub taxable_amount: Option<String>,
    pub tax_rate: Option<String>,
    pub total_tax_amount: Option<String>,
    pub line_item_price_amount: Option<String>,
}
