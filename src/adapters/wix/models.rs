//! Wire models for the Wix eCommerce orders search API
//!
//! Response models are deliberately loose: nearly every field is optional so
//! that partially-populated orders deserialize cleanly and the flattener can
//! apply its own guarded/unguarded access policy. Monetary values arrive as
//! `{amount, currency}` pairs with string amounts and pass through
//! unvalidated.

use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Fixed page size for cursor paging
pub const PAGE_SIZE: u32 = 50;

/// Request body for `POST /ecom/v1/orders/search`
#[derive(Debug, Clone, Serialize)]
pub struct SearchRequest {
    pub search: Search,
}

#[derive(Debug, Clone, Serialize)]
pub struct Search {
    pub cursor_paging: CursorPaging,

    /// Query filter; characterizes the query, not the page position, so it
    /// is carried unchanged across pages
    #[serde(skip_serializing_if = "Option::is_none")]
    pub filter: Option<Value>,
}

#[derive(Debug, Clone, Serialize)]
pub struct CursorPaging {
    pub limit: u32,

    /// Opaque token from the previous response; forwarded unmodified.
    /// When present it supersedes limit/offset positioning.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cursor: Option<String>,
}

impl SearchRequest {
    /// Build the request for one page
    pub fn new(cursor: Option<String>, filter: Option<Value>) -> Self {
        Self {
            search: Search {
                cursor_paging: CursorPaging {
                    limit: PAGE_SIZE,
                    cursor,
                },
                filter,
            },
        }
    }
}

/// Builds the inclusive `createdDate` range filter
///
/// Structure is fixed by the search API:
/// `{"$and": [{"createdDate": {"$gte": start}}, {"createdDate": {"$lte": end}}]}`
pub fn created_date_filter(start: DateTime<Utc>, end: DateTime<Utc>) -> Value {
    serde_json::json!({
        "$and": [
            { "createdDate": { "$gte": start.to_rfc3339_opts(SecondsFormat::Millis, true) } },
            { "createdDate": { "$lte": end.to_rfc3339_opts(SecondsFormat::Millis, true) } }
        ]
    })
}

/// One page of the search response
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchOrdersResponse {
    #[serde(default)]
    pub orders: Vec<RawOrder>,

    #[serde(default)]
    pub metadata: PagingMetadata,
}

/// Pagination metadata
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PagingMetadata {
    #[serde(default)]
    pub has_next: bool,

    #[serde(default)]
    pub cursors: Cursors,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Cursors {
    #[serde(default)]
    pub next: Option<String>,
}

/// One raw order as returned by the search API
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawOrder {
    /// Platform order id; the only field the pipeline requires
    pub id: String,

    #[serde(default)]
    pub number: Option<String>,

    #[serde(default)]
    pub created_date: Option<DateTime<Utc>>,

    #[serde(default)]
    pub updated_date: Option<DateTime<Utc>>,

    #[serde(default)]
    pub buyer_info: Option<BuyerInfo>,

    #[serde(default)]
    pub payment_status: Option<String>,

    #[serde(default)]
    pub fulfillment_status: Option<String>,

    #[serde(default)]
    pub currency: Option<String>,

    #[serde(default)]
    pub shipping_info: Option<ShippingInfo>,

    #[serde(default)]
    pub pay_now: Option<PriceSummary>,

    #[serde(default)]
    pub balance_summary: Option<BalanceSummary>,

    #[serde(default)]
    pub line_items: Vec<RawLineItem>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BuyerInfo {
    #[serde(default)]
    pub email: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShippingInfo {
    #[serde(default)]
    pub logistics: Option<Logistics>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Logistics {
    #[serde(default)]
    pub shipping_destination: Option<ShippingDestination>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShippingDestination {
    #[serde(default)]
    pub address: Option<Address>,

    #[serde(default)]
    pub contact_details: Option<ContactDetails>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Address {
    #[serde(default)]
    pub address_line: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContactDetails {
    #[serde(default)]
    pub first_name: Option<String>,

    #[serde(default)]
    pub last_name: Option<String>,

    #[serde(default)]
    pub phone: Option<String>,
}

/// Monetary value; only `amount` survives flattening
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Price {
    #[serde(default)]
    pub amount: Option<String>,
}

/// The `payNow` sub-totals block
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PriceSummary {
    #[serde(default)]
    pub subtotal: Option<Price>,

    #[serde(default)]
    pub shipping: Option<Price>,

    #[serde(default)]
    pub tax: Option<Price>,

    #[serde(default)]
    pub discount: Option<Price>,

    #[serde(default)]
    pub total_price: Option<Price>,

    #[serde(default)]
    pub total: Option<Price>,

    #[serde(default)]
    pub total_with_gift_card: Option<Price>,

    #[serde(default)]
    pub total_without_gift_card: Option<Price>,

    #[serde(default)]
    pub total_additional_fees: Option<Price>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BalanceSummary {
    #[serde(default)]
    pub paid: Option<Price>,
}

/// One raw line item
///
/// `product_name`, `catalog_reference` and `item_type` are modeled as
/// `Option` here, but the flattener treats their absence as fatal for the
/// page; see `core::flatten`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawLineItem {
    #[serde(default)]
    pub product_name: Option<ProductName>,

    #[serde(default)]
    pub catalog_reference: Option<CatalogReference>,

    #[serde(default)]
    pub quantity: Option<i32>,

    #[serde(default)]
    pub total_discount: Option<Price>,

    #[serde(default)]
    pub item_type: Option<ItemType>,

    #[serde(default)]
    pub price: Option<Price>,

    #[serde(default)]
    pub price_before_discounts: Option<Price>,

    #[serde(default)]
    pub total_price_before_tax: Option<Price>,

    #[serde(default)]
    pub total_price_after_tax: Option<Price>,

    #[serde(default)]
    pub payment_option: Option<String>,

    #[serde(default)]
    pub tax_details: Option<TaxDetails>,

    #[serde(default)]
    pub line_item_price: Option<Price>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductName {
    #[serde(default)]
    pub original: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CatalogReference {
    #[serde(default)]
    pub catalog_item_id: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ItemType {
    #[serde(default)]
    pub preset: Option<String>,
}

/// Tax breakdown; `tax_rate` is a bare string, not a `{amount}` pair
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaxDetails {
    #[serde(default)]
    pub taxable_amount: Option<Price>,

    #[serde(default)]
    pub tax_rate: Option<String>,

    #[serde(default)]
    pub total_tax: Option<Price>,
}
