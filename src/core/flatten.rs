//! Record flattener
//!
//! Pure transformation of one search-response page into flat [`OrderRow`] /
//! [`LineItemRow`] sequences. For each raw order, exactly one order row is
//! emitted, followed by one line-item row per raw line item, preserving
//! input order; every line-item row carries its owner's id.
//!
//! Field access follows two distinct policies, inherited from the upstream
//! contract and preserved deliberately:
//!
//! - **Guarded** chains (buyer info, shipping destination, all monetary
//!   sub-totals, tax details): any absent link collapses the value to `None`,
//!   never an error.
//! - **Unguarded** intermediates on line items (`productName`,
//!   `catalogReference`, `itemType`): absence is a
//!   [`FlattenError::MissingField`], fatal for the whole page. Their leaves
//!   (`original`, `catalogItemId`, `preset`) and `quantity` still collapse
//!   to `None`.
//!
//! Monetary `{amount, currency}` pairs are reduced to `amount` with no
//! numeric validation; currency is carried once at the order level.

use crate::adapters::wix::models::{Price, RawLineItem, RawOrder, SearchOrdersResponse};
use crate::domain::errors::FlattenError;
use crate::domain::rows::{LineItemRow, OrderRow};

/// Flatten one page of raw orders
///
/// # Errors
///
/// Returns [`FlattenError`] when an unguarded line-item intermediate is
/// absent; no rows from the page are returned in that case.
pub fn flatten_page(
    page: &SearchOrdersResponse,
) -> Result<(Vec<OrderRow>, Vec<LineItemRow>), FlattenError> {
    let mut orders = Vec::with_capacity(page.orders.len());
    let mut line_items = Vec::new();

    for order in &page.orders {
        orders.push(flatten_order(order));

        for item in &order.line_items {
            line_items.push(flatten_line_item(&order.id, item)?);
        }
    }

    Ok((orders, line_items))
}

fn flatten_order(order: &RawOrder) -> OrderRow {
    let destination = order
        .shipping_info
        .as_ref()
        .and_then(|s| s.logistics.as_ref())
        .and_then(|l| l.shipping_destination.as_ref());
    let contact = destination.and_then(|d| d.contact_details.as_ref());
    let pay_now = order.pay_now.as_ref();

    OrderRow {
        id: order.id.clone(),
        number: order.number.clone(),
        created_date: order.created_date,
        updated_date: order.updated_date,
        buyer_email: order.buyer_info.as_ref().and_then(|b| b.email.clone()),
        payment_status: order.payment_status.clone(),
        fulfillment_status: order.fulfillment_status.clone(),
        currency: order.currency.clone(),
        shipping_address_line: destination
            .and_then(|d| d.address.as_ref())
            .and_then(|a| a.address_line.clone()),
        shipping_first_name: contact.and_then(|c| c.first_name.clone()),
        shipping_last_name: contact.and_then(|c| c.last_name.clone()),
        shipping_phone: contact.and_then(|c| c.phone.clone()),
        subtotal_amount: amount(pay_now.and_then(|p| p.subtotal.as_ref())),
        shipping_amount: amount(pay_now.and_then(|p| p.shipping.as_ref())),
        tax_amount: amount(pay_now.and_then(|p| p.tax.as_ref())),
        discount_amount: amount(pay_now.and_then(|p| p.discount.as_ref())),
        total_price_amount: amount(pay_now.and_then(|p| p.total_price.as_ref())),
        total_amount: amount(pay_now.and_then(|p| p.total.as_ref())),
        total_with_gift_card_amount: amount(pay_now.and_then(|p| p.total_with_gift_card.as_ref())),
        total_without_gift_card_amount: amount(
            pay_now.and_then(|p| p.total_without_gift_card.as_ref()),
        ),
        total_additional_fees_amount: amount(
            pay_now.and_then(|p| p.total_additional_fees.as_ref()),
        ),
        paid_amount: amount(
            order
                .balance_summary
                .as_ref()
                .and_then(|b| b.paid.as_ref()),
        ),
    }
}

fn flatten_line_item(
    order_id: &str,
    item: &RawLineItem,
) -> Result<LineItemRow, FlattenError> {
    // Unguarded intermediates: absence here is a contract violation, not a
    // null-coalesced value.
    let product_name = item
        .product_name
        .as_ref()
        .ok_or_else(|| missing(order_id, "productName"))?;
    let catalog_reference = item
        .catalog_reference
        .as_ref()
        .ok_or_else(|| missing(order_id, "catalogReference"))?;
    let item_type = item
        .item_type
        .as_ref()
        .ok_or_else(|| missing(order_id, "itemType"))?;

    let tax_details = item.tax_details.as_ref();

    Ok(LineItemRow {
        order_id: order_id.to_string(),
        product_name: product_name.original.clone(),
        catalog_item_id: catalog_reference.catalog_item_id.clone(),
        quantity: item.quantity,
        total_discount_amount: amount(item.total_discount.as_ref()),
        item_type_preset: item_type.preset.clone(),
        price_amount: amount(item.price.as_ref()),
        price_before_discounts_amount: amount(item.price_before_discounts.as_ref()),
        total_price_before_tax_amount: amount(item.total_price_before_tax.as_ref()),
        total_price_after_tax_amount: amount(item.total_price_after_tax.as_ref()),
        payment_option: item.payment_option.clone(),
        taxable_amount: amount(tax_details.and_then(|t| t.taxable_amount.as_ref())),
        tax_rate: tax_details.and_then(|t| t.tax_rate.clone()),
        total_tax_amount: amount(tax_details.and_then(|t| t.total_tax.as_ref())),
        line_item_price_amount: amount(item.line_item_price.as_ref()),
    })
}

fn amount(price: Option<&Price>) -> Option<String> {
    price.and_then(|p| p.amount.clone())
}

fn missing(order_id: &str, field: &'static str) -> FlattenError {
    FlattenError::MissingField {
        order_id: order_id.to_string(),
        field,
    }
}
