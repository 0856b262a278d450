//! PostgreSQL sink implementation
//!
//! Writes flattened rows into the `orders` and `order_line_items` tables
//! using parameterized statements only. Amounts travel as strings and are
//! cast to `numeric` inside the statement, so malformed values surface as
//! database errors instead of being silently coerced.

use crate::adapters::postgresql::client::PostgresClient;
use crate::adapters::sink::traits::{OrderSink, WriteSummary};
use crate::config::SinkTarget;
use crate::domain::errors::SinkError;
use crate::domain::rows::{LineItemRow, OrderRow};
use crate::domain::{CaravelError, Result};
use async_trait::async_trait;
use tokio_postgres::types::ToSql;
use tokio_postgres::GenericClient;

const INSERT_ORDER: &str = "\
    INSERT INTO orders (
        id, number, created_date, updated_date, buyer_email,
        payment_status, fulfillment_status, currency, shipping_address_line,
        shipping_first_name, shipping_last_name, shipping_phone, subtotal_amount,
        shipping_amount, tax_amount, discount_amount, total_price_amount, total_amount,
        total_with_gift_card_amount, total_without_gift_card_amount,
        total_additional_fees_amount, paid_amount
    ) VALUES (
        $1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12,
        $13::text::numeric, $14::text::numeric, $15::text::numeric,
        $16::text::numeric, $17::text::numeric, $18::text::numeric,
        $19::text::numeric, $20::text::numeric, $21::text::numeric,
        $22::text::numeric
    )";

const INSERT_LINE_ITEM: &str = "\
    INSERT INTO order_line_items (
        order_id, product_name, catalog_item_id, quantity, total_discount_amount,
        item_type_preset, price_amount, price_before_discounts_amount,
        total_price_before_tax_amount, total_price_after_tax_amount, payment_option,
        taxable_amount, tax_rate, total_tax_amount, line_item_price_amount
    ) VALUES (
        $1, $2, $3, $4, $5::text::numeric, $6,
        $7::text::numeric, $8::text::numeric, $9::text::numeric, $10::text::numeric,
        $11, $12::text::numeric, $13::text::numeric, $14::text::numeric,
        $15::text::numeric
    )";

/// PostgreSQL order sink
pub struct PostgresSink {
    client: PostgresClient,

    /// When set, the whole session write runs in a single transaction
    transactional: bool,
}

impl PostgresSink {
    /// Create a new PostgreSQL sink
    pub fn new(client: PostgresClient, transactional: bool) -> Self {
        Self {
            client,
            transactional,
        }
    }

    async fn write_rows<C: GenericClient>(
        &self,
        conn: &C,
        orders: &[OrderRow],
        line_items: &[LineItemRow],
    ) -> Result<WriteSummary> {
        let order_stmt = conn.prepare(INSERT_ORDER).await.map_err(|e| {
            CaravelError::Sink(SinkError::InsertFailed {
                table: "orders".to_string(),
                detail: format!("prepare failed: {e}"),
            })
        })?;
        let item_stmt = conn.prepare(INSERT_LINE_ITEM).await.map_err(|e| {
            CaravelError::Sink(SinkError::InsertFailed {
                table: "order_line_items".to_string(),
                detail: format!("prepare failed: {e}"),
            })
        })?;

        let mut summary = WriteSummary::default();

        for order in orders {
            let params: [&(dyn ToSql + Sync); 22] = [
                &order.id,
                &order.number,
                &order.created_date,
                &order.updated_date,
                &order.buyer_email,
                &order.payment_status,
                &order.fulfillment_status,
                &order.currency,
                &order.shipping_address_line,
                &order.shipping_first_name,
                &order.shipping_last_name,
                &order.shipping_phone,
                &order.subtotal_amount,
                &order.shipping_amount,
                &order.tax_amount,
                &order.discount_amount,
                &order.total_price_amount,
                &order.total_amount,
                &order.total_with_gift_card_amount,
                &order.total_without_gift_card_amount,
                &order.total_additional_fees_amount,
                &order.paid_amount,
            ];

            conn.execute(&order_stmt, &params).await.map_err(|e| {
                CaravelError::Sink(SinkError::InsertFailed {
                    table: "orders".to_string(),
                    detail: format!("order {}: {e}", order.id),
                })
            })?;
            summary.orders_written += 1;
        }

        for item in line_items {
            let params: [&(dyn ToSql + Sync); 15] = [
                &item.order_id,
                &item.product_name,
                &item.catalog_item_id,
                &item.quantity,
                &item.total_discount_amount,
                &item.item_type_preset,
                &item.price_amount,
                &item.price_before_discounts_amount,
                &item.total_price_before_tax_amount,
                &item.total_price_after_tax_amount,
                &item.payment_option,
                &item.taxable_amount,
                &item.tax_rate,
                &item.total_tax_amount,
                &item.line_item_price_amount,
            ];

            conn.execute(&item_stmt, &params).await.map_err(|e| {
                CaravelError::Sink(SinkError::InsertFailed {
                    table: "order_line_items".to_string(),
                    detail: format!("order {}: {e}", item.order_id),
                })
            })?;
            summary.line_items_written += 1;
        }

        Ok(summary)
    }
}

#[async_trait]
impl OrderSink for PostgresSink {
    fn target(&self) -> SinkTarget {
        SinkTarget::PostgreSQL
    }

    async fn prepare(&self) -> Result<()> {
        self.client.test_connection().await?;
        self.client.ensure_schema().await
    }

    async fn write(
        &self,
        orders: &[OrderRow],
        line_items: &[LineItemRow],
    ) -> Result<WriteSummary> {
        let mut conn = self.client.get_connection().await?;

        let summary = if self.transactional {
            let tx = conn.transaction().await.map_err(|e| {
                CaravelError::Sink(SinkError::TransactionFailed(format!("begin failed: {e}")))
            })?;

            let summary = self.write_rows(&*tx, orders, line_items).await?;

            tx.commit().await.map_err(|e| {
                CaravelError::Sink(SinkError::TransactionFailed(format!("commit failed: {e}")))
            })?;
            summary
        } else {
            self.write_rows(&**conn, orders, line_items).await?
        };

        tracing::info!(
            orders = summary.orders_written,
            line_items = summary.line_items_written,
            transactional = self.transactional,
            "Rows written to PostgreSQL"
        );

        Ok(summary)
    }
}
