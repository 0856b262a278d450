//! JSON file export sink
//!
//! Writes the session's rows as two pretty-printed JSON array files,
//! `orders_<timestamp>.json` and `order_line_items_<timestamp>.json`, into
//! the configured output directory. The timestamp (UTC, `yyyymmddHHMMSS`)
//! is taken once per write so both files of a session share it.

use crate::adapters::sink::traits::{OrderSink, WriteSummary};
use crate::config::schema::JsonExportConfig;
use crate::config::SinkTarget;
use crate::domain::errors::SinkError;
use crate::domain::rows::{LineItemRow, OrderRow};
use crate::domain::{CaravelError, Result};
use async_trait::async_trait;
use chrono::Utc;
use serde::Serialize;
use std::path::{Path, PathBuf};

/// JSON export order sink
pub struct JsonExportSink {
    config: JsonExportConfig,
}

impl JsonExportSink {
    /// Create a new JSON export sink
    pub fn new(config: JsonExportConfig) -> Self {
        Self { config }
    }

    fn output_dir(&self) -> &Path {
        Path::new(&self.config.output_dir)
    }

    fn write_file<T: Serialize>(&self, path: &PathBuf, rows: &[T]) -> Result<()> {
        let json = serde_json::to_vec_pretty(rows).map_err(|e| {
            CaravelError::Sink(SinkError::WriteFailed {
                path: path.display().to_string(),
                detail: format!("serialization failed: {e}"),
            })
        })?;

        std::fs::write(path, json).map_err(|e| {
            CaravelError::Sink(SinkError::WriteFailed {
                path: path.display().to_string(),
                detail: e.to_string(),
            })
        })
    }
}

#[async_trait]
impl OrderSink for JsonExportSink {
    fn target(&self) -> SinkTarget {
        SinkTarget::Json
    }

    async fn prepare(&self) -> Result<()> {
        std::fs::create_dir_all(self.output_dir()).map_err(|e| {
            CaravelError::Sink(SinkError::WriteFailed {
                path: self.config.output_dir.clone(),
                detail: format!("failed to create output directory: {e}"),
            })
        })
    }

    async fn write(
        &self,
        orders: &[OrderRow],
        line_items: &[LineItemRow],
    ) -> Result<WriteSummary> {
        let timestamp = Utc::now().format("%Y%m%d%H%M%S").to_string();

        let orders_path = self.output_dir().join(format!("orders_{timestamp}.json"));
        let items_path = self
            .output_dir()
            .join(format!("order_line_items_{timestamp}.json"));

        self.write_file(&orders_path, orders)?;
        self.write_file(&items_path, line_items)?;

        tracing::info!(
            orders_file = %orders_path.display(),
            line_items_file = %items_path.display(),
            orders = orders.len(),
            line_items = line_items.len(),
            "Export files written"
        );

        Ok(WriteSummary {
            orders_written: orders.len(),
            line_items_written: line_items.len(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::Value;

    fn sink_into(dir: &Path) -> JsonExportSink {
        JsonExportSink::new(JsonExportConfig {
            output_dir: dir.to_str().unwrap().to_string(),
        })
    }

    fn order_row(id: &str) -> OrderRow {
        OrderRow {
            id: id.to_string(),
            number: Some("10021".to_string()),
            created_date: None,
            updated_date: None,
            buyer_email: Some("buyer@example.com".to_string()),
            payment_status: None,
            fulfillment_status: None,
            currency: Some("EUR".to_string()),
            shipping_address_line: None,
            shipping_first_name: None,
            shipping_last_name: None,
            shipping_phone: None,
            subtotal_amount: Some("19.00".to_string()),
            shipping_amount: None,
            tax_amount: None,
            discount_amount: None,
            total_price_amount: None,
            total_amount: None,
            total_with_gift_card_amount: None,
            total_without_gift_card_amount: None,
            total_additional_fees_amount: None,
            paid_amount: None,
        }
    }

    #[tokio::test]
    async fn test_writes_both_files_with_shared_timestamp() {
        let dir = tempfile::tempdir().unwrap();
        let sink = sink_into(dir.path());

        sink.prepare().await.unwrap();
        let summary = sink.write(&[order_row("o1")], &[]).await.unwrap();

        assert_eq!(summary.orders_written, 1);
        assert_eq!(summary.line_items_written, 0);

        let mut names: Vec<String> = std::fs::read_dir(dir.path())
            .unwrap()
            .map(|e| e.unwrap().file_name().into_string().unwrap())
            .collect();
        names.sort();

        assert_eq!(names.len(), 2);
        assert!(names[0].starts_with("order_line_items_") && names[0].ends_with(".json"));
        assert!(names[1].starts_with("orders_") && names[1].ends_with(".json"));

        let items_ts = &names[0]["order_line_items_".len()..names[0].len() - ".json".len()];
        let orders_ts = &names[1]["orders_".len()..names[1].len() - ".json".len()];
        assert_eq!(items_ts, orders_ts);
    }

    #[tokio::test]
    async fn test_rows_serialize_camel_case() {
        let dir = tempfile::tempdir().unwrap();
        let sink = sink_into(dir.path());

        sink.prepare().await.unwrap();
        sink.write(&[order_row("o1")], &[]).await.unwrap();

        let orders_file = std::fs::read_dir(dir.path())
            .unwrap()
            .map(|e| e.unwrap().path())
            .find(|p| {
                p.file_name()
                    .and_then(|n| n.to_str())
                    .is_some_and(|n| n.starts_with("orders_"))
            })
            .unwrap();

        let parsed: Value =
            serde_json::from_slice(&std::fs::read(orders_file).unwrap()).unwrap();
        assert_eq!(parsed[0]["id"], "o1");
        assert_eq!(parsed[0]["buyerEmail"], "buyer@example.com");
        assert_eq!(parsed[0]["subtotalAmount"], "19.00");
        assert!(parsed[0]["shippingAddressLine"].is_null());
    }

    #[tokio::test]
    async fn test_empty_session_still_writes_files() {
        let dir = tempfile::tempdir().unwrap();
        let sink = sink_into(dir.path());

        sink.prepare().await.unwrap();
        let summary = sink.write(&[], &[]).await.unwrap();

        assert_eq!(summary, WriteSummary::default());

        let count = std::fs::read_dir(dir.path()).unwrap().count();
        assert_eq!(count, 2);

        let first = std::fs::read_dir(dir.path())
            .unwrap()
            .next()
            .unwrap()
            .unwrap();
        let parsed: Value = serde_json::from_slice(&std::fs::read(first.path()).unwrap()).unwrap();
        assert_eq!(parsed, Value::Array(vec![]));
    }

    #[tokio::test]
    async fn test_prepare_creates_nested_output_dir() {
        let dir = tempfile::tempdir().unwrap();
        let nested = dir.path().join("a").join("b");
        let sink = sink_into(&nested);

        sink.prepare().await.unwrap();
        assert!(nested.is_dir());
    }
}
