//! Order sink factory
//!
//! This module provides a factory function to create the configured sink.

use crate::adapters::jsonexport::JsonExportSink;
use crate::adapters::postgresql::client::PostgresClient;
use crate::adapters::postgresql::writer::PostgresSink;
use crate::adapters::sink::traits::OrderSink;
use crate::config::{CaravelConfig, SinkTarget};
use crate::domain::Result;
use std::sync::Arc;

/// Create an order sink based on the configuration
///
/// Examines `sink.target` and builds the matching implementation. The
/// section for the selected target is guaranteed present by config
/// validation.
///
/// # Errors
///
/// Returns an error if the sink cannot be created (for PostgreSQL, if the
/// connection pool cannot be established).
pub async fn create_order_sink(
    config: &CaravelConfig,
) -> Result<Arc<dyn OrderSink + Send + Sync>> {
    match config.sink.target {
        SinkTarget::PostgreSQL => {
            let pg_config = config
                .postgresql
                .as_ref()
                .expect("PostgreSQL config should be validated");

            tracing::info!("Creating PostgreSQL sink");
            let client = PostgresClient::new(pg_config.clone()).await?;
            let sink = PostgresSink::new(client, config.sink.transactional);

            Ok(Arc::new(sink) as Arc<dyn OrderSink + Send + Sync>)
        }
        SinkTarget::Json => {
            let export_config = config
                .export
                .as_ref()
                .expect("Export config should be validated");

            tracing::info!("Creating JSON export sink");
            let sink = JsonExportSink::new(export_config.clone());

            Ok(Arc::new(sink) as Arc<dyn OrderSink + Send + Sync>)
        }
    }
}
