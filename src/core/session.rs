//! Fetch session coordinator
//!
//! Drives one end-to-end session: walk the paginated order search with an
//! iterative cursor loop, flatten each page as it arrives, and hand the
//! accumulated rows to the sink in a single call once the walk is done.
//!
//! Any page-level failure (transport, HTTP status, malformed body or
//! pagination metadata, flatten fault) aborts the session before the sink
//! is touched; no partial writes occur from a failed fetch.

use crate::adapters::sink::traits::OrderSink;
use crate::adapters::wix::models::created_date_filter;
use crate::adapters::wix::WixClient;
use crate::core::flatten::flatten_page;
use crate::core::summary::SessionSummary;
use crate::domain::errors::WixError;
use crate::domain::Result;
use chrono::{DateTime, Utc};
use std::sync::Arc;
use std::time::Instant;

/// Coordinates fetch, flatten, and sink for one session
pub struct FetchSession {
    client: WixClient,
    sink: Arc<dyn OrderSink + Send + Sync>,
}

impl FetchSession {
    /// Create a new session over a client and a sink
    pub fn new(client: WixClient, sink: Arc<dyn OrderSink + Send + Sync>) -> Self {
        Self { client, sink }
    }

    /// Run the session to completion
    ///
    /// `window` bounds the fetch to orders created within `[start, end]`;
    /// when absent, all orders are fetched. The sink is invoked exactly once,
    /// after the last page, and also for an empty result.
    ///
    /// # Errors
    ///
    /// Returns the first error encountered; on a fetch or flatten error the
    /// sink has not been invoked.
    pub async fn run(
        &self,
        window: Option<(DateTime<Utc>, DateTime<Utc>)>,
    ) -> Result<SessionSummary> {
        let started = Instant::now();

        let filter = window.map(|(start, end)| created_date_filter(start, end));
        if let Some((start, end)) = window {
            tracing::info!(start = %start, end = %end, "Fetching orders in window");
        } else {
            tracing::info!("Fetching all orders");
        }

        let mut summary = SessionSummary::new(self.sink.target());
        let mut orders = Vec::new();
        let mut line_items = Vec::new();
        let mut cursor: Option<String> = None;

        loop {
            let page = self
                .client
                .search_orders(cursor.clone(), filter.clone())
                .await?;
            summary.pages_fetched += 1;

            let (page_orders, page_items) = flatten_page(&page)?;
            tracing::debug!(
                page = summary.pages_fetched,
                orders = page_orders.len(),
                line_items = page_items.len(),
                has_next = page.metadata.has_next,
                "Page flattened"
            );
            orders.extend(page_orders);
            line_items.extend(page_items);

            if !page.metadata.has_next {
                break;
            }

            match page.metadata.cursors.next {
                Some(next) if !next.is_empty() => cursor = Some(next),
                _ => {
                    return Err(WixError::MissingCursor(
                        "hasNext is true but cursors.next is absent".to_string(),
                    )
                    .into())
                }
            }
        }

        summary.orders = orders.len();
        summary.line_items = line_items.len();

        self.sink.prepare().await?;
        let written = self.sink.write(&orders, &line_items).await?;
        summary.orders_written = written.orders_written;
        summary.line_items_written = written.line_items_written;

        let summary = summary.with_duration(started.elapsed());
        summary.log_summary();
        Ok(summary)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::sink::traits::WriteSummary;
    use crate::config::schema::WixConfig;
    use crate::config::{secret_string, SinkTarget};
    use crate::domain::rows::{LineItemRow, OrderRow};
    use crate::domain::CaravelError;
    use async_trait::async_trait;
    use serde_json::json;
    use std::sync::Mutex;

    struct RecordingSink {
        calls: Mutex<Vec<(usize, usize)>>,
    }

    impl RecordingSink {
        fn new() -> Arc<Self> {
            Arc::new(Self {
                calls: Mutex::new(Vec::new()),
            })
        }

        fn calls(&self) -> Vec<(usize, usize)> {
            self.calls.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl OrderSink for RecordingSink {
        fn target(&self) -> SinkTarget {
            SinkTarget::Json
        }

        async fn prepare(&self) -> crate::domain::Result<()> {
            Ok(())
        }

        async fn write(
            &self,
            orders: &[OrderRow],
            line_items: &[LineItemRow],
        ) -> crate::domain::Result<WriteSummary> {
            self.calls
                .lock()
                .unwrap()
                .push((orders.len(), line_items.len()));
            Ok(WriteSummary {
                orders_written: orders.len(),
                line_items_written: line_items.len(),
            })
        }
    }

    fn client_for(server: &mockito::ServerGuard) -> WixClient {
        WixClient::new(&WixConfig {
            base_url: server.url(),
            auth_token: secret_string("token".to_string()),
            timeout_seconds: 5,
        })
        .unwrap()
    }

    fn order(id: &str) -> serde_json::Value {
        json!({ "id": id, "lineItems": [] })
    }

    #[tokio::test]
    async fn test_single_page_session_writes_once() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/ecom/v1/orders/search")
            .with_status(200)
            .with_body(
                json!({
                    "orders": [order("o1"), order("o2")],
                    "metadata": { "hasNext": false }
                })
                .to_string(),
            )
            .create_async()
            .await;

        let sink = RecordingSink::new();
        let session = FetchSession::new(client_for(&server), sink.clone());
        let summary = session.run(None).await.unwrap();

        mock.assert_async().await;
        assert_eq!(summary.pages_fetched, 1);
        assert_eq!(summary.orders, 2);
        assert_eq!(summary.orders_written, 2);
        assert_eq!(sink.calls(), vec![(2, 0)]);
    }

    #[tokio::test]
    async fn test_order_with_two_line_items() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/ecom/v1/orders/search")
            .with_status(200)
            .with_body(
                json!({
                    "orders": [{
                        "id": "o1",
                        "lineItems": [
                            {
                                "productName": { "original": "Mug" },
                                "catalogReference": { "catalogItemId": "cat-1" },
                                "itemType": { "preset": "PHYSICAL" }
                            },
                            {
                                "productName": { "original": "Plate" },
                                "catalogReference": { "catalogItemId": "cat-2" },
                                "itemType": { "preset": "PHYSICAL" }
                            }
                        ]
                    }],
                    "metadata": { "hasNext": false }
                })
                .to_string(),
            )
            .expect(1)
            .create_async()
            .await;

        let sink = RecordingSink::new();
        let session = FetchSession::new(client_for(&server), sink.clone());
        let summary = session.run(None).await.unwrap();

        mock.assert_async().await;
        assert_eq!(summary.orders, 1);
        assert_eq!(summary.line_items, 2);
        assert_eq!(sink.calls(), vec![(1, 2)]);
    }

    #[tokio::test]
    async fn test_cursor_forwarded_across_pages() {
        let mut server = mockito::Server::new_async().await;

        let first = server
            .mock("POST", "/ecom/v1/orders/search")
            .match_body(mockito::Matcher::PartialJson(json!({
                "search": { "cursor_paging": { "limit": 50 } }
            })))
            .with_status(200)
            .with_body(
                json!({
                    "orders": [order("o1")],
                    "metadata": { "hasNext": true, "cursors": { "next": "c2" } }
                })
                .to_string(),
            )
            .create_async()
            .await;

        let second = server
            .mock("POST", "/ecom/v1/orders/search")
            .match_body(mockito::Matcher::PartialJson(json!({
                "search": { "cursor_paging": { "limit": 50, "cursor": "c2" } }
            })))
            .with_status(200)
            .with_body(
                json!({
                    "orders": [order("o2")],
                    "metadata": { "hasNext": false }
                })
                .to_string(),
            )
            .create_async()
            .await;

        let sink = RecordingSink::new();
        let session = FetchSession::new(client_for(&server), sink.clone());
        let summary = session.run(None).await.unwrap();

        first.assert_async().await;
        second.assert_async().await;
        assert_eq!(summary.pages_fetched, 2);
        assert_eq!(sink.calls(), vec![(2, 0)]);
    }

    #[tokio::test]
    async fn test_page_failure_leaves_sink_untouched() {
        let mut server = mockito::Server::new_async().await;

        server
            .mock("POST", "/ecom/v1/orders/search")
            .with_status(200)
            .with_body(
                json!({
                    "orders": [order("o1")],
                    "metadata": { "hasNext": true, "cursors": { "next": "c2" } }
                })
                .to_string(),
            )
            .expect(1)
            .create_async()
            .await;

        server
            .mock("POST", "/ecom/v1/orders/search")
            .with_status(500)
            .with_body("oops")
            .create_async()
            .await;

        let sink = RecordingSink::new();
        let session = FetchSession::new(client_for(&server), sink.clone());
        let err = session.run(None).await.unwrap_err();

        assert!(matches!(err, CaravelError::Wix(WixError::ServerError { .. })));
        assert!(sink.calls().is_empty());
    }

    #[tokio::test]
    async fn test_missing_next_cursor_is_an_error() {
        let mut server = mockito::Server::new_async().await;

        server
            .mock("POST", "/ecom/v1/orders/search")
            .with_status(200)
            .with_body(
                json!({
                    "orders": [order("o1")],
                    "metadata": { "hasNext": true }
                })
                .to_string(),
            )
            .create_async()
            .await;

        let sink = RecordingSink::new();
        let session = FetchSession::new(client_for(&server), sink.clone());
        let err = session.run(None).await.unwrap_err();

        assert!(matches!(err, CaravelError::Wix(WixError::MissingCursor(_))));
        assert!(sink.calls().is_empty());
    }

    #[tokio::test]
    async fn test_empty_result_still_invokes_sink_once() {
        let mut server = mockito::Server::new_async().await;

        server
            .mock("POST", "/ecom/v1/orders/search")
            .with_status(200)
            .with_body(json!({ "orders": [], "metadata": { "hasNext": false } }).to_string())
            .create_async()
            .await;

        let sink = RecordingSink::new();
        let session = FetchSession::new(client_for(&server), sink.clone());
        let summary = session.run(None).await.unwrap();

        assert_eq!(summary.orders, 0);
        assert!(summary.is_empty());
        assert_eq!(sink.calls(), vec![(0, 0)]);
    }
}
