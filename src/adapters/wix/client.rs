//! Wix orders search API client
//!
//! This module issues the `POST /ecom/v1/orders/search` call. One client is
//! built per session; the bearer credential from configuration is forwarded
//! verbatim in the `Authorization` header of every request.
//!
//! There is deliberately no retry or backoff here: a transport failure or a
//! non-success status aborts the whole session, matching the baseline
//! contract of the pipeline.

use crate::adapters::wix::models::{SearchOrdersResponse, SearchRequest};
use crate::config::WixConfig;
use crate::domain::{Result, WixError};
use reqwest::{Client, ClientBuilder};
use secrecy::ExposeSecret;
use serde_json::Value;
use std::time::Duration;

/// HTTP client for the Wix orders search endpoint
pub struct WixClient {
    base_url: String,
    client: Client,
    auth_token: String,
}

impl WixClient {
    /// Create a new client from configuration
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying HTTP client cannot be built.
    pub fn new(config: &WixConfig) -> Result<Self> {
        let client = ClientBuilder::new()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .connect_timeout(Duration::from_secs(30))
            .build()
            .map_err(|e| {
                crate::domain::CaravelError::Configuration(format!(
                    "Failed to build HTTP client: {e}"
                ))
            })?;

        Ok(Self {
            base_url: config.base_url.trim_end_matches('/').to_string(),
            client,
            auth_token: config.auth_token.expose_secret().as_ref().to_string(),
        })
    }

    /// Fetch one page of orders
    ///
    /// The cursor is the opaque token from the previous page's response (or
    /// `None` for the first page); the filter is carried unchanged across
    /// pages.
    ///
    /// # Errors
    ///
    /// Returns [`WixError`] on transport failure, non-2xx status, or an
    /// unparseable response body.
    pub async fn search_orders(
        &self,
        cursor: Option<String>,
        filter: Option<Value>,
    ) -> Result<SearchOrdersResponse> {
        let url = format!("{}/ecom/v1/orders/search", self.base_url);
        let request = SearchRequest::new(cursor, filter);

        tracing::debug!(
            url = %url,
            has_cursor = request.search.cursor_paging.cursor.is_some(),
            has_filter = request.search.filter.is_some(),
            "Requesting orders page"
        );

        let response = self
            .client
            .post(&url)
            .header("Authorization", &self.auth_token)
            .json(&request)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    WixError::Timeout(e.to_string())
                } else {
                    WixError::ConnectionFailed(e.to_string())
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let err = match status.as_u16() {
                401 | 403 => WixError::AuthenticationFailed {
                    status: status.as_u16(),
                    message: body,
                },
                400..=499 => WixError::ClientError {
                    status: status.as_u16(),
                    message: body,
                },
                _ => WixError::ServerError {
                    status: status.as_u16(),
                    message: body,
                },
            };
            return Err(err.into());
        }

        let page = response
            .json::<SearchOrdersResponse>()
            .await
            .map_err(|e| WixError::InvalidResponse(e.to_string()))?;

        tracing::debug!(
            order_count = page.orders.len(),
            has_next = page.metadata.has_next,
            "Received orders page"
        );

        Ok(page)
    }

    /// Base URL this client talks to
    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::secret_string;

    fn test_config(base_url: &str) -> WixConfig {
        WixConfig {
            base_url: base_url.to_string(),
            auth_token: secret_string("test-token".to_string()),
            timeout_seconds: 5,
        }
    }

    #[test]
    fn test_client_strips_trailing_slash() {
        let client = WixClient::new(&test_config("https://www.wixapis.com/")).unwrap();
        assert_eq!(client.base_url(), "https://www.wixapis.com");
    }

    #[tokio::test]
    async fn test_search_orders_sends_auth_header() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/ecom/v1/orders/search")
            .match_header("Authorization", "test-token")
            .with_status(200)
            .with_body(r#"{"orders": [], "metadata": {"hasNext": false}}"#)
            .create_async()
            .await;

        let client = WixClient::new(&test_config(&server.url())).unwrap();
        let page = client.search_orders(None, None).await.unwrap();

        mock.assert_async().await;
        assert!(page.orders.is_empty());
    }

    #[tokio::test]
    async fn test_search_orders_maps_auth_failure() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("POST", "/ecom/v1/orders/search")
            .with_status(401)
            .with_body("unauthorized")
            .create_async()
            .await;

        let client = WixClient::new(&test_config(&server.url())).unwrap();
        let err = client.search_orders(None, None).await.unwrap_err();

        assert!(matches!(
            err,
            crate::domain::CaravelError::Wix(WixError::AuthenticationFailed { status: 401, .. })
        ));
    }

    #[tokio::test]
    async fn test_search_orders_maps_server_error() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("POST", "/ecom/v1/orders/search")
            .with_status(502)
            .with_body("bad gateway")
            .create_async()
            .await;

        let client = WixClient::new(&test_config(&server.url())).unwrap();
        let err = client.search_orders(None, None).await.unwrap_err();

        assert!(matches!(
            err,
            crate::domain::CaravelError::Wix(WixError::ServerError { status: 502, .. })
        ));
    }

    #[tokio::test]
    async fn test_search_orders_rejects_malformed_body() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("POST", "/ecom/v1/orders/search")
            .with_status(200)
            .with_body("not json")
            .create_async()
            .await;

        let client = WixClient::new(&test_config(&server.url())).unwrap();
        let err = client.search_orders(None, None).await.unwrap_err();

        assert!(matches!(
            err,
            crate::domain::CaravelError::Wix(WixError::InvalidResponse(_))
        ));
    }
}
