//! Session summary and reporting
//!
//! This module defines structures for tracking and reporting fetch session
//! results.

use crate::config::SinkTarget;
use std::time::Duration;

/// Summary of a fetch session
#[derive(Debug, Clone)]
pub struct SessionSummary {
    /// Number of pages fetched from the Orders API
    pub pages_fetched: usize,

    /// Number of order rows produced by flattening
    pub orders: usize,

    /// Number of line-item rows produced by flattening
    pub line_items: usize,

    /// Number of order rows accepted by the sink
    pub orders_written: usize,

    /// Number of line-item rows accepted by the sink
    pub line_items_written: usize,

    /// Sink the session wrote to
    pub sink_target: SinkTarget,

    /// Duration of the session
    pub duration: Duration,
}

impl SessionSummary {
    /// Create a new empty session summary
    pub fn new(sink_target: SinkTarget) -> Self {
        Self {
            pages_fetched: 0,
            orders: 0,
            line_items: 0,
            orders_written: 0,
            line_items_written: 0,
            sink_target,
            duration: Duration::from_secs(0),
        }
    }

    /// Set the duration
    pub fn with_duration(mut self, duration: Duration) -> Self {
        self.duration = duration;
        self
    }

    /// Check whether the session fetched any orders at all
    pub fn is_empty(&self) -> bool {
        self.orders == 0 && self.line_items == 0
    }

    /// Log the summary
    pub fn log_summary(&self) {
        tracing::info!(
            pages_fetched = self.pages_fetched,
            orders = self.orders,
            line_items = self.line_items,
            orders_written = self.orders_written,
            line_items_written = self.line_items_written,
            sink = %self.sink_target,
            duration_secs = self.duration.as_secs(),
            "Fetch session completed"
        );

        if self.is_empty() {
            tracing::info!("No orders matched the requested window");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_session_summary_creation() {
        let summary = SessionSummary::new(SinkTarget::Json);

        assert_eq!(summary.pages_fetched, 0);
        assert_eq!(summary.orders, 0);
        assert_eq!(summary.line_items, 0);
        assert_eq!(summary.orders_written, 0);
        assert_eq!(summary.line_items_written, 0);
        assert_eq!(summary.sink_target, SinkTarget::Json);
        assert_eq!(summary.duration, Duration::from_secs(0));
    }

    #[test]
    fn test_session_summary_with_duration() {
        let summary =
            SessionSummary::new(SinkTarget::PostgreSQL).with_duration(Duration::from_secs(42));

        assert_eq!(summary.duration, Duration::from_secs(42));
    }

    #[test]
    fn test_session_summary_is_empty() {
        let mut summary = SessionSummary::new(SinkTarget::Json);
        assert!(summary.is_empty());

        summary.orders = 3;
        assert!(!summary.is_empty());
    }
}
