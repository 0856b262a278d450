//! Sink abstraction traits
//!
//! This module defines the trait that order sinks must implement to receive
//! the flattened rows of a fetch session.

use crate::config::SinkTarget;
use crate::domain::rows::{LineItemRow, OrderRow};
use crate::domain::Result;
use async_trait::async_trait;

/// Result of a sink write operation
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WriteSummary {
    /// Number of order rows accepted
    pub orders_written: usize,

    /// Number of line-item rows accepted
    pub line_items_written: usize,
}

/// Destination for flattened order rows
///
/// A sink receives the complete row set of a session in a single call. It is
/// invoked exactly once per session, including for an empty session.
#[async_trait]
pub trait OrderSink: Send + Sync {
    /// The target this sink writes to
    fn target(&self) -> SinkTarget;

    /// Prepare the destination (create tables or directories)
    ///
    /// # Errors
    ///
    /// Returns an error if the destination cannot be made ready.
    async fn prepare(&self) -> Result<()>;

    /// Write all rows of a session
    ///
    /// # Errors
    ///
    /// Returns an error if persistence fails; partial progress may remain
    /// visible depending on the sink's transaction settings.
    async fn write(
        &self,
        orders: &[OrderRow],
        line_items: &[LineItemRow],
    ) -> Result<WriteSummary>;
}
