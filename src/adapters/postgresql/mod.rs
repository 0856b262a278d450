//! PostgreSQL adapter
//!
//! Pooled TLS client plus the [`PostgresSink`](writer::PostgresSink) that
//! persists flattened rows.

pub mod client;
pub mod writer;

pub use client::PostgresClient;
pub use writer::PostgresSink;
