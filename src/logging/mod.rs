//! Logging and observability
//!
//! Structured logging with configurable levels, console output, and
//! optional JSON file logging with rotation.

pub mod structured;

pub use structured::{init_logging, LoggingGuard};
