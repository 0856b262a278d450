//! Sink abstraction
//!
//! Defines the [`OrderSink`] trait and the factory that selects an
//! implementation from configuration.

pub mod factory;
pub mod traits;

pub use factory::create_order_sink;
pub use traits::{OrderSink, WriteSummary};
