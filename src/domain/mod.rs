//! Domain models and types for Caravel.
//!
//! The domain layer provides:
//! - **Flattened row shapes** ([`OrderRow`], [`LineItemRow`])
//! - **Error types** ([`CaravelError`], [`WixError`], [`FlattenError`], [`SinkError`])
//! - **Result type alias** ([`Result`])
//!
//! All fallible operations return [`Result<T>`]; third-party error types are
//! converted at the adapter boundary and never leak into domain signatures.

pub mod errors;
pub mod result;
pub mod rows;

// Re-export commonly used types for convenience
pub use errors::{CaravelError, FlattenError, SinkError, WixError};
pub use result::Result;
pub use rows::{LineItemRow, OrderRow};
