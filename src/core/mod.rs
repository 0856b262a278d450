//! Core pipeline logic
//!
//! Pure flattening, the session coordinator, and session reporting.

pub mod flatten;
pub mod session;
pub mod summary;

pub use flatten::flatten_page;
pub use session::FetchSession;
pub use summary::SessionSummary;
