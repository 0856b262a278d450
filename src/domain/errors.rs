//! Domain error types
//!
//! This module defines the error hierarchy for Caravel. All errors are
//! domain-specific and don't expose third-party types.

use thiserror::Error;

/// Main Caravel error type
///
/// This is the primary error type used throughout the application.
/// It wraps specific error types and provides context for error handling.
#[derive(Debug, Error)]
pub enum CaravelError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Wix search API errors
    #[error("Wix API error: {0}")]
    Wix(#[from] WixError),

    /// Flattening errors (required field absent)
    #[error("Flatten error: {0}")]
    Flatten(#[from] FlattenError),

    /// Sink errors (database or file export)
    #[error("Sink error: {0}")]
    Sink(#[from] SinkError),

    /// Serialization/deserialization errors
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// I/O errors
    #[error("I/O error: {0}")]
    Io(String),

    /// Generic errors with context
    #[error("{0}")]
    Other(String),
}

/// Errors raised while talking to the Wix orders search API
///
/// Transport failures, non-success responses, and malformed pagination
/// metadata are all fatal to the session: no partial save, no retry.
/// These errors don't expose the underlying HTTP client types.
#[derive(Debug, Error)]
pub enum WixError {
    /// Failed to reach the search endpoint
    #[error("Failed to connect to Wix API: {0}")]
    ConnectionFailed(String),

    /// Authentication rejected (401/403)
    #[error("Authentication failed: {status} - {message}")]
    AuthenticationFailed { status: u16, message: String },

    /// Server error (5xx)
    #[error("Server error: {status} - {message}")]
    ServerError { status: u16, message: String },

    /// Client error (4xx other than auth)
    #[error("Client error: {status} - {message}")]
    ClientError { status: u16, message: String },

    /// Response body could not be parsed
    #[error("Invalid response from server: {0}")]
    InvalidResponse(String),

    /// `hasNext` was true but no next cursor was supplied
    #[error("Malformed pagination metadata: {0}")]
    MissingCursor(String),

    /// Request timeout
    #[error("Request timeout: {0}")]
    Timeout(String),
}

/// Errors raised while flattening a page of raw orders
///
/// Guarded optional chains collapse to `None`; the fields listed in
/// [`FlattenError::MissingField`] are accessed without guards and their
/// absence is fatal for the whole page.
#[derive(Debug, Error)]
pub enum FlattenError {
    /// A required nested object was absent where the contract assumes presence
    #[error("Order {order_id}: required field '{field}' is missing")]
    MissingField {
        order_id: String,
        field: &'static str,
    },
}

/// Errors raised by the sink writers
#[derive(Debug, Error)]
pub enum SinkError {
    /// Failed to connect to the destination database
    #[error("Failed to connect to PostgreSQL: {0}")]
    ConnectionFailed(String),

    /// A specific row failed to insert
    #[error("Failed to insert into {table}: {detail}")]
    InsertFailed { table: String, detail: String },

    /// Transaction control failed
    #[error("Transaction failed: {0}")]
    TransactionFailed(String),

    /// Failed to write an export file
    #[error("Failed to write export file {path}: {detail}")]
    WriteFailed { path: String, detail: String },
}

// Conversion from std::io::Error
impl From<std::io::Error> for CaravelError {
    fn from(err: std::io::Error) -> Self {
        CaravelError::Io(err.to_string())
    }
}

// Conversion from serde_json::Error
impl From<serde_json::Error> for CaravelError {
    fn from(err: serde_json::Error) -> Self {
        CaravelError::Serialization(err.to_string())
    }
}

// Conversion from toml parse errors
impl From<toml::de::Error> for CaravelError {
    fn from(err: toml::de::Error) -> Self {
        CaravelError::Configuration(format!("TOML parse error: {err}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_caravel_error_display() {
        let err = CaravelError::Configuration("Invalid config".to_string());
        assert_eq!(err.to_string(), "Configuration error: Invalid config");
    }

    #[test]
    fn test_wix_error_conversion() {
        let wix_err = WixError::ConnectionFailed("Network error".to_string());
        let err: CaravelError = wix_err.into();
        assert!(matches!(err, CaravelError::Wix(_)));
    }

    #[test]
    fn test_flatten_error_conversion() {
        let flatten_err = FlattenError::MissingField {
            order_id: "o1".to_string(),
            field: "productName",
        };
        let err: CaravelError = flatten_err.into();
        assert!(err.to_string().contains("productName"));
    }

    #[test]
    fn test_sink_error_conversion() {
        let sink_err = SinkError::InsertFailed {
            table: "orders".to_string(),
            detail: "duplicate key".to_string(),
        };
        let err: CaravelError = sink_err.into();
        assert!(matches!(err, CaravelError::Sink(_)));
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "File not found");
        let err: CaravelError = io_err.into();
        assert!(matches!(err, CaravelError::Io(_)));
    }

    #[test]
    fn test_errors_implement_std_error() {
        let err = CaravelError::Other("Test error".to_string());
        let _: &dyn std::error::Error = &err;
        let err = WixError::Timeout("30s".to_string());
        let _: &dyn std::error::Error = &err;
    }
}
