//! Result type alias for Caravel
//!
//! This module provides a convenient Result type alias that uses CaravelError
//! as the error type.

use super::errors::CaravelError;

/// Result type alias for Caravel operations
///
/// This is a convenience type alias that uses `CaravelError` as the error type.
/// Use this throughout the codebase for fallible operations.
pub type Result<T> = std::result::Result<T, CaravelError>;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::errors::CaravelError;

    #[test]
    fn test_result_ok() {
        let result: Result<i32> = Ok(42);
        assert!(result.is_ok());
    }

    #[test]
    fn test_result_err() {
        let result: Result<i32> = Err(CaravelError::Other("test error".to_string()));
        assert!(result.is_err());
    }

    #[test]
    fn test_result_with_question_mark() -> Result<()> {
        fn inner() -> Result<i32> {
            Ok(42)
        }

        let value = inner()?;
        assert_eq!(value, 42);
        Ok(())
    }
}
