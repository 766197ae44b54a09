//! Result type alias for Tabex
//!
//! This module provides a convenient Result type alias that uses TabexError
//! as the error type.

use super::errors::TabexError;

/// Result type alias for Tabex operations
///
/// # Examples
///
/// ```
/// use tabex::domain::result::Result;
/// use tabex::domain::errors::TabexError;
///
/// fn example_function() -> Result<String> {
///     Ok("success".to_string())
/// }
///
/// fn failing_function() -> Result<()> {
///     Err(TabexError::Validation("Invalid input".to_string()))
/// }
/// ```
pub type Result<T> = std::result::Result<T, TabexError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_result_err() {
        let result: Result<i32> = Err(TabexError::Validation("test error".to_string()));
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
