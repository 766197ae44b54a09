//! Error context extension trait
//!
//! Adds `.context()` and `.with_context()` to any `Result` whose error converts
//! into [`TabexError`], so library code can annotate failures without leaving
//! the domain error type.
//!
//! # Examples
//!
//! ```rust
//! use tabex::domain::Result;
//! use tabex::domain::context::ResultExt;
//!
//! fn read_rows(path: &str) -> Result<String> {
//!     std::fs::read_to_string(path).with_context(|| format!("Failed to read rows from {path}"))
//! }
//!
//! assert!(read_rows("/definitely/not/here.json")
//!     .unwrap_err()
//!     .to_string()
//!     .starts_with("Failed to read rows from"));
//! ```

use crate::domain::errors::TabexError;
use crate::domain::result::Result;

/// Extension trait for adding context to `Result` types
pub trait ResultExt<T> {
    /// Add context to an error
    fn context<C>(self, context: C) -> Result<T>
    where
        C: std::fmt::Display + Send + Sync + 'static;

    /// Add context to an error, computing it only on failure
    fn with_context<C, F>(self, f: F) -> Result<T>
    where
        C: std::fmt::Display + Send + Sync + 'static,
        F: FnOnce() -> C;
}

impl<T, E> ResultExt<T> for std::result::Result<T, E>
where
    E: Into<TabexError>,
{
    fn context<C>(self, context: C) -> Result<T>
    where
        C: std::fmt::Display + Send + Sync + 'static,
    {
        self.map_err(|e| TabexError::Other(format!("{context}: {}", e.into())))
    }

    fn with_context<C, F>(self, f: F) -> Result<T>
    where
        C: std::fmt::Display + Send + Sync + 'static,
        F: FnOnce() -> C,
    {
        self.map_err(|e| {
            let base_error = e.into();
            TabexError::Other(format!("{}: {base_error}", f()))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::errors::{CodecError, SourceError};
    use std::sync::atomic::{AtomicBool, Ordering};
    use std::sync::Arc;

    #[test]
    fn test_context_wraps_message() {
        let result: Result<()> = Err(TabexError::Configuration("missing columns".to_string()));
        let err = result.context("Failed to load tabex.toml").unwrap_err();
        let message = err.to_string();
        assert!(message.contains("Failed to load tabex.toml"));
        assert!(message.contains("missing columns"));
    }

    #[test]
    fn test_with_context_is_lazy() {
        let called = Arc::new(AtomicBool::new(false));
        let flag = called.clone();

        let result: Result<i32> = Ok(7);
        let value = result
            .with_context(|| {
                flag.store(true, Ordering::SeqCst);
                "never"
            })
            .unwrap();

        assert_eq!(value, 7);
        assert!(!called.load(Ordering::SeqCst));
    }

    #[test]
    fn test_context_on_sub_errors() {
        let result: std::result::Result<(), SourceError> = Err(SourceError::PageFailed {
            page: 3,
            message: "reset by peer".to_string(),
        });
        let message = result.context("Bulk resolve").unwrap_err().to_string();
        assert!(message.contains("Bulk resolve"));
        assert!(message.contains("page 3"));

        let result: std::result::Result<(), CodecError> = Err(CodecError::load("pdf", "boom"));
        let message = result.context("Document export").unwrap_err().to_string();
        assert!(message.contains("Failed to load pdf codec: boom"));
    }

    #[test]
    fn test_context_chaining() {
        let io_error = std::io::Error::new(std::io::ErrorKind::NotFound, "File not found");
        let result: std::result::Result<(), std::io::Error> = Err(io_error);
        let message = result
            .context("Failed to open rows.json")
            .context("Failed to build request")
            .unwrap_err()
            .to_string();
        assert!(message.starts_with("Failed to build request: Failed to open rows.json"));
        assert!(message.contains("File not found"));
    }
}
