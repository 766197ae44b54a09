//! Logging and observability
//!
//! This module provides structured logging with support for:
//! - Console output with an `EnvFilter`-driven level
//! - JSON-formatted local log files with daily or hourly rotation
//! - Export lifecycle macros with consistent field names
//!
//! # Example
//!
//! ```no_run
//! use tabex::logging::init_logging;
//! use tabex::config::LoggingConfig;
//!
//! let config = LoggingConfig::default();
//! let _guard = init_logging("info", &config).expect("Failed to initialize logging");
//!
//! tracing::info!("Application started");
//! ```

pub mod structured;

pub use structured::{init_logging, parse_log_level, LoggingGuard};

/// Log the start of an export operation
///
/// # Example
///
/// ```no_run
/// use tabex::log_export_start;
/// use tabex::domain::ExportFormat;
///
/// log_export_start!(ExportFormat::Csv, "Open invoices");
/// ```
#[macro_export]
macro_rules! log_export_start {
    ($format:expr, $file_base_name:expr) => {
        tracing::info!(
            format = %$format,
            file_base_name = %$file_base_name,
            "Starting export"
        );
    };
}

/// Log the completion of an export operation
///
/// # Example
///
/// ```no_run
/// use tabex::log_export_complete;
/// use tabex::domain::ExportFormat;
/// use std::time::Duration;
///
/// log_export_complete!(ExportFormat::Pdf, 42, Duration::from_millis(120));
/// ```
#[macro_export]
macro_rules! log_export_complete {
    ($format:expr, $rows:expr, $duration:expr) => {
        tracing::info!(
            format = %$format,
            rows = $rows,
            duration_ms = $duration.as_millis(),
            "Export completed"
        );
    };
}

/// Log one fetched page of a bulk resolve
///
/// # Example
///
/// ```no_run
/// use tabex::log_page_fetched;
///
/// log_page_fetched!(2, 5, 200, 400);
/// ```
#[macro_export]
macro_rules! log_page_fetched {
    ($page:expr, $total_pages:expr, $fetched:expr, $accumulated:expr) => {
        tracing::debug!(
            page = $page,
            total_pages = $total_pages,
            fetched = $fetched,
            accumulated = $accumulated,
            "Fetched page"
        );
    };
}

/// Log an error with context
///
/// # Example
///
/// ```no_run
/// use tabex::log_error_with_context;
/// use tabex::domain::TabexError;
///
/// let error = TabexError::Configuration("Invalid config".to_string());
/// log_error_with_context!(&error, "Failed to load configuration");
/// ```
#[macro_export]
macro_rules! log_error_with_context {
    ($error:expr, $context:expr) => {
        tracing::error!(
            error = %$error,
            context = $context,
            "Error occurred"
        );
    };
}

#[cfg(test)]
mod tests {
    use crate::domain::{ExportFormat, TabexError};
    use std::time::Duration;

    #[test]
    fn test_macros_expand_without_subscriber() {
        crate::log_export_start!(ExportFormat::Csv, "Invoices");
        crate::log_export_complete!(ExportFormat::Xlsx, 10_usize, Duration::from_millis(5));
        crate::log_page_fetched!(1_u32, 3_u32, 200_usize, 200_usize);
        let error = TabexError::Validation("bad".to_string());
        crate::log_error_with_context!(&error, "while testing");
    }
}
