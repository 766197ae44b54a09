//! Configuration management for Tabex.
//!
//! This module provides TOML-based configuration loading, parsing, and validation.
//!
//! # Overview
//!
//! Tabex uses TOML configuration files with support for:
//! - Environment variable substitution (`${VAR_NAME}`)
//! - `TABEX_*` environment overrides
//! - Default values for optional settings
//! - Validation on load
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use tabex::config::load_config;
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = load_config("tabex.toml")?;
//!
//! println!("Output directory: {}", config.export.output_dir);
//! println!("Columns: {}", config.columns.len());
//! # Ok(())
//! # }
//! ```
//!
//! # Configuration Structure
//!
//! - [`ApplicationConfig`] - Log level
//! - [`ExportConfig`] - File naming, delimiter, sheet and page settings
//! - [`BulkSettings`] - Page size and row cap of bulk exports
//! - [`SourceConfig`] - JSON file or paginated list API, with [`RetryConfig`]
//! - [`ColumnSpec`](crate::core::columns::ColumnSpec) - Output columns
//! - [`LoggingConfig`] - Console and file logging
//!
//! # Example Configuration
//!
//! ```toml
//! [export]
//! file_base_name = "Payroll"
//! title = "Payroll Q1"
//!
//! [bulk]
//! all_pages = true
//!
//! [source]
//! base_url = "https://erp.example.com"
//! endpoint = "/api/payroll"
//! api_token = "${TABEX_API_TOKEN}"
//!
//! [[columns]]
//! key = "employee"
//! label = "Employee"
//!
//! [[columns]]
//! key = "amount"
//! format = "currency"
//! ```

pub mod loader;
pub mod schema;
pub mod secret;

pub use loader::{load_config, parse_config};
pub use schema::{
    ApplicationConfig, BulkSettings, ExportConfig, LoggingConfig, OrientationSetting, RetryConfig,
    SourceConfig, TabexConfig,
};
pub use secret::{secret_string, SecretString, SecretValue};
