//! Integration tests for configuration loading and validation
//!
//! Tests that modify environment variables hold ENV_MUTEX to avoid
//! interfering with each other.

use secrecy::ExposeSecret;
use std::io::Write;
use std::sync::Mutex;
use tabex::config::load_config;
use tabex::core::columns::ValueFormat;
use tabex::core::encode::{Orientation, PageFormat};
use tabex::domain::ExportFormat;
use tempfile::NamedTempFile;

// Mutex to serialize tests that modify environment variables
static ENV_MUTEX: Mutex<()> = Mutex::new(());

/// Helper function to clean up environment variables
fn cleanup_env_vars() {
    std::env::remove_var("TABEX_APPLICATION_LOG_LEVEL");
    std::env::remove_var("TABEX_BULK_MAX_ROWS");
    std::env::remove_var("TABEX_BULK_ALL_PAGES");
    std::env::remove_var("TABEX_EXPORT_DEFAULT_FORMAT");
    std::env::remove_var("TABEX_SOURCE_API_TOKEN");
    std::env::remove_var("TEST_TABEX_TOKEN");
}

fn write_config(content: &str) -> NamedTempFile {
    let mut temp_file = NamedTempFile::new().unwrap();
    temp_file.write_all(content.as_bytes()).unwrap();
    temp_file.flush().unwrap();
    temp_file
}

#[test]
fn test_load_complete_config() {
    let _lock = ENV_MUTEX.lock().unwrap_or_else(|e| e.into_inner());
    cleanup_env_vars();

    let temp_file = write_config(
        r#"
[application]
log_level = "debug"

[export]
file_base_name = "Open Invoices"
title = "Open invoices"
output_dir = "/tmp/tabex-out"
delimiter = ";"
sheet_name = "Invoices"
page_format = "letter"
orientation = "portrait"
default_format = "pdf"

[bulk]
all_pages = true
page_size = 100
max_rows = 5000

[source]
base_url = "https://erp.example.com"
endpoint = "/api/invoices"
timeout_seconds = 10
tls_verify = false

[source.filters]
status = "open"

[[columns]]
key = "number"
label = "Invoice"

[[columns]]
key = "total"
format = "currency"
decimals = 2
currency_symbol = "$"

[[columns]]
key = "due"
path = "dates.due"
format = "date"
date_pattern = "%m/%d/%Y"

[logging]
local_enabled = false
local_rotation = "hourly"
"#,
    );

    let config = load_config(temp_file.path()).unwrap();

    assert_eq!(config.application.log_level, "debug");
    assert_eq!(config.export.delimiter, ';');
    assert_eq!(config.export.page_format, PageFormat::Letter);
    assert_eq!(config.export.orientation_override(), Some(Orientation::Portrait));
    assert_eq!(config.export.default_format, ExportFormat::Pdf);
    assert!(config.bulk.all_pages);
    assert_eq!(config.bulk.max_rows, 5000);
    assert!(!config.source.tls_verify);
    assert_eq!(config.columns[1].format, ValueFormat::Currency);
    assert_eq!(config.columns[2].effective_path(), "dates.due");
    assert_eq!(config.logging.local_rotation, "hourly");

    let settings = config.export_settings();
    assert_eq!(settings.sheet_name, "Invoices");
    assert_eq!(settings.bulk.page_size, 100);
}

#[test]
fn test_env_var_substitution_for_token() {
    let _lock = ENV_MUTEX.lock().unwrap_or_else(|e| e.into_inner());
    cleanup_env_vars();
    std::env::set_var("TEST_TABEX_TOKEN", "from-env");

    let temp_file = write_config(
        r#"
[source]
base_url = "https://erp.example.com"
api_token = "${TEST_TABEX_TOKEN}"

[[columns]]
key = "id"
"#,
    );

    let config = load_config(temp_file.path()).unwrap();
    let token = config.source.api_token.as_ref().unwrap();
    assert_eq!(token.expose_secret().as_ref(), "from-env");
    assert!(!format!("{:?}", config.source).contains("from-env"));

    cleanup_env_vars();
}

#[test]
fn test_missing_env_var_fails() {
    let _lock = ENV_MUTEX.lock().unwrap_or_else(|e| e.into_inner());
    cleanup_env_vars();

    let temp_file = write_config(
        r#"
[source]
base_url = "https://erp.example.com"
api_token = "${TEST_TABEX_TOKEN}"

[[columns]]
key = "id"
"#,
    );

    let err = load_config(temp_file.path()).unwrap_err();
    assert!(err.to_string().contains("TEST_TABEX_TOKEN"));
}

#[test]
fn test_env_overrides() {
    let _lock = ENV_MUTEX.lock().unwrap_or_else(|e| e.into_inner());
    cleanup_env_vars();
    std::env::set_var("TABEX_APPLICATION_LOG_LEVEL", "warn");
    std::env::set_var("TABEX_BULK_MAX_ROWS", "250");
    std::env::set_var("TABEX_BULK_ALL_PAGES", "true");
    std::env::set_var("TABEX_EXPORT_DEFAULT_FORMAT", "xlsx");

    let temp_file = write_config(
        r#"
[source]
input_file = "rows.json"

[[columns]]
key = "id"
"#,
    );

    let config = load_config(temp_file.path()).unwrap();
    assert_eq!(config.application.log_level, "warn");
    assert_eq!(config.bulk.max_rows, 250);
    assert!(config.bulk.all_pages);
    assert_eq!(config.export.default_format, ExportFormat::Xlsx);

    cleanup_env_vars();
}

#[test]
fn test_invalid_override_fails_validation() {
    let _lock = ENV_MUTEX.lock().unwrap_or_else(|e| e.into_inner());
    cleanup_env_vars();
    std::env::set_var("TABEX_APPLICATION_LOG_LEVEL", "loud");

    let temp_file = write_config(
        r#"
[source]
input_file = "rows.json"

[[columns]]
key = "id"
"#,
    );

    let err = load_config(temp_file.path()).unwrap_err();
    assert!(err.to_string().contains("log_level"));

    cleanup_env_vars();
}

#[test]
fn test_unknown_value_format_is_rejected() {
    let _lock = ENV_MUTEX.lock().unwrap_or_else(|e| e.into_inner());
    cleanup_env_vars();

    let temp_file = write_config(
        r#"
[source]
input_file = "rows.json"

[[columns]]
key = "id"
format = "roman_numerals"
"#,
    );

    let err = load_config(temp_file.path()).unwrap_err();
    assert!(err.to_string().contains("Failed to parse TOML"));
}

#[test]
fn test_duplicate_column_keys_are_rejected() {
    let _lock = ENV_MUTEX.lock().unwrap_or_else(|e| e.into_inner());
    cleanup_env_vars();

    let temp_file = write_config(
        r#"
[source]
input_file = "rows.json"

[[columns]]
key = "id"

[[columns]]
key = "id"
label = "Again"
"#,
    );

    let err = load_config(temp_file.path()).unwrap_err();
    assert!(err.to_string().contains("Duplicate column key"));
}
