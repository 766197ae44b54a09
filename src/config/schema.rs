//! Configuration schema types
//!
//! This module defines the structure of `tabex.toml`.

use crate::config::SecretString;
use crate::core::bulk::{BulkConfig, DEFAULT_MAX_ROWS, DEFAULT_PAGE_SIZE};
use crate::core::columns::ColumnSpec;
use crate::core::encode::document::{DocumentOptions, Orientation, PageFormat};
use crate::core::encode::workbook::{DEFAULT_SHEET_NAME, MAX_SHEET_NAME_LEN};
use crate::core::export::ExportSettings;
use crate::domain::ExportFormat;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashSet};
use std::str::FromStr;

/// Main Tabex configuration
///
/// This is the root configuration structure that maps to the TOML file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TabexConfig {
    /// Application-level settings
    #[serde(default)]
    pub application: ApplicationConfig,

    /// Export settings
    #[serde(default)]
    pub export: ExportConfig,

    /// Bulk resolution settings
    #[serde(default)]
    pub bulk: BulkSettings,

    /// Row source
    #[serde(default)]
    pub source: SourceConfig,

    /// Output columns, in order
    #[serde(default)]
    pub columns: Vec<ColumnSpec>,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl TabexConfig {
    /// Validates the configuration
    ///
    /// # Errors
    ///
    /// Returns an error if any configuration values are invalid
    pub fn validate(&self) -> Result<(), String> {
        self.application.validate()?;
        self.export.validate()?;
        self.bulk.validate()?;
        self.source.validate()?;
        self.validate_columns()?;
        self.logging.validate()?;
        Ok(())
    }

    fn validate_columns(&self) -> Result<(), String> {
        if self.columns.is_empty() {
            return Err("At least one [[columns]] entry is required".to_string());
        }

        let mut seen = HashSet::new();
        for column in &self.columns {
            column.validate()?;
            if !seen.insert(column.key.as_str()) {
                return Err(format!("Duplicate column key '{}'", column.key));
            }
        }
        Ok(())
    }

    /// Encoder and resolver settings for the orchestrator
    pub fn export_settings(&self) -> ExportSettings {
        ExportSettings {
            delimiter: self.export.delimiter,
            sheet_name: self.export.sheet_name.clone(),
            document: DocumentOptions {
                page_format: self.export.page_format,
                orientation: self.export.orientation_override(),
                generated_at: None,
            },
            bulk: self.bulk.to_bulk_config(),
        }
    }
}

/// Application-level configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApplicationConfig {
    /// Log level (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl ApplicationConfig {
    fn validate(&self) -> Result<(), String> {
        let valid_levels = ["trace", "debug", "info", "warn", "error"];
        if !valid_levels.contains(&self.log_level.as_str()) {
            return Err(format!(
                "Invalid log_level '{}'. Must be one of: {}",
                self.log_level,
                valid_levels.join(", ")
            ));
        }
        Ok(())
    }
}

impl Default for ApplicationConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
        }
    }
}

/// Export configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExportConfig {
    /// Label the file name is built from
    #[serde(default = "default_file_base_name")]
    pub file_base_name: String,

    /// Title printed by the document and print formats
    #[serde(default)]
    pub title: Option<String>,

    /// Directory receiving exported files
    #[serde(default = "default_output_dir")]
    pub output_dir: String,

    /// Field delimiter of the delimited-text format
    #[serde(default = "default_delimiter")]
    pub delimiter: char,

    /// Workbook sheet name
    #[serde(default = "default_sheet_name")]
    pub sheet_name: String,

    /// Document page format
    #[serde(default)]
    pub page_format: PageFormat,

    /// Document orientation
    #[serde(default)]
    pub orientation: OrientationSetting,

    /// Format used when none is given on the command line
    #[serde(default = "default_format")]
    pub default_format: ExportFormat,
}

impl ExportConfig {
    fn validate(&self) -> Result<(), String> {
        if self.output_dir.trim().is_empty() {
            return Err("export.output_dir cannot be empty".to_string());
        }

        if matches!(self.delimiter, '"' | '\n' | '\r') {
            return Err(format!(
                "export.delimiter cannot be {:?}",
                self.delimiter
            ));
        }

        if self.sheet_name.chars().count() > MAX_SHEET_NAME_LEN {
            return Err(format!(
                "export.sheet_name must be at most {MAX_SHEET_NAME_LEN} characters"
            ));
        }

        Ok(())
    }

    /// Explicit orientation, or `None` for automatic selection
    pub fn orientation_override(&self) -> Option<Orientation> {
        self.orientation.fixed()
    }
}

/// Configured document orientation
///
/// Parsing ignores case, so `Auto` and `LANDSCAPE` are accepted in TOML and on
/// the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase", try_from = "String")]
pub enum OrientationSetting {
    /// Landscape above six columns, portrait otherwise
    #[default]
    Auto,
    /// Always portrait
    Portrait,
    /// Always landscape
    Landscape,
}

impl OrientationSetting {
    /// The forced orientation, `None` for automatic selection
    pub fn fixed(self) -> Option<Orientation> {
        match self {
            OrientationSetting::Auto => None,
            OrientationSetting::Portrait => Some(Orientation::Portrait),
            OrientationSetting::Landscape => Some(Orientation::Landscape),
        }
    }
}

impl FromStr for OrientationSetting {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "auto" => Ok(OrientationSetting::Auto),
            "portrait" => Ok(OrientationSetting::Portrait),
            "landscape" => Ok(OrientationSetting::Landscape),
            other => Err(format!(
                "Unknown orientation '{other}'. Must be one of: auto, portrait, landscape"
            )),
        }
    }
}

impl TryFrom<String> for OrientationSetting {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            file_base_name: default_file_base_name(),
            title: None,
            output_dir: default_output_dir(),
            delimiter: default_delimiter(),
            sheet_name: default_sheet_name(),
            page_format: PageFormat::default(),
            orientation: OrientationSetting::default(),
            default_format: default_format(),
        }
    }
}

/// Bulk resolution configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BulkSettings {
    /// Walk every page of a remote source instead of exporting the first page
    #[serde(default)]
    pub all_pages: bool,

    /// Rows requested per page
    #[serde(default = "default_page_size")]
    pub page_size: u32,

    /// Row cap of a bulk export
    #[serde(default = "default_max_rows")]
    pub max_rows: usize,
}

impl BulkSettings {
    fn validate(&self) -> Result<(), String> {
        if self.page_size == 0 || self.page_size > 5000 {
            return Err("bulk.page_size must be between 1 and 5000".to_string());
        }
        if self.max_rows == 0 {
            return Err("bulk.max_rows must be > 0".to_string());
        }
        Ok(())
    }

    /// Resolver parameters
    pub fn to_bulk_config(&self) -> BulkConfig {
        BulkConfig::new(self.page_size, self.max_rows)
    }
}

impl Default for BulkSettings {
    fn default() -> Self {
        Self {
            all_pages: false,
            page_size: default_page_size(),
            max_rows: default_max_rows(),
        }
    }
}

/// Retry configuration for page fetches
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RetryConfig {
    /// Maximum number of attempts per page
    #[serde(default = "default_max_retries")]
    pub max_retries: usize,

    /// Initial delay in milliseconds
    #[serde(default = "default_initial_delay_ms")]
    pub initial_delay_ms: u64,

    /// Maximum delay in milliseconds
    #[serde(default = "default_max_delay_ms")]
    pub max_delay_ms: u64,

    /// Backoff multiplier
    #[serde(default = "default_backoff_multiplier")]
    pub backoff_multiplier: f64,
}

impl RetryConfig {
    fn validate(&self) -> Result<(), String> {
        if self.max_retries == 0 {
            return Err("source.retry.max_retries must be >= 1".to_string());
        }
        if self.backoff_multiplier < 1.0 {
            return Err("source.retry.backoff_multiplier must be >= 1.0".to_string());
        }
        Ok(())
    }
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_retries: default_max_retries(),
            initial_delay_ms: default_initial_delay_ms(),
            max_delay_ms: default_max_delay_ms(),
            backoff_multiplier: default_backoff_multiplier(),
        }
    }
}

/// Row source configuration
///
/// Exactly one of `input_file` and `base_url` must be set.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SourceConfig {
    /// JSON file holding an array of rows
    #[serde(default)]
    pub input_file: Option<String>,

    /// Base URL of the paginated list API
    #[serde(default)]
    pub base_url: Option<String>,

    /// List endpoint path, relative to `base_url`
    #[serde(default)]
    pub endpoint: String,

    /// Bearer token sent with every request
    /// Stored securely in memory and automatically zeroized on drop
    #[serde(default)]
    pub api_token: Option<SecretString>,

    /// Request timeout in seconds
    #[serde(default = "default_timeout_seconds")]
    pub timeout_seconds: u64,

    /// TLS certificate verification enabled
    #[serde(default = "default_true")]
    pub tls_verify: bool,

    /// Extra query parameters sent with every page request
    #[serde(default)]
    pub filters: BTreeMap<String, String>,

    /// Retry configuration
    #[serde(default)]
    pub retry: RetryConfig,
}

impl SourceConfig {
    fn validate(&self) -> Result<(), String> {
        match (&self.input_file, &self.base_url) {
            (Some(_), Some(_)) => {
                return Err(
                    "source.input_file and source.base_url are mutually exclusive".to_string(),
                )
            }
            (None, None) => {
                return Err("Either source.input_file or source.base_url is required".to_string())
            }
            (Some(path), None) if path.trim().is_empty() => {
                return Err("source.input_file cannot be empty".to_string())
            }
            (None, Some(url)) => {
                if !url.starts_with("http://") && !url.starts_with("https://") {
                    return Err("source.base_url must start with http:// or https://".to_string());
                }
            }
            _ => {}
        }

        if self.timeout_seconds == 0 {
            return Err("source.timeout_seconds must be > 0".to_string());
        }

        for reserved in ["page", "limit"] {
            if self.filters.contains_key(reserved) {
                return Err(format!(
                    "source.filters cannot override the '{reserved}' parameter"
                ));
            }
        }

        self.retry.validate()
    }

    /// Whether rows come from a remote list API
    pub fn is_remote(&self) -> bool {
        self.base_url.is_some()
    }
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            input_file: None,
            base_url: None,
            endpoint: String::new(),
            api_token: None,
            timeout_seconds: default_timeout_seconds(),
            tls_verify: true,
            filters: BTreeMap::new(),
            retry: RetryConfig::default(),
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Enable local file logging
    #[serde(default)]
    pub local_enabled: bool,

    /// Local log directory
    #[serde(default = "default_local_path")]
    pub local_path: String,

    /// Log rotation strategy (daily, hourly, never)
    #[serde(default = "default_local_rotation")]
    pub local_rotation: String,

    /// Emit console logs as JSON lines
    #[serde(default)]
    pub console_json: bool,
}

impl LoggingConfig {
    fn validate(&self) -> Result<(), String> {
        let valid_rotations = ["daily", "hourly", "never"];
        if !valid_rotations.contains(&self.local_rotation.as_str()) {
            return Err(format!(
                "Invalid logging.local_rotation '{}'. Must be one of: {}",
                self.local_rotation,
                valid_rotations.join(", ")
            ));
        }

        if self.local_enabled && self.local_path.trim().is_empty() {
            return Err("logging.local_path cannot be empty when local logging is enabled".to_string());
        }

        Ok(())
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            local_enabled: false,
            local_path: default_local_path(),
            local_rotation: default_local_rotation(),
            console_json: false,
        }
    }
}

// Default value functions
fn default_log_level() -> String {
    "info".to_string()
}

fn default_file_base_name() -> String {
    "export".to_string()
}

fn default_output_dir() -> String {
    "./exports".to_string()
}

fn default_delimiter() -> char {
    ','
}

fn default_sheet_name() -> String {
    DEFAULT_SHEET_NAME.to_string()
}

fn default_format() -> ExportFormat {
    ExportFormat::Csv
}

fn default_page_size() -> u32 {
    DEFAULT_PAGE_SIZE
}

fn default_max_rows() -> usize {
    DEFAULT_MAX_ROWS
}

fn default_true() -> bool {
    true
}

fn default_timeout_seconds() -> u64 {
    30
}

fn default_max_retries() -> usize {
    3
}

fn default_initial_delay_ms() -> u64 {
    500
}

fn default_max_delay_ms() -> u64 {
    10_000
}

fn default_backoff_multiplier() -> f64 {
    2.0
}

fn default_local_path() -> String {
    "./logs".to_string()
}

fn default_local_rotation() -> String {
    "daily".to_string()
}
