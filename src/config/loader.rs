//! Configuration loader with TOML parsing and environment variable overrides

use super::schema::TabexConfig;
use super::secret::secret_string;
use crate::domain::errors::TabexError;
use crate::domain::result::Result;
use regex::Regex;
use std::fs;
use std::path::Path;

/// Loads configuration from a TOML file
///
/// This function:
/// 1. Reads the TOML file
/// 2. Performs environment variable substitution (${VAR} syntax)
/// 3. Parses the TOML into TabexConfig
/// 4. Applies environment variable overrides (TABEX_* prefix)
/// 5. Validates the configuration
///
/// # Errors
///
/// Returns a configuration error if the file cannot be read or parsed, if a
/// referenced environment variable is missing, or if validation fails.
///
/// # Examples
///
/// ```no_run
/// use tabex::config::loader::load_config;
///
/// let config = load_config("tabex.toml").expect("Failed to load config");
/// ```
pub fn load_config(path: impl AsRef<Path>) -> Result<TabexConfig> {
    let path = path.as_ref();

    if !path.exists() {
        return Err(TabexError::Configuration(format!(
            "Configuration file not found: {}",
            path.display()
        )));
    }

    let contents = fs::read_to_string(path).map_err(|e| {
        TabexError::Configuration(format!(
            "Failed to read configuration file {}: {}",
            path.display(),
            e
        ))
    })?;

    let config = parse_config(&contents)?;

    tracing::debug!(path = %path.display(), columns = config.columns.len(), "Configuration loaded");
    Ok(config)
}

/// Parses, overrides and validates configuration text
///
/// # Errors
///
/// Same as [`load_config`], minus the file access.
pub fn parse_config(contents: &str) -> Result<TabexConfig> {
    let contents = substitute_env_vars(contents)?;

    let mut config: TabexConfig = toml::from_str(&contents)
        .map_err(|e| TabexError::Configuration(format!("Failed to parse TOML: {}", e)))?;

    apply_env_overrides(&mut config);

    config.validate().map_err(|e| {
        TabexError::Configuration(format!("Configuration validation failed: {}", e))
    })?;

    Ok(config)
}

/// Substitutes environment variables in the format ${VAR_NAME}
///
/// Comment lines are left untouched.
///
/// # Errors
///
/// Returns an error listing every referenced variable that is not set
fn substitute_env_vars(input: &str) -> Result<String> {
    let re = Regex::new(r"\$\{([A-Z_][A-Z0-9_]*)\}").unwrap();
    let mut lines = Vec::new();
    let mut missing_vars: Vec<String> = Vec::new();

    for line in input.lines() {
        if line.trim_start().starts_with('#') {
            lines.push(line.to_string());
            continue;
        }

        let mut processed_line = line.to_string();
        for cap in re.captures_iter(line) {
            let var_name = &cap[1];
            match std::env::var(var_name) {
                Ok(value) => {
                    let placeholder = format!("${{{}}}", var_name);
                    processed_line = processed_line.replace(&placeholder, &value);
                }
                Err(_) => {
                    if !missing_vars.iter().any(|v| v == var_name) {
                        missing_vars.push(var_name.to_string());
                    }
                }
            }
        }
        lines.push(processed_line);
    }

    if !missing_vars.is_empty() {
        return Err(TabexError::Configuration(format!(
            "Missing required environment variables: {}",
            missing_vars.join(", ")
        )));
    }

    Ok(lines.join("\n"))
}

/// Applies environment variable overrides using the TABEX_* prefix
///
/// Variables follow the pattern TABEX_<SECTION>_<KEY>, for example
/// TABEX_SOURCE_BASE_URL or TABEX_BULK_MAX_ROWS. Values that fail to parse
/// are ignored.
fn apply_env_overrides(config: &mut TabexConfig) {
    if let Ok(val) = std::env::var("TABEX_APPLICATION_LOG_LEVEL") {
        config.application.log_level = val;
    }

    // Export overrides
    if let Ok(val) = std::env::var("TABEX_EXPORT_OUTPUT_DIR") {
        config.export.output_dir = val;
    }
    if let Ok(val) = std::env::var("TABEX_EXPORT_FILE_BASE_NAME") {
        config.export.file_base_name = val;
    }
    if let Ok(val) = std::env::var("TABEX_EXPORT_TITLE") {
        config.export.title = Some(val);
    }
    if let Ok(val) = std::env::var("TABEX_EXPORT_DEFAULT_FORMAT") {
        if let Ok(format) = val.parse() {
            config.export.default_format = format;
        }
    }

    // Bulk overrides
    if let Ok(val) = std::env::var("TABEX_BULK_ALL_PAGES") {
        config.bulk.all_pages = val.parse().unwrap_or(config.bulk.all_pages);
    }
    if let Ok(val) = std::env::var("TABEX_BULK_PAGE_SIZE") {
        if let Ok(size) = val.parse() {
            config.bulk.page_size = size;
        }
    }
    if let Ok(val) = std::env::var("TABEX_BULK_MAX_ROWS") {
        if let Ok(max_rows) = val.parse() {
            config.bulk.max_rows = max_rows;
        }
    }

    // Source overrides
    if let Ok(val) = std::env::var("TABEX_SOURCE_BASE_URL") {
        config.source.base_url = Some(val);
    }
    if let Ok(val) = std::env::var("TABEX_SOURCE_API_TOKEN") {
        config.source.api_token = Some(secret_string(val));
    }
    if let Ok(val) = std::env::var("TABEX_SOURCE_TLS_VERIFY") {
        config.source.tls_verify = val.parse().unwrap_or(true);
    }

    // Logging overrides
    if let Ok(val) = std::env::var("TABEX_LOGGING_LOCAL_ENABLED") {
        config.logging.local_enabled = val.parse().unwrap_or(true);
    }
    if let Ok(val) = std::env::var("TABEX_LOGGING_LOCAL_PATH") {
        config.logging.local_path = val;
    }
    if let Ok(val) = std::env::var("TABEX_LOGGING_CONSOLE_JSON") {
        config.logging.console_json = val.parse().unwrap_or(false);
    }
}
