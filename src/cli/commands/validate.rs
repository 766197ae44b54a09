//! Validate config command implementation
//!
//! This module implements the `validate-config` command for validating
//! the Tabex configuration file.

use crate::cli::{EXIT_INVALID, EXIT_SUCCESS};
use crate::config::load_config;
use clap::Args;

/// Arguments for the validate-config command
#[derive(Args, Debug)]
pub struct ValidateArgs {}

impl ValidateArgs {
    /// Execute the validate-config command
    ///
    /// Loading already validates every section, so a loaded configuration is
    /// a valid one.
    pub async fn execute(&self, config_path: &str) -> anyhow::Result<i32> {
        tracing::info!(config_path = %config_path, "Validating configuration");

        println!("🔍 Validating configuration file: {config_path}");
        println!();

        let config = match load_config(config_path) {
            Ok(c) => c,
            Err(e) => {
                println!("❌ Configuration is invalid");
                println!("   Error: {e}");
                return Ok(EXIT_INVALID);
            }
        };

        println!("✅ Configuration is valid");
        println!();
        println!("Configuration Summary:");
        println!("  Log Level: {}", config.application.log_level);
        match (&config.source.input_file, &config.source.base_url) {
            (Some(path), _) => println!("  Source: file {path}"),
            (None, Some(url)) => {
                println!("  Source: {}{}", url.trim_end_matches('/'), config.source.endpoint);
                println!(
                    "  API Token: {}",
                    if config.source.api_token.is_some() { "set" } else { "not set" }
                );
            }
            (None, None) => {}
        }
        println!("  Default Format: {}", config.export.default_format);
        println!("  Output Directory: {}", config.export.output_dir);
        println!(
            "  Bulk: {} (page size {}, max {} rows)",
            if config.bulk.all_pages { "all pages" } else { "first page" },
            config.bulk.page_size,
            config.bulk.max_rows
        );
        println!(
            "  Columns: {}",
            config
                .columns
                .iter()
                .map(|c| c.label.as_deref().unwrap_or(&c.key))
                .collect::<Vec<_>>()
                .join(", ")
        );
        println!();
        Ok(EXIT_SUCCESS)
    }
}
