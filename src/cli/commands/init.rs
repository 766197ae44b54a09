//! Init command implementation
//!
//! This module implements the `init` command for generating a sample
//! configuration file.

use crate::cli::{EXIT_FATAL, EXIT_INVALID, EXIT_SUCCESS};
use clap::Args;
use std::fs;
use std::path::Path;

/// Arguments for the init command
#[derive(Args, Debug)]
pub struct InitArgs {
    /// Path where to create the configuration file
    #[arg(short, long, default_value = "tabex.toml")]
    pub output: String,

    /// Include a remote source, formatted columns and comments
    #[arg(long)]
    pub with_examples: bool,

    /// Overwrite existing file
    #[arg(long)]
    pub force: bool,
}

impl InitArgs {
    /// Execute the init command
    pub async fn execute(&self) -> anyhow::Result<i32> {
        tracing::info!(output = %self.output, "Initializing configuration file");

        println!("📝 Initializing Tabex configuration");
        println!();

        if Path::new(&self.output).exists() && !self.force {
            println!("❌ Configuration file already exists: {}", self.output);
            println!("   Use --force to overwrite");
            return Ok(EXIT_INVALID);
        }

        let config_content = if self.with_examples {
            Self::generate_config_with_examples()
        } else {
            Self::generate_minimal_config()
        };

        match fs::write(&self.output, config_content) {
            Ok(_) => {
                println!("✅ Configuration file created: {}", self.output);
                println!();
                println!("Next steps:");
                println!("  1. Edit {} with your source and columns", self.output);
                println!("  2. Put secrets such as TABEX_API_TOKEN in a .env file");
                println!("  3. Validate configuration: tabex validate-config");
                println!("  4. Run export: tabex export --format xlsx");
                println!();
                Ok(EXIT_SUCCESS)
            }
            Err(e) => {
                println!("❌ Failed to write configuration file");
                println!("   Error: {}", e);
                Ok(EXIT_FATAL)
            }
        }
    }

    /// Generate minimal configuration
    fn generate_minimal_config() -> String {
        r#"# Tabex Configuration File

[application]
log_level = "info"

[export]
file_base_name = "export"
output_dir = "./exports"
default_format = "csv"

[source]
input_file = "rows.json"

[[columns]]
key = "id"
label = "ID"

[[columns]]
key = "name"
label = "Name"
"#
        .to_string()
    }

    /// Generate configuration with examples and comments
    fn generate_config_with_examples() -> String {
        r#"# Tabex Configuration File
#
# Values of the form ${VAR} are read from the environment (or a .env file).
# Any TABEX_<SECTION>_<KEY> variable overrides the matching setting.

[application]
log_level = "info"                   # trace | debug | info | warn | error

[export]
file_base_name = "Payroll Report"    # sanitized, then suffixed with _YYYY-MM-DD_HHMM
title = "Payroll Q1"                 # printed by pdf and print formats
output_dir = "./exports"
delimiter = ","                      # csv field delimiter
sheet_name = "Payroll"               # xlsx sheet, at most 31 characters
page_format = "a4"                   # a4 | letter
orientation = "auto"                 # auto | portrait | landscape (auto: landscape above 6 columns)
default_format = "xlsx"              # csv | xlsx | pdf | print

[bulk]
all_pages = true                     # walk every page instead of exporting the first one
page_size = 200
max_rows = 10000                     # bulk exports stop at this many rows

[source]
base_url = "https://erp.example.com"
endpoint = "/api/payroll"
# api_token = "${TABEX_API_TOKEN}"
timeout_seconds = 30
tls_verify = true

[source.filters]
status = "approved"

[source.retry]
max_retries = 3
initial_delay_ms = 500
max_delay_ms = 10000
backoff_multiplier = 2.0

[[columns]]
key = "employee"
label = "Employee"
path = "employee.name"               # dotted path into each row

[[columns]]
key = "gross"
label = "Gross"
format = "currency"                  # raw | text | number | currency | percent | date | yes_no
decimals = 2
currency_symbol = "€"

[[columns]]
key = "paid_on"
label = "Paid On"
format = "date"
date_pattern = "%d.%m.%Y"

[[columns]]
key = "approved"
format = "yes_no"

[logging]
local_enabled = false
local_path = "./logs"
local_rotation = "daily"             # daily | hourly | never
console_json = false
"#
        .to_string()
    }
}
