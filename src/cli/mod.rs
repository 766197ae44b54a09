//! CLI interface and argument parsing
//!
//! This module provides the command-line interface for Tabex using clap.

pub mod commands;

use clap::{Parser, Subcommand};

/// Exit code of a successful command
pub const EXIT_SUCCESS: i32 = 0;
/// Exit code of an export that ran and failed
pub const EXIT_EXPORT_FAILED: i32 = 1;
/// Exit code of invalid arguments or configuration
pub const EXIT_INVALID: i32 = 2;
/// Exit code of an unexpected fatal error
pub const EXIT_FATAL: i32 = 5;

/// Tabex - Tabular Export Engine
#[derive(Parser, Debug)]
#[command(name = "tabex")]
#[command(version, about, long_about = None)]
#[command(author = "Tabex Contributors")]
pub struct Cli {
    /// Path to configuration file
    #[arg(short, long, default_value = "tabex.toml", env = "TABEX_CONFIG")]
    pub config: String,

    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long, env = "TABEX_LOG_LEVEL")]
    pub log_level: Option<String>,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Export the configured rows as CSV, XLSX, PDF or a print view
    Export(commands::export::ExportArgs),

    /// Validate configuration file
    ValidateConfig(commands::validate::ValidateArgs),

    /// Initialize a new configuration file
    Init(commands::init::InitArgs),
}
