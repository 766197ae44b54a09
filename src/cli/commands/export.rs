//! Export command implementation
//!
//! This module implements the `export` command: it loads the rows described
//! by the configuration, runs one export through the orchestrator and writes
//! the result to the output directory (or opens the print view).

use crate::adapters::codecs::CodecCache;
use crate::adapters::delivery::{DirectorySink, SystemViewer};
use crate::adapters::http::HttpPageSource;
use crate::adapters::notify::TracingNotifier;
use crate::cli::{EXIT_EXPORT_FAILED, EXIT_INVALID, EXIT_SUCCESS};
use crate::config::{load_config, OrientationSetting, TabexConfig};
use crate::core::bulk::{PageRequest, PageSource};
use crate::core::columns::{descriptors_from_specs, rows_from_json};
use crate::core::export::{ExportOrchestrator, ExportOutcome, ExportRequest, RowSource};
use crate::domain::{ExportFormat, Result, TabexError};
use clap::Args;
use serde_json::Value;
use std::sync::Arc;

/// Arguments for the export command
#[derive(Args, Debug, Default)]
pub struct ExportArgs {
    /// Output format (csv, xlsx, pdf, print); defaults to export.default_format
    #[arg(short, long)]
    pub format: Option<ExportFormat>,

    /// Read rows from this JSON file instead of the configured source
    #[arg(short, long)]
    pub input: Option<String>,

    /// Override the output directory
    #[arg(short, long)]
    pub output_dir: Option<String>,

    /// Override the document and print title
    #[arg(long)]
    pub title: Option<String>,

    /// Override the document orientation (auto, portrait, landscape)
    #[arg(long)]
    pub orientation: Option<OrientationSetting>,

    /// Walk every page of the remote source, up to bulk.max_rows
    #[arg(long)]
    pub all_pages: bool,
}

impl ExportArgs {
    /// Execute the export command
    pub async fn execute(&self, config_path: &str) -> anyhow::Result<i32> {
        tracing::info!("Starting export command");

        let mut config = match load_config(config_path) {
            Ok(c) => c,
            Err(e) => {
                tracing::error!(error = %e, "Failed to load configuration");
                eprintln!("❌ {e}");
                return Ok(EXIT_INVALID);
            }
        };

        self.apply_overrides(&mut config);

        if let Err(e) = config.validate() {
            tracing::error!(error = %e, "Configuration validation failed");
            eprintln!("Configuration validation failed: {e}");
            return Ok(EXIT_INVALID);
        }

        let format = self.format.unwrap_or(config.export.default_format);

        let rows = match load_rows(&config).await {
            Ok(rows) => rows,
            Err(e) => {
                tracing::error!(error = %e, "Failed to load rows");
                eprintln!("❌ Failed to load rows: {e}");
                return Ok(EXIT_EXPORT_FAILED);
            }
        };

        let columns = descriptors_from_specs(&config.columns);
        let mut request = ExportRequest::new(config.export.file_base_name.clone(), columns, rows)?;
        if let Some(title) = &config.export.title {
            request = request.with_title(title.clone());
        }

        let orchestrator = ExportOrchestrator::new(
            Arc::new(CodecCache::default()),
            Arc::new(DirectorySink::new(&config.export.output_dir)),
            Arc::new(SystemViewer::new()),
            Arc::new(TracingNotifier),
        )
        .with_settings(config.export_settings());

        println!("🚀 Exporting {format}...");

        let exit_code = match orchestrator.export(&request, format).await {
            ExportOutcome::Completed(report) => {
                println!();
                println!("📊 Export Summary:");
                println!("  Format: {}", report.format);
                if format == ExportFormat::Print {
                    println!("  Print view: {}", report.file_name);
                } else {
                    println!(
                        "  File: {}",
                        std::path::Path::new(&config.export.output_dir)
                            .join(&report.file_name)
                            .display()
                    );
                }
                println!("  Rows: {}", report.row_count);
                println!("  Size: {} bytes", report.byte_count);
                println!("  Duration: {:.2}s", report.duration.as_secs_f64());
                if report.truncated {
                    println!(
                        "  ⚠️  Truncated at {} rows (bulk.max_rows)",
                        config.bulk.max_rows
                    );
                }
                println!();
                println!("✅ Export completed successfully!");
                EXIT_SUCCESS
            }
            ExportOutcome::Cancelled => {
                println!("Print view was not opened.");
                EXIT_SUCCESS
            }
            ExportOutcome::Busy => {
                eprintln!("❌ Another export is already running");
                EXIT_EXPORT_FAILED
            }
            ExportOutcome::Failed(message) => {
                eprintln!("❌ Export failed: {message}");
                EXIT_EXPORT_FAILED
            }
        };

        Ok(exit_code)
    }

    fn apply_overrides(&self, config: &mut TabexConfig) {
        if let Some(input) = &self.input {
            tracing::info!(input = %input, "Overriding row source from CLI");
            config.source.input_file = Some(input.clone());
            config.source.base_url = None;
        }
        if let Some(output_dir) = &self.output_dir {
            config.export.output_dir = output_dir.clone();
        }
        if let Some(title) = &self.title {
            config.export.title = Some(title.clone());
        }
        if let Some(orientation) = self.orientation {
            config.export.orientation = orientation;
        }
        if self.all_pages {
            config.bulk.all_pages = true;
        }
    }
}

/// Builds the row source described by the configuration
///
/// A remote source without `all_pages` exports only its first page, the same
/// rows a host would have on screen.
async fn load_rows(config: &TabexConfig) -> Result<RowSource<Value>> {
    if let Some(path) = &config.source.input_file {
        let contents = tokio::fs::read_to_string(path)
            .await
            .map_err(|e| TabexError::Io(format!("Failed to read {path}: {e}")))?;
        let value: Value = serde_json::from_str(&contents)?;
        let rows = rows_from_json(value);
        tracing::info!(path = %path, rows = rows.len(), "Rows loaded from file");
        return Ok(RowSource::Loaded(rows));
    }

    let source = HttpPageSource::<Value>::new(&config.source)?;

    if config.bulk.all_pages {
        return Ok(RowSource::Bulk(Arc::new(source)));
    }

    let page = source
        .fetch_page(PageRequest::new(1, config.bulk.page_size))
        .await?;
    tracing::info!(
        rows = page.items.len(),
        total_pages = page.total_pages,
        "First page loaded"
    );
    Ok(RowSource::Loaded(page.items))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::parse_config;

    fn config() -> TabexConfig {
        parse_config(
            r#"
            [source]
            base_url = "https://erp.example.com"

            [[columns]]
            key = "name"
            "#,
        )
        .unwrap()
    }

    #[test]
    fn test_input_override_replaces_remote_source() {
        let mut config = config();
        let args = ExportArgs {
            input: Some("rows.json".to_string()),
            ..Default::default()
        };
        args.apply_overrides(&mut config);

        assert_eq!(config.source.input_file.as_deref(), Some("rows.json"));
        assert!(config.source.base_url.is_none());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_presentation_overrides() {
        let mut config = config();
        let args = ExportArgs {
            output_dir: Some("/tmp/out".to_string()),
            title: Some("Payroll".to_string()),
            orientation: Some(OrientationSetting::Landscape),
            all_pages: true,
            ..Default::default()
        };
        args.apply_overrides(&mut config);

        assert_eq!(config.export.output_dir, "/tmp/out");
        assert_eq!(config.export.title.as_deref(), Some("Payroll"));
        assert_eq!(config.export.orientation, OrientationSetting::Landscape);
        assert!(config.bulk.all_pages);
    }

    #[tokio::test]
    async fn test_load_rows_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("rows.json");
        std::fs::write(&path, r#"[{"name":"Ada"},{"name":"Linus"}]"#).unwrap();

        let mut config = config();
        config.source.base_url = None;
        config.source.input_file = Some(path.display().to_string());

        let rows = load_rows(&config).await.unwrap();
        match rows {
            RowSource::Loaded(rows) => assert_eq!(rows.len(), 2),
            RowSource::Bulk(_) => panic!("expected loaded rows"),
        }
    }

    #[tokio::test]
    async fn test_load_rows_missing_file() {
        let mut config = config();
        config.source.base_url = None;
        config.source.input_file = Some("/nonexistent/tabex-rows.json".to_string());

        let err = load_rows(&config).await.unwrap_err();
        assert!(matches!(err, TabexError::Io(_)));
    }

    #[tokio::test]
    async fn test_all_pages_defers_to_bulk_resolver() {
        let mut config = config();
        config.bulk.all_pages = true;
        let rows = load_rows(&config).await.unwrap();
        assert!(rows.is_bulk());
    }
}
