//! Export orchestrator
//!
//! Drives one export from trigger to delivery: resolve rows, project them,
//! encode with the requested format, then hand the result to a delivery port.
//! The orchestrator owns a single busy flag and never propagates failures;
//! they are reported once through the notification port.

use crate::adapters::codecs::CodecCache;
use crate::adapters::delivery::{DownloadSink, PrintSurface, SurfaceStatus};
use crate::adapters::notify::NotificationPort;
use crate::core::bulk::{BulkConfig, BulkResolver, StopReason};
use crate::core::encode::csv::{encode_csv, DEFAULT_DELIMITER};
use crate::core::encode::document::{encode_document, DocumentOptions};
use crate::core::encode::print::render_printable;
use crate::core::encode::workbook::{encode_workbook, DEFAULT_SHEET_NAME};
use crate::core::export::request::{ExportRequest, RowSource};
use crate::core::export::state::{BusyFlag, BusyGuard, ExportState};
use crate::core::export::summary::{ExportOutcome, ExportReport};
use crate::core::filename::build_file_name;
use crate::core::projection::project;
use crate::domain::{CodecError, ExportFormat, Result, TabexError};
use futures::FutureExt;
use std::any::Any;
use std::panic::AssertUnwindSafe;
use std::sync::Arc;
use std::time::Instant;
use tokio::sync::watch;

/// Encoder and resolver settings applied to every export
#[derive(Debug, Clone)]
pub struct ExportSettings {
    /// Field delimiter of the delimited-text format
    pub delimiter: char,
    /// Sheet name of the workbook format
    pub sheet_name: String,
    /// Page options of the document format
    pub document: DocumentOptions,
    /// Bulk resolution parameters
    pub bulk: BulkConfig,
}

impl Default for ExportSettings {
    fn default() -> Self {
        Self {
            delimiter: DEFAULT_DELIMITER,
            sheet_name: DEFAULT_SHEET_NAME.to_string(),
            document: DocumentOptions::default(),
            bulk: BulkConfig::default(),
        }
    }
}

enum Delivery {
    Delivered(ExportReport),
    Refused,
}

/// Export orchestrator
pub struct ExportOrchestrator {
    codecs: Arc<CodecCache>,
    downloads: Arc<dyn DownloadSink>,
    surface: Arc<dyn PrintSurface>,
    notifier: Arc<dyn NotificationPort>,
    settings: ExportSettings,
    resolver: BulkResolver,
    busy: BusyFlag,
}

impl ExportOrchestrator {
    /// Create a new orchestrator with default settings
    pub fn new(
        codecs: Arc<CodecCache>,
        downloads: Arc<dyn DownloadSink>,
        surface: Arc<dyn PrintSurface>,
        notifier: Arc<dyn NotificationPort>,
    ) -> Self {
        let settings = ExportSettings::default();
        Self {
            codecs,
            downloads,
            surface,
            notifier,
            resolver: BulkResolver::new(settings.bulk),
            settings,
            busy: BusyFlag::new(),
        }
    }

    /// Replace the settings
    pub fn with_settings(mut self, settings: ExportSettings) -> Self {
        self.resolver = BulkResolver::new(settings.bulk);
        self.settings = settings;
        self
    }

    /// Active settings
    pub fn settings(&self) -> &ExportSettings {
        &self.settings
    }

    /// Current state
    pub fn state(&self) -> ExportState {
        self.busy.current()
    }

    /// Receiver that observes state changes
    pub fn subscribe(&self) -> watch::Receiver<ExportState> {
        self.busy.subscribe()
    }

    /// Runs one export
    ///
    /// Rejected with [`ExportOutcome::Busy`] and no side effects while another
    /// export is in flight. Errors and panics raised while resolving or
    /// encoding end in [`ExportOutcome::Failed`] after exactly one
    /// notification; the state is back to [`ExportState::Idle`] on every path.
    pub async fn export<R>(&self, request: &ExportRequest<R>, format: ExportFormat) -> ExportOutcome
    where
        R: Send + Sync + 'static,
    {
        let Some(guard) = self.busy.try_acquire() else {
            tracing::debug!(format = %format, "Export already in progress, trigger ignored");
            return ExportOutcome::Busy;
        };

        crate::log_export_start!(format, request.file_base_name());
        let start_time = Instant::now();

        let result = AssertUnwindSafe(self.run(request, format, &guard, start_time))
            .catch_unwind()
            .await;

        let outcome = match result {
            Ok(Ok(Delivery::Delivered(report))) => {
                report.log_summary();
                ExportOutcome::Completed(report)
            }
            Ok(Ok(Delivery::Refused)) => {
                tracing::info!(format = %format, "Print surface refused to open, export cancelled");
                ExportOutcome::Cancelled
            }
            Ok(Err(error)) => self.report_failure(format, error),
            Err(panic) => {
                let message = panic_message(panic.as_ref());
                let error = match guard.state() {
                    ExportState::Encoding => CodecError::Aborted {
                        format: format.to_string(),
                        message,
                    }
                    .into(),
                    _ => TabexError::Other(format!("Row resolution aborted: {message}")),
                };
                self.report_failure(format, error)
            }
        };

        drop(guard);
        outcome
    }

    async fn run<R>(
        &self,
        request: &ExportRequest<R>,
        format: ExportFormat,
        guard: &BusyGuard<'_>,
        start_time: Instant,
    ) -> Result<Delivery>
    where
        R: Send + Sync + 'static,
    {
        let resolved: Vec<R>;
        let mut truncated = false;
        let rows: &[R] = match request.rows() {
            RowSource::Loaded(rows) => rows,
            RowSource::Bulk(source) => {
                let resolution = self.resolver.resolve(source.as_ref()).await?;
                truncated = resolution.stop_reason == StopReason::CapReached;
                resolved = resolution.rows;
                &resolved
            }
        };

        guard.advance(ExportState::Encoding);

        let table = project(rows, request.columns());
        let stem = build_file_name(request.file_base_name());

        let bytes = match format {
            ExportFormat::Csv => encode_csv(&table, self.settings.delimiter),
            ExportFormat::Xlsx => {
                let codec = self.codecs.workbook().await?;
                encode_workbook(codec.as_ref(), &table, &self.settings.sheet_name)?
            }
            ExportFormat::Pdf => {
                let codec = self.codecs.document().await?;
                encode_document(
                    codec.as_ref(),
                    &table,
                    request.title(),
                    &self.settings.document,
                )?
            }
            ExportFormat::Print => {
                let html = render_printable(&table, request.title());
                let byte_count = html.len();
                return match self.surface.open(&stem, &html).await? {
                    SurfaceStatus::Opened => Ok(Delivery::Delivered(ExportReport {
                        format,
                        file_name: stem,
                        row_count: table.row_count(),
                        byte_count,
                        truncated,
                        duration: start_time.elapsed(),
                    })),
                    SurfaceStatus::Refused => Ok(Delivery::Refused),
                };
            }
        };

        let file_name = match format.extension() {
            Some(extension) => format!("{stem}.{extension}"),
            None => stem,
        };
        let byte_count = bytes.len();
        self.downloads
            .save(&file_name, format.mime_type(), bytes)
            .await?;

        Ok(Delivery::Delivered(ExportReport {
            format,
            file_name,
            row_count: table.row_count(),
            byte_count,
            truncated,
            duration: start_time.elapsed(),
        }))
    }

    fn report_failure(&self, format: ExportFormat, error: TabexError) -> ExportOutcome {
        tracing::error!(format = %format, error = %error, "Export failed");
        self.notifier.export_failed(format, &error);
        ExportOutcome::Failed(error.to_string())
    }
}

fn panic_message(panic: &(dyn Any + Send)) -> String {
    if let Some(message) = panic.downcast_ref::<&str>() {
        (*message).to_string()
    } else if let Some(message) = panic.downcast_ref::<String>() {
        message.clone()
    } else {
        "unknown panic".to_string()
    }
}
