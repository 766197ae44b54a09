//! Export outcomes
//!
//! Every export call ends in exactly one [`ExportOutcome`]. Failures have
//! already been reported through the notification port by the time the host
//! sees the outcome.

use crate::domain::ExportFormat;
use std::time::Duration;

/// Report of a completed export
#[derive(Debug, Clone, PartialEq)]
pub struct ExportReport {
    /// Produced format
    pub format: ExportFormat,
    /// Delivered file name, extension included (the print view has none)
    pub file_name: String,
    /// Number of exported rows
    pub row_count: usize,
    /// Size of the delivered payload in bytes
    pub byte_count: usize,
    /// Whether the bulk resolver stopped at the row cap
    pub truncated: bool,
    /// Wall-clock duration of the export
    pub duration: Duration,
}

impl ExportReport {
    /// Log the report
    pub fn log_summary(&self) {
        crate::log_export_complete!(self.format, self.row_count, self.duration);
        tracing::debug!(
            file_name = %self.file_name,
            bytes = self.byte_count,
            truncated = self.truncated,
            "Export delivered"
        );
    }
}

/// Result of one export trigger
#[derive(Debug, Clone, PartialEq)]
pub enum ExportOutcome {
    /// The export was produced and delivered
    Completed(ExportReport),
    /// The print surface refused to open; nothing was reported
    Cancelled,
    /// Another export was in flight; the trigger had no effect
    Busy,
    /// The export failed and a notification was sent
    Failed(String),
}

impl ExportOutcome {
    /// Whether the export was delivered
    pub fn is_completed(&self) -> bool {
        matches!(self, ExportOutcome::Completed(_))
    }

    /// Report of a completed export
    pub fn report(&self) -> Option<&ExportReport> {
        match self {
            ExportOutcome::Completed(report) => Some(report),
            _ => None,
        }
    }
}
