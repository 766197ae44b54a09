//! Failure notifications
//!
//! The orchestrator reports each failed export exactly once through a
//! [`NotificationPort`]. Hosts with a user interface route it to their own
//! notification area; the default implementation logs it.

use crate::domain::{ExportFormat, TabexError};

/// Receives user-facing failure notifications
pub trait NotificationPort: Send + Sync {
    /// Called once per failed export
    fn export_failed(&self, format: ExportFormat, error: &TabexError);
}

/// Logs notifications through `tracing`
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingNotifier;

impl NotificationPort for TracingNotifier {
    fn export_failed(&self, format: ExportFormat, error: &TabexError) {
        tracing::error!(
            format = %format,
            error = %error,
            "Export could not be completed"
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tracing_notifier_accepts_errors() {
        let notifier: &dyn NotificationPort = &TracingNotifier;
        notifier.export_failed(
            ExportFormat::Pdf,
            &TabexError::Delivery("disk full".to_string()),
        );
    }
}
