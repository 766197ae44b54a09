//! Delivery port traits

use crate::domain::Result;
use async_trait::async_trait;

/// Receives finished export files
#[async_trait]
pub trait DownloadSink: Send + Sync {
    /// Delivers one file
    ///
    /// # Errors
    ///
    /// Returns a delivery error if the file cannot be stored.
    async fn save(&self, file_name: &str, mime_type: &str, bytes: Vec<u8>) -> Result<()>;
}

/// Whether a print surface accepted the view
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SurfaceStatus {
    /// The view was opened
    Opened,
    /// The environment refused to open a surface
    Refused,
}

/// Shows a print view
#[async_trait]
pub trait PrintSurface: Send + Sync {
    /// Opens a self-printing HTML document
    ///
    /// A refusal is reported as [`SurfaceStatus::Refused`], not as an error.
    async fn open(&self, name: &str, html: &str) -> Result<SurfaceStatus>;
}
