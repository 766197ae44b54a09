//! Output-directory download sink

use super::DownloadSink;
use crate::domain::{Result, TabexError};
use async_trait::async_trait;
use std::path::{Path, PathBuf};

/// Writes each delivered file into a directory
#[derive(Debug, Clone)]
pub struct DirectorySink {
    output_dir: PathBuf,
}

impl DirectorySink {
    /// Create a sink over the given directory; it is created on first save
    pub fn new(output_dir: impl Into<PathBuf>) -> Self {
        Self {
            output_dir: output_dir.into(),
        }
    }

    /// Target directory
    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    /// Path a file name is written to
    pub fn path_for(&self, file_name: &str) -> PathBuf {
        self.output_dir.join(file_name)
    }
}

#[async_trait]
impl DownloadSink for DirectorySink {
    async fn save(&self, file_name: &str, mime_type: &str, bytes: Vec<u8>) -> Result<()> {
        tokio::fs::create_dir_all(&self.output_dir)
            .await
            .map_err(|e| {
                TabexError::Delivery(format!(
                    "Failed to create output directory {}: {e}",
                    self.output_dir.display()
                ))
            })?;

        let path = self.path_for(file_name);
        let size = bytes.len();
        tokio::fs::write(&path, bytes).await.map_err(|e| {
            TabexError::Delivery(format!("Failed to write {}: {e}", path.display()))
        })?;

        tracing::info!(
            path = %path.display(),
            mime_type = mime_type,
            bytes = size,
            "Export file written"
        );
        Ok(())
    }
}
