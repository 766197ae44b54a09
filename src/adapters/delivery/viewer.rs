//! Print surface backed by the platform's default viewer
//!
//! The print view is written to a temporary HTML file and handed to the
//! system opener (`xdg-open`, `open` or `start`). When no opener can be
//! launched the surface reports a refusal.

use super::{PrintSurface, SurfaceStatus};
use crate::domain::{Result, TabexError};
use async_trait::async_trait;
use std::path::PathBuf;
use tokio::process::Command;

/// Opens print views in the default viewer
#[derive(Debug, Clone)]
pub struct SystemViewer {
    scratch_dir: PathBuf,
    opener: Option<Vec<String>>,
}

impl SystemViewer {
    /// Create a viewer writing into the system temporary directory
    pub fn new() -> Self {
        Self {
            scratch_dir: std::env::temp_dir().join("tabex"),
            opener: default_opener(),
        }
    }

    /// Use a different scratch directory
    pub fn with_scratch_dir(mut self, scratch_dir: impl Into<PathBuf>) -> Self {
        self.scratch_dir = scratch_dir.into();
        self
    }

    /// Use an explicit opener command; the file path is appended as the last argument
    pub fn with_opener(mut self, command: Vec<String>) -> Self {
        self.opener = if command.is_empty() { None } else { Some(command) };
        self
    }
}

impl Default for SystemViewer {
    fn default() -> Self {
        Self::new()
    }
}

fn default_opener() -> Option<Vec<String>> {
    let command: &[&str] = if cfg!(target_os = "macos") {
        &["open"]
    } else if cfg!(target_os = "windows") {
        &["cmd", "/C", "start", ""]
    } else if cfg!(unix) {
        &["xdg-open"]
    } else {
        return None;
    };
    Some(command.iter().map(|s| s.to_string()).collect())
}

#[async_trait]
impl PrintSurface for SystemViewer {
    async fn open(&self, name: &str, html: &str) -> Result<SurfaceStatus> {
        let Some((program, args)) = self.opener.as_ref().and_then(|c| c.split_first()) else {
            tracing::warn!("No viewer available for the print view");
            return Ok(SurfaceStatus::Refused);
        };

        tokio::fs::create_dir_all(&self.scratch_dir)
            .await
            .map_err(|e| TabexError::Delivery(format!("Failed to prepare print view: {e}")))?;
        let path = self.scratch_dir.join(format!("{name}.html"));
        tokio::fs::write(&path, html)
            .await
            .map_err(|e| TabexError::Delivery(format!("Failed to write print view: {e}")))?;

        let status = Command::new(program).args(args).arg(&path).status().await;
        match status {
            Ok(status) if status.success() => {
                tracing::info!(path = %path.display(), "Print view opened");
                Ok(SurfaceStatus::Opened)
            }
            Ok(status) => {
                tracing::warn!(
                    path = %path.display(),
                    code = ?status.code(),
                    "Viewer refused the print view"
                );
                Ok(SurfaceStatus::Refused)
            }
            Err(e) => {
                tracing::warn!(program = %program, error = %e, "Failed to launch viewer");
                Ok(SurfaceStatus::Refused)
            }
        }
    }
}
