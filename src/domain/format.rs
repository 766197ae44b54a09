//! Output formats supported by the export engine

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Output format of one export action
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExportFormat {
    /// Delimited text
    Csv,
    /// Spreadsheet workbook
    Xlsx,
    /// Paginated print document
    Pdf,
    /// Print-ready HTML view
    Print,
}

impl ExportFormat {
    /// All formats, in menu order
    pub const ALL: [ExportFormat; 4] = [
        ExportFormat::Csv,
        ExportFormat::Xlsx,
        ExportFormat::Pdf,
        ExportFormat::Print,
    ];

    /// File extension for formats that produce a download
    pub fn extension(&self) -> Option<&'static str> {
        match self {
            ExportFormat::Csv => Some("csv"),
            ExportFormat::Xlsx => Some("xlsx"),
            ExportFormat::Pdf => Some("pdf"),
            ExportFormat::Print => None,
        }
    }

    /// MIME type of the produced artifact
    pub fn mime_type(&self) -> &'static str {
        match self {
            ExportFormat::Csv => "text/csv;charset=utf-8",
            ExportFormat::Xlsx => {
                "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet"
            }
            ExportFormat::Pdf => "application/pdf",
            ExportFormat::Print => "text/html;charset=utf-8",
        }
    }

    /// Returns the lowercase name of the format
    pub fn as_str(&self) -> &'static str {
        match self {
            ExportFormat::Csv => "csv",
            ExportFormat::Xlsx => "xlsx",
            ExportFormat::Pdf => "pdf",
            ExportFormat::Print => "print",
        }
    }
}

impl fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ExportFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "csv" => Ok(ExportFormat::Csv),
            "xlsx" | "excel" | "workbook" => Ok(ExportFormat::Xlsx),
            "pdf" | "document" => Ok(ExportFormat::Pdf),
            "print" | "html" => Ok(ExportFormat::Print),
            other => Err(format!(
                "Unknown export format '{other}'. Must be one of: csv, xlsx, pdf, print"
            )),
        }
    }
}
