//! Workbook encoder
//!
//! Writes the header row followed by the value rows into a single named sheet.
//! The actual spreadsheet codec is an external collaborator obtained through
//! [`crate::adapters::codecs::CodecCache`], so this module only fixes the
//! contract and the sheet naming rules.

use crate::core::projection::ProjectedTable;
use crate::domain::Result;

/// Default sheet name
pub const DEFAULT_SHEET_NAME: &str = "Export";

/// Maximum sheet name length accepted by spreadsheet applications
pub const MAX_SHEET_NAME_LEN: usize = 31;

const FORBIDDEN_SHEET_CHARS: [char; 7] = ['[', ']', ':', '*', '?', '/', '\\'];

/// Spreadsheet codec
pub trait WorkbookCodec: Send + Sync {
    /// Serializes the table into a single-sheet workbook
    ///
    /// # Errors
    ///
    /// Returns a codec error if the workbook cannot be produced.
    fn encode(&self, table: &ProjectedTable, sheet_name: &str) -> Result<Vec<u8>>;
}

/// Encodes a table as a workbook with a sanitized sheet name
pub fn encode_workbook(
    codec: &dyn WorkbookCodec,
    table: &ProjectedTable,
    sheet_name: &str,
) -> Result<Vec<u8>> {
    let sheet_name = sanitize_sheet_name(sheet_name);
    tracing::debug!(
        sheet_name = %sheet_name,
        rows = table.row_count(),
        columns = table.column_count(),
        "Encoding workbook"
    );
    codec.encode(table, &sheet_name)
}

/// Makes a sheet name acceptable to spreadsheet applications
///
/// Forbidden characters become hyphens, surrounding apostrophes and whitespace
/// are trimmed and the result is cut to 31 characters. An empty result falls
/// back to [`DEFAULT_SHEET_NAME`].
pub fn sanitize_sheet_name(name: &str) -> String {
    let replaced: String = name
        .chars()
        .map(|c| if FORBIDDEN_SHEET_CHARS.contains(&c) { '-' } else { c })
        .collect();

    let trimmed: String = replaced
        .trim_matches(|c: char| c == '\'' || c.is_whitespace())
        .chars()
        .take(MAX_SHEET_NAME_LEN)
        .collect();
    let trimmed = trimmed.trim_end();

    if trimmed.is_empty() {
        DEFAULT_SHEET_NAME.to_string()
    } else {
        trimmed.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    struct RecordingCodec {
        sheet_names: Mutex<Vec<String>>,
    }

    impl WorkbookCodec for RecordingCodec {
        fn encode(&self, table: &ProjectedTable, sheet_name: &str) -> Result<Vec<u8>> {
            self.sheet_names.lock().unwrap().push(sheet_name.to_string());
            Ok(vec![table.row_count() as u8])
        }
    }

    #[test]
    fn test_sanitize_sheet_name() {
        assert_eq!(sanitize_sheet_name("Payroll 2024"), "Payroll 2024");
        assert_eq!(sanitize_sheet_name("Q1/Q2: [draft]"), "Q1-Q2- -draft-");
        assert_eq!(sanitize_sheet_name("   "), "Export");
        assert_eq!(sanitize_sheet_name("'quoted'"), "quoted");
        assert_eq!(
            sanitize_sheet_name("A very long sheet name that keeps going"),
            "A very long sheet name that kee"
        );
        assert_eq!(sanitize_sheet_name(&"x".repeat(40)).len(), MAX_SHEET_NAME_LEN);
    }

    #[test]
    fn test_encode_workbook_passes_sanitized_name() {
        let codec = RecordingCodec {
            sheet_names: Mutex::new(Vec::new()),
        };
        let table = ProjectedTable {
            headers: vec!["A".to_string()],
            values: vec![vec![], vec![]],
        };
        let bytes = encode_workbook(&codec, &table, "a*b").unwrap();
        assert_eq!(bytes, vec![2]);
        assert_eq!(*codec.sheet_names.lock().unwrap(), vec!["a-b".to_string()]);
    }
}
