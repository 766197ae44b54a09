//! Export requests
//!
//! An [`ExportRequest`] bundles everything one export action needs: the file
//! label, an optional title, the column set and where the rows come from.

use crate::core::bulk::PageSource;
use crate::domain::{ColumnDescriptor, Result, TabexError};
use std::collections::HashSet;
use std::fmt;
use std::sync::Arc;

/// Where the rows of an export come from
pub enum RowSource<R> {
    /// Rows already held by the caller
    Loaded(Vec<R>),
    /// A paginated remote collection walked by the bulk resolver
    Bulk(Arc<dyn PageSource<R>>),
}

impl<R> RowSource<R> {
    /// Whether rows are resolved through the bulk resolver
    pub fn is_bulk(&self) -> bool {
        matches!(self, RowSource::Bulk(_))
    }
}

impl<R> fmt::Debug for RowSource<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RowSource::Loaded(rows) => f.debug_tuple("Loaded").field(&rows.len()).finish(),
            RowSource::Bulk(_) => f.write_str("Bulk(..)"),
        }
    }
}

/// One export action
#[derive(Debug)]
pub struct ExportRequest<R> {
    file_base_name: String,
    title: Option<String>,
    columns: Vec<ColumnDescriptor<R>>,
    rows: RowSource<R>,
}

impl<R> ExportRequest<R> {
    /// Creates a request
    ///
    /// # Errors
    ///
    /// Returns a validation error when the column set is empty, when a key is
    /// blank or when two columns share a key.
    pub fn new(
        file_base_name: impl Into<String>,
        columns: Vec<ColumnDescriptor<R>>,
        rows: RowSource<R>,
    ) -> Result<Self> {
        validate_columns(&columns)?;
        Ok(Self {
            file_base_name: file_base_name.into(),
            title: None,
            columns,
            rows,
        })
    }

    /// Sets the title printed by the document and print formats
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        let title = title.into();
        self.title = if title.trim().is_empty() { None } else { Some(title) };
        self
    }

    /// Label used to build the file name
    pub fn file_base_name(&self) -> &str {
        &self.file_base_name
    }

    /// Optional title
    pub fn title(&self) -> Option<&str> {
        self.title.as_deref()
    }

    /// Column set in output order
    pub fn columns(&self) -> &[ColumnDescriptor<R>] {
        &self.columns
    }

    /// Row source
    pub fn rows(&self) -> &RowSource<R> {
        &self.rows
    }
}

fn validate_columns<R>(columns: &[ColumnDescriptor<R>]) -> Result<()> {
    if columns.is_empty() {
        return Err(TabexError::Validation(
            "An export needs at least one column".to_string(),
        ));
    }

    let mut seen = HashSet::with_capacity(columns.len());
    for column in columns {
        if column.key().trim().is_empty() {
            return Err(TabexError::Validation(
                "Column keys cannot be empty".to_string(),
            ));
        }
        if !seen.insert(column.key()) {
            return Err(TabexError::Validation(format!(
                "Duplicate column key '{}'",
                column.key()
            )));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::bulk::{FnPageSource, Page, PageRequest};
    use crate::domain::CellValue;

    fn column(key: &str) -> ColumnDescriptor<u32> {
        ColumnDescriptor::new(key, |n: &u32| CellValue::from(*n))
    }

    #[test]
    fn test_request_accessors() {
        let request = ExportRequest::new("Numbers", vec![column("n")], RowSource::Loaded(vec![1, 2]))
            .unwrap()
            .with_title("All numbers");

        assert_eq!(request.file_base_name(), "Numbers");
        assert_eq!(request.title(), Some("All numbers"));
        assert_eq!(request.columns().len(), 1);
        assert!(!request.rows().is_bulk());
    }

    #[test]
    fn test_blank_title_is_dropped() {
        let request = ExportRequest::new("x", vec![column("n")], RowSource::Loaded(vec![]))
            .unwrap()
            .with_title("  ");
        assert_eq!(request.title(), None);
    }

    #[test]
    fn test_rejects_empty_column_set() {
        let err = ExportRequest::<u32>::new("x", vec![], RowSource::Loaded(vec![])).unwrap_err();
        assert!(matches!(err, TabexError::Validation(_)));
    }

    #[test]
    fn test_rejects_duplicate_keys() {
        let err = ExportRequest::new(
            "x",
            vec![column("id"), column("name"), column("id")],
            RowSource::Loaded(vec![]),
        )
        .unwrap_err();
        assert!(err.to_string().contains("Duplicate column key 'id'"));
    }

    #[test]
    fn test_rejects_blank_key() {
        let err = ExportRequest::new("x", vec![column(" ")], RowSource::Loaded(vec![])).unwrap_err();
        assert!(matches!(err, TabexError::Validation(_)));
    }

    #[test]
    fn test_bulk_source() {
        let source = FnPageSource::new(|_request: PageRequest| async {
            Ok::<_, TabexError>(Page::new(vec![1_u32], 1))
        });
        let request =
            ExportRequest::new("x", vec![column("n")], RowSource::Bulk(Arc::new(source))).unwrap();
        assert!(request.rows().is_bulk());
        assert_eq!(format!("{:?}", request.rows()), "Bulk(..)");
    }
}
