//! Column descriptors
//!
//! A [`ColumnDescriptor`] describes one output column: a stable key, an optional
//! display label, a value accessor and an optional formatter. Accessor and
//! formatter are fixed at construction time so every encoder sees the same
//! projection rules.

use super::value::CellValue;
use std::fmt;
use std::sync::Arc;

/// Extracts the raw value of a column from a row
pub type ValueAccessor<R> = Arc<dyn Fn(&R) -> CellValue + Send + Sync>;

/// Turns a raw value into its display value, with access to the whole row
pub type ValueFormatter<R> = Arc<dyn Fn(&CellValue, &R) -> CellValue + Send + Sync>;

/// Describes one output column
///
/// # Examples
///
/// ```
/// use tabex::domain::{CellValue, ColumnDescriptor};
///
/// struct Invoice {
///     number: String,
///     amount: f64,
/// }
///
/// let number = ColumnDescriptor::new("number", |inv: &Invoice| inv.number.as_str().into())
///     .with_label("Invoice #");
/// let amount = ColumnDescriptor::new("amount", |inv: &Invoice| inv.amount.into())
///     .with_formatter(|raw, _| match raw {
///         CellValue::Number(n) => CellValue::Text(format!("{n:.2}")),
///         other => other.clone(),
///     });
///
/// assert_eq!(number.header(), "Invoice #");
/// assert_eq!(amount.header(), "amount");
/// ```
pub struct ColumnDescriptor<R> {
    key: String,
    label: Option<String>,
    value_of: ValueAccessor<R>,
    format_of: Option<ValueFormatter<R>>,
}

impl<R> ColumnDescriptor<R> {
    /// Creates a column with the given key and value accessor
    pub fn new<F>(key: impl Into<String>, value_of: F) -> Self
    where
        F: Fn(&R) -> CellValue + Send + Sync + 'static,
    {
        Self {
            key: key.into(),
            label: None,
            value_of: Arc::new(value_of),
            format_of: None,
        }
    }

    /// Sets the display label
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    /// Sets the formatter applied to the raw value
    pub fn with_formatter<F>(mut self, format_of: F) -> Self
    where
        F: Fn(&CellValue, &R) -> CellValue + Send + Sync + 'static,
    {
        self.format_of = Some(Arc::new(format_of));
        self
    }

    /// Returns the column key
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Returns the label, if one was set
    pub fn label(&self) -> Option<&str> {
        self.label.as_deref()
    }

    /// Returns the header text: the label, falling back to the key
    pub fn header(&self) -> &str {
        self.label.as_deref().unwrap_or(&self.key)
    }

    /// Returns true if a formatter is attached
    pub fn has_formatter(&self) -> bool {
        self.format_of.is_some()
    }

    /// Computes the display value of this column for a row
    pub fn display_value(&self, row: &R) -> CellValue {
        let raw = (self.value_of)(row);
        match &self.format_of {
            Some(format_of) => format_of(&raw, row),
            None => raw,
        }
    }
}

impl<R> Clone for ColumnDescriptor<R> {
    fn clone(&self) -> Self {
        Self {
            key: self.key.clone(),
            label: self.label.clone(),
            value_of: Arc::clone(&self.value_of),
            format_of: self.format_of.clone(),
        }
    }
}

impl<R> fmt::Debug for ColumnDescriptor<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ColumnDescriptor")
            .field("key", &self.key)
            .field("label", &self.label)
            .field("has_formatter", &self.format_of.is_some())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Row {
        name: Option<String>,
        qty: i64,
    }

    #[test]
    fn test_header_falls_back_to_key() {
        let column = ColumnDescriptor::new("qty", |r: &Row| r.qty.into());
        assert_eq!(column.header(), "qty");
        assert!(column.label().is_none());

        let labelled = column.with_label("Quantity");
        assert_eq!(labelled.header(), "Quantity");
    }

    #[test]
    fn test_display_value_applies_formatter_with_row() {
        let column = ColumnDescriptor::new("qty", |r: &Row| r.qty.into()).with_formatter(
            |raw, row: &Row| CellValue::Text(format!("{raw} x {}", row.name.as_deref().unwrap_or("?"))),
        );
        let row = Row {
            name: Some("bolt".to_string()),
            qty: 4,
        };
        assert!(column.has_formatter());
        assert_eq!(column.display_value(&row), CellValue::from("4 x bolt"));
    }

    #[test]
    fn test_missing_value_is_empty() {
        let column = ColumnDescriptor::new("name", |r: &Row| r.name.clone().into());
        let row = Row { name: None, qty: 0 };
        assert_eq!(column.display_value(&row), CellValue::Empty);
    }

    #[test]
    fn test_debug_hides_closures() {
        let column = ColumnDescriptor::new("qty", |r: &Row| r.qty.into()).with_label("Qty");
        let debug = format!("{column:?}");
        assert!(debug.contains("qty"));
        assert!(debug.contains("has_formatter: false"));
    }
}
