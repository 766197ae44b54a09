//! Projection of domain rows into a format-independent table
//!
//! Every encoder consumes a [`ProjectedTable`], so column order and value
//! normalization live in exactly one place.

use crate::domain::{CellValue, ColumnDescriptor};

/// Header vector plus value matrix shared by all encoders
///
/// Every row in `values` has exactly `headers.len()` entries, in
/// column-descriptor order.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ProjectedTable {
    /// Column headers
    pub headers: Vec<String>,
    /// Projected values, one vector per row
    pub values: Vec<Vec<CellValue>>,
}

impl ProjectedTable {
    /// Number of columns
    pub fn column_count(&self) -> usize {
        self.headers.len()
    }

    /// Number of data rows (header excluded)
    pub fn row_count(&self) -> usize {
        self.values.len()
    }

    /// Returns true if the table has no data rows
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Iterates over the rows as display strings
    pub fn string_rows(&self) -> impl Iterator<Item = Vec<String>> + '_ {
        self.values
            .iter()
            .map(|row| row.iter().map(CellValue::to_display_string).collect())
    }
}

/// Projects rows through a set of column descriptors
///
/// An empty row collection yields a table with headers and no values.
///
/// # Examples
///
/// ```
/// use tabex::core::projection::project;
/// use tabex::domain::{CellValue, ColumnDescriptor};
///
/// let columns =
///     vec![ColumnDescriptor::new("n", |r: &Option<String>| r.clone().into()).with_label("Name")];
/// let table = project(&[Some("A,B".to_string()), None], &columns);
///
/// assert_eq!(table.headers, vec!["Name"]);
/// assert_eq!(table.values[1][0], CellValue::Empty);
/// ```
pub fn project<R>(rows: &[R], columns: &[ColumnDescriptor<R>]) -> ProjectedTable {
    let headers = columns
        .iter()
        .map(|column| column.header().to_string())
        .collect();

    let values = rows
        .iter()
        .map(|row| {
            columns
                .iter()
                .map(|column| column.display_value(row))
                .collect()
        })
        .collect();

    ProjectedTable { headers, values }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Clone)]
    struct Employee {
        name: Option<String>,
        salary: f64,
        active: bool,
    }

    fn columns() -> Vec<ColumnDescriptor<Employee>> {
        vec![
            ColumnDescriptor::new("name", |e: &Employee| e.name.clone().into()).with_label("Name"),
            ColumnDescriptor::new("salary", |e: &Employee| e.salary.into()).with_formatter(
                |raw, _| match raw {
                    CellValue::Number(n) => CellValue::Text(format!("{n:.2}")),
                    other => other.clone(),
                },
            ),
            ColumnDescriptor::new("active", |e: &Employee| e.active.into()).with_label("Active"),
        ]
    }

    fn employee(name: Option<&str>, salary: f64) -> Employee {
        Employee {
            name: name.map(str::to_string),
            salary,
            active: true,
        }
    }

    #[test]
    fn test_headers_use_label_then_key() {
        let table = project::<Employee>(&[], &columns());
        assert_eq!(table.headers, vec!["Name", "salary", "Active"]);
        assert!(table.is_empty());
    }

    #[test]
    fn test_shape_invariant() {
        let rows: Vec<Employee> = (0..17)
            .map(|i| employee(Some("x"), f64::from(i)))
            .collect();
        let cols = columns();
        let table = project(&rows, &cols);

        assert_eq!(table.row_count(), rows.len());
        assert!(table.values.iter().all(|row| row.len() == cols.len()));
    }

    #[test]
    fn test_formatter_and_null_normalization() {
        let table = project(&[employee(None, 1234.5)], &columns());
        assert_eq!(table.values[0][0], CellValue::Empty);
        assert_eq!(table.values[0][1], CellValue::from("1234.50"));
        assert_eq!(table.values[0][2], CellValue::Bool(true));

        let strings: Vec<Vec<String>> = table.string_rows().collect();
        assert_eq!(strings[0], vec!["", "1234.50", "true"]);
    }

    #[test]
    fn test_projection_is_repeatable() {
        let rows = vec![employee(Some("Ada"), 10.0), employee(Some("Bob"), 20.0)];
        let cols = columns();
        assert_eq!(project(&rows, &cols), project(&rows, &cols));
    }

    #[test]
    fn test_no_columns() {
        let rows = vec![employee(Some("Ada"), 10.0)];
        let table = project(&rows, &[]);
        assert_eq!(table.column_count(), 0);
        assert_eq!(table.values, vec![Vec::<CellValue>::new()]);
    }
}
