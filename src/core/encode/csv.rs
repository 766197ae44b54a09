//! Delimited-text encoder
//!
//! Produces UTF-8 text prefixed with a byte-order mark so spreadsheet
//! applications detect the encoding. Rows are joined with `\n`.

use crate::core::projection::ProjectedTable;

/// UTF-8 byte-order mark
pub const UTF8_BOM: &str = "\u{FEFF}";

/// Default field delimiter
pub const DEFAULT_DELIMITER: char = ',';

/// Encodes a projected table as delimited text
///
/// A field is quoted if and only if it contains the delimiter, a double quote
/// or a line break; embedded quotes are doubled. Never fails.
///
/// # Examples
///
/// ```
/// use tabex::core::encode::csv::encode_csv;
/// use tabex::core::projection::ProjectedTable;
/// use tabex::domain::CellValue;
///
/// let table = ProjectedTable {
///     headers: vec!["Name".to_string()],
///     values: vec![vec![CellValue::from("A,B")], vec![CellValue::Empty]],
/// };
/// assert_eq!(encode_csv(&table, ','), "\u{FEFF}Name\n\"A,B\"\n".as_bytes());
/// ```
pub fn encode_csv(table: &ProjectedTable, delimiter: char) -> Vec<u8> {
    let separator = delimiter.to_string();

    let mut lines = Vec::with_capacity(table.row_count() + 1);
    lines.push(encode_record(table.headers.iter().map(String::as_str), delimiter, &separator));
    for row in table.string_rows() {
        lines.push(encode_record(row.iter().map(String::as_str), delimiter, &separator));
    }

    let mut output = String::from(UTF8_BOM);
    output.push_str(&lines.join("\n"));
    output.into_bytes()
}

fn encode_record<'a>(
    fields: impl Iterator<Item = &'a str>,
    delimiter: char,
    separator: &str,
) -> String {
    fields
        .map(|field| escape_field(field, delimiter))
        .collect::<Vec<_>>()
        .join(separator)
}

/// Escapes a single field
pub fn escape_field(value: &str, delimiter: char) -> String {
    let needs_quotes = value
        .chars()
        .any(|c| c == delimiter || c == '"' || c == '\n' || c == '\r');

    if needs_quotes {
        format!("\"{}\"", value.replace('"', "\"\""))
    } else {
        value.to_string()
    }
}
