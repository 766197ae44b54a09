//! Core export logic for Tabex.
//!
//! # Modules
//!
//! - [`projection`] - Column descriptors applied to rows
//! - [`bulk`] - Walking a paginated source under a row cap
//! - [`encode`] - The four output formats
//! - [`filename`] - Sanitized, timestamped file names
//! - [`columns`] - Configurable columns over JSON rows
//! - [`export`] - The export orchestrator
//!
//! # Export Workflow
//!
//! 1. **Resolve**: use the loaded rows, or walk the paginated source
//! 2. **Project**: turn rows into headers and a value matrix
//! 3. **Encode**: produce the requested format
//! 4. **Deliver**: save the file, or open the print view
//!
//! # Example
//!
//! ```rust
//! use tabex::core::encode::csv::encode_csv;
//! use tabex::core::projection::project;
//! use tabex::domain::{CellValue, ColumnDescriptor};
//!
//! let rows = vec![Some("A,B".to_string()), Some("B".to_string()), None];
//! let columns = vec![ColumnDescriptor::new("name", |row: &Option<String>| {
//!     CellValue::from(row.clone())
//! })
//! .with_label("Name")];
//!
//! let bytes = encode_csv(&project(&rows, &columns), ',');
//! assert_eq!(bytes, "\u{FEFF}Name\n\"A,B\"\nB\n".as_bytes());
//! ```

pub mod bulk;
pub mod columns;
pub mod encode;
pub mod export;
pub mod filename;
pub mod projection;
