//! Format encoders
//!
//! Each encoder consumes a [`ProjectedTable`](crate::core::projection::ProjectedTable)
//! and knows nothing about the others:
//! - [`csv`] delimited text with a byte-order mark
//! - [`workbook`] single-sheet spreadsheet through a [`WorkbookCodec`]
//! - [`document`] paginated document through a [`DocumentCodec`]
//! - [`print`] self-printing HTML view

pub mod csv;
pub mod document;
pub mod print;
pub mod workbook;

pub use csv::encode_csv;
pub use document::{encode_document, DocumentCodec, DocumentOptions, Orientation, PageFormat};
pub use print::render_printable;
pub use workbook::{encode_workbook, WorkbookCodec};
