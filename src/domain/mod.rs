//! Domain models and types for Tabex.
//!
//! The domain layer is the format-independent data contract of the export engine:
//!
//! - **Cell values** ([`CellValue`]) shared by every encoder
//! - **Column descriptors** ([`ColumnDescriptor`]) describing one output column
//! - **Output formats** ([`ExportFormat`])
//! - **Error types** ([`TabexError`], [`SourceError`], [`CodecError`])
//! - **Result type alias** ([`Result`])
//!
//! # Column descriptors
//!
//! ```rust
//! use tabex::domain::{CellValue, ColumnDescriptor};
//!
//! struct Employee {
//!     name: String,
//!     manager: Option<String>,
//! }
//!
//! let columns = vec![
//!     ColumnDescriptor::new("name", |e: &Employee| e.name.as_str().into()).with_label("Name"),
//!     ColumnDescriptor::new("manager", |e: &Employee| e.manager.clone().into())
//!         .with_label("Manager"),
//! ];
//!
//! let row = Employee { name: "Ada".to_string(), manager: None };
//! assert_eq!(columns[1].display_value(&row), CellValue::Empty);
//! ```

pub mod column;
pub mod context;
pub mod errors;
pub mod format;
pub mod result;
pub mod value;

// Re-export commonly used types for convenience
pub use column::{ColumnDescriptor, ValueAccessor, ValueFormatter};
pub use context::ResultExt;
pub use errors::{CodecError, SourceError, TabexError};
pub use format::ExportFormat;
pub use result::Result;
pub use value::CellValue;
