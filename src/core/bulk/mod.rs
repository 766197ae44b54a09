//! Bulk row resolution
//!
//! When a host only holds one page of a remote collection, the bulk resolver
//! walks the paginated source to assemble the rows of an export:
//! - [`PageSource`] abstracts the paginated list endpoint
//! - [`BulkResolver`] walks pages in order under a row cap

pub mod resolver;
pub mod source;

pub use resolver::{
    BulkConfig, BulkResolver, PaginationCursor, Resolution, StopReason, DEFAULT_MAX_ROWS,
    DEFAULT_PAGE_SIZE,
};
pub use source::{FnPageSource, Page, PageRequest, PageSource};
