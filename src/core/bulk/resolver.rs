//! Bulk row resolution over a paginated source
//!
//! The resolver walks pages in increasing order and stops at the reported page
//! count or at the row cap, whichever comes first. Tripping the cap is not an
//! error: the caller receives a partial, best-effort dataset.

use super::source::{PageRequest, PageSource};
use crate::domain::Result;
use std::time::Instant;

/// Default number of rows requested per page
pub const DEFAULT_PAGE_SIZE: u32 = 200;

/// Default ceiling on the number of rows a bulk resolve may accumulate
pub const DEFAULT_MAX_ROWS: usize = 10_000;

/// Configuration for bulk resolution
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BulkConfig {
    /// Rows requested per page
    pub page_size: u32,
    /// Row cap
    pub max_rows: usize,
}

impl BulkConfig {
    /// Create a new bulk configuration
    pub fn new(page_size: u32, max_rows: usize) -> Self {
        Self {
            page_size,
            max_rows,
        }
    }
}

impl Default for BulkConfig {
    fn default() -> Self {
        Self::new(DEFAULT_PAGE_SIZE, DEFAULT_MAX_ROWS)
    }
}

/// Position of a bulk resolve within the remote collection
///
/// Created per resolve call, advanced monotonically, discarded afterwards.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PaginationCursor {
    /// Page about to be fetched (one-based)
    pub page: u32,
    /// Rows requested per page
    pub page_size: u32,
    /// Page count reported by the last fetched page
    pub total_pages: u32,
    /// Rows accumulated so far
    pub accumulated_count: usize,
}

impl PaginationCursor {
    fn new(page_size: u32) -> Self {
        Self {
            page: 1,
            page_size,
            total_pages: 0,
            accumulated_count: 0,
        }
    }

    fn request(&self) -> PageRequest {
        PageRequest::new(self.page, self.page_size)
    }

    fn advance(&mut self) {
        self.page += 1;
    }
}

/// Why a bulk resolve stopped
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StopReason {
    /// The last reported page was fetched
    LastPage,
    /// The row cap was reached before the last page
    CapReached,
    /// A page came back empty
    EmptyPage,
}

/// Rows assembled by a bulk resolve, with walk statistics
#[derive(Debug, Clone)]
pub struct Resolution<R> {
    /// Accumulated rows, in source order
    pub rows: Vec<R>,
    /// Number of pages fetched
    pub pages_fetched: u32,
    /// Why the walk stopped
    pub stop_reason: StopReason,
}

impl<R> Resolution<R> {
    /// Returns true if the cap cut the walk short
    pub fn is_truncated(&self) -> bool {
        self.stop_reason == StopReason::CapReached
    }
}

/// Walks a paginated source to assemble a bounded superset of rows
#[derive(Debug, Clone, Default)]
pub struct BulkResolver {
    config: BulkConfig,
}

impl BulkResolver {
    /// Create a resolver with the given configuration
    pub fn new(config: BulkConfig) -> Self {
        Self { config }
    }

    /// Returns the resolver configuration
    pub fn config(&self) -> &BulkConfig {
        &self.config
    }

    /// Resolves all rows of the source, up to the row cap
    ///
    /// # Errors
    ///
    /// Returns the first page fetch error; rows accumulated before the failure
    /// are discarded.
    pub async fn resolve_all<R>(&self, source: &dyn PageSource<R>) -> Result<Vec<R>> {
        Ok(self.resolve(source).await?.rows)
    }

    /// Resolves all rows and reports how the walk ended
    pub async fn resolve<R>(&self, source: &dyn PageSource<R>) -> Result<Resolution<R>> {
        let start_time = Instant::now();
        let max_rows = self.config.max_rows;
        let mut cursor = PaginationCursor::new(self.config.page_size.max(1));
        let mut rows: Vec<R> = Vec::new();
        let mut pages_fetched = 0;

        tracing::debug!(
            page_size = cursor.page_size,
            max_rows = max_rows,
            "Starting bulk resolve"
        );

        let stop_reason = loop {
            let page = source.fetch_page(cursor.request()).await?;
            pages_fetched += 1;
            cursor.total_pages = page.total_pages;

            let fetched = page.items.len();
            rows.extend(page.items);
            cursor.accumulated_count = rows.len();

            crate::log_page_fetched!(cursor.page, cursor.total_pages, fetched, rows.len());

            let more_pages = cursor.page < cursor.total_pages;
            if rows.len() > max_rows || (rows.len() == max_rows && more_pages) {
                break StopReason::CapReached;
            }
            if !more_pages {
                break StopReason::LastPage;
            }
            if fetched == 0 {
                break StopReason::EmptyPage;
            }

            cursor.advance();
        };

        if stop_reason == StopReason::CapReached {
            rows.truncate(max_rows);
            tracing::warn!(
                max_rows = max_rows,
                pages_fetched = pages_fetched,
                total_pages = cursor.total_pages,
                "Row cap reached, export will be partial"
            );
        }

        tracing::info!(
            rows = rows.len(),
            pages_fetched = pages_fetched,
            stop_reason = ?stop_reason,
            duration_ms = start_time.elapsed().as_millis(),
            "Bulk resolve completed"
        );

        Ok(Resolution {
            rows,
            pages_fetched,
            stop_reason,
        })
    }
}
