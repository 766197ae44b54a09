//! Paginated row sources
//!
//! A [`PageSource`] serves one page of a remote collection at a time. The bulk
//! resolver is agnostic about the row type; it only relies on the page items
//! and the reported page count.

use crate::domain::Result;
use async_trait::async_trait;
use std::future::Future;

/// Request for a single page
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    /// One-based page number
    pub page: u32,
    /// Requested page size
    pub limit: u32,
}

impl PageRequest {
    /// Creates a page request
    pub fn new(page: u32, limit: u32) -> Self {
        Self { page, limit }
    }
}

/// One page of rows as returned by a paginated source
#[derive(Debug, Clone, PartialEq)]
pub struct Page<R> {
    /// Rows on this page
    pub items: Vec<R>,
    /// Total number of pages reported by the source
    pub total_pages: u32,
    /// Total number of rows reported by the source, if known
    pub total: Option<u64>,
}

impl<R> Page<R> {
    /// Creates a page with the given items and total page count
    pub fn new(items: Vec<R>, total_pages: u32) -> Self {
        Self {
            items,
            total_pages,
            total: None,
        }
    }

    /// Sets the total row count reported by the source
    pub fn with_total(mut self, total: u64) -> Self {
        self.total = Some(total);
        self
    }
}

/// A remote collection that can be walked page by page
#[async_trait]
pub trait PageSource<R>: Send + Sync {
    /// Fetches a single page
    ///
    /// # Errors
    ///
    /// Returns an error if the page cannot be fetched; the bulk resolver then
    /// abandons the whole resolution.
    async fn fetch_page(&self, request: PageRequest) -> Result<Page<R>>;
}

/// Adapts an async closure into a [`PageSource`]
///
/// # Examples
///
/// ```
/// use tabex::core::bulk::{FnPageSource, Page, PageRequest, PageSource};
///
/// # async fn example() -> tabex::domain::Result<()> {
/// let source = FnPageSource::new(|request: PageRequest| async move {
///     Ok::<_, tabex::domain::TabexError>(Page::new(vec![request.page], 3))
/// });
/// let page = source.fetch_page(PageRequest::new(2, 200)).await?;
/// assert_eq!(page.items, vec![2]);
/// # Ok(())
/// # }
/// ```
pub struct FnPageSource<F> {
    fetch: F,
}

impl<F> FnPageSource<F> {
    /// Wraps the closure
    pub fn new(fetch: F) -> Self {
        Self { fetch }
    }
}

#[async_trait]
impl<R, F, Fut> PageSource<R> for FnPageSource<F>
where
    R: Send + 'static,
    F: Fn(PageRequest) -> Fut + Send + Sync,
    Fut: Future<Output = Result<Page<R>>> + Send,
{
    async fn fetch_page(&self, request: PageRequest) -> Result<Page<R>> {
        (self.fetch)(request).await
    }
}
