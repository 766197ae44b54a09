//! Wire models of the paginated list API

use serde::{Deserialize, Serialize};

/// Body of one list response
///
/// ```json
/// { "items": [ ... ], "pagination": { "pages": 3, "total": 512 } }
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ListResponse<T> {
    /// Rows of the page
    #[serde(default = "Vec::new", alias = "data")]
    pub items: Vec<T>,

    /// Pagination metadata; a missing block reads as a single page
    #[serde(default)]
    pub pagination: PaginationInfo,
}

/// Pagination block of a list response
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaginationInfo {
    /// Total number of pages
    #[serde(default)]
    pub pages: u32,

    /// Total number of rows, when the server reports it
    #[serde(default)]
    pub total: Option<u64>,
}
