//! HTTP row source
//!
//! Serves pages of a remote list endpoint to the bulk resolver. The endpoint
//! takes `page` and `limit` query parameters and answers with a
//! [`ListResponse`].

pub mod client;
pub mod models;

pub use client::HttpPageSource;
pub use models::{ListResponse, PaginationInfo};
