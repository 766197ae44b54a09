//! Integrations with the outside world.
//!
//! - [`codecs`] - Lazily loaded workbook and document codecs
//! - [`delivery`] - Download sink and print surface ports with local implementations
//! - [`http`] - Paginated list API row source
//! - [`notify`] - Failure notification port
//!
//! The core depends only on the traits defined here, so tests and embedding
//! hosts can substitute their own implementations.

pub mod codecs;
pub mod delivery;
pub mod http;
pub mod notify;
