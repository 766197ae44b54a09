//! Format codecs
//!
//! The workbook and document formats need a third-party codec. Codecs are
//! acquired through a [`CodecLoader`] the first time a format is requested
//! and then reused by the [`CodecCache`].

pub mod cache;
pub mod pdf;
pub mod xlsx;

pub use cache::CodecCache;
pub use pdf::PdfCodec;
pub use xlsx::XlsxCodec;

use crate::core::encode::{DocumentCodec, WorkbookCodec};
use crate::domain::Result;
use async_trait::async_trait;
use std::sync::Arc;

/// Acquires format codecs on demand
#[async_trait]
pub trait CodecLoader: Send + Sync {
    /// Loads the spreadsheet codec
    async fn load_workbook(&self) -> Result<Arc<dyn WorkbookCodec>>;

    /// Loads the paginated document codec
    async fn load_document(&self) -> Result<Arc<dyn DocumentCodec>>;
}

/// Loader for the built-in codecs
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultCodecLoader;

#[async_trait]
impl CodecLoader for DefaultCodecLoader {
    async fn load_workbook(&self) -> Result<Arc<dyn WorkbookCodec>> {
        Ok(Arc::new(XlsxCodec::new()))
    }

    async fn load_document(&self) -> Result<Arc<dyn DocumentCodec>> {
        Ok(Arc::new(PdfCodec::new()))
    }
}
