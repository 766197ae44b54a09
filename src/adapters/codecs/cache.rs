//! Load-once codec cache
//!
//! Each format is loaded at most once per cache. A failed load leaves the slot
//! empty, so the next export of that format tries again.

use super::{CodecLoader, DefaultCodecLoader};
use crate::core::encode::{DocumentCodec, WorkbookCodec};
use crate::domain::{Result, TabexError};
use std::sync::Arc;
use std::time::Instant;
use tokio::sync::OnceCell;

/// Lazily loaded workbook and document codecs
pub struct CodecCache {
    loader: Arc<dyn CodecLoader>,
    workbook: OnceCell<Arc<dyn WorkbookCodec>>,
    document: OnceCell<Arc<dyn DocumentCodec>>,
}

impl CodecCache {
    /// Create a cache over the given loader
    pub fn new(loader: Arc<dyn CodecLoader>) -> Self {
        Self {
            loader,
            workbook: OnceCell::new(),
            document: OnceCell::new(),
        }
    }

    /// Workbook codec, loaded on first use
    pub async fn workbook(&self) -> Result<Arc<dyn WorkbookCodec>> {
        self.workbook
            .get_or_try_init(|| async {
                let start = Instant::now();
                let codec = self.loader.load_workbook().await?;
                tracing::info!(
                    codec = "xlsx",
                    duration_ms = start.elapsed().as_millis(),
                    "Codec loaded"
                );
                Ok::<_, TabexError>(codec)
            })
            .await
            .map(Arc::clone)
    }

    /// Document codec, loaded on first use
    pub async fn document(&self) -> Result<Arc<dyn DocumentCodec>> {
        self.document
            .get_or_try_init(|| async {
                let start = Instant::now();
                let codec = self.loader.load_document().await?;
                tracing::info!(
                    codec = "pdf",
                    duration_ms = start.elapsed().as_millis(),
                    "Codec loaded"
                );
                Ok::<_, TabexError>(codec)
            })
            .await
            .map(Arc::clone)
    }

    /// Whether the workbook codec is loaded
    pub fn is_workbook_loaded(&self) -> bool {
        self.workbook.initialized()
    }

    /// Whether the document codec is loaded
    pub fn is_document_loaded(&self) -> bool {
        self.document.initialized()
    }
}

impl Default for CodecCache {
    fn default() -> Self {
        Self::new(Arc::new(DefaultCodecLoader))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::encode::document::DocumentLayout;
    use crate::core::projection::ProjectedTable;
    use crate::domain::CodecError;
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct NullWorkbook;

    impl WorkbookCodec for NullWorkbook {
        fn encode(&self, _table: &ProjectedTable, _sheet_name: &str) -> Result<Vec<u8>> {
            Ok(Vec::new())
        }
    }

    #[derive(Default)]
    struct CountingLoader {
        workbook_loads: AtomicUsize,
        document_loads: AtomicUsize,
    }

    #[async_trait]
    impl CodecLoader for CountingLoader {
        async fn load_workbook(&self) -> Result<Arc<dyn WorkbookCodec>> {
            self.workbook_loads.fetch_add(1, Ordering::SeqCst);
            Ok(Arc::new(NullWorkbook))
        }

        async fn load_document(&self) -> Result<Arc<dyn DocumentCodec>> {
            let attempt = self.document_loads.fetch_add(1, Ordering::SeqCst);
            if attempt == 0 {
                return Err(CodecError::load("pdf", "network unavailable").into());
            }
            Ok(Arc::new(NullDocument))
        }
    }

    struct NullDocument;

    impl DocumentCodec for NullDocument {
        fn render(&self, _layout: &DocumentLayout) -> Result<Vec<u8>> {
            Ok(Vec::new())
        }
    }

    #[tokio::test]
    async fn test_workbook_loaded_once() {
        let loader = Arc::new(CountingLoader::default());
        let cache = CodecCache::new(loader.clone());
        assert!(!cache.is_workbook_loaded());

        cache.workbook().await.unwrap();
        cache.workbook().await.unwrap();

        assert!(cache.is_workbook_loaded());
        assert_eq!(loader.workbook_loads.load(Ordering::SeqCst), 1);
        assert_eq!(loader.document_loads.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_failed_load_is_retried() {
        let loader = Arc::new(CountingLoader::default());
        let cache = CodecCache::new(loader.clone());

        let err = cache.document().await.err().unwrap();
        assert!(matches!(err, TabexError::Codec(CodecError::LoadFailed { .. })));
        assert!(!cache.is_document_loaded());

        cache.document().await.unwrap();
        assert!(cache.is_document_loaded());
        assert_eq!(loader.document_loads.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_default_loader_provides_both_codecs() {
        let cache = CodecCache::default();
        assert!(cache.workbook().await.is_ok());
        assert!(cache.document().await.is_ok());
    }
}
