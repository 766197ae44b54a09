//! Integration tests for the export orchestrator
//!
//! Delivery, print surface and notifications are replaced by in-memory fakes
//! so every outcome can be observed.

use async_trait::async_trait;
use std::sync::{Arc, Mutex};
use tabex::adapters::codecs::{CodecCache, CodecLoader, PdfCodec};
use tabex::adapters::delivery::{DownloadSink, PrintSurface, SurfaceStatus};
use tabex::adapters::notify::NotificationPort;
use tabex::core::bulk::{BulkConfig, FnPageSource, Page, PageRequest};
use tabex::core::encode::{DocumentCodec, WorkbookCodec};
use tabex::core::export::{
    ExportOrchestrator, ExportOutcome, ExportRequest, ExportSettings, ExportState, RowSource,
};
use tabex::core::projection::ProjectedTable;
use tabex::domain::{
    CellValue, CodecError, ColumnDescriptor, ExportFormat, Result, SourceError, TabexError,
};
use tokio::sync::Notify;

#[derive(Default)]
struct MemorySink {
    files: Mutex<Vec<(String, String, Vec<u8>)>>,
}

#[async_trait]
impl DownloadSink for MemorySink {
    async fn save(&self, file_name: &str, mime_type: &str, bytes: Vec<u8>) -> Result<()> {
        self.files
            .lock()
            .unwrap()
            .push((file_name.to_string(), mime_type.to_string(), bytes));
        Ok(())
    }
}

struct FakeSurface {
    status: SurfaceStatus,
    opened: Mutex<Vec<String>>,
}

impl FakeSurface {
    fn new(status: SurfaceStatus) -> Self {
        Self {
            status,
            opened: Mutex::new(Vec::new()),
        }
    }
}

#[async_trait]
impl PrintSurface for FakeSurface {
    async fn open(&self, _name: &str, html: &str) -> Result<SurfaceStatus> {
        self.opened.lock().unwrap().push(html.to_string());
        Ok(self.status)
    }
}

#[derive(Default)]
struct RecordingNotifier {
    failures: Mutex<Vec<(ExportFormat, String)>>,
}

impl RecordingNotifier {
    fn count(&self) -> usize {
        self.failures.lock().unwrap().len()
    }
}

impl NotificationPort for RecordingNotifier {
    fn export_failed(&self, format: ExportFormat, error: &TabexError) {
        self.failures
            .lock()
            .unwrap()
            .push((format, error.to_string()));
    }
}

struct FailingWorkbook;

impl WorkbookCodec for FailingWorkbook {
    fn encode(&self, _table: &ProjectedTable, _sheet_name: &str) -> Result<Vec<u8>> {
        Err(CodecError::encode("xlsx", "cell limit exceeded").into())
    }
}

struct PanickingWorkbook;

impl WorkbookCodec for PanickingWorkbook {
    fn encode(&self, _table: &ProjectedTable, _sheet_name: &str) -> Result<Vec<u8>> {
        panic!("workbook writer exploded");
    }
}

enum WorkbookBehaviour {
    Fail,
    Panic,
    Unavailable,
}

struct FakeLoader {
    workbook: WorkbookBehaviour,
}

#[async_trait]
impl CodecLoader for FakeLoader {
    async fn load_workbook(&self) -> Result<Arc<dyn WorkbookCodec>> {
        match self.workbook {
            WorkbookBehaviour::Fail => Ok(Arc::new(FailingWorkbook)),
            WorkbookBehaviour::Panic => Ok(Arc::new(PanickingWorkbook)),
            WorkbookBehaviour::Unavailable => Err(CodecError::load("xlsx", "network down").into()),
        }
    }

    async fn load_document(&self) -> Result<Arc<dyn DocumentCodec>> {
        Ok(Arc::new(PdfCodec::new()))
    }
}

struct Harness {
    orchestrator: ExportOrchestrator,
    sink: Arc<MemorySink>,
    surface: Arc<FakeSurface>,
    notifier: Arc<RecordingNotifier>,
}

fn harness_with(codecs: CodecCache, surface_status: SurfaceStatus) -> Harness {
    let sink = Arc::new(MemorySink::default());
    let surface = Arc::new(FakeSurface::new(surface_status));
    let notifier = Arc::new(RecordingNotifier::default());
    let orchestrator = ExportOrchestrator::new(
        Arc::new(codecs),
        sink.clone(),
        surface.clone(),
        notifier.clone(),
    );
    Harness {
        orchestrator,
        sink,
        surface,
        notifier,
    }
}

fn harness() -> Harness {
    harness_with(CodecCache::default(), SurfaceStatus::Opened)
}

fn name_column() -> Vec<ColumnDescriptor<Option<String>>> {
    vec![ColumnDescriptor::new("name", |row: &Option<String>| {
        row.as_deref().map(CellValue::from).unwrap_or_default()
    })
    .with_label("Name")]
}

fn loaded(rows: Vec<Option<&str>>) -> ExportRequest<Option<String>> {
    let rows = rows.into_iter().map(|r| r.map(str::to_string)).collect();
    ExportRequest::new("Customers", name_column(), RowSource::Loaded(rows)).unwrap()
}

#[tokio::test]
async fn test_csv_end_to_end_bytes() {
    let h = harness();
    let outcome = h
        .orchestrator
        .export(&loaded(vec![Some("A,B"), None]), ExportFormat::Csv)
        .await;

    let report = outcome.report().expect("export should complete").clone();
    assert_eq!(report.row_count, 2);
    assert!(report.file_name.starts_with("Customers_"));
    assert!(report.file_name.ends_with(".csv"));

    let files = h.sink.files.lock().unwrap();
    assert_eq!(files.len(), 1);
    assert_eq!(files[0].1, "text/csv;charset=utf-8");
    assert_eq!(files[0].2, "\u{FEFF}Name\n\"A,B\"\n".as_bytes());
    assert_eq!(h.orchestrator.state(), ExportState::Idle);
    assert_eq!(h.notifier.count(), 0);
}

#[tokio::test]
async fn test_xlsx_and_pdf_are_delivered() {
    let h = harness();
    let request = loaded(vec![Some("Ada"), Some("Linus")]);

    assert!(h.orchestrator.export(&request, ExportFormat::Xlsx).await.is_completed());
    assert!(h.orchestrator.export(&request, ExportFormat::Pdf).await.is_completed());

    let files = h.sink.files.lock().unwrap();
    assert_eq!(files.len(), 2);
    assert!(files[0].0.ends_with(".xlsx"));
    assert_eq!(&files[0].2[..2], b"PK");
    assert!(files[1].0.ends_with(".pdf"));
    assert!(files[1].2.starts_with(b"%PDF-"));
}

#[tokio::test]
async fn test_print_view_opened() {
    let h = harness();
    let request = loaded(vec![Some("<b>x</b>")]).with_title("Report");

    let outcome = h.orchestrator.export(&request, ExportFormat::Print).await;
    assert!(outcome.is_completed());
    assert!(h.sink.files.lock().unwrap().is_empty());

    let opened = h.surface.opened.lock().unwrap();
    assert_eq!(opened.len(), 1);
    assert!(opened[0].contains("<h1>Report</h1>"));
    assert!(opened[0].contains("&lt;b&gt;x&lt;/b&gt;"));
}

#[tokio::test]
async fn test_refused_print_surface_is_silent() {
    let h = harness_with(CodecCache::default(), SurfaceStatus::Refused);

    let outcome = h
        .orchestrator
        .export(&loaded(vec![Some("Ada")]), ExportFormat::Print)
        .await;

    assert_eq!(outcome, ExportOutcome::Cancelled);
    assert_eq!(h.notifier.count(), 0);
    assert_eq!(h.orchestrator.state(), ExportState::Idle);
}

#[tokio::test]
async fn test_codec_error_releases_flag_and_notifies_once() {
    let loader = Arc::new(FakeLoader {
        workbook: WorkbookBehaviour::Fail,
    });
    let h = harness_with(CodecCache::new(loader), SurfaceStatus::Opened);

    let outcome = h
        .orchestrator
        .export(&loaded(vec![Some("Ada")]), ExportFormat::Xlsx)
        .await;

    assert!(matches!(outcome, ExportOutcome::Failed(ref m) if m.contains("cell limit exceeded")));
    assert_eq!(h.notifier.count(), 1);
    assert_eq!(h.notifier.failures.lock().unwrap()[0].0, ExportFormat::Xlsx);
    assert_eq!(h.orchestrator.state(), ExportState::Idle);
    assert!(h.sink.files.lock().unwrap().is_empty());
}

#[tokio::test]
async fn test_codec_panic_releases_flag_and_notifies_once() {
    let loader = Arc::new(FakeLoader {
        workbook: WorkbookBehaviour::Panic,
    });
    let h = harness_with(CodecCache::new(loader), SurfaceStatus::Opened);

    let outcome = h
        .orchestrator
        .export(&loaded(vec![Some("Ada")]), ExportFormat::Xlsx)
        .await;

    assert!(matches!(outcome, ExportOutcome::Failed(ref m) if m.contains("workbook writer exploded")));
    assert_eq!(h.notifier.count(), 1);
    assert_eq!(h.orchestrator.state(), ExportState::Idle);

    // The orchestrator is usable again after a panic
    let outcome = h
        .orchestrator
        .export(&loaded(vec![Some("Ada")]), ExportFormat::Csv)
        .await;
    assert!(outcome.is_completed());
}

#[tokio::test]
async fn test_codec_load_failure_is_reported() {
    let loader = Arc::new(FakeLoader {
        workbook: WorkbookBehaviour::Unavailable,
    });
    let h = harness_with(CodecCache::new(loader), SurfaceStatus::Opened);

    let outcome = h
        .orchestrator
        .export(&loaded(vec![Some("Ada")]), ExportFormat::Xlsx)
        .await;

    assert!(matches!(outcome, ExportOutcome::Failed(ref m) if m.contains("network down")));
    assert_eq!(h.notifier.count(), 1);
    assert_eq!(h.orchestrator.state(), ExportState::Idle);
}

#[tokio::test]
async fn test_resolution_failure_discards_rows() {
    let h = harness();
    let source = FnPageSource::new(|request: PageRequest| async move {
        if request.page == 1 {
            Ok(Page::new(vec![Some("Ada".to_string())], 3))
        } else {
            Err(TabexError::Source(SourceError::ServerError {
                status: 503,
                message: "unavailable".to_string(),
            }))
        }
    });
    let request =
        ExportRequest::new("Customers", name_column(), RowSource::Bulk(Arc::new(source))).unwrap();

    let outcome = h.orchestrator.export(&request, ExportFormat::Csv).await;

    assert!(matches!(outcome, ExportOutcome::Failed(_)));
    assert_eq!(h.notifier.count(), 1);
    assert!(h.sink.files.lock().unwrap().is_empty());
    assert_eq!(h.orchestrator.state(), ExportState::Idle);
}

#[tokio::test]
async fn test_bulk_export_is_capped() {
    let h = harness();
    let orchestrator = h.orchestrator.with_settings(ExportSettings {
        bulk: BulkConfig::new(10, 25),
        ..ExportSettings::default()
    });
    let source = FnPageSource::new(|request: PageRequest| async move {
        let items = (0..request.limit)
            .map(|i| Some(format!("row-{}-{i}", request.page)))
            .collect();
        Ok::<_, TabexError>(Page::new(items, u32::MAX))
    });
    let request =
        ExportRequest::new("Customers", name_column(), RowSource::Bulk(Arc::new(source))).unwrap();

    let outcome = orchestrator.export(&request, ExportFormat::Csv).await;

    let report = outcome.report().expect("export should complete");
    assert_eq!(report.row_count, 25);
    assert!(report.truncated);
}

#[tokio::test]
async fn test_concurrent_trigger_is_rejected() {
    let h = harness();
    let release = Arc::new(Notify::new());
    let gate = release.clone();
    let source = FnPageSource::new(move |_request: PageRequest| {
        let gate = gate.clone();
        async move {
            gate.notified().await;
            Ok::<_, TabexError>(Page::new(vec![Some("Ada".to_string())], 1))
        }
    });
    let slow =
        ExportRequest::new("Slow", name_column(), RowSource::Bulk(Arc::new(source))).unwrap();
    let quick = loaded(vec![Some("Linus")]);

    let mut states = h.orchestrator.subscribe();

    let (first, second) = tokio::join!(
        h.orchestrator.export(&slow, ExportFormat::Csv),
        async {
            states.wait_for(|state| state.is_busy()).await.unwrap();
            let rejected = h.orchestrator.export(&quick, ExportFormat::Csv).await;
            release.notify_one();
            rejected
        }
    );

    assert!(first.is_completed());
    assert_eq!(second, ExportOutcome::Busy);
    assert_eq!(h.notifier.count(), 0);
    assert_eq!(h.sink.files.lock().unwrap().len(), 1);
    assert_eq!(h.orchestrator.state(), ExportState::Idle);
}
