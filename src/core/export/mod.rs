//! Export orchestration
//!
//! This module provides the export action itself:
//! - [`ExportRequest`] describing one export
//! - [`ExportOrchestrator`] driving resolution, encoding and delivery
//! - [`ExportState`] and the busy flag published to hosts
//! - [`ExportOutcome`] reported back to the caller

pub mod coordinator;
pub mod request;
pub mod state;
pub mod summary;

pub use coordinator::{ExportOrchestrator, ExportSettings};
pub use request::{ExportRequest, RowSource};
pub use state::{BusyFlag, BusyGuard, ExportState};
pub use summary::{ExportOutcome, ExportReport};
