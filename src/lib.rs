// Tabex - Tabular Export Engine
// Copyright (c) 2025 Tabex Contributors
// Licensed under the MIT License

//! # Tabex - Tabular Export Engine
//!
//! Tabex turns an in-memory collection of records into a downloadable or
//! printable artifact: delimited text (CSV), a spreadsheet workbook (XLSX),
//! a paginated document (PDF) or a self-printing HTML view.
//!
//! ## Overview
//!
//! One export action:
//! - **Resolves** the rows, either as given or by walking a paginated remote
//!   source up to a 10,000-row cap
//! - **Projects** them through column descriptors into a header and value matrix
//! - **Encodes** the matrix in the requested format
//! - **Delivers** the artifact to a download sink or a print surface
//!
//! ## Architecture
//!
//! - [`cli`] - Command-line interface of the `tabex` binary
//! - [`core`] - Projection, bulk resolution, encoders and the export orchestrator
//! - [`adapters`] - Codecs, delivery ports, the HTTP page source and notifications
//! - [`domain`] - Cell values, column descriptors, formats and errors
//! - [`config`] - Configuration management
//! - [`logging`] - Structured logging
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use tabex::adapters::codecs::CodecCache;
//! use tabex::adapters::delivery::{DirectorySink, SystemViewer};
//! use tabex::adapters::notify::TracingNotifier;
//! use tabex::core::export::{ExportOrchestrator, ExportRequest, RowSource};
//! use tabex::domain::{ColumnDescriptor, ExportFormat};
//!
//! struct Invoice {
//!     number: String,
//!     amount: f64,
//! }
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let orchestrator = ExportOrchestrator::new(
//!         Arc::new(CodecCache::default()),
//!         Arc::new(DirectorySink::new("./exports")),
//!         Arc::new(SystemViewer::new()),
//!         Arc::new(TracingNotifier),
//!     );
//!
//!     let columns = vec![
//!         ColumnDescriptor::new("number", |i: &Invoice| i.number.clone().into())
//!             .with_label("Invoice"),
//!         ColumnDescriptor::new("amount", |i: &Invoice| i.amount.into()),
//!     ];
//!     let rows = vec![Invoice { number: "2024-001".to_string(), amount: 99.5 }];
//!     let request = ExportRequest::new("Open invoices", columns, RowSource::Loaded(rows))?;
//!
//!     let outcome = orchestrator.export(&request, ExportFormat::Xlsx).await;
//!     println!("{outcome:?}");
//!     Ok(())
//! }
//! ```
//!
//! ## Error Handling
//!
//! The library uses [`domain::TabexError`] for all errors. The orchestrator
//! never returns an error: failures are reported once through a
//! [`adapters::notify::NotificationPort`] and end in
//! [`core::export::ExportOutcome::Failed`].

pub mod adapters;
pub mod cli;
pub mod config;
pub mod core;
pub mod domain;
pub mod logging;
