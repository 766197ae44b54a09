//! Paginated document encoder
//!
//! The encoder lays the table out on fixed-size pages and hands the layout to
//! a [`DocumentCodec`] for serialization. Orientation is picked from the
//! column count unless the caller overrides it.

pub mod layout;

use crate::core::projection::ProjectedTable;
use crate::domain::Result;
use chrono::{Local, NaiveDateTime};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

pub use layout::{layout_document, DocumentLayout, DrawOp, FontWeight, LaidOutPage, Rgb};

/// Tables with more columns than this are laid out in landscape
pub const LANDSCAPE_COLUMN_THRESHOLD: usize = 6;

/// Page orientation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Orientation {
    /// Tall layout
    Portrait,
    /// Wide layout
    Landscape,
}

impl Orientation {
    /// Picks the orientation for a column count: landscape above six columns
    pub fn for_column_count(columns: usize) -> Self {
        if columns > LANDSCAPE_COLUMN_THRESHOLD {
            Orientation::Landscape
        } else {
            Orientation::Portrait
        }
    }
}

impl FromStr for Orientation {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "portrait" | "p" => Ok(Orientation::Portrait),
            "landscape" | "l" => Ok(Orientation::Landscape),
            other => Err(format!(
                "Unknown orientation '{other}'. Must be one of: portrait, landscape"
            )),
        }
    }
}

/// Physical page format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PageFormat {
    /// ISO A4 (210 x 297 mm)
    #[default]
    A4,
    /// US Letter (8.5 x 11 in)
    Letter,
}

impl PageFormat {
    /// Page width and height in points for the given orientation
    pub fn dimensions(&self, orientation: Orientation) -> (f32, f32) {
        let (short, long) = match self {
            PageFormat::A4 => (595.28, 841.89),
            PageFormat::Letter => (612.0, 792.0),
        };
        match orientation {
            Orientation::Portrait => (short, long),
            Orientation::Landscape => (long, short),
        }
    }
}

impl FromStr for PageFormat {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "a4" => Ok(PageFormat::A4),
            "letter" => Ok(PageFormat::Letter),
            other => Err(format!(
                "Unknown page format '{other}'. Must be one of: a4, letter"
            )),
        }
    }
}

/// Options of the document encoder
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DocumentOptions {
    /// Physical page format
    pub page_format: PageFormat,
    /// Orientation override; `None` picks it from the column count
    pub orientation: Option<Orientation>,
    /// Timestamp printed under the title; `None` uses the local clock
    pub generated_at: Option<NaiveDateTime>,
}

impl DocumentOptions {
    /// Sets the page format
    pub fn with_page_format(mut self, page_format: PageFormat) -> Self {
        self.page_format = page_format;
        self
    }

    /// Forces an orientation
    pub fn with_orientation(mut self, orientation: Orientation) -> Self {
        self.orientation = Some(orientation);
        self
    }

    /// Fixes the generation timestamp
    pub fn with_generated_at(mut self, generated_at: NaiveDateTime) -> Self {
        self.generated_at = Some(generated_at);
        self
    }

    /// Orientation for a table with the given column count
    pub fn resolve_orientation(&self, columns: usize) -> Orientation {
        self.orientation
            .unwrap_or_else(|| Orientation::for_column_count(columns))
    }
}

/// Serializes a laid-out document into its binary form
pub trait DocumentCodec: Send + Sync {
    /// Renders the pages of the layout
    ///
    /// # Errors
    ///
    /// Returns a codec error if the document cannot be produced.
    fn render(&self, layout: &DocumentLayout) -> Result<Vec<u8>>;
}

/// Lays out and encodes a table as a paginated document
pub fn encode_document(
    codec: &dyn DocumentCodec,
    table: &ProjectedTable,
    title: Option<&str>,
    options: &DocumentOptions,
) -> Result<Vec<u8>> {
    let generated_at = options
        .generated_at
        .unwrap_or_else(|| Local::now().naive_local());
    let layout = layout_document(table, title, options, generated_at);

    tracing::debug!(
        pages = layout.page_count(),
        orientation = ?layout.orientation,
        rows = table.row_count(),
        "Document laid out"
    );

    codec.render(&layout)
}
