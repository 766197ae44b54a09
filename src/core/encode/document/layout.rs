//! Page layout for the paginated document encoder
//!
//! The layout engine turns a projected table into absolutely positioned draw
//! operations on fixed-size pages. Coordinates are PDF points with the origin
//! at the top-left corner of the page; text `y` values are baselines.

use super::{DocumentOptions, Orientation};
use crate::core::projection::ProjectedTable;
use chrono::NaiveDateTime;

/// Page margin on every side
pub const MARGIN: f32 = 40.0;
/// Title font size
pub const TITLE_SIZE: f32 = 16.0;
/// Timestamp font size
pub const META_SIZE: f32 = 9.0;
/// Table font size (header band and body)
pub const TABLE_SIZE: f32 = 8.0;
/// Height of one table row
pub const ROW_HEIGHT: f32 = 16.0;
/// Horizontal padding inside a cell
pub const CELL_PADDING: f32 = 4.0;
/// Space reserved at the bottom of each page for the footer
pub const FOOTER_RESERVE: f32 = 20.0;

/// Header band fill
pub const HEADER_FILL: Rgb = Rgb(41, 128, 185);
/// Header band text color
pub const HEADER_TEXT: Rgb = Rgb(255, 255, 255);
/// Fill of every other body row
pub const STRIPE_FILL: Rgb = Rgb(245, 245, 245);
/// Body text color
pub const BODY_TEXT: Rgb = Rgb(33, 33, 33);
/// Secondary text color (timestamp, footer)
pub const MUTED_TEXT: Rgb = Rgb(110, 110, 110);

const ELLIPSIS: &str = "...";

/// RGB color with 8-bit channels
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgb(pub u8, pub u8, pub u8);

impl Rgb {
    /// Channels scaled to `0.0..=1.0`
    pub fn unit(&self) -> (f32, f32, f32) {
        (
            f32::from(self.0) / 255.0,
            f32::from(self.1) / 255.0,
            f32::from(self.2) / 255.0,
        )
    }
}

/// Font weight of a text run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FontWeight {
    /// Regular weight
    Regular,
    /// Bold weight
    Bold,
}

/// One positioned drawing instruction
#[derive(Debug, Clone, PartialEq)]
pub enum DrawOp {
    /// A single line of text
    Text {
        x: f32,
        y: f32,
        size: f32,
        weight: FontWeight,
        color: Rgb,
        text: String,
    },
    /// A filled rectangle; `y` is the top edge
    FillRect {
        x: f32,
        y: f32,
        width: f32,
        height: f32,
        color: Rgb,
    },
}

/// Draw operations of one page
#[derive(Debug, Clone, PartialEq, Default)]
pub struct LaidOutPage {
    /// Operations in painting order
    pub ops: Vec<DrawOp>,
    /// Number of body rows placed on this page
    pub row_count: usize,
}

impl LaidOutPage {
    /// Iterates over the text runs of the page
    pub fn texts(&self) -> impl Iterator<Item = &str> {
        self.ops.iter().filter_map(|op| match op {
            DrawOp::Text { text, .. } => Some(text.as_str()),
            DrawOp::FillRect { .. } => None,
        })
    }
}

/// A fully paginated document
#[derive(Debug, Clone, PartialEq)]
pub struct DocumentLayout {
    /// Page width in points
    pub width: f32,
    /// Page height in points
    pub height: f32,
    /// Selected orientation
    pub orientation: Orientation,
    /// Document title, if any
    pub title: Option<String>,
    /// Pages in order
    pub pages: Vec<LaidOutPage>,
}

impl DocumentLayout {
    /// Number of pages
    pub fn page_count(&self) -> usize {
        self.pages.len()
    }
}

fn em_width(weight: FontWeight) -> f32 {
    match weight {
        FontWeight::Regular => 0.5,
        FontWeight::Bold => 0.55,
    }
}

/// Approximate advance width of a string in Helvetica
pub fn text_width(text: &str, size: f32, weight: FontWeight) -> f32 {
    text.chars().count() as f32 * size * em_width(weight)
}

/// Fits text into a width, cutting it with an ellipsis when it overflows
///
/// Line breaks are flattened to spaces since a cell holds a single line.
pub fn fit_text(text: &str, max_width: f32, size: f32, weight: FontWeight) -> String {
    let flat: String = text
        .chars()
        .map(|c| if c == '\n' || c == '\r' || c == '\t' { ' ' } else { c })
        .collect();

    if text_width(&flat, size, weight) <= max_width {
        return flat;
    }

    let budget = max_width - text_width(ELLIPSIS, size, weight);
    let max_chars = (budget / (size * em_width(weight))).floor().max(0.0) as usize;
    let mut fitted: String = flat.chars().take(max_chars).collect();
    fitted.push_str(ELLIPSIS);
    fitted
}

struct PageBuilder<'a> {
    table: &'a ProjectedTable,
    width: f32,
    height: f32,
    column_width: f32,
    pages: Vec<LaidOutPage>,
    current: LaidOutPage,
    cursor_y: f32,
}

impl<'a> PageBuilder<'a> {
    fn new(table: &'a ProjectedTable, width: f32, height: f32) -> Self {
        let table_width = width - 2.0 * MARGIN;
        let column_width = table_width / table.column_count().max(1) as f32;
        Self {
            table,
            width,
            height,
            column_width,
            pages: Vec::new(),
            current: LaidOutPage::default(),
            cursor_y: MARGIN,
        }
    }

    fn table_width(&self) -> f32 {
        self.width - 2.0 * MARGIN
    }

    fn bottom_limit(&self) -> f32 {
        self.height - MARGIN - FOOTER_RESERVE
    }

    fn text(&mut self, x: f32, size: f32, weight: FontWeight, color: Rgb, text: String) {
        self.current.ops.push(DrawOp::Text {
            x,
            y: self.cursor_y,
            size,
            weight,
            color,
            text,
        });
    }

    fn preamble(&mut self, title: Option<&str>, generated_at: NaiveDateTime) {
        let max_width = self.table_width();
        if let Some(title) = title {
            self.cursor_y += TITLE_SIZE;
            let fitted = fit_text(title, max_width, TITLE_SIZE, FontWeight::Bold);
            self.text(MARGIN, TITLE_SIZE, FontWeight::Bold, BODY_TEXT, fitted);
            self.cursor_y += 6.0;
        }

        self.cursor_y += META_SIZE;
        let stamp = format!("Generated: {}", generated_at.format("%Y-%m-%d %H:%M"));
        self.text(MARGIN, META_SIZE, FontWeight::Regular, MUTED_TEXT, stamp);
        self.cursor_y += 10.0;
    }

    fn row_cells(&mut self, cells: Vec<String>, weight: FontWeight, color: Rgb) {
        let top = self.cursor_y;
        self.cursor_y = top + (ROW_HEIGHT + TABLE_SIZE * 0.7) / 2.0;
        let max_width = self.column_width - 2.0 * CELL_PADDING;
        for (index, cell) in cells.iter().enumerate() {
            let x = MARGIN + index as f32 * self.column_width + CELL_PADDING;
            let fitted = fit_text(cell, max_width, TABLE_SIZE, weight);
            if !fitted.is_empty() {
                self.text(x, TABLE_SIZE, weight, color, fitted);
            }
        }
        self.cursor_y = top + ROW_HEIGHT;
    }

    fn header_band(&mut self) {
        let width = self.table_width();
        self.current.ops.push(DrawOp::FillRect {
            x: MARGIN,
            y: self.cursor_y,
            width,
            height: ROW_HEIGHT,
            color: HEADER_FILL,
        });
        let headers = self.table.headers.clone();
        self.row_cells(headers, FontWeight::Bold, HEADER_TEXT);
    }

    fn body_row(&mut self, index: usize, cells: Vec<String>) {
        if self.cursor_y + ROW_HEIGHT > self.bottom_limit() {
            self.break_page();
            self.header_band();
        }
        if index % 2 == 1 {
            let width = self.table_width();
            self.current.ops.push(DrawOp::FillRect {
                x: MARGIN,
                y: self.cursor_y,
                width,
                height: ROW_HEIGHT,
                color: STRIPE_FILL,
            });
        }
        self.row_cells(cells, FontWeight::Regular, BODY_TEXT);
        self.current.row_count += 1;
    }

    fn break_page(&mut self) {
        let finished = std::mem::take(&mut self.current);
        self.pages.push(finished);
        self.cursor_y = MARGIN;
    }

    fn finish(mut self) -> Vec<LaidOutPage> {
        self.break_page();
        let total = self.pages.len();
        let footer_y = self.height - MARGIN / 2.0;
        for (index, page) in self.pages.iter_mut().enumerate() {
            let label = format!("Page {} of {}", index + 1, total);
            let x = self.width - MARGIN - text_width(&label, TABLE_SIZE, FontWeight::Regular);
            page.ops.push(DrawOp::Text {
                x,
                y: footer_y,
                size: TABLE_SIZE,
                weight: FontWeight::Regular,
                color: MUTED_TEXT,
                text: label,
            });
        }
        self.pages
    }
}

/// Lays out a table on fixed-size pages
///
/// The first page carries the optional title and the generation timestamp;
/// the header band is repeated at the top of every page.
pub fn layout_document(
    table: &ProjectedTable,
    title: Option<&str>,
    options: &DocumentOptions,
    generated_at: NaiveDateTime,
) -> DocumentLayout {
    let orientation = options.resolve_orientation(table.column_count());
    let (width, height) = options.page_format.dimensions(orientation);

    let mut builder = PageBuilder::new(table, width, height);
    builder.preamble(title, generated_at);

    if table.column_count() > 0 {
        builder.header_band();
        for (index, row) in table.string_rows().enumerate() {
            builder.body_row(index, row);
        }
    }

    DocumentLayout {
        width,
        height,
        orientation,
        title: title.map(str::to_string),
        pages: builder.finish(),
    }
}
