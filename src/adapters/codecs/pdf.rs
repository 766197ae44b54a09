//! Paginated document codec backed by `lopdf`
//!
//! Layout coordinates have their origin at the top-left corner of the page;
//! PDF user space starts bottom-left, so every `y` is flipped here. Text uses
//! the standard Helvetica faces with WinAnsi encoding, so characters outside
//! Latin-1 are replaced with `?`.

use crate::core::encode::document::{DocumentLayout, DrawOp, FontWeight, LaidOutPage, Rgb};
use crate::core::encode::DocumentCodec;
use crate::domain::{CodecError, Result};
use lopdf::content::{Content, Operation};
use lopdf::{dictionary, Dictionary, Document, Object, Stream, StringFormat};

const FORMAT_LABEL: &str = "pdf";
const PRODUCER: &str = "tabex";

/// Writes PDF documents in memory
#[derive(Debug, Clone)]
pub struct PdfCodec {
    compress: bool,
}

impl PdfCodec {
    /// Create a codec that compresses content streams
    pub fn new() -> Self {
        Self { compress: true }
    }

    /// Create a codec that leaves content streams readable
    pub fn uncompressed() -> Self {
        Self { compress: false }
    }

    fn build(&self, layout: &DocumentLayout) -> std::result::Result<Vec<u8>, String> {
        let mut doc = Document::with_version("1.5");
        let pages_id = doc.new_object_id();

        let regular_id = doc.add_object(font_dictionary("Helvetica"));
        let bold_id = doc.add_object(font_dictionary("Helvetica-Bold"));
        let resources_id = doc.add_object(dictionary! {
            "Font" => dictionary! {
                "F1" => regular_id,
                "F2" => bold_id
            }
        });

        let mut kids: Vec<Object> = Vec::with_capacity(layout.pages.len());
        for page in &layout.pages {
            let content = Content {
                operations: page_operations(page, layout.height),
            };
            let encoded = content.encode().map_err(|e| e.to_string())?;
            let content_id = doc.add_object(Stream::new(dictionary! {}, encoded));
            let page_id = doc.add_object(dictionary! {
                "Type" => "Page",
                "Parent" => pages_id,
                "Contents" => content_id
            });
            kids.push(page_id.into());
        }

        let page_count = kids.len() as i64;
        let pages = dictionary! {
            "Type" => "Pages",
            "Kids" => kids,
            "Count" => Object::Integer(page_count),
            "Resources" => resources_id,
            "MediaBox" => vec![
                Object::Integer(0),
                Object::Integer(0),
                real(layout.width),
                real(layout.height),
            ]
        };
        doc.objects.insert(pages_id, Object::Dictionary(pages));

        let catalog_id = doc.add_object(dictionary! {
            "Type" => "Catalog",
            "Pages" => pages_id
        });
        doc.trailer.set("Root", catalog_id);

        let mut info = dictionary! {
            "Producer" => literal(PRODUCER)
        };
        if let Some(title) = &layout.title {
            info.set("Title", literal(title));
        }
        let info_id = doc.add_object(info);
        doc.trailer.set("Info", info_id);

        if self.compress {
            doc.compress();
        }

        let mut buffer = Vec::new();
        doc.save_to(&mut buffer).map_err(|e| e.to_string())?;
        Ok(buffer)
    }
}

impl Default for PdfCodec {
    fn default() -> Self {
        Self::new()
    }
}

impl DocumentCodec for PdfCodec {
    fn render(&self, layout: &DocumentLayout) -> Result<Vec<u8>> {
        self.build(layout)
            .map_err(|message| CodecError::encode(FORMAT_LABEL, message).into())
    }
}

fn font_dictionary(base_font: &str) -> Dictionary {
    dictionary! {
        "Type" => "Font",
        "Subtype" => "Type1",
        "BaseFont" => base_font,
        "Encoding" => "WinAnsiEncoding"
    }
}

fn page_operations(page: &LaidOutPage, page_height: f32) -> Vec<Operation> {
    let mut operations = Vec::new();
    for op in &page.ops {
        match op {
            DrawOp::FillRect {
                x,
                y,
                width,
                height,
                color,
            } => {
                operations.push(fill_color(*color));
                operations.push(Operation::new(
                    "re",
                    vec![
                        real(*x),
                        real(page_height - y - height),
                        real(*width),
                        real(*height),
                    ],
                ));
                operations.push(Operation::new("f", vec![]));
            }
            DrawOp::Text {
                x,
                y,
                size,
                weight,
                color,
                text,
            } => {
                let font = match weight {
                    FontWeight::Regular => "F1",
                    FontWeight::Bold => "F2",
                };
                operations.push(Operation::new("BT", vec![]));
                operations.push(Operation::new("Tf", vec![font.into(), real(*size)]));
                operations.push(fill_color(*color));
                operations.push(Operation::new("Td", vec![real(*x), real(page_height - y)]));
                operations.push(Operation::new(
                    "Tj",
                    vec![Object::String(win_ansi_bytes(text), StringFormat::Literal)],
                ));
                operations.push(Operation::new("ET", vec![]));
            }
        }
    }
    operations
}

fn fill_color(color: Rgb) -> Operation {
    let (r, g, b) = color.unit();
    Operation::new("rg", vec![real(r), real(g), real(b)])
}

fn real(value: f32) -> Object {
    Object::Real(value.into())
}

fn literal(text: &str) -> Object {
    Object::String(win_ansi_bytes(text), StringFormat::Literal)
}

/// Encodes text for the standard fonts, replacing unsupported characters
pub fn win_ansi_bytes(text: &str) -> Vec<u8> {
    text.chars()
        .map(|c| match u32::from(c) {
            code @ 0x20..=0x7E | code @ 0xA0..=0xFF => code as u8,
            _ => b'?',
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::encode::document::{layout_document, DocumentOptions};
    use crate::core::projection::ProjectedTable;
    use crate::domain::CellValue;
    use chrono::NaiveDate;

    fn layout(rows: usize) -> DocumentLayout {
        let table = ProjectedTable {
            headers: vec!["Name".to_string(), "Amount".to_string()],
            values: (0..rows)
                .map(|i| vec![CellValue::from(format!("Row {i}")), CellValue::from(i as f64)])
                .collect(),
        };
        let at = NaiveDate::from_ymd_opt(2025, 1, 2)
            .unwrap()
            .and_hms_opt(3, 4, 0)
            .unwrap();
        layout_document(&table, Some("Report"), &DocumentOptions::default(), at)
    }

    #[test]
    fn test_win_ansi_bytes() {
        assert_eq!(win_ansi_bytes("Abc 1"), b"Abc 1".to_vec());
        assert_eq!(win_ansi_bytes("café"), vec![b'c', b'a', b'f', 0xE9]);
        assert_eq!(win_ansi_bytes("€ 日本"), b"? ??".to_vec());
        assert_eq!(win_ansi_bytes("tab\there"), b"tab?here".to_vec());
    }

    #[test]
    fn test_render_produces_pdf() {
        let bytes = PdfCodec::new().render(&layout(3)).unwrap();
        assert!(bytes.starts_with(b"%PDF-1.5"));
    }

    #[test]
    fn test_uncompressed_stream_contains_text() {
        let bytes = PdfCodec::uncompressed().render(&layout(1)).unwrap();
        let text = String::from_utf8_lossy(&bytes);
        assert!(text.contains("(Report) Tj"));
        assert!(text.contains("(Row 0) Tj"));
        assert!(text.contains("/Helvetica-Bold"));
    }

    #[test]
    fn test_page_count_matches_layout() {
        let layout = layout(200);
        assert!(layout.page_count() > 1);

        let bytes = PdfCodec::uncompressed().render(&layout).unwrap();
        let text = String::from_utf8_lossy(&bytes);
        assert!(text.contains(&format!("/Count {}", layout.page_count())));
    }
}
