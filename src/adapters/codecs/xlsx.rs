//! Spreadsheet codec backed by `rust_xlsxwriter`

use crate::core::encode::WorkbookCodec;
use crate::core::projection::ProjectedTable;
use crate::domain::{CellValue, CodecError, Result};
use chrono::{Datelike, NaiveDate, Timelike};
use rust_xlsxwriter::{ExcelDateTime, Format, Workbook, Worksheet, XlsxError};

const FORMAT_LABEL: &str = "xlsx";
const DATE_FORMAT: &str = "yyyy-mm-dd";
const DATETIME_FORMAT: &str = "yyyy-mm-dd hh:mm:ss";

/// Longest text a spreadsheet cell accepts, in characters
pub const MAX_CELL_CHARS: usize = 32_767;

/// Writes single-sheet `.xlsx` workbooks in memory
#[derive(Debug, Clone)]
pub struct XlsxCodec {
    freeze_header: bool,
}

impl XlsxCodec {
    /// Create a codec that freezes the header row
    pub fn new() -> Self {
        Self {
            freeze_header: true,
        }
    }

    fn write_table(
        &self,
        table: &ProjectedTable,
        sheet_name: &str,
    ) -> std::result::Result<Vec<u8>, XlsxError> {
        let mut workbook = Workbook::new();
        let header_format = Format::new().set_bold();
        let date_format = Format::new().set_num_format(DATE_FORMAT);
        let datetime_format = Format::new().set_num_format(DATETIME_FORMAT);

        let worksheet = workbook.add_worksheet();
        worksheet.set_name(sheet_name)?;

        for (col, header) in table.headers.iter().enumerate() {
            worksheet.write_string_with_format(
                0,
                column_index(col)?,
                header.as_str(),
                &header_format,
            )?;
        }

        for (index, row) in table.values.iter().enumerate() {
            let row_num = u32::try_from(index + 1).map_err(|_| XlsxError::RowColumnLimitError)?;
            for (col, value) in row.iter().enumerate() {
                write_cell(
                    worksheet,
                    row_num,
                    column_index(col)?,
                    value,
                    &date_format,
                    &datetime_format,
                )?;
            }
        }

        if self.freeze_header && !table.headers.is_empty() {
            worksheet.set_freeze_panes(1, 0)?;
        }
        worksheet.autofit();

        workbook.save_to_buffer()
    }
}

impl Default for XlsxCodec {
    fn default() -> Self {
        Self::new()
    }
}

impl WorkbookCodec for XlsxCodec {
    fn encode(&self, table: &ProjectedTable, sheet_name: &str) -> Result<Vec<u8>> {
        self.write_table(table, sheet_name)
            .map_err(|e| CodecError::encode(FORMAT_LABEL, e).into())
    }
}

fn column_index(col: usize) -> std::result::Result<u16, XlsxError> {
    u16::try_from(col).map_err(|_| XlsxError::RowColumnLimitError)
}

fn write_cell(
    worksheet: &mut Worksheet,
    row: u32,
    col: u16,
    value: &CellValue,
    date_format: &Format,
    datetime_format: &Format,
) -> std::result::Result<(), XlsxError> {
    match value {
        CellValue::Empty => {}
        CellValue::Text(text) => {
            worksheet.write_string(row, col, fit_cell_text(text, row, col))?;
        }
        CellValue::Number(n) if n.is_finite() => {
            worksheet.write_number(row, col, *n)?;
        }
        CellValue::Number(n) => {
            worksheet.write_string(row, col, n.to_string())?;
        }
        CellValue::Bool(b) => {
            worksheet.write_boolean(row, col, *b)?;
        }
        CellValue::Date(date) => {
            let excel = excel_date(date)?;
            worksheet.write_datetime_with_format(row, col, &excel, date_format)?;
        }
        CellValue::DateTime(datetime) => {
            let excel = excel_date(&datetime.date())?.and_hms(
                datetime.hour() as u16,
                datetime.minute() as u8,
                datetime.second(),
            )?;
            worksheet.write_datetime_with_format(row, col, &excel, datetime_format)?;
        }
    }
    Ok(())
}

fn fit_cell_text(text: &str, row: u32, col: u16) -> &str {
    match text.char_indices().nth(MAX_CELL_CHARS) {
        Some((cut, _)) => {
            tracing::warn!(
                row,
                col,
                chars = text.chars().count(),
                limit = MAX_CELL_CHARS,
                "Cell text exceeds the spreadsheet limit, truncating"
            );
            &text[..cut]
        }
        None => text,
    }
}

fn excel_date(date: &NaiveDate) -> std::result::Result<ExcelDateTime, XlsxError> {
    let year = u16::try_from(date.year())
        .map_err(|_| XlsxError::DateTimeRangeError(date.to_string()))?;
    ExcelDateTime::from_ymd(year, date.month() as u8, date.day() as u8)
}
