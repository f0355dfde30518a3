use crate::utils::{Result, XlsxTranslatorError};
use crate::workbook::table::{CellValue, CombinedTable, OutputCell};
use rust_xlsxwriter::{Format, FormatAlign, FormatBorder, Workbook, Worksheet};

const DATETIME_NUM_FORMAT: &str = "yyyy-mm-dd hh:mm:ss";

/// Buffers combined tables into an in-memory workbook, one sheet per table.
pub struct XlsxBufferWriter {
    workbook: Workbook,
    header_format: Format,
    datetime_format: Format,
    sheet_prefix: String,
    sheets_written: usize,
}

impl XlsxBufferWriter {
    pub fn new(sheet_prefix: impl Into<String>) -> Self {
        Self {
            workbook: Workbook::new(),
            header_format: Format::new()
                .set_bold()
                .set_border(FormatBorder::Thin)
                .set_align(FormatAlign::Center)
                .set_align(FormatAlign::Top),
            datetime_format: Format::new().set_num_format(DATETIME_NUM_FORMAT),
            sheet_prefix: sheet_prefix.into(),
            sheets_written: 0,
        }
    }

    /// Sheets are named by position only: `<prefix>1`, `<prefix>2`, ...
    pub fn write_table(&mut self, table: &CombinedTable) -> Result<()> {
        let sheet_name = format!("{}{}", self.sheet_prefix, self.sheets_written + 1);

        let worksheet = self.workbook.add_worksheet();
        worksheet.set_name(&sheet_name)?;

        for (col, name) in table.columns.iter().enumerate() {
            worksheet.write_string_with_format(0, cast_col_num(col)?, name, &self.header_format)?;
        }

        for (row_idx, row) in table.rows.iter().enumerate() {
            let row_num = cast_row_num(row_idx + 1)?;
            for (col_idx, cell) in row.iter().enumerate() {
                write_cell(
                    worksheet,
                    row_num,
                    cast_col_num(col_idx)?,
                    cell,
                    &self.datetime_format,
                )?;
            }
        }

        self.sheets_written += 1;

        tracing::debug!(
            sheet = %sheet_name,
            language = %table.language,
            rows = table.row_count(),
            columns = table.column_count(),
            "Sheet written"
        );

        Ok(())
    }

    pub fn sheets_written(&self) -> usize {
        self.sheets_written
    }

    pub fn finish(mut self) -> Result<Vec<u8>> {
        Ok(self.workbook.save_to_buffer()?)
    }
}

fn write_cell(
    worksheet: &mut Worksheet,
    row: u32,
    col: u16,
    cell: &OutputCell,
    datetime_format: &Format,
) -> Result<()> {
    match cell {
        OutputCell::Translated(text) => {
            if !text.is_empty() {
                worksheet.write_string(row, col, text)?;
            }
        }
        OutputCell::Original(value) => match value {
            CellValue::Empty => {}
            CellValue::Text(s) => {
                if !s.is_empty() {
                    worksheet.write_string(row, col, s)?;
                }
            }
            CellValue::Int(i) => {
                worksheet.write_number(row, col, *i as f64)?;
            }
            CellValue::Float(f) => {
                if f.is_finite() {
                    worksheet.write_number(row, col, *f)?;
                }
            }
            CellValue::Bool(b) => {
                worksheet.write_boolean(row, col, *b)?;
            }
            CellValue::DateTime { serial, .. } => {
                worksheet.write_number_with_format(row, col, *serial, datetime_format)?;
            }
        },
    }
    Ok(())
}

/// Serializes every combined table into a single workbook buffer.
pub fn export_workbook(tables: &[CombinedTable], sheet_prefix: &str) -> Result<Vec<u8>> {
    let mut writer = XlsxBufferWriter::new(sheet_prefix);
    for table in tables {
        writer.write_table(table)?;
    }
    writer.finish()
}

fn cast_row_num(value: usize) -> Result<u32> {
    u32::try_from(value)
        .map_err(|_| XlsxTranslatorError::ValidationError(format!("row index overflow: {value}")))
}

fn cast_col_num(value: usize) -> Result<u16> {
    u16::try_from(value).map_err(|_| {
        XlsxTranslatorError::ValidationError(format!("column index overflow: {value}"))
    })
}
