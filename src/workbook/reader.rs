use crate::utils::{Result, XlsxTranslatorError};
use crate::workbook::table::{CellValue, SourceTable};
use calamine::{Data, Reader, Xlsx};
use std::io::Cursor;

const DATETIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Parses the first worksheet of an `.xlsx` buffer, using its first non-blank row as the header.
pub fn read_source_table(bytes: &[u8]) -> Result<SourceTable> {
    let mut workbook: Xlsx<_> = Xlsx::new(Cursor::new(bytes)).map_err(parse_error)?;

    let range = workbook
        .worksheet_range_at(0)
        .ok_or_else(|| XlsxTranslatorError::ParseError("workbook has no worksheets".to_string()))?
        .map_err(parse_error)?;

    // calamine ranges start at the first used cell; columns left of it still count.
    let leading_columns = range.start().map_or(0, |(_, col)| col as usize);

    let mut rows = range.rows().map(|row| {
        let mut cells = vec![CellValue::Empty; leading_columns];
        cells.extend(row.iter().map(to_cell_value));
        cells
    });

    // Blank rows above the header are skipped, blank rows below it are data.
    let header = rows
        .by_ref()
        .find(|row| !row.iter().all(CellValue::is_missing))
        .ok_or_else(|| XlsxTranslatorError::ParseError("worksheet is empty".to_string()))?;

    let columns = header_names(&header);
    let data: Vec<Vec<CellValue>> = rows.collect();

    tracing::debug!(
        columns = columns.len(),
        rows = data.len(),
        "Parsed source worksheet"
    );

    Ok(SourceTable::new(columns, data))
}

fn parse_error(err: calamine::XlsxError) -> XlsxTranslatorError {
    XlsxTranslatorError::ParseError(err.to_string())
}

fn to_cell_value(data: &Data) -> CellValue {
    match data {
        Data::Empty | Data::Error(_) => CellValue::Empty,
        Data::String(s) if s.is_empty() => CellValue::Empty,
        Data::String(s) | Data::DateTimeIso(s) | Data::DurationIso(s) => CellValue::Text(s.clone()),
        Data::Int(i) => CellValue::Int(*i),
        Data::Float(f) => CellValue::Float(*f),
        Data::Bool(b) => CellValue::Bool(*b),
        Data::DateTime(dt) => match dt.as_datetime() {
            Some(ndt) if !dt.is_duration() => CellValue::DateTime {
                serial: dt.as_f64(),
                text: ndt.format(DATETIME_FORMAT).to_string(),
            },
            _ => CellValue::Float(dt.as_f64()),
        },
    }
}

/// Blank headers become `Unnamed: <idx>`, repeated ones get `.1`, `.2`, ... suffixes.
fn header_names(header: &[CellValue]) -> Vec<String> {
    let mut names: Vec<String> = Vec::with_capacity(header.len());

    for (idx, cell) in header.iter().enumerate() {
        let base = if cell.is_missing() {
            format!("Unnamed: {}", idx)
        } else {
            cell.display_text()
        };

        let mut name = base.clone();
        let mut suffix = 1;
        while names.contains(&name) {
            name = format!("{}.{}", base, suffix);
            suffix += 1;
        }
        names.push(name);
    }

    names
}
