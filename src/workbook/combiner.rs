use crate::utils::{Result, XlsxTranslatorError};
use crate::workbook::table::{CombinedTable, OutputCell, SourceTable, TranslatedTable};

pub const ORIGINAL_PREFIX: &str = "Original_";

pub fn translated_prefix(language: &str) -> String {
    format!("Translated_{}_", language)
}

/// Places the source columns next to their translation, aligning rows by position.
pub fn combine(source: &SourceTable, translated: &TranslatedTable) -> Result<CombinedTable> {
    if source.row_count() != translated.row_count() {
        return Err(XlsxTranslatorError::RowCountMismatch {
            expected: source.row_count(),
            got: translated.row_count(),
        });
    }

    let prefix = translated_prefix(&translated.language);
    let columns = source
        .columns
        .iter()
        .map(|c| format!("{}{}", ORIGINAL_PREFIX, c))
        .chain(translated.columns.iter().map(|c| format!("{}{}", prefix, c)))
        .collect();

    let rows = source
        .rows
        .iter()
        .zip(&translated.rows)
        .map(|(original, translation)| {
            original
                .iter()
                .cloned()
                .map(OutputCell::Original)
                .chain(translation.iter().cloned().map(OutputCell::Translated))
                .collect()
        })
        .collect();

    Ok(CombinedTable {
        language: translated.language.clone(),
        columns,
        rows,
    })
}
