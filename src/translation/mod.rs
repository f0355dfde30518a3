pub mod client;

pub use client::{parse_translation_response, GoogleTranslator, Translator};

use crate::utils::{dedup_languages, FailurePolicy, Result};
use crate::workbook::{SourceTable, TranslatedTable};
use tracing::{info, warn};

/// Translates every non-missing cell of `source` into `language`, one request per cell.
pub async fn translate_table(
    source: &SourceTable,
    translator: &dyn Translator,
    language: &str,
    policy: FailurePolicy,
) -> Result<TranslatedTable> {
    let mut rows = Vec::with_capacity(source.row_count());
    let mut cells_translated = 0usize;
    let mut cells_failed = 0usize;

    for (row_idx, row) in source.rows.iter().enumerate() {
        let mut translated_row = Vec::with_capacity(row.len());

        for (col_idx, cell) in row.iter().enumerate() {
            if cell.is_missing() {
                translated_row.push(String::new());
                continue;
            }

            let text = cell.display_text();
            match translator.translate(&text, language).await {
                Ok(translated) => {
                    cells_translated += 1;
                    translated_row.push(translated);
                }
                Err(e) if policy == FailurePolicy::KeepOriginal => {
                    warn!(
                        language = %language,
                        row = row_idx,
                        column = %source.columns[col_idx],
                        error = %e,
                        "Cell translation failed, keeping original text"
                    );
                    cells_failed += 1;
                    translated_row.push(text);
                }
                Err(e) => return Err(e),
            }
        }

        rows.push(translated_row);
    }

    info!(
        language = %language,
        provider = translator.name(),
        rows = rows.len(),
        cells_translated = cells_translated,
        cells_failed = cells_failed,
        "Table translated"
    );

    Ok(TranslatedTable {
        language: language.to_string(),
        columns: source.columns.clone(),
        rows,
    })
}

/// Runs [`translate_table`] for each distinct language, in selection order.
pub async fn translate_tables<S: AsRef<str>>(
    source: &SourceTable,
    languages: &[S],
    translator: &dyn Translator,
    policy: FailurePolicy,
) -> Result<Vec<TranslatedTable>> {
    let mut translations = Vec::new();
    for language in dedup_languages(languages) {
        translations.push(translate_table(source, translator, &language, policy).await?);
    }
    Ok(translations)
}
