use crate::translation::{translate_tables, Translator};
use crate::utils::{dedup_languages, AppConfig, Result, XlsxTranslatorError, XLSX_MIME_TYPE};
use crate::workbook::{combine, export_workbook, read_source_table, TranslatedTable};
use serde::Serialize;
use tracing::Instrument;
use uuid::Uuid;

pub const PROCESSING_MESSAGE: &str = "Processing the uploaded file...";
pub const COMPLETED_MESSAGE: &str = "Translation completed!";

#[derive(Debug, Clone, Serialize)]
pub struct TranslationPreview {
    /// Upper-cased language code, as shown above each preview table.
    pub title: String,
    pub table: TranslatedTable,
}

#[derive(Debug, Clone)]
pub struct TranslationOutput {
    pub run_id: String,
    pub messages: Vec<String>,
    pub previews: Vec<TranslationPreview>,
    pub workbook: Vec<u8>,
    pub file_name: String,
    pub mime_type: &'static str,
}

/// Checks the selection against the offered languages and drops repeats.
pub fn validate_languages<S: AsRef<str>>(languages: &[S], config: &AppConfig) -> Result<Vec<String>> {
    let languages = dedup_languages(languages);
    if languages.is_empty() {
        return Err(XlsxTranslatorError::ValidationError(
            "no target languages selected".to_string(),
        ));
    }

    if let Some(unsupported) = languages
        .iter()
        .find(|lang| !config.translation.languages.contains(*lang))
    {
        return Err(XlsxTranslatorError::UnsupportedLanguage(unsupported.clone()));
    }

    Ok(languages)
}

/// Parses the upload, translates it into every language and builds the output workbook.
///
/// Nothing is sent to the translator unless the upload parses.
pub async fn run_translation(
    bytes: &[u8],
    languages: &[String],
    translator: &dyn Translator,
    config: &AppConfig,
) -> Result<TranslationOutput> {
    let run_id = Uuid::new_v4().to_string();
    let span = tracing::info_span!("translation_run", run_id = %run_id);

    async {
        let languages = validate_languages(languages, config)?;
        let mut messages = vec![PROCESSING_MESSAGE.to_string()];

        let source = read_source_table(bytes).inspect_err(|e| {
            tracing::warn!(error = %e, "Upload could not be parsed");
        })?;

        tracing::info!(
            rows = source.row_count(),
            columns = source.column_count(),
            cells = source.translatable_cells(),
            languages = ?languages,
            "Starting translation"
        );

        let translations = translate_tables(
            &source,
            &languages,
            translator,
            config.translation.failure_policy,
        )
        .await?;

        let combined = translations
            .iter()
            .map(|translated| combine(&source, translated))
            .collect::<Result<Vec<_>>>()?;

        let workbook = export_workbook(&combined, &config.output.sheet_prefix)?;
        messages.push(COMPLETED_MESSAGE.to_string());

        let previews = translations
            .into_iter()
            .map(|table| TranslationPreview {
                title: format!("Translated File ({})", table.language.to_uppercase()),
                table,
            })
            .collect();

        tracing::info!(
            sheets = combined.len(),
            bytes = workbook.len(),
            "Translation completed"
        );

        Ok::<_, XlsxTranslatorError>(TranslationOutput {
            run_id: run_id.clone(),
            messages,
            previews,
            workbook,
            file_name: config.output.file_name.clone(),
            mime_type: XLSX_MIME_TYPE,
        })
    }
    .instrument(span)
    .await
}
