pub mod config;
pub mod errors;

pub use config::{
    AppConfig, FailurePolicy, LoggingConfig, OutputConfig, ServerConfig, TranslationConfig,
    XLSX_MIME_TYPE,
};
pub use errors::{Result, XlsxTranslatorError};

/// Collapses repeated language codes, keeping the first occurrence of each.
pub fn dedup_languages<S: AsRef<str>>(languages: &[S]) -> Vec<String> {
    let mut seen: Vec<String> = Vec::with_capacity(languages.len());
    for lang in languages {
        let lang = lang.as_ref().trim();
        if !lang.is_empty() && !seen.iter().any(|l| l == lang) {
            seen.push(lang.to_string());
        }
    }
    seen
}
