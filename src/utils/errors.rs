use thiserror::Error;

#[derive(Error, Debug)]
pub enum XlsxTranslatorError {
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Error processing file: {0}")]
    ParseError(String),

    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error("Unsupported target language: {0}")]
    UnsupportedLanguage(String),

    #[error("Text too long: {len} characters, must be under {max}")]
    TextTooLong { len: usize, max: usize },

    #[error("Translation API rate limit reached")]
    TooManyRequests,

    #[error("API error: {0}")]
    ApiError(String),

    #[error("HTTP request error: {0}")]
    HttpError(#[from] reqwest::Error),

    #[error("Export error: {0}")]
    ExportError(#[from] rust_xlsxwriter::XlsxError),

    #[error("Row count mismatch: expected {expected}, got {got}")]
    RowCountMismatch { expected: usize, got: usize },

    #[error("Configuration error: {0}")]
    ConfigError(String),
}

impl XlsxTranslatorError {
    /// Faults caused by what the caller sent rather than by a collaborator.
    pub fn is_input_error(&self) -> bool {
        matches!(
            self,
            XlsxTranslatorError::ParseError(_)
                | XlsxTranslatorError::ValidationError(_)
                | XlsxTranslatorError::UnsupportedLanguage(_)
        )
    }

    /// Faults raised while talking to the translation API.
    pub fn is_translation_error(&self) -> bool {
        matches!(
            self,
            XlsxTranslatorError::TextTooLong { .. }
                | XlsxTranslatorError::TooManyRequests
                | XlsxTranslatorError::ApiError(_)
                | XlsxTranslatorError::HttpError(_)
        )
    }
}

pub type Result<T> = std::result::Result<T, XlsxTranslatorError>;
