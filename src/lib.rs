pub mod logging;
pub mod pipeline;
pub mod server;
pub mod translation;
pub mod utils;
pub mod workbook;

pub use pipeline::{run_translation, validate_languages, TranslationOutput, TranslationPreview};
pub use server::{ServerState, SharedState};
pub use translation::{translate_table, translate_tables, GoogleTranslator, Translator};
pub use utils::{AppConfig, FailurePolicy, Result, XlsxTranslatorError};
pub use workbook::{
    combine, export_workbook, read_source_table, CellValue, CombinedTable, SourceTable,
    TranslatedTable,
};
