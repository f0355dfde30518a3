pub mod combiner;
pub mod reader;
pub mod table;
pub mod writer;

pub use combiner::{combine, translated_prefix, ORIGINAL_PREFIX};
pub use reader::read_source_table;
pub use table::{CellValue, CombinedTable, OutputCell, SourceTable, TranslatedTable};
pub use writer::{export_workbook, XlsxBufferWriter};
