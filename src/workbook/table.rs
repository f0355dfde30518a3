use serde::{Deserialize, Serialize};

/// A cell as read from the uploaded workbook.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum CellValue {
    Empty,
    Text(String),
    Int(i64),
    Float(f64),
    Bool(bool),
    /// Excel serial date plus its rendered form.
    DateTime { serial: f64, text: String },
}

impl CellValue {
    pub fn is_missing(&self) -> bool {
        match self {
            CellValue::Empty => true,
            CellValue::Text(s) => s.is_empty(),
            CellValue::Float(f) => f.is_nan(),
            _ => false,
        }
    }

    /// The string form a cell is translated from.
    pub fn display_text(&self) -> String {
        match self {
            CellValue::Empty => String::new(),
            CellValue::Text(s) => s.clone(),
            CellValue::Int(i) => i.to_string(),
            CellValue::Float(f) => format_float(*f),
            CellValue::Bool(true) => "True".to_string(),
            CellValue::Bool(false) => "False".to_string(),
            CellValue::DateTime { text, .. } => text.clone(),
        }
    }
}

fn format_float(value: f64) -> String {
    if value.is_finite() && value.fract() == 0.0 && value.abs() < 1e15 {
        format!("{}", value as i64)
    } else {
        format!("{}", value)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SourceTable {
    pub columns: Vec<String>,
    pub rows: Vec<Vec<CellValue>>,
}

impl SourceTable {
    /// Builds a table, padding or truncating each row to the column count.
    pub fn new(columns: Vec<String>, rows: Vec<Vec<CellValue>>) -> Self {
        let width = columns.len();
        let rows = rows
            .into_iter()
            .map(|mut row| {
                row.resize(width, CellValue::Empty);
                row
            })
            .collect();
        Self { columns, rows }
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    pub fn column_count(&self) -> usize {
        self.columns.len()
    }

    /// Number of cells that would reach the translation API.
    pub fn translatable_cells(&self) -> usize {
        self.rows
            .iter()
            .flat_map(|row| row.iter())
            .filter(|cell| !cell.is_missing())
            .count()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TranslatedTable {
    pub language: String,
    pub columns: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl TranslatedTable {
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    pub fn cell(&self, row: usize, column: &str) -> Option<&str> {
        let idx = self.columns.iter().position(|c| c == column)?;
        self.rows.get(row)?.get(idx).map(|s| s.as_str())
    }
}

/// A cell of the exported sheet: original values keep their type, translations are text.
#[derive(Debug, Clone, PartialEq)]
pub enum OutputCell {
    Original(CellValue),
    Translated(String),
}

#[derive(Debug, Clone, PartialEq)]
pub struct CombinedTable {
    pub language: String,
    pub columns: Vec<String>,
    pub rows: Vec<Vec<OutputCell>>,
}

impl CombinedTable {
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    pub fn column_count(&self) -> usize {
        self.columns.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_text_follows_python_str() {
        assert_eq!(CellValue::Float(2.0).display_text(), "2");
        assert_eq!(CellValue::Float(2.5).display_text(), "2.5");
        assert_eq!(CellValue::Int(-7).display_text(), "-7");
        assert_eq!(CellValue::Bool(true).display_text(), "True");
        assert_eq!(CellValue::Text("Bread".into()).display_text(), "Bread");
    }

    #[test]
    fn empty_strings_and_nan_count_as_missing() {
        assert!(CellValue::Empty.is_missing());
        assert!(CellValue::Text(String::new()).is_missing());
        assert!(CellValue::Float(f64::NAN).is_missing());
        assert!(!CellValue::Text(" ".into()).is_missing());
        assert!(!CellValue::Int(0).is_missing());
    }

    #[test]
    fn rows_are_padded_to_header_width() {
        let table = SourceTable::new(
            vec!["A".into(), "B".into(), "C".into()],
            vec![vec![CellValue::Int(1)]],
        );
        assert_eq!(table.rows[0].len(), 3);
        assert_eq!(table.rows[0][2], CellValue::Empty);
        assert_eq!(table.translatable_cells(), 1);
    }
}
