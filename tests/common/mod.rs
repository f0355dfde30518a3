#![allow(dead_code)]

use async_trait::async_trait;
use rust_xlsxwriter::Workbook;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;
use xlsx_translator::{Result, Translator, XlsxTranslatorError};

/// Prefixes each text with its target language and records every call.
#[derive(Default)]
pub struct RecordingTranslator {
    pub calls: Mutex<Vec<(String, String)>>,
}

impl RecordingTranslator {
    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }
}

#[async_trait]
impl Translator for RecordingTranslator {
    async fn translate(&self, text: &str, target: &str) -> Result<String> {
        self.calls
            .lock()
            .unwrap()
            .push((text.to_string(), target.to_string()));
        Ok(match (text, target) {
            ("Bread", "fr") => "Pain".to_string(),
            ("Bread", "de") => "Brot".to_string(),
            _ => format!("{}:{}", target, text),
        })
    }

    fn name(&self) -> &str {
        "recording"
    }
}

/// Fails every call.
#[derive(Default)]
pub struct UnavailableTranslator {
    pub calls: AtomicUsize,
}

#[async_trait]
impl Translator for UnavailableTranslator {
    async fn translate(&self, _text: &str, _target: &str) -> Result<String> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Err(XlsxTranslatorError::ApiError("API returned 503".to_string()))
    }

    fn name(&self) -> &str {
        "unavailable"
    }
}

pub enum Cell<'a> {
    Text(&'a str),
    Number(f64),
    Blank,
}

pub fn xlsx_bytes(header: &[&str], rows: &[Vec<Cell<'_>>]) -> Vec<u8> {
    let mut workbook = Workbook::new();
    let worksheet = workbook.add_worksheet();

    for (col, name) in header.iter().enumerate() {
        worksheet.write_string(0, col as u16, *name).unwrap();
    }
    for (row_idx, row) in rows.iter().enumerate() {
        for (col, cell) in row.iter().enumerate() {
            let (r, c) = (row_idx as u32 + 1, col as u16);
            match cell {
                Cell::Text(s) => {
                    worksheet.write_string(r, c, *s).unwrap();
                }
                Cell::Number(n) => {
                    worksheet.write_number(r, c, *n).unwrap();
                }
                Cell::Blank => {}
            }
        }
    }

    workbook.save_to_buffer().unwrap()
}

/// Five rows of `Item`/`Qty`/`Notes`, with `Notes` blank on the third data row.
pub fn five_row_inventory() -> Vec<u8> {
    let rows = vec![
        vec![Cell::Text("Bread"), Cell::Number(2.0), Cell::Text("fresh")],
        vec![Cell::Text("Milk"), Cell::Number(1.0), Cell::Text("cold")],
        vec![Cell::Text("Eggs"), Cell::Number(12.0), Cell::Blank],
        vec![Cell::Text("Rice"), Cell::Number(0.5), Cell::Text("dry")],
        vec![Cell::Text("Salt"), Cell::Number(1.0), Cell::Text("fine")],
    ];
    xlsx_bytes(&["Item", "Qty", "Notes"], &rows)
}
