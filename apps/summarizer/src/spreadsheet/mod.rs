// Spreadsheet I/O: candidate table in, results table and template out.
// calamine reads xlsx; rust_xlsxwriter writes it.

pub mod reader;
pub mod writer;

use serde::Serialize;
use thiserror::Error;

pub const XLSX_CONTENT_TYPE: &str =
    "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet";

#[derive(Debug, Error)]
pub enum SpreadsheetError {
    #[error("Could not read workbook: {0}")]
    Read(#[from] calamine::XlsxError),

    #[error("Could not write workbook: {0}")]
    Write(#[from] rust_xlsxwriter::XlsxError),

    #[error("Workbook contains no worksheets")]
    NoWorksheet,

    #[error("Worksheet has no header row")]
    NoHeader,

    #[error("Missing required columns: {}", .0.join(", "))]
    MissingColumns(Vec<String>),

    #[error("Result count {actual} does not match row count {expected}")]
    RowCountMismatch { expected: usize, actual: usize },
}

/// A single cell, kept in its original type so results can be written back unchanged.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum CellValue {
    Empty,
    Number(f64),
    Text(String),
    Bool(bool),
}

impl CellValue {
    /// Text rendering used for names, genders and assessment types.
    pub fn as_text(&self) -> String {
        match self {
            CellValue::Empty => String::new(),
            CellValue::Number(n) => n.to_string(),
            CellValue::Text(s) => s.clone(),
            CellValue::Bool(b) => b.to_string(),
        }
    }

    pub fn is_empty(&self) -> bool {
        match self {
            CellValue::Empty => true,
            CellValue::Text(s) => s.trim().is_empty(),
            _ => false,
        }
    }
}
