//! Workbook writers: the results table and the downloadable template.

use rust_xlsxwriter::{Format, Workbook};
use tracing::warn;

use crate::spreadsheet::reader::{required_columns, CandidateTable};
use crate::spreadsheet::{CellValue, SpreadsheetError};

pub const TEMPLATE_SHEET: &str = "Candidates";
pub const RESULTS_SHEET: &str = "Results";
pub const TEMPLATE_FILE_NAME: &str = "candidate_template.xlsx";
pub const RESULTS_FILE_NAME: &str = "executive_summary_results.xlsx";
/// Column appended to the input table.
pub const SUMMARY_COLUMN: &str = "AI Executive Summary";
/// Excel's per-cell text limit, in characters.
pub const MAX_CELL_CHARS: usize = 32_767;
/// Appended to a summary cut down to fit one cell.
pub const TRUNCATION_MARKER: &str = " [truncated]";

/// Cuts `text` to fit a single cell, ending it with [`TRUNCATION_MARKER`].
fn fit_cell(text: &str) -> String {
    if text.chars().count() <= MAX_CELL_CHARS {
        return text.to_string();
    }
    let keep = MAX_CELL_CHARS - TRUNCATION_MARKER.chars().count();
    let mut fitted: String = text.chars().take(keep).collect();
    fitted.push_str(TRUNCATION_MARKER);
    fitted
}

/// Writes a single-sheet workbook with a bold header row. Empty cells are left unwritten.
pub fn write_sheet(
    sheet_name: &str,
    headers: &[String],
    rows: &[Vec<CellValue>],
) -> Result<Vec<u8>, SpreadsheetError> {
    let mut workbook = Workbook::new();
    let header_format = Format::new().set_bold();

    {
        let worksheet = workbook.add_worksheet();
        worksheet.set_name(sheet_name)?;

        for (col, header) in headers.iter().enumerate() {
            worksheet.write_string_with_format(0, col as u16, header, &header_format)?;
        }

        for (i, row) in rows.iter().enumerate() {
            let row_num = (i + 1) as u32;
            for (col, cell) in row.iter().enumerate() {
                let col = col as u16;
                match cell {
                    CellValue::Empty => {}
                    CellValue::Number(n) => {
                        worksheet.write_number(row_num, col, *n)?;
                    }
                    CellValue::Text(s) => {
                        worksheet.write_string(row_num, col, s)?;
                    }
                    CellValue::Bool(b) => {
                        worksheet.write_boolean(row_num, col, *b)?;
                    }
                }
            }
        }
    }

    Ok(workbook.save_to_buffer()?)
}

/// Writes the input table back out with one appended summary column.
///
/// `summaries[i]` belongs to `table.rows[i]`; the lengths must match.
/// A summary longer than one cell allows is truncated rather than failing the workbook.
pub fn write_results(
    table: &CandidateTable,
    summaries: &[String],
) -> Result<Vec<u8>, SpreadsheetError> {
    if summaries.len() != table.rows.len() {
        return Err(SpreadsheetError::RowCountMismatch {
            expected: table.rows.len(),
            actual: summaries.len(),
        });
    }

    let mut headers = table.headers.clone();
    headers.push(SUMMARY_COLUMN.to_string());

    let rows: Vec<Vec<CellValue>> = table
        .rows
        .iter()
        .zip(summaries)
        .enumerate()
        .map(|(index, (row, summary))| {
            let cell = fit_cell(summary);
            if cell.len() != summary.len() {
                warn!(index, chars = summary.chars().count(), "Summary truncated to fit one cell");
            }
            let mut row = row.clone();
            row.push(CellValue::Text(cell));
            row
        })
        .collect();

    write_sheet(RESULTS_SHEET, &headers, &rows)
}

/// The downloadable example input, with two sample candidates.
pub fn template_workbook() -> Result<Vec<u8>, SpreadsheetError> {
    let headers: Vec<String> = required_columns().into_iter().map(String::from).collect();

    let sample = |name: &str, gender: &str, kind: &str, scores: [f64; 8]| {
        let mut row = vec![
            CellValue::Text(name.to_string()),
            CellValue::Text(gender.to_string()),
            CellValue::Text(kind.to_string()),
        ];
        row.extend(scores.into_iter().map(CellValue::Number));
        row
    };

    let rows = vec![
        sample("John Doe", "M", "Apply", [3.5, 4.1, 4.5, 3.1, 4.0, 3.8, 4.2, 3.9]),
        sample("Ayesha Al Mheiri", "F", "Shape", [2.8, 3.2, 2.1, 2.9, 2.5, 2.6, 1.9, 3.1]),
    ];

    write_sheet(TEMPLATE_SHEET, &headers, &rows)
}
