//! Candidate table reader.
//!
//! Reads the first worksheet of an xlsx upload. The first row is the header;
//! column names are matched exactly (case-sensitive). Fully blank rows are
//! skipped. Column validation happens before any row is parsed.

use std::io::Cursor;

use calamine::{open_workbook_from_rs, Data, Reader, Xlsx};

use crate::assessment::candidate::{CandidateRecord, CandidateRow, CandidateScores, PronounSet};
use crate::assessment::classifier::ClassificationError;
use crate::assessment::knowledge_base::{AssessmentType, Competency};
use crate::spreadsheet::{CellValue, SpreadsheetError};

pub const NAME_COLUMN: &str = "Name";
pub const GENDER_COLUMN: &str = "Gender";
pub const TYPE_COLUMN: &str = "Type";

/// Required input columns, in template order.
pub fn required_columns() -> Vec<&'static str> {
    let mut columns = vec![NAME_COLUMN, GENDER_COLUMN, TYPE_COLUMN];
    columns.extend(Competency::ALL.iter().map(|c| c.column_name()));
    columns
}

/// The uploaded table, cell types preserved.
#[derive(Debug, Clone, PartialEq)]
pub struct CandidateTable {
    pub headers: Vec<String>,
    /// Each row is padded to `headers.len()`.
    pub rows: Vec<Vec<CellValue>>,
}

/// Positions of the required columns within a validated table.
#[derive(Debug, Clone)]
struct ColumnIndex {
    name: usize,
    gender: usize,
    assessment_type: usize,
    scores: Vec<(Competency, usize)>,
}

fn to_cell(data: &Data) -> CellValue {
    match data {
        Data::Empty => CellValue::Empty,
        Data::Float(f) => CellValue::Number(*f),
        Data::Int(i) => CellValue::Number(*i as f64),
        Data::String(s) => CellValue::Text(s.clone()),
        Data::Bool(b) => CellValue::Bool(*b),
        other => CellValue::Text(other.to_string()),
    }
}

/// Reads the first worksheet of an xlsx workbook.
pub fn read_candidate_table(bytes: &[u8]) -> Result<CandidateTable, SpreadsheetError> {
    let mut workbook: Xlsx<_> = open_workbook_from_rs(Cursor::new(bytes))?;
    let range = workbook
        .worksheet_range_at(0)
        .ok_or(SpreadsheetError::NoWorksheet)??;

    let mut rows = range.rows();
    let headers: Vec<String> = rows
        .next()
        .ok_or(SpreadsheetError::NoHeader)?
        .iter()
        .map(|d| to_cell(d).as_text())
        .collect();

    let width = headers.len();
    let rows = rows
        .map(|row| {
            let mut cells: Vec<CellValue> = row.iter().take(width).map(to_cell).collect();
            cells.resize(width, CellValue::Empty);
            cells
        })
        .filter(|cells| !cells.iter().all(CellValue::is_empty))
        .collect();

    Ok(CandidateTable { headers, rows })
}

impl CandidateTable {
    fn position(&self, column: &str) -> Option<usize> {
        self.headers.iter().position(|h| h == column)
    }

    /// Required columns absent from the header row, in template order.
    pub fn missing_columns(&self) -> Vec<&'static str> {
        required_columns()
            .into_iter()
            .filter(|c| self.position(c).is_none())
            .collect()
    }

    fn column_index(&self) -> Result<ColumnIndex, SpreadsheetError> {
        let missing = self.missing_columns();
        if !missing.is_empty() {
            return Err(SpreadsheetError::MissingColumns(
                missing.into_iter().map(String::from).collect(),
            ));
        }

        let at = |column: &str| {
            self.position(column)
                .ok_or_else(|| SpreadsheetError::MissingColumns(vec![column.to_string()]))
        };

        Ok(ColumnIndex {
            name: at(NAME_COLUMN)?,
            gender: at(GENDER_COLUMN)?,
            assessment_type: at(TYPE_COLUMN)?,
            scores: Competency::ALL
                .into_iter()
                .map(|c| at(c.column_name()).map(|i| (c, i)))
                .collect::<Result<_, _>>()?,
        })
    }

    /// Validates the header and parses every row.
    ///
    /// A missing column fails the whole table. A bad row only fails that row.
    pub fn candidates(&self) -> Result<Vec<CandidateRow>, SpreadsheetError> {
        let index = self.column_index()?;
        Ok(self.rows.iter().map(|row| parse_row(row, &index)).collect())
    }
}

fn parse_score(competency: Competency, cell: &CellValue) -> Result<f64, ClassificationError> {
    let invalid = || ClassificationError::InvalidScore {
        competency,
        raw: cell.as_text(),
    };
    match cell {
        CellValue::Number(n) => Ok(*n),
        CellValue::Text(s) => s.trim().parse::<f64>().map_err(|_| invalid()),
        CellValue::Empty | CellValue::Bool(_) => Err(invalid()),
    }
}

fn parse_record(
    row: &[CellValue],
    index: &ColumnIndex,
    name: &str,
) -> Result<CandidateRecord, ClassificationError> {
    let assessment_type: AssessmentType = row[index.assessment_type].as_text().trim().parse()?;

    let scores = CandidateScores::try_from_fn(|competency| {
        let column = index
            .scores
            .iter()
            .find(|(c, _)| *c == competency)
            .map(|(_, i)| *i)
            .ok_or_else(|| {
                ClassificationError::UnknownCompetency(competency.column_name().to_string())
            })?;
        parse_score(competency, &row[column])
    })?;

    Ok(CandidateRecord {
        name: name.to_string(),
        pronoun: PronounSet::from_gender(&row[index.gender].as_text()),
        assessment_type,
        scores,
    })
}

fn parse_row(row: &[CellValue], index: &ColumnIndex) -> CandidateRow {
    let display_name = row[index.name].as_text().trim().to_string();
    let record = parse_record(row, index, &display_name);
    CandidateRow {
        display_name,
        record,
    }
}
