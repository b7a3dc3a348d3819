//! Axum route handlers for the Summary API.

use axum::{
    extract::{Multipart, Query, State},
    http::{header, HeaderMap, HeaderName, HeaderValue},
    response::{IntoResponse, Response},
    Json,
};
use bytes::Bytes;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::assessment::{analyze_candidate, CandidateAnalysis};
use crate::errors::AppError;
use crate::spreadsheet::reader::read_candidate_table;
use crate::spreadsheet::writer::{
    template_workbook, write_results, RESULTS_FILE_NAME, TEMPLATE_FILE_NAME,
};
use crate::spreadsheet::XLSX_CONTENT_TYPE;
use crate::state::AppState;
use crate::summary::batch::{BatchEvent, BatchReport};

pub const API_KEY_HEADER: &str = "x-api-key";
const FILE_FIELD: &str = "file";
const API_KEY_FIELD: &str = "api_key";

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Default, Clone, Copy, PartialEq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Xlsx,
    Json,
}

#[derive(Debug, Default, Deserialize)]
pub struct SummaryQuery {
    #[serde(default)]
    pub format: OutputFormat,
}

#[derive(Debug, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum AnalysisOutcome {
    Analyzed { analysis: CandidateAnalysis },
    InvalidInput { error: String },
}

#[derive(Debug, Serialize)]
pub struct RowAnalysis {
    pub index: usize,
    pub name: String,
    #[serde(flatten)]
    pub outcome: AnalysisOutcome,
}

#[derive(Debug, Serialize)]
pub struct AnalyzeResponse {
    pub generated_at: DateTime<Utc>,
    pub rows: Vec<RowAnalysis>,
}

/// Fields pulled out of the multipart upload.
#[derive(Debug, Default)]
struct Upload {
    file: Option<Bytes>,
    api_key: Option<String>,
}

// ────────────────────────────────────────────────────────────────────────────
// Helpers
// ────────────────────────────────────────────────────────────────────────────

fn bad_upload(e: axum::extract::multipart::MultipartError) -> AppError {
    AppError::Validation(format!("Invalid upload: {}", e.body_text()))
}

async fn read_upload(mut multipart: Multipart) -> Result<Upload, AppError> {
    let mut upload = Upload::default();

    while let Some(field) = multipart.next_field().await.map_err(bad_upload)? {
        let name = field.name().map(str::to_owned);
        match name.as_deref() {
            Some(FILE_FIELD) => upload.file = Some(field.bytes().await.map_err(bad_upload)?),
            Some(API_KEY_FIELD) => upload.api_key = Some(field.text().await.map_err(bad_upload)?),
            _ => {}
        }
    }

    Ok(upload)
}

fn require_file(upload: &Upload) -> Result<&[u8], AppError> {
    match upload.file.as_deref() {
        Some(bytes) if !bytes.is_empty() => Ok(bytes),
        _ => Err(AppError::Validation(format!(
            "multipart field '{FILE_FIELD}' with an .xlsx file is required"
        ))),
    }
}

/// Header first, then the form field, then the configured default. Blank values are ignored.
fn resolve_credential(
    headers: &HeaderMap,
    form_value: Option<&str>,
    default: Option<&str>,
) -> Option<String> {
    let from_header = headers
        .get(API_KEY_HEADER)
        .and_then(|v| v.to_str().ok());

    [from_header, form_value, default]
        .into_iter()
        .flatten()
        .map(str::trim)
        .find(|v| !v.is_empty())
        .map(str::to_owned)
}

fn batch_headers(report: &BatchReport) -> Result<HeaderMap, AppError> {
    let mut headers = HeaderMap::new();
    headers.insert(
        HeaderName::from_static("x-batch-id"),
        HeaderValue::from_str(&report.batch_id.to_string())
            .map_err(|e| AppError::Internal(e.into()))?,
    );
    headers.insert(
        HeaderName::from_static("x-batch-rows"),
        HeaderValue::from(report.rows.len()),
    );
    headers.insert(
        HeaderName::from_static("x-batch-failed-rows"),
        HeaderValue::from(report.failed_count()),
    );
    Ok(headers)
}

fn xlsx_response(
    mut headers: HeaderMap,
    file_name: &str,
    bytes: Vec<u8>,
) -> Result<Response, AppError> {
    headers.insert(
        header::CONTENT_TYPE,
        HeaderValue::from_static(XLSX_CONTENT_TYPE),
    );
    headers.insert(
        header::CONTENT_DISPOSITION,
        HeaderValue::from_str(&format!("attachment; filename=\"{file_name}\""))
            .map_err(|e| AppError::Internal(e.into()))?,
    );
    Ok((headers, bytes).into_response())
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// GET /api/v1/template
///
/// Downloadable example input with two sample candidates.
pub async fn handle_template() -> Result<Response, AppError> {
    let bytes = template_workbook()?;
    xlsx_response(HeaderMap::new(), TEMPLATE_FILE_NAME, bytes)
}

/// POST /api/v1/summaries
///
/// Full pipeline: read table → validate columns → per-row analyze, assemble, generate.
/// Every input row comes back with exactly one summary cell (text or error string).
pub async fn handle_generate_summaries(
    State(state): State<AppState>,
    Query(query): Query<SummaryQuery>,
    headers: HeaderMap,
    multipart: Multipart,
) -> Result<Response, AppError> {
    let upload = read_upload(multipart).await?;
    let file = require_file(&upload)?;

    let credential = resolve_credential(
        &headers,
        upload.api_key.as_deref(),
        state.config.default_api_key.as_deref(),
    )
    .ok_or(AppError::MissingCredential)?;

    let table = read_candidate_table(file)?;
    let rows = table.candidates()?;

    let report = state
        .driver
        .run(&rows, &credential, |event| match event {
            BatchEvent::RowStarted { index, total, name } => {
                info!("[{}/{}] Generating summary for {}...", index + 1, total, name);
            }
            BatchEvent::RowFinished {
                index,
                total,
                failed,
            } => {
                info!("[{}/{}] Row finished (failed: {})", index + 1, total, failed);
            }
        })
        .await;

    let response_headers = batch_headers(&report)?;

    match query.format {
        OutputFormat::Json => Ok((response_headers, Json(report)).into_response()),
        OutputFormat::Xlsx => {
            let bytes = write_results(&table, &report.cells())?;
            xlsx_response(response_headers, RESULTS_FILE_NAME, bytes)
        }
    }
}

/// POST /api/v1/summaries/analyze
///
/// Deterministic classification and selection only. No credential, no external call.
pub async fn handle_analyze(multipart: Multipart) -> Result<Json<AnalyzeResponse>, AppError> {
    let upload = read_upload(multipart).await?;
    let table = read_candidate_table(require_file(&upload)?)?;

    let rows = table
        .candidates()?
        .into_iter()
        .enumerate()
        .map(|(index, row)| {
            let outcome = match row.record.and_then(|record| analyze_candidate(&record)) {
                Ok(analysis) => AnalysisOutcome::Analyzed { analysis },
                Err(e) => AnalysisOutcome::InvalidInput {
                    error: format!("Error: Invalid candidate data. Details: {e}"),
                },
            };
            RowAnalysis {
                index,
                name: row.display_name,
                outcome,
            }
        })
        .collect();

    Ok(Json(AnalyzeResponse {
        generated_at: Utc::now(),
        rows,
    }))
}
