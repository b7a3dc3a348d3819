//! Batch Driver: runs every row through analyze → assemble → generate.
//!
//! Rows are processed sequentially and in input order. A bad row never stops
//! the batch: invalid input and generator failures both become an error
//! string in that row's output cell.

use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::assessment::analyze_candidate;
use crate::assessment::candidate::CandidateRow;
use crate::assessment::knowledge_base::Competency;
use crate::llm_client::{LlmError, SummaryGenerator};
use crate::summary::assembler::PromptAssembler;

/// What happened to a single row.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum RowOutcome {
    Generated { summary: String },
    InvalidInput { error: String },
    ServiceError { error: String },
}

impl RowOutcome {
    fn invalid_input(e: impl std::fmt::Display) -> Self {
        RowOutcome::InvalidInput {
            error: format!("Error: Invalid candidate data. Details: {e}"),
        }
    }

    fn service_error(e: &LlmError) -> Self {
        RowOutcome::ServiceError {
            error: format!("Error: Could not generate summary. Details: {e}"),
        }
    }

    /// Text written to the summary column.
    pub fn cell_text(&self) -> &str {
        match self {
            RowOutcome::Generated { summary } => summary,
            RowOutcome::InvalidInput { error } | RowOutcome::ServiceError { error } => error,
        }
    }

    pub fn is_failure(&self) -> bool {
        !matches!(self, RowOutcome::Generated { .. })
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct RowResult {
    /// Zero-based position among the data rows.
    pub index: usize,
    pub name: String,
    #[serde(flatten)]
    pub outcome: RowOutcome,
}

#[derive(Debug, Clone, Serialize)]
pub struct BatchReport {
    pub batch_id: Uuid,
    pub started_at: DateTime<Utc>,
    pub completed_at: DateTime<Utc>,
    /// One entry per input row, same order.
    pub rows: Vec<RowResult>,
}

impl BatchReport {
    pub fn failed_count(&self) -> usize {
        self.rows.iter().filter(|r| r.outcome.is_failure()).count()
    }

    pub fn generated_count(&self) -> usize {
        self.rows.len() - self.failed_count()
    }

    /// Summary cells in row order.
    pub fn cells(&self) -> Vec<String> {
        self.rows
            .iter()
            .map(|r| r.outcome.cell_text().to_string())
            .collect()
    }
}

/// Progress notifications handed to the caller's callback.
#[derive(Debug, Clone, PartialEq)]
pub enum BatchEvent {
    RowStarted {
        index: usize,
        total: usize,
        name: String,
    },
    RowFinished {
        index: usize,
        total: usize,
        failed: bool,
    },
}

#[derive(Clone)]
pub struct BatchDriver {
    assembler: PromptAssembler,
    generator: Arc<dyn SummaryGenerator>,
    row_timeout: Duration,
}

impl BatchDriver {
    pub fn new(
        assembler: PromptAssembler,
        generator: Arc<dyn SummaryGenerator>,
        row_timeout: Duration,
    ) -> Self {
        Self {
            assembler,
            generator,
            row_timeout,
        }
    }

    /// Processes every row, reporting progress through `on_event`.
    ///
    /// Always returns exactly one result per input row.
    pub async fn run<F>(&self, rows: &[CandidateRow], credential: &str, mut on_event: F) -> BatchReport
    where
        F: FnMut(BatchEvent) + Send,
    {
        let batch_id = Uuid::new_v4();
        let started_at = Utc::now();
        let total = rows.len();
        info!(%batch_id, total, "Starting summary batch");

        let mut results = Vec::with_capacity(total);
        for (index, row) in rows.iter().enumerate() {
            on_event(BatchEvent::RowStarted {
                index,
                total,
                name: row.display_name.clone(),
            });

            let outcome = self.process_row(row, credential).await;
            if let RowOutcome::InvalidInput { error } | RowOutcome::ServiceError { error } = &outcome {
                warn!(%batch_id, index, name = %row.display_name, "{error}");
            }

            on_event(BatchEvent::RowFinished {
                index,
                total,
                failed: outcome.is_failure(),
            });

            results.push(RowResult {
                index,
                name: row.display_name.clone(),
                outcome,
            });
        }

        let report = BatchReport {
            batch_id,
            started_at,
            completed_at: Utc::now(),
            rows: results,
        };
        info!(
            %batch_id,
            generated = report.generated_count(),
            failed = report.failed_count(),
            "Summary batch complete"
        );
        report
    }

    async fn process_row(&self, row: &CandidateRow, credential: &str) -> RowOutcome {
        let record = match &row.record {
            Ok(record) => record,
            Err(e) => return RowOutcome::invalid_input(e),
        };

        // Validates every score before anything is sent out.
        let analysis = match analyze_candidate(record) {
            Ok(analysis) => analysis,
            Err(e) => return RowOutcome::invalid_input(e),
        };
        debug!(
            name = %record.name,
            overall = ?analysis
                .classification
                .get(Competency::OverallLeadership)
                .map(|c| c.tier),
            strengths = ?analysis.selection.strengths,
            development = ?analysis.selection.development_areas,
            unflagged = ?analysis.selection.unflagged(),
            "Candidate analysed"
        );

        let prompt = self.assembler.assemble(record);
        let generated =
            match tokio::time::timeout(self.row_timeout, self.generator.generate(&prompt, credential))
                .await
            {
                Ok(result) => result,
                Err(_) => Err(LlmError::Timeout {
                    secs: self.row_timeout.as_secs(),
                }),
            };

        match generated {
            Ok(summary) => RowOutcome::Generated { summary },
            Err(e) => RowOutcome::service_error(&e),
        }
    }
}
