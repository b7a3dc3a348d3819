// Deterministic assessment logic: knowledge base, tier classification and
// strength/development selection. No I/O and no LLM calls in this module.

pub mod candidate;
pub mod classifier;
pub mod knowledge_base;
pub mod selector;

use serde::Serialize;

use crate::assessment::candidate::CandidateRecord;
use crate::assessment::classifier::{classify_candidate, CandidateClassification, ClassificationError};
use crate::assessment::selector::{select, CompetencyFlag, SelectionResult};

/// Everything the deterministic layer knows about one candidate.
#[derive(Debug, Clone, Serialize)]
pub struct CandidateAnalysis {
    pub classification: CandidateClassification,
    pub selection: SelectionResult,
    /// Every core competency with its flag; the two unselected ones are `unflagged`.
    pub flags: Vec<CompetencyFlag>,
}

/// Classifies all eight scores and selects strengths/development areas.
pub fn analyze_candidate(record: &CandidateRecord) -> Result<CandidateAnalysis, ClassificationError> {
    let classification = classify_candidate(record)?;
    let selection = select(&record.scores.core);
    let flags = selection.flags(&record.scores.core);
    Ok(CandidateAnalysis {
        classification,
        selection,
        flags,
    })
}
