//! Tier Classifier: maps a score to its tier and verbatim interpretation text.
//!
//! Pure lookups over the static knowledge base. No state, no I/O.

use serde::Serialize;
use thiserror::Error;

use crate::assessment::candidate::CandidateRecord;
use crate::assessment::knowledge_base::{lookup, AssessmentType, Competency, Tier};

/// Invalid candidate input. A row that fails with this must not reach the generator.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ClassificationError {
    #[error("unknown assessment type '{0}' (expected 'Apply' or 'Shape')")]
    UnknownAssessmentType(String),

    #[error("unknown competency '{0}'")]
    UnknownCompetency(String),

    #[error("{competency} score is missing or not a number: '{raw}'")]
    InvalidScore { competency: Competency, raw: String },

    #[error("{competency} score {score} is outside the valid range [1.00, 5.00]")]
    ScoreOutOfRange { competency: Competency, score: f64 },

    #[error("no interpretation text for {competency} at tier {tier:?}")]
    MissingInterpretation { competency: Competency, tier: Tier },
}

/// Classification of a single score.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Classification {
    pub competency: Competency,
    pub score: f64,
    pub tier: Tier,
    pub interpretation: &'static str,
}

/// Classification of all eight scores on a candidate, in column order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CandidateClassification {
    pub assessment_type: AssessmentType,
    pub classifications: Vec<Classification>,
}

impl CandidateClassification {
    pub fn get(&self, competency: Competency) -> Option<&Classification> {
        self.classifications
            .iter()
            .find(|c| c.competency == competency)
    }
}

/// Classifies one score.
///
/// Rejects NaN and anything outside [1.00, 5.00]; never clamps.
pub fn classify(
    assessment_type: AssessmentType,
    competency: Competency,
    score: f64,
) -> Result<Classification, ClassificationError> {
    let tier = Tier::for_score(score)
        .ok_or(ClassificationError::ScoreOutOfRange { competency, score })?;

    let entry = lookup(assessment_type, competency, tier)
        .ok_or(ClassificationError::MissingInterpretation { competency, tier })?;

    Ok(Classification {
        competency,
        score,
        tier,
        interpretation: entry.text,
    })
}

/// Classifies every score on a record. Fails on the first invalid score.
pub fn classify_candidate(
    record: &CandidateRecord,
) -> Result<CandidateClassification, ClassificationError> {
    let classifications = record
        .scores
        .iter()
        .map(|(competency, score)| classify(record.assessment_type, competency, score))
        .collect::<Result<Vec<_>, _>>()?;

    Ok(CandidateClassification {
        assessment_type: record.assessment_type,
        classifications,
    })
}
