//! Candidate records: one parsed input row.

use serde::Serialize;

use crate::assessment::classifier::ClassificationError;
use crate::assessment::knowledge_base::{AssessmentType, Competency, CoreCompetency};

/// Pronoun set used when the summary refers to the candidate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum PronounSet {
    Male,
    Female,
}

impl PronounSet {
    /// "F" in any case maps to the female set; everything else, blank included, to male.
    pub fn from_gender(gender: &str) -> Self {
        if gender.eq_ignore_ascii_case("F") {
            PronounSet::Female
        } else {
            PronounSet::Male
        }
    }

    /// Label handed to the generator, e.g. `She/Her`.
    pub fn label(self) -> &'static str {
        match self {
            PronounSet::Male => "He/His",
            PronounSet::Female => "She/Her",
        }
    }
}

/// Scores for the six core competencies.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CoreScores {
    pub drive: f64,
    pub learning: f64,
    pub people: f64,
    pub strategic: f64,
    pub execution: f64,
    pub change: f64,
}

impl CoreScores {
    pub fn get(&self, competency: CoreCompetency) -> f64 {
        match competency {
            CoreCompetency::Drive => self.drive,
            CoreCompetency::Learning => self.learning,
            CoreCompetency::People => self.people,
            CoreCompetency::Strategic => self.strategic,
            CoreCompetency::Execution => self.execution,
            CoreCompetency::Change => self.change,
        }
    }

    /// Yields (competency, score) pairs in canonical order.
    pub fn iter(&self) -> impl Iterator<Item = (CoreCompetency, f64)> + '_ {
        CoreCompetency::CANONICAL_ORDER
            .into_iter()
            .map(move |c| (c, self.get(c)))
    }
}

/// All eight scores on a candidate record.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CandidateScores {
    pub overall_leadership: f64,
    pub reasoning: f64,
    pub core: CoreScores,
}

impl CandidateScores {
    /// Builds the score set by resolving each competency through `score_of`,
    /// in column order. Stops at the first error.
    pub fn try_from_fn<F>(mut score_of: F) -> Result<Self, ClassificationError>
    where
        F: FnMut(Competency) -> Result<f64, ClassificationError>,
    {
        let overall_leadership = score_of(Competency::OverallLeadership)?;
        let reasoning = score_of(Competency::ReasoningProblemSolving)?;

        let mut core = |c: CoreCompetency| score_of(Competency::Core(c));
        let core_scores = CoreScores {
            drive: core(CoreCompetency::Drive)?,
            learning: core(CoreCompetency::Learning)?,
            people: core(CoreCompetency::People)?,
            strategic: core(CoreCompetency::Strategic)?,
            execution: core(CoreCompetency::Execution)?,
            change: core(CoreCompetency::Change)?,
        };
        Ok(CandidateScores {
            overall_leadership,
            reasoning,
            core: core_scores,
        })
    }

    pub fn get(&self, competency: Competency) -> f64 {
        match competency {
            Competency::OverallLeadership => self.overall_leadership,
            Competency::ReasoningProblemSolving => self.reasoning,
            Competency::Core(core) => self.core.get(core),
        }
    }

    /// Yields (competency, score) pairs in input-table column order.
    pub fn iter(&self) -> impl Iterator<Item = (Competency, f64)> + '_ {
        Competency::ALL.into_iter().map(move |c| (c, self.get(c)))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CandidateRecord {
    pub name: String,
    pub pronoun: PronounSet,
    pub assessment_type: AssessmentType,
    pub scores: CandidateScores,
}

/// One input row as the batch driver sees it: a display name plus either a
/// parsed record or the reason the row could not be parsed.
#[derive(Debug, Clone)]
pub struct CandidateRow {
    pub display_name: String,
    pub record: Result<CandidateRecord, ClassificationError>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_gender_f_any_case_is_female() {
        assert_eq!(PronounSet::from_gender("F"), PronounSet::Female);
        assert_eq!(PronounSet::from_gender("f"), PronounSet::Female);
    }

    #[test]
    fn test_other_genders_default_to_male() {
        for gender in ["M", "m", "", "Female", "X", "nan", " F"] {
            assert_eq!(
                PronounSet::from_gender(gender),
                PronounSet::Male,
                "gender {gender:?} should map to male"
            );
        }
    }

    #[test]
    fn test_pronoun_labels() {
        assert_eq!(PronounSet::Male.label(), "He/His");
        assert_eq!(PronounSet::Female.label(), "She/Her");
    }

    #[test]
    fn test_try_from_fn_maps_every_column() {
        let scores = CandidateScores::try_from_fn(|c| {
            Ok(match c {
                Competency::OverallLeadership => 1.0,
                Competency::ReasoningProblemSolving => 2.0,
                Competency::Core(CoreCompetency::Drive) => 3.0,
                Competency::Core(CoreCompetency::Learning) => 3.1,
                Competency::Core(CoreCompetency::People) => 3.2,
                Competency::Core(CoreCompetency::Strategic) => 3.3,
                Competency::Core(CoreCompetency::Execution) => 3.4,
                Competency::Core(CoreCompetency::Change) => 3.5,
            })
        })
        .unwrap();

        let values: Vec<f64> = scores.iter().map(|(_, s)| s).collect();
        assert_eq!(values, vec![1.0, 2.0, 3.0, 3.1, 3.2, 3.3, 3.4, 3.5]);
        assert_eq!(scores.core.get(CoreCompetency::Change), 3.5);
    }

    #[test]
    fn test_try_from_fn_propagates_first_error() {
        let result = CandidateScores::try_from_fn(|c| {
            if c == Competency::Core(CoreCompetency::People) {
                Err(ClassificationError::InvalidScore {
                    competency: c,
                    raw: "n/a".to_string(),
                })
            } else {
                Ok(3.0)
            }
        });
        assert!(matches!(
            result,
            Err(ClassificationError::InvalidScore { competency, .. })
                if competency == Competency::Core(CoreCompetency::People)
        ));
    }
}
