//! Selector: picks two strengths and two development areas from the core scores.
//!
//! Ranking is by raw value, never by tier. Ties resolve by canonical order
//! (Drive, Learning, People, Strategic, Execution, Change): earlier wins.
//! Strengths are picked first; development areas come from the remaining four,
//! so the two sets are always disjoint.

use serde::Serialize;

use crate::assessment::candidate::CoreScores;
use crate::assessment::knowledge_base::CoreCompetency;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SelectionFlag {
    Strength,
    Development,
    Unflagged,
}

/// One core competency with its score and selection flag.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CompetencyFlag {
    pub competency: CoreCompetency,
    pub score: f64,
    pub flag: SelectionFlag,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SelectionResult {
    /// Highest first.
    pub strengths: [CoreCompetency; 2],
    /// Lowest first.
    pub development_areas: [CoreCompetency; 2],
}

impl SelectionResult {
    pub fn flag_for(&self, competency: CoreCompetency) -> SelectionFlag {
        if self.strengths.contains(&competency) {
            SelectionFlag::Strength
        } else if self.development_areas.contains(&competency) {
            SelectionFlag::Development
        } else {
            SelectionFlag::Unflagged
        }
    }

    /// The two competencies that are neither strength nor development area.
    pub fn unflagged(&self) -> Vec<CoreCompetency> {
        CoreCompetency::CANONICAL_ORDER
            .into_iter()
            .filter(|c| self.flag_for(*c) == SelectionFlag::Unflagged)
            .collect()
    }

    /// All six competencies in canonical order, each flagged.
    pub fn flags(&self, scores: &CoreScores) -> Vec<CompetencyFlag> {
        scores
            .iter()
            .map(|(competency, score)| CompetencyFlag {
                competency,
                score,
                flag: self.flag_for(competency),
            })
            .collect()
    }
}

/// Selects strengths and development areas.
///
/// All-low score sets still yield two strengths; softening the wording for
/// them is left to the generator's instructions.
pub fn select(scores: &CoreScores) -> SelectionResult {
    // `iter()` yields canonical order and `sort_by` is stable, so ties keep it.
    let mut descending: Vec<(CoreCompetency, f64)> = scores.iter().collect();
    descending.sort_by(|a, b| b.1.total_cmp(&a.1));
    let strengths = [descending[0].0, descending[1].0];

    let mut ascending: Vec<(CoreCompetency, f64)> = scores
        .iter()
        .filter(|(c, _)| !strengths.contains(c))
        .collect();
    ascending.sort_by(|a, b| a.1.total_cmp(&b.1));
    let development_areas = [ascending[0].0, ascending[1].0];

    SelectionResult {
        strengths,
        development_areas,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assessment::knowledge_base::CoreCompetency::*;

    fn scores(values: [f64; 6]) -> CoreScores {
        CoreScores {
            drive: values[0],
            learning: values[1],
            people: values[2],
            strategic: values[3],
            execution: values[4],
            change: values[5],
        }
    }

    #[test]
    fn test_distinct_scores() {
        let result = select(&scores([3.0, 1.5, 4.2, 2.0, 4.8, 3.6]));
        assert_eq!(result.strengths, [Execution, People]);
        assert_eq!(result.development_areas, [Learning, Strategic]);
        assert_eq!(result.unflagged(), vec![Drive, Change]);
    }

    #[test]
    fn test_high_scores_with_ties_use_canonical_order() {
        // Drive 4, Learning 3, People 4, Strategic 4, Execution 5, Change 4
        let result = select(&scores([4.0, 3.0, 4.0, 4.0, 5.0, 4.0]));
        assert_eq!(result.strengths, [Execution, Drive]);
        assert_eq!(result.development_areas, [Learning, People]);
    }

    #[test]
    fn test_all_low_still_selects_two_strengths() {
        let result = select(&scores([2.0; 6]));
        assert_eq!(result.strengths, [Drive, Learning]);
        assert_eq!(result.development_areas, [People, Strategic]);
    }

    #[test]
    fn test_all_tied_falls_back_to_canonical_order() {
        let result = select(&scores([3.0; 6]));
        assert_eq!(result.strengths, [Drive, Learning]);
        assert_eq!(result.development_areas, [People, Strategic]);
        assert_eq!(result.unflagged(), vec![Execution, Change]);
    }

    #[test]
    fn test_moderate_scores_pick_relative_extremes() {
        // Mixed/moderate profile: Drive 2.97, Learning 3.15, People 2.92,
        // Strategic 3.38, Execution 3.9, Change 2.895
        let result = select(&scores([2.97, 3.15, 2.92, 3.38, 3.9, 2.895]));
        assert_eq!(result.strengths, [Execution, Strategic]);
        assert_eq!(result.development_areas, [Change, People]);
    }

    #[test]
    fn test_strengths_and_development_are_disjoint() {
        let profiles = [
            [1.0, 1.0, 1.0, 1.0, 1.0, 1.0],
            [5.0, 5.0, 5.0, 5.0, 5.0, 5.0],
            [1.0, 5.0, 1.0, 5.0, 1.0, 5.0],
            [2.22, 2.55, 2.36, 2.475, 1.43, 2.75],
            [4.5, 3.1, 4.0, 3.8, 4.2, 3.9],
            [5.0, 1.0, 1.0, 1.0, 1.0, 1.0],
        ];
        for values in profiles {
            let result = select(&scores(values));
            for s in result.strengths {
                assert!(
                    !result.development_areas.contains(&s),
                    "{s} flagged as both for {values:?}"
                );
            }
            assert_ne!(result.strengths[0], result.strengths[1]);
            assert_ne!(result.development_areas[0], result.development_areas[1]);
            assert_eq!(result.unflagged().len(), 2);
        }
    }

    #[test]
    fn test_selection_is_deterministic() {
        let values = [3.0, 3.0, 2.0, 2.0, 3.0, 2.0];
        let first = select(&scores(values));
        for _ in 0..10 {
            assert_eq!(select(&scores(values)), first);
        }
    }

    #[test]
    fn test_flags_cover_all_six_in_canonical_order() {
        let core = scores([4.0, 3.0, 4.0, 4.0, 5.0, 4.0]);
        let flags = select(&core).flags(&core);

        let order: Vec<CoreCompetency> = flags.iter().map(|f| f.competency).collect();
        assert_eq!(order, CoreCompetency::CANONICAL_ORDER.to_vec());
        assert_eq!(flags[4].score, 5.0);

        let count = |flag: SelectionFlag| flags.iter().filter(|f| f.flag == flag).count();
        assert_eq!(count(SelectionFlag::Strength), 2);
        assert_eq!(count(SelectionFlag::Development), 2);
        assert_eq!(count(SelectionFlag::Unflagged), 2);
    }

    #[test]
    fn test_flag_for() {
        let result = select(&scores([4.0, 3.0, 4.0, 4.0, 5.0, 4.0]));
        assert_eq!(result.flag_for(Execution), SelectionFlag::Strength);
        assert_eq!(result.flag_for(Learning), SelectionFlag::Development);
        assert_eq!(result.flag_for(Change), SelectionFlag::Unflagged);
    }
}
