//! Prompt Assembler: instruction document + one candidate block.
//!
//! Only raw scores are forwarded. The structured classification stays local;
//! it is used for validation, not sent to the model.

use crate::assessment::candidate::CandidateRecord;
use crate::summary::prompts::{render_instruction_document, CANDIDATE_BLOCK_TEMPLATE};

#[derive(Debug, Clone)]
pub struct PromptAssembler {
    instructions: String,
}

impl Default for PromptAssembler {
    fn default() -> Self {
        Self::new()
    }
}

impl PromptAssembler {
    /// Renders the instruction document once; it is reused for every candidate.
    pub fn new() -> Self {
        Self {
            instructions: render_instruction_document(),
        }
    }

    pub fn instructions(&self) -> &str {
        &self.instructions
    }

    /// Builds the per-candidate input block.
    pub fn candidate_block(record: &CandidateRecord) -> String {
        let scores = record
            .scores
            .iter()
            .map(|(competency, score)| format!("\"{}\": {}", competency.column_name(), score))
            .collect::<Vec<_>>()
            .join(", ");

        // serde_json escapes quotes and control characters in the name.
        let name = serde_json::Value::String(record.name.clone()).to_string();

        // Name goes last so user-supplied text is never re-scanned for placeholders.
        CANDIDATE_BLOCK_TEMPLATE
            .replace("{pronoun}", record.pronoun.label())
            .replace("{assessment_type}", record.assessment_type.as_str())
            .replace("{scores}", &scores)
            .replace("{name}", &name)
    }

    /// Full prompt: instruction document, blank line, candidate block.
    pub fn assemble(&self, record: &CandidateRecord) -> String {
        format!(
            "{}\n\n{}\n",
            self.instructions,
            Self::candidate_block(record)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assessment::candidate::{CandidateScores, CoreScores, PronounSet};
    use crate::assessment::knowledge_base::AssessmentType;

    fn sample_record(name: &str, pronoun: PronounSet) -> CandidateRecord {
        CandidateRecord {
            name: name.to_string(),
            pronoun,
            assessment_type: AssessmentType::Apply,
            scores: CandidateScores {
                overall_leadership: 2.97,
                reasoning: 3.0,
                core: CoreScores {
                    drive: 2.97,
                    learning: 3.15,
                    people: 2.92,
                    strategic: 3.38,
                    execution: 3.9,
                    change: 2.895,
                },
            },
        }
    }

    #[test]
    fn test_candidate_block_matches_example_format() {
        let block = PromptAssembler::candidate_block(&sample_record(
            "Ayesha Obaid Al Mheiri",
            PronounSet::Female,
        ));
        let expected = "**Final Example to Process**\n**INPUT:**\n\
            `{ \"name\": \"Ayesha Obaid Al Mheiri\", \"pronoun\": \"She/Her\", \"assessment_type\": \"Apply\", \
            \"scores\": { \"Overall Leadership\": 2.97, \"Reasoning & Problem Solving\": 3, \
            \"Drive Potential\": 2.97, \"Learning Potential\": 3.15, \"People Potential\": 2.92, \
            \"Strategic Potential\": 3.38, \"Execution Potential\": 3.9, \"Change Potential\": 2.895 } }`";
        assert_eq!(block, expected);
    }

    #[test]
    fn test_candidate_block_escapes_name() {
        let block = PromptAssembler::candidate_block(&sample_record(
            "Jane \"JJ\" {pronoun}",
            PronounSet::Male,
        ));
        assert!(block.contains(r#""name": "Jane \"JJ\" {pronoun}""#));
        assert!(block.contains("\"pronoun\": \"He/His\""));
    }

    #[test]
    fn test_assemble_appends_block_after_instructions() {
        let assembler = PromptAssembler::new();
        let prompt = assembler.assemble(&sample_record("Sub 2", PronounSet::Male));
        assert!(prompt.starts_with(assembler.instructions()));
        let block_start = prompt.find("**Final Example to Process**").unwrap();
        assert!(block_start > assembler.instructions().len());
        assert!(prompt.contains("\"name\": \"Sub 2\""));
    }

    #[test]
    fn test_assemble_does_not_send_classification() {
        let assembler = PromptAssembler::new();
        let prompt = assembler.assemble(&sample_record("Sub 3", PronounSet::Male));
        let block = &prompt[assembler.instructions().len()..];
        assert!(!block.contains("Moderate"));
        assert!(!block.contains("High"));
    }
}
