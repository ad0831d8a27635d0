//! Prompt composition - pure rendering of instruction/data pairs.
//!
//! No I/O, no randomness. The instruction block enumerates the decision
//! categories, the severity scale, and the structural contract rendered from
//! the same [`TaskContract`] value the validator checks against.

use crate::contract::TaskContract;
use crate::schemas::{DeviationKind, RiskCategory, Severity, StandardPlaybook};
use crate::validator::Violation;

/// The instruction/data pair sent to the generation service
#[derive(Debug, Clone, PartialEq)]
pub struct PromptPair {
    pub instruction: String,
    pub data: String,
}

impl PromptPair {
    /// Derive a corrected pair by appending validator diagnostics to the data
    /// block. The original pair is untouched.
    pub fn with_correction(&self, diagnostics: &[Violation]) -> PromptPair {
        let joined = diagnostics
            .iter()
            .map(|v| v.to_string())
            .collect::<Vec<_>>()
            .join("\n");
        PromptPair {
            instruction: self.instruction.clone(),
            data: format!(
                "{}\n\nYour previous response had validation errors:\n{}\n\
                Fix these issues and return valid output matching the required contract.",
                self.data, joined
            ),
        }
    }
}

/// Compose the prompt for comparing a document against a standard playbook
pub fn compose_comparison_prompt(document: &str, playbook: &StandardPlaybook) -> PromptPair {
    let contract = TaskContract::comparison();

    let mut instruction = String::new();
    instruction.push_str(
        "You are a contract review assistant performing decision-sensitive legal analysis.\n\n\
         ROLE: Compare the contract document against each standard clause and report\n\
         the outcome for every clause, in clause order.\n\n",
    );
    instruction.push_str(&format!(
        "For each standard clause, classify the document as exactly one of:\n{}\n\n",
        DeviationKind::ALL.join("|")
    ));
    instruction.push_str(&format!("Severity scale: {}\n\n", Severity::ALL.join("|")));
    push_format_section(&mut instruction, &contract);

    let mut data = String::new();
    push_clause_section(&mut data, playbook);
    data.push_str("CONTRACT DOCUMENT:\n");
    data.push_str(document);

    PromptPair { instruction, data }
}

/// Compose the prompt for a general risk-finding analysis
pub fn compose_risk_prompt(document: &str, jurisdiction: Option<&str>) -> PromptPair {
    let contract = TaskContract::risk();

    let mut instruction = String::new();
    instruction.push_str(
        "You are a contract review assistant performing decision-sensitive legal analysis.\n\n\
         ROLE: Identify every material risk in the contract document and report\n\
         the findings in document order.\n\n",
    );
    instruction.push_str(&format!(
        "Classify each finding into exactly one category:\n{}\n\n",
        RiskCategory::ALL.join("|")
    ));
    instruction.push_str(&format!("Severity scale: {}\n\n", Severity::ALL.join("|")));
    push_format_section(&mut instruction, &contract);

    let mut data = String::new();
    if let Some(jurisdiction) = jurisdiction {
        data.push_str(&format!("JURISDICTION: {}\n\n", jurisdiction));
    }
    data.push_str("CONTRACT DOCUMENT:\n");
    data.push_str(document);

    PromptPair { instruction, data }
}

fn push_format_section(instruction: &mut String, contract: &TaskContract) {
    instruction.push_str("RESPONSE FORMAT (STRICT JSON - NO PROSE)\n");
    instruction.push_str(&format!(
        "Return a single JSON object matching the \"{}\" contract:\n{}\n\n",
        contract.name,
        contract.template()
    ));
    instruction.push_str("FIELD RULES\n");
    instruction.push_str(&contract.describe());
    instruction.push_str(
        "\nDo not wrap the object in markdown fences and do not add commentary.\n",
    );
}

fn push_clause_section(data: &mut String, playbook: &StandardPlaybook) {
    if playbook.clauses.is_empty() {
        data.push_str(
            "No standard clauses are defined for this review. \
             Report zero total clauses and an empty deviation list.\n\n",
        );
        return;
    }

    data.push_str(&format!("STANDARD CLAUSES ({}):\n", playbook.name));
    for (i, clause) in playbook.clauses.iter().enumerate() {
        data.push_str(&format!(
            "{}. {} [{}]\n   Expected: {}\n",
            i + 1,
            clause.title,
            clause.importance.as_str(),
            clause.expected_text
        ));
    }
    data.push('\n');
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schemas::{ClauseImportance, StandardClause};

    fn sample_playbook() -> StandardPlaybook {
        StandardPlaybook {
            name: "NDA Playbook".to_string(),
            clauses: vec![
                StandardClause {
                    title: "Confidentiality".to_string(),
                    expected_text: "Each party shall keep information confidential.".to_string(),
                    importance: ClauseImportance::Critical,
                },
                StandardClause {
                    title: "Term".to_string(),
                    expected_text: "Obligations survive for five years.".to_string(),
                    importance: ClauseImportance::Standard,
                },
            ],
        }
    }

    #[test]
    fn test_comparison_prompt_enumerates_vocabularies() {
        let prompt = compose_comparison_prompt("The parties agree...", &sample_playbook());
        assert!(prompt.instruction.contains("match|missing|weaker|stronger|different"));
        assert!(prompt.instruction.contains("critical|major|minor|info"));
        assert!(prompt.instruction.contains("\"comparison\" contract"));
        assert!(prompt.instruction.contains("\"overallScore\""));
    }

    #[test]
    fn test_comparison_data_lists_clauses_in_order() {
        let prompt = compose_comparison_prompt("The parties agree...", &sample_playbook());
        let confidentiality = prompt.data.find("1. Confidentiality [critical]").unwrap();
        let term = prompt.data.find("2. Term [standard]").unwrap();
        assert!(confidentiality < term);
        assert!(prompt.data.contains("CONTRACT DOCUMENT:\nThe parties agree..."));
    }

    #[test]
    fn test_zero_clause_playbook_renders_explicit_condition() {
        let playbook = StandardPlaybook { name: "Empty".to_string(), clauses: vec![] };
        let prompt = compose_comparison_prompt("Some document", &playbook);
        assert!(prompt.data.contains("No standard clauses are defined"));
        assert!(!prompt.data.contains("STANDARD CLAUSES ("));
    }

    #[test]
    fn test_empty_document_still_composes() {
        let prompt = compose_comparison_prompt("", &sample_playbook());
        assert!(prompt.data.ends_with("CONTRACT DOCUMENT:\n"));
        assert!(!prompt.instruction.is_empty());
    }

    #[test]
    fn test_risk_prompt_includes_jurisdiction_when_present() {
        let with = compose_risk_prompt("Some document", Some("Norway"));
        assert!(with.data.starts_with("JURISDICTION: Norway"));

        let without = compose_risk_prompt("Some document", None);
        assert!(!without.data.contains("JURISDICTION"));
        assert!(without.instruction.contains("\"risk\" contract"));
    }

    #[test]
    fn test_correction_appends_diagnostics_without_mutating_original() {
        let original = compose_risk_prompt("Some document", None);
        let diagnostics = vec![
            Violation::new("overallScore", "missing required field"),
            Violation::new("findings[0].severity", "\"huge\" is not one of critical|major|minor|info"),
        ];

        let corrected = original.with_correction(&diagnostics);

        assert_eq!(corrected.instruction, original.instruction);
        assert!(corrected.data.contains("Some document"));
        assert!(corrected.data.contains("Your previous response had validation errors:"));
        assert!(corrected.data.contains("overallScore: missing required field"));
        assert!(corrected.data.contains("findings[0].severity"));
        assert!(!original.data.contains("validation errors"));
    }
}
