//! Deterministic stand-in generator.
//!
//! Substitutes for the live generation client when no service credential is
//! configured: returns a fixed, schema-valid sample payload so the rest of
//! the pipeline (composer, orchestrator, validator) runs identically in both
//! modes. Routing keys off the contract name the composer embeds in the
//! instruction block.

use async_trait::async_trait;
use serde_json::{json, Value};
use tracing::info;

use crate::client::Generator;
use crate::error::GenerateError;
use crate::prompt::PromptPair;

/// Generator that answers from registered sample payloads
pub struct StandinGenerator {
    samples: Vec<(String, Value)>,
}

impl StandinGenerator {
    /// Stand-in preloaded with samples for the built-in contracts
    pub fn new() -> Self {
        Self {
            samples: vec![
                ("comparison".to_string(), comparison_sample()),
                ("risk".to_string(), risk_sample()),
            ],
        }
    }

    /// Register a sample payload for an additional contract
    pub fn with_sample(mut self, contract_name: &str, payload: Value) -> Self {
        self.samples.push((contract_name.to_string(), payload));
        self
    }

    fn sample_for(&self, instruction: &str) -> Option<&Value> {
        self.samples
            .iter()
            .find(|(name, _)| instruction.contains(&format!("\"{}\" contract", name)))
            .map(|(_, payload)| payload)
    }
}

impl Default for StandinGenerator {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Generator for StandinGenerator {
    async fn generate(&self, prompt: &PromptPair) -> Result<String, GenerateError> {
        match self.sample_for(&prompt.instruction) {
            Some(payload) => {
                info!("stand-in generator answering with sample payload");
                Ok(payload.to_string())
            }
            None => Err(GenerateError::BadRequest(
                "no stand-in sample matches the requested contract".to_string(),
            )),
        }
    }
}

fn comparison_sample() -> Value {
    json!({
        "overallScore": 78,
        "totalClauses": 2,
        "deviations": [
            {
                "clauseTitle": "Confidentiality",
                "standardText": "Each party shall keep the other party's information confidential.",
                "documentText": "Recipient may disclose information after written notice.",
                "deviationType": "weaker",
                "severity": "major",
                "explanation": "The document allows disclosure after notice, weakening the mutual obligation.",
                "suggestedText": "Each party shall keep the other party's information confidential.",
                "location": "Section 7.1"
            },
            {
                "clauseTitle": "Governing Law",
                "standardText": "This agreement is governed by the laws of the agreed jurisdiction.",
                "documentText": "This agreement is governed by the laws of the agreed jurisdiction.",
                "deviationType": "match",
                "severity": "info",
                "explanation": "The governing-law clause matches the standard wording.",
                "location": "Section 12"
            }
        ]
    })
}

fn risk_sample() -> Value {
    json!({
        "overallScore": 64,
        "totalFindings": 2,
        "documentType": "services agreement",
        "findings": [
            {
                "title": "Uncapped liability",
                "category": "liability",
                "severity": "critical",
                "excerpt": "Supplier's liability under this agreement shall be unlimited.",
                "explanation": "There is no cap on damages, exposing the supplier to unbounded claims.",
                "suggestedAlternative": "Cap aggregate liability at the fees paid in the preceding twelve months.",
                "location": "Section 9.2"
            },
            {
                "title": "Evergreen renewal",
                "category": "termination",
                "severity": "minor",
                "excerpt": "The term renews automatically for successive one-year periods.",
                "explanation": "Automatic renewal without a notice window can lock the customer in.",
                "location": "Section 3.4"
            }
        ]
    })
}
