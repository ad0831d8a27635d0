//! Self-correcting generation orchestrator.
//!
//! Generate, validate, and on a validation failure re-invoke generation
//! exactly once with the diagnostics appended to the data block. A second
//! failure is terminal. The orchestrator holds a generator strategy and
//! never knows whether it is live or a stand-in.

use std::sync::Arc;

use serde_json::Value;
use tracing::{error, info, warn};

use crate::client::Generator;
use crate::contract::TaskContract;
use crate::error::AnalysisError;
use crate::prompt::PromptPair;
use crate::validator::{validate, ValidationOutcome};

/// Orchestrates generation and validation with one corrective retry
pub struct Orchestrator {
    generator: Arc<dyn Generator>,
}

impl Orchestrator {
    pub fn new(generator: Arc<dyn Generator>) -> Self {
        Self { generator }
    }

    /// Run one validated generation request.
    ///
    /// Never returns structured data that has not passed validation against
    /// the contract; there is no partial-success path.
    pub async fn run(
        &self,
        prompt: &PromptPair,
        contract: &TaskContract,
    ) -> Result<Value, AnalysisError> {
        let raw = self.generator.generate(prompt).await?;

        let first = match validate(&raw, contract) {
            ValidationOutcome::Valid(value) => {
                info!(contract = contract.name, "output valid on first attempt");
                return Ok(value);
            }
            ValidationOutcome::Invalid(violations) => violations,
        };

        warn!(
            contract = contract.name,
            violations = first.len(),
            "output failed validation, retrying once with feedback"
        );

        let corrected = prompt.with_correction(&first);
        let raw = self.generator.generate(&corrected).await?;

        match validate(&raw, contract) {
            ValidationOutcome::Valid(value) => {
                info!(contract = contract.name, "corrective retry produced valid output");
                Ok(value)
            }
            ValidationOutcome::Invalid(diagnostics) => {
                error!(
                    contract = contract.name,
                    violations = diagnostics.len(),
                    "corrective retry failed validation, giving up"
                );
                Err(AnalysisError::InvalidOutput { attempts: 2, diagnostics })
            }
        }
    }
}
