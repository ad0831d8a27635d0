//! Review service - the inbound contract for request handlers.
//!
//! Built once at startup: credential presence selects the live client or the
//! deterministic stand-in, and the chosen strategy is injected into the
//! orchestrator. Each call composes a prompt, runs the validated generation
//! loop, and decodes the result into a typed report.

use std::sync::Arc;

use anyhow::Result;
use tracing::{error, info};
use uuid::Uuid;

use crate::client::{Generator, HttpGenerator};
use crate::config::LlmConfig;
use crate::contract::TaskContract;
use crate::error::AnalysisError;
use crate::orchestrator::Orchestrator;
use crate::prompt::{compose_comparison_prompt, compose_risk_prompt};
use crate::schemas::{ComparisonReport, RiskReport, StandardPlaybook};
use crate::standin::StandinGenerator;

/// Contract analysis service with an injected generation strategy
pub struct ReviewService {
    orchestrator: Orchestrator,
    comparison: TaskContract,
    risk: TaskContract,
}

impl ReviewService {
    pub fn new(generator: Arc<dyn Generator>) -> Self {
        Self {
            orchestrator: Orchestrator::new(generator),
            comparison: TaskContract::comparison(),
            risk: TaskContract::risk(),
        }
    }

    /// Build the service from configuration, selecting the generation
    /// strategy once. Callers never branch on configuration again.
    pub fn from_config(config: &LlmConfig) -> Result<Self> {
        let generator: Arc<dyn Generator> = if config.has_credentials() {
            info!(model = %config.model, endpoint = %config.endpoint, "using live generation client");
            Arc::new(HttpGenerator::new(config)?)
        } else {
            info!("no service credential configured, using deterministic stand-in generator");
            Arc::new(StandinGenerator::new())
        };
        Ok(Self::new(generator))
    }

    /// Compare a contract document against a standard playbook
    pub async fn compare_against_standard(
        &self,
        document: &str,
        playbook: &StandardPlaybook,
    ) -> Result<ComparisonReport, AnalysisError> {
        let request_id = Uuid::new_v4();
        info!(
            %request_id,
            playbook = %playbook.name,
            clauses = playbook.clauses.len(),
            document_chars = document.len(),
            "starting comparison analysis"
        );

        let prompt = compose_comparison_prompt(document, playbook);
        let value = self
            .orchestrator
            .run(&prompt, &self.comparison)
            .await
            .inspect_err(|e| error!(%request_id, error = %e, "comparison analysis failed"))?;

        let report: ComparisonReport = serde_json::from_value(value)?;
        info!(
            %request_id,
            score = report.overall_score,
            deviations = report.deviations.len(),
            "comparison analysis complete"
        );
        Ok(report)
    }

    /// Scan a contract document for risk findings
    pub async fn find_risks(
        &self,
        document: &str,
        jurisdiction: Option<&str>,
    ) -> Result<RiskReport, AnalysisError> {
        let request_id = Uuid::new_v4();
        info!(
            %request_id,
            jurisdiction = jurisdiction.unwrap_or("unspecified"),
            document_chars = document.len(),
            "starting risk analysis"
        );

        let prompt = compose_risk_prompt(document, jurisdiction);
        let value = self
            .orchestrator
            .run(&prompt, &self.risk)
            .await
            .inspect_err(|e| error!(%request_id, error = %e, "risk analysis failed"))?;

        let report: RiskReport = serde_json::from_value(value)?;
        info!(
            %request_id,
            score = report.overall_score,
            findings = report.findings.len(),
            "risk analysis complete"
        );
        Ok(report)
    }
}
