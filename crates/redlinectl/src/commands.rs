//! CLI command handlers.
//!
//! The detailed failure diagnostics go to the log; users get a generic
//! retry message.

use std::fs;
use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use tracing::error;

use redline_core::{LlmConfig, ReviewService, StandardPlaybook};

pub async fn compare(document: PathBuf, playbook: PathBuf) -> Result<()> {
    let text = read_document(&document)?;
    let playbook: StandardPlaybook = serde_json::from_str(
        &fs::read_to_string(&playbook)
            .with_context(|| format!("failed to read playbook {}", playbook.display()))?,
    )
    .context("playbook file is not valid JSON")?;

    let service = ReviewService::from_config(&LlmConfig::from_env())?;

    match service.compare_against_standard(&text, &playbook).await {
        Ok(report) => {
            println!("{}", serde_json::to_string_pretty(&report)?);
            Ok(())
        }
        Err(e) => {
            error!(error = %e, "comparison analysis failed");
            bail!("analysis failed, please try again");
        }
    }
}

pub async fn risks(document: PathBuf, jurisdiction: Option<String>) -> Result<()> {
    let text = read_document(&document)?;

    let service = ReviewService::from_config(&LlmConfig::from_env())?;

    match service.find_risks(&text, jurisdiction.as_deref()).await {
        Ok(report) => {
            println!("{}", serde_json::to_string_pretty(&report)?);
            Ok(())
        }
        Err(e) => {
            error!(error = %e, "risk analysis failed");
            bail!("analysis failed, please try again");
        }
    }
}

fn read_document(path: &PathBuf) -> Result<String> {
    fs::read_to_string(path).with_context(|| format!("failed to read document {}", path.display()))
}
