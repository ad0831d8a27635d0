//! Error taxonomy for the generation pipeline.
//!
//! Failure kinds are classified where the remote call is made, so retry
//! logic operates on a closed enumeration instead of inspecting a transport
//! library's error types. All failures are local to one request.

use crate::validator::Violation;

/// Failures from the generation service or the transport in front of it
#[derive(Debug, Clone, thiserror::Error)]
pub enum GenerateError {
    #[error("generation service rate-limited the request")]
    RateLimited,

    #[error("generation request timed out after {seconds}s")]
    Timeout { seconds: u64 },

    #[error("generation service error {status}: {message}")]
    Upstream { status: u16, message: String },

    #[error("network failure reaching generation service: {0}")]
    Network(String),

    #[error("generation service rejected the credentials: {0}")]
    Auth(String),

    #[error("generation service rejected the request: {0}")]
    BadRequest(String),

    #[error("could not decode generation service response: {0}")]
    Protocol(String),

    #[error("generation service returned an empty response")]
    EmptyResponse,

    #[error("generation failed after {attempts} attempts: {last}")]
    Exhausted { attempts: u32, last: String },
}

impl GenerateError {
    /// Whether the retry loop may try again after this failure
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            GenerateError::RateLimited
                | GenerateError::Timeout { .. }
                | GenerateError::Upstream { .. }
                | GenerateError::Network(_)
                | GenerateError::EmptyResponse
        )
    }
}

/// Terminal failures surfaced to the caller of an analysis
#[derive(Debug, thiserror::Error)]
pub enum AnalysisError {
    #[error(transparent)]
    Generation(#[from] GenerateError),

    #[error("generated output failed validation after {attempts} attempts: {}", format_diagnostics(.diagnostics))]
    InvalidOutput {
        attempts: u32,
        diagnostics: Vec<Violation>,
    },

    #[error("validated output did not match the report type: {0}")]
    Decode(#[from] serde_json::Error),
}

fn format_diagnostics(diagnostics: &[Violation]) -> String {
    diagnostics
        .iter()
        .map(|v| v.to_string())
        .collect::<Vec<_>>()
        .join("; ")
}
