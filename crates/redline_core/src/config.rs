//! Generation service configuration, read once at startup.
//!
//! Credential presence decides live vs stand-in generation. The decision is
//! made when the service is constructed, never per call.

use serde::{Deserialize, Serialize};

pub const DEFAULT_ENDPOINT: &str = "https://api.openai.com";
pub const DEFAULT_MODEL: &str = "gpt-4o-mini";
const DEFAULT_TIMEOUT_SECS: u64 = 60;

/// Generation service configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LlmConfig {
    pub endpoint: String,
    pub model: String,
    pub api_key: Option<String>,
    /// Per-attempt network timeout
    pub timeout_secs: u64,
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            model: DEFAULT_MODEL.to_string(),
            api_key: None,
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }
}

impl LlmConfig {
    /// Load configuration from the environment.
    ///
    /// `REDLINE_LLM_ENDPOINT`, `REDLINE_LLM_MODEL`, and
    /// `REDLINE_LLM_TIMEOUT_SECS` override the defaults; the credential is
    /// `REDLINE_API_KEY`, falling back to `OPENAI_API_KEY`.
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            endpoint: std::env::var("REDLINE_LLM_ENDPOINT").unwrap_or(defaults.endpoint),
            model: std::env::var("REDLINE_LLM_MODEL").unwrap_or(defaults.model),
            api_key: std::env::var("REDLINE_API_KEY")
                .or_else(|_| std::env::var("OPENAI_API_KEY"))
                .ok()
                .filter(|key| !key.trim().is_empty()),
            timeout_secs: std::env::var("REDLINE_LLM_TIMEOUT_SECS")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(defaults.timeout_secs),
        }
    }

    /// Whether a live service credential is configured
    pub fn has_credentials(&self) -> bool {
        self.api_key.as_deref().is_some_and(|key| !key.trim().is_empty())
    }
}
