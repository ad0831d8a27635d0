//! Shared types for contract analysis.
//!
//! Closed vocabularies, playbook inputs, typed reports, and the wire types
//! for the generation service. The `ALL` spelling lists on the enums are the
//! single source of truth for the keyword sets used by both the prompt
//! composer and the task contracts.

use serde::{Deserialize, Serialize};

/// Severity scale attached to every deviation and risk finding
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Critical,
    Major,
    Minor,
    Info,
}

impl Severity {
    /// Canonical spellings, in severity order
    pub const ALL: &'static [&'static str] = &["critical", "major", "minor", "info"];

    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Critical => "critical",
            Severity::Major => "major",
            Severity::Minor => "minor",
            Severity::Info => "info",
        }
    }
}

/// Per-clause classification for comparison against a standard
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DeviationKind {
    Match,
    Missing,
    Weaker,
    Stronger,
    Different,
}

impl DeviationKind {
    pub const ALL: &'static [&'static str] = &["match", "missing", "weaker", "stronger", "different"];

    pub fn as_str(&self) -> &'static str {
        match self {
            DeviationKind::Match => "match",
            DeviationKind::Missing => "missing",
            DeviationKind::Weaker => "weaker",
            DeviationKind::Stronger => "stronger",
            DeviationKind::Different => "different",
        }
    }
}

/// Closed category set for general risk findings
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RiskCategory {
    Liability,
    Indemnity,
    Payment,
    Termination,
    Confidentiality,
    Ip,
    Compliance,
    Other,
}

impl RiskCategory {
    pub const ALL: &'static [&'static str] = &[
        "liability",
        "indemnity",
        "payment",
        "termination",
        "confidentiality",
        "ip",
        "compliance",
        "other",
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            RiskCategory::Liability => "liability",
            RiskCategory::Indemnity => "indemnity",
            RiskCategory::Payment => "payment",
            RiskCategory::Termination => "termination",
            RiskCategory::Confidentiality => "confidentiality",
            RiskCategory::Ip => "ip",
            RiskCategory::Compliance => "compliance",
            RiskCategory::Other => "other",
        }
    }
}

/// How much a playbook clause matters during comparison
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ClauseImportance {
    Critical,
    Important,
    Standard,
}

impl ClauseImportance {
    pub fn as_str(&self) -> &'static str {
        match self {
            ClauseImportance::Critical => "critical",
            ClauseImportance::Important => "important",
            ClauseImportance::Standard => "standard",
        }
    }
}

/// A single clause in a standard playbook
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StandardClause {
    pub title: String,
    pub expected_text: String,
    pub importance: ClauseImportance,
}

/// Ordered set of standard clauses a document is compared against
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StandardPlaybook {
    pub name: String,
    pub clauses: Vec<StandardClause>,
}

/// Validated result of a comparison analysis
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComparisonReport {
    /// Overall conformance score, 0-100
    pub overall_score: u8,
    pub total_clauses: u32,
    pub deviations: Vec<Deviation>,
}

/// One per-clause comparison outcome
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Deviation {
    pub clause_title: String,
    pub standard_text: String,
    pub document_text: String,
    pub deviation_type: DeviationKind,
    pub severity: Severity,
    pub explanation: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub suggested_text: Option<String>,
    pub location: String,
}

/// Validated result of a risk analysis
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RiskReport {
    /// Overall risk score, 0-100
    pub overall_score: u8,
    pub total_findings: u32,
    pub document_type: String,
    pub findings: Vec<RiskFinding>,
}

/// One risk finding inside a document
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RiskFinding {
    pub title: String,
    pub category: RiskCategory,
    pub severity: Severity,
    pub excerpt: String,
    pub explanation: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub suggested_alternative: Option<String>,
    pub location: String,
}

/// Chat completion request (OpenAI-compatible)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatRequest {
    pub model: String,
    pub messages: Vec<ChatMessage>,
    pub temperature: f32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub response_format: Option<ResponseFormat>,
}

/// Chat message
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: String,
    pub content: String,
}

/// Response format constraint for the chat request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResponseFormat {
    #[serde(rename = "type")]
    pub format: String,
}

/// Chat completion response
#[derive(Debug, Clone, Deserialize)]
pub struct ChatResponse {
    pub choices: Vec<ChatChoice>,
}

/// One completion choice
#[derive(Debug, Clone, Deserialize)]
pub struct ChatChoice {
    pub message: ChatMessage,
}
