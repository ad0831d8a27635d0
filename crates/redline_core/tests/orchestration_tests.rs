//! End-to-end tests for the validated generation pipeline.
//!
//! Drive the composer, orchestrator, and validator together with scripted
//! generators; no network, no live service.

use std::sync::Arc;

use serde_json::json;

use redline_core::{
    compose_comparison_prompt, compose_risk_prompt, validate, AnalysisError, ClauseImportance,
    GenerateError, Orchestrator, ReviewService, RiskCategory, RiskFinding, RiskReport,
    ScriptedGenerator, Severity, StandardClause, StandardPlaybook, StandinGenerator,
    TaskContract, ValidationOutcome,
};

const DOCUMENT: &str = "The Supplier's liability under this agreement shall be unlimited. \
                        Recipient may disclose Confidential Information after written notice.";

fn nda_playbook() -> StandardPlaybook {
    StandardPlaybook {
        name: "NDA Playbook".to_string(),
        clauses: vec![StandardClause {
            title: "Confidentiality".to_string(),
            expected_text: "Each party shall keep the other party's information confidential."
                .to_string(),
            importance: ClauseImportance::Critical,
        }],
    }
}

fn valid_comparison_payload() -> String {
    json!({
        "overallScore": 55,
        "totalClauses": 1,
        "deviations": [
            {
                "clauseTitle": "Confidentiality",
                "standardText": "Each party shall keep the other party's information confidential.",
                "documentText": "Recipient may disclose Confidential Information after written notice.",
                "deviationType": "weaker",
                "severity": "major",
                "explanation": "Disclosure after notice weakens the obligation.",
                "location": "Section 7"
            }
        ]
    })
    .to_string()
}

fn invalid_comparison_payload() -> String {
    // severity outside the closed set
    json!({
        "overallScore": 55,
        "totalClauses": 1,
        "deviations": [
            {
                "clauseTitle": "Confidentiality",
                "standardText": "Each party shall keep the other party's information confidential.",
                "documentText": "Recipient may disclose Confidential Information after written notice.",
                "deviationType": "weaker",
                "severity": "severe",
                "explanation": "Disclosure after notice weakens the obligation.",
                "location": "Section 7"
            }
        ]
    })
    .to_string()
}

#[tokio::test]
async fn corrective_retry_fixes_invalid_first_response() {
    let generator = Arc::new(ScriptedGenerator::new(vec![
        Ok(invalid_comparison_payload()),
        Ok(valid_comparison_payload()),
    ]));
    let orchestrator = Orchestrator::new(generator.clone());
    let prompt = compose_comparison_prompt(DOCUMENT, &nda_playbook());

    let value = orchestrator
        .run(&prompt, &TaskContract::comparison())
        .await
        .unwrap();

    assert_eq!(value["overallScore"], 55);
    assert_eq!(generator.call_count(), 2);

    // the corrected prompt carries the original document and the diagnostics
    let prompts = generator.prompts();
    assert_eq!(prompts[0], prompt);
    let corrected = &prompts[1];
    assert_eq!(corrected.instruction, prompt.instruction);
    assert!(corrected.data.contains(DOCUMENT));
    assert!(corrected.data.contains("Your previous response had validation errors:"));
    assert!(corrected.data.contains("deviations[0].severity"));
    assert!(corrected.data.contains("\"severe\" is not one of critical|major|minor|info"));
}

#[tokio::test]
async fn second_invalid_response_is_terminal_after_two_calls() {
    let second_failure = json!({
        "overallScore": 200,
        "totalClauses": 1,
        "deviations": []
    })
    .to_string();

    let generator = Arc::new(ScriptedGenerator::new(vec![
        Ok(invalid_comparison_payload()),
        Ok(second_failure),
    ]));
    let orchestrator = Orchestrator::new(generator.clone());
    let prompt = compose_comparison_prompt(DOCUMENT, &nda_playbook());

    let result = orchestrator.run(&prompt, &TaskContract::comparison()).await;

    assert_eq!(generator.call_count(), 2);
    match result {
        Err(AnalysisError::InvalidOutput { attempts, diagnostics }) => {
            assert_eq!(attempts, 2);
            // the error references the second response's diagnostics
            assert_eq!(diagnostics.len(), 1);
            assert_eq!(diagnostics[0].path, "overallScore");
            assert!(diagnostics[0].message.contains("200"));
        }
        other => panic!("expected invalid-output error, got {:?}", other),
    }
}

#[tokio::test]
async fn syntax_failure_then_schema_failure_still_stops_at_two_calls() {
    let generator = Arc::new(ScriptedGenerator::new(vec![
        Ok("Sorry, here is my analysis in plain words.".to_string()),
        Ok(invalid_comparison_payload()),
    ]));
    let orchestrator = Orchestrator::new(generator.clone());
    let prompt = compose_comparison_prompt(DOCUMENT, &nda_playbook());

    let result = orchestrator.run(&prompt, &TaskContract::comparison()).await;

    assert_eq!(generator.call_count(), 2);
    assert!(matches!(result, Err(AnalysisError::InvalidOutput { attempts: 2, .. })));
}

#[tokio::test]
async fn exhausted_generation_surfaces_without_corrective_loop() {
    let generator = Arc::new(ScriptedGenerator::always_error(GenerateError::Exhausted {
        attempts: 3,
        last: "generation service rate-limited the request".to_string(),
    }));
    let orchestrator = Orchestrator::new(generator.clone());
    let prompt = compose_risk_prompt(DOCUMENT, None);

    let result = orchestrator.run(&prompt, &TaskContract::risk()).await;

    assert_eq!(generator.call_count(), 1);
    match result {
        Err(AnalysisError::Generation(GenerateError::Exhausted { attempts, last })) => {
            assert_eq!(attempts, 3);
            assert!(last.contains("rate-limited"));
        }
        other => panic!("expected generation error, got {:?}", other),
    }
}

#[tokio::test]
async fn service_decodes_validated_output_into_typed_report() {
    let generator = Arc::new(ScriptedGenerator::always(&valid_comparison_payload()));
    let service = ReviewService::new(generator);

    let report = service
        .compare_against_standard(DOCUMENT, &nda_playbook())
        .await
        .unwrap();

    assert_eq!(report.overall_score, 55);
    assert_eq!(report.total_clauses, 1);
    assert_eq!(report.deviations.len(), 1);
    assert_eq!(report.deviations[0].clause_title, "Confidentiality");
    assert!(report.deviations[0].suggested_text.is_none());
}

#[tokio::test]
async fn service_runs_offline_against_standin_for_both_tasks() {
    let service = ReviewService::new(Arc::new(StandinGenerator::new()));

    let comparison = service
        .compare_against_standard(DOCUMENT, &nda_playbook())
        .await
        .unwrap();
    assert_eq!(comparison.total_clauses as usize, 2);

    let risks = service.find_risks(DOCUMENT, Some("Norway")).await.unwrap();
    assert_eq!(risks.document_type, "services agreement");
    assert!(!risks.findings.is_empty());
}

#[test]
fn typed_report_round_trips_through_the_validator() {
    let report = RiskReport {
        overall_score: 42,
        total_findings: 1,
        document_type: "license agreement".to_string(),
        findings: vec![RiskFinding {
            title: "Broad indemnity".to_string(),
            category: RiskCategory::Indemnity,
            severity: Severity::Major,
            excerpt: "Licensee shall indemnify Licensor against all claims.".to_string(),
            explanation: "One-sided indemnity with no negligence carve-out.".to_string(),
            suggested_alternative: None,
            location: "Section 11".to_string(),
        }],
    };

    let raw = serde_json::to_string(&report).unwrap();
    match validate(&raw, &TaskContract::risk()) {
        ValidationOutcome::Valid(value) => {
            let decoded: RiskReport = serde_json::from_value(value).unwrap();
            assert_eq!(decoded.overall_score, 42);
            assert_eq!(decoded.findings[0].title, "Broad indemnity");
        }
        ValidationOutcome::Invalid(violations) => {
            panic!("typed report drifted from the contract: {:?}", violations)
        }
    }
}

#[tokio::test]
async fn zero_clause_playbook_flows_through_end_to_end() {
    let empty = StandardPlaybook { name: "Empty".to_string(), clauses: vec![] };
    let zero_payload = json!({
        "overallScore": 100,
        "totalClauses": 0,
        "deviations": []
    })
    .to_string();

    let generator = Arc::new(ScriptedGenerator::always(&zero_payload));
    let service = ReviewService::new(generator.clone());

    let report = service.compare_against_standard(DOCUMENT, &empty).await.unwrap();

    assert_eq!(report.total_clauses, 0);
    assert!(report.deviations.is_empty());
    let prompts = generator.prompts();
    assert!(prompts[0].data.contains("No standard clauses are defined"));
}
