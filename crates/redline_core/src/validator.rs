//! Schema validation of raw generator output.
//!
//! Two failure classes, each with diagnostics suitable for feeding back to
//! the generator: syntax (the text is not parseable JSON at all) and schema
//! (parseable, but one or more fields violate the contract). Every violation
//! is reported, in contract order, so a corrective retry can fix all of them
//! at once.

use std::fmt;

use serde_json::{Map, Value};

use crate::contract::{FieldKind, FieldSpec, TaskContract};

/// How much of an unparseable response to quote in the diagnostic
const EXCERPT_LIMIT: usize = 120;

/// Result of validating raw output against a contract
#[derive(Debug, Clone)]
pub enum ValidationOutcome {
    /// Parsed and fully conformant
    Valid(Value),
    /// One or more violations, in stable contract order
    Invalid(Vec<Violation>),
}

/// A single contract violation at a field path
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Violation {
    pub path: String,
    pub message: String,
}

impl Violation {
    pub fn new(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self { path: path.into(), message: message.into() }
    }
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.path, self.message)
    }
}

/// Validate raw generator output against a task contract
pub fn validate(raw: &str, contract: &TaskContract) -> ValidationOutcome {
    let json_text = extract_json(raw);

    let value: Value = match serde_json::from_str(&json_text) {
        Ok(v) => v,
        Err(e) => {
            return ValidationOutcome::Invalid(vec![Violation::new(
                "$",
                format!(
                    "response is not valid JSON ({}); output began with: {:?}",
                    e,
                    excerpt(raw)
                ),
            )]);
        }
    };

    let Some(object) = value.as_object() else {
        return ValidationOutcome::Invalid(vec![Violation::new(
            "$",
            format!("expected a JSON object, got {}", type_name(&value)),
        )]);
    };

    let mut violations = Vec::new();
    check_object(&mut violations, "", &contract.fields, object);

    if violations.is_empty() {
        ValidationOutcome::Valid(value)
    } else {
        ValidationOutcome::Invalid(violations)
    }
}

/// Trim prose wrappers around a JSON object
fn extract_json(text: &str) -> String {
    if let (Some(start), Some(end)) = (text.find('{'), text.rfind('}')) {
        if start < end {
            return text[start..=end].to_string();
        }
    }
    text.to_string()
}

fn excerpt(text: &str) -> String {
    let trimmed = text.trim();
    trimmed.chars().take(EXCERPT_LIMIT).collect()
}

fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

fn check_object(
    violations: &mut Vec<Violation>,
    prefix: &str,
    fields: &[FieldSpec],
    object: &Map<String, Value>,
) {
    for field in fields {
        let path = if prefix.is_empty() {
            field.name.to_string()
        } else {
            format!("{}.{}", prefix, field.name)
        };

        match object.get(field.name) {
            None | Some(Value::Null) => {
                if field.required {
                    violations.push(Violation::new(path, "missing required field"));
                }
            }
            Some(value) => check_value(violations, &path, &field.kind, value),
        }
    }
}

fn check_value(violations: &mut Vec<Violation>, path: &str, kind: &FieldKind, value: &Value) {
    match kind {
        FieldKind::Text => {
            if !value.is_string() {
                violations.push(Violation::new(
                    path,
                    format!("expected a string, got {}", type_name(value)),
                ));
            }
        }
        FieldKind::Integer { min, max } => match value.as_i64() {
            None => violations.push(Violation::new(
                path,
                format!("expected an integer, got {}", type_name(value)),
            )),
            Some(n) if n < *min || n > *max => {
                let range = if *max == i64::MAX {
                    format!(">= {}", min)
                } else {
                    format!("between {} and {}", min, max)
                };
                violations.push(Violation::new(
                    path,
                    format!("value {} is outside the allowed range ({})", n, range),
                ));
            }
            Some(_) => {}
        },
        FieldKind::Keyword(allowed) => match value.as_str() {
            None => violations.push(Violation::new(
                path,
                format!(
                    "expected one of {}, got {}",
                    allowed.join("|"),
                    type_name(value)
                ),
            )),
            Some(s) if !allowed.contains(&s) => violations.push(Violation::new(
                path,
                format!("{:?} is not one of {}", s, allowed.join("|")),
            )),
            Some(_) => {}
        },
        FieldKind::Objects(nested) => match value.as_array() {
            None => violations.push(Violation::new(
                path,
                format!("expected an array, got {}", type_name(value)),
            )),
            Some(items) => {
                for (index, item) in items.iter().enumerate() {
                    let item_path = format!("{}[{}]", path, index);
                    match item.as_object() {
                        None => violations.push(Violation::new(
                            item_path,
                            format!("expected an object, got {}", type_name(item)),
                        )),
                        Some(object) => check_object(violations, &item_path, nested, object),
                    }
                }
            }
        },
    }
}
