//! Task contracts - the structural requirements a generated result must satisfy.
//!
//! A [`TaskContract`] is a plain value: an ordered list of field specs with
//! types, ranges, and closed keyword sets. The validator walks it to check
//! output, and the prompt composer renders it into the instruction text, so
//! the vocabulary the generator is told about and the vocabulary it is
//! checked against can never drift apart. Adding a new analysis task means
//! adding a new contract value and composer function, nothing else.

use crate::schemas::{DeviationKind, RiskCategory, Severity};

/// A named structural contract for generated output
#[derive(Debug, Clone)]
pub struct TaskContract {
    pub name: &'static str,
    pub fields: Vec<FieldSpec>,
}

/// One field requirement inside a contract
#[derive(Debug, Clone)]
pub struct FieldSpec {
    pub name: &'static str,
    pub required: bool,
    pub kind: FieldKind,
}

/// The type constraint on a contract field
#[derive(Debug, Clone)]
pub enum FieldKind {
    /// Free text
    Text,
    /// Integer constrained to an inclusive range
    Integer { min: i64, max: i64 },
    /// String drawn from a closed keyword set
    Keyword(&'static [&'static str]),
    /// Array of objects, each matching the nested field specs
    Objects(Vec<FieldSpec>),
}

impl FieldSpec {
    pub fn text(name: &'static str) -> Self {
        Self { name, required: true, kind: FieldKind::Text }
    }

    pub fn optional_text(name: &'static str) -> Self {
        Self { name, required: false, kind: FieldKind::Text }
    }

    pub fn integer(name: &'static str, min: i64, max: i64) -> Self {
        Self { name, required: true, kind: FieldKind::Integer { min, max } }
    }

    pub fn keyword(name: &'static str, allowed: &'static [&'static str]) -> Self {
        Self { name, required: true, kind: FieldKind::Keyword(allowed) }
    }

    pub fn objects(name: &'static str, fields: Vec<FieldSpec>) -> Self {
        Self { name, required: true, kind: FieldKind::Objects(fields) }
    }
}

impl TaskContract {
    /// Contract for comparing a document against a standard playbook
    pub fn comparison() -> Self {
        Self {
            name: "comparison",
            fields: vec![
                FieldSpec::integer("overallScore", 0, 100),
                FieldSpec::integer("totalClauses", 0, i64::MAX),
                FieldSpec::objects(
                    "deviations",
                    vec![
                        FieldSpec::text("clauseTitle"),
                        FieldSpec::text("standardText"),
                        FieldSpec::text("documentText"),
                        FieldSpec::keyword("deviationType", DeviationKind::ALL),
                        FieldSpec::keyword("severity", Severity::ALL),
                        FieldSpec::text("explanation"),
                        FieldSpec::optional_text("suggestedText"),
                        FieldSpec::text("location"),
                    ],
                ),
            ],
        }
    }

    /// Contract for general risk findings in a document
    pub fn risk() -> Self {
        Self {
            name: "risk",
            fields: vec![
                FieldSpec::integer("overallScore", 0, 100),
                FieldSpec::integer("totalFindings", 0, i64::MAX),
                FieldSpec::text("documentType"),
                FieldSpec::objects(
                    "findings",
                    vec![
                        FieldSpec::text("title"),
                        FieldSpec::keyword("category", RiskCategory::ALL),
                        FieldSpec::keyword("severity", Severity::ALL),
                        FieldSpec::text("excerpt"),
                        FieldSpec::text("explanation"),
                        FieldSpec::optional_text("suggestedAlternative"),
                        FieldSpec::text("location"),
                    ],
                ),
            ],
        }
    }

    /// Render the field rules as prose lines for the instruction block
    pub fn describe(&self) -> String {
        let mut out = String::new();
        describe_fields(&mut out, &self.fields, "");
        out
    }

    /// Render a strict JSON template for the instruction block
    pub fn template(&self) -> String {
        let mut out = String::new();
        template_object(&mut out, &self.fields, 0);
        out
    }
}

fn describe_fields(out: &mut String, fields: &[FieldSpec], prefix: &str) {
    for field in fields {
        let path = if prefix.is_empty() {
            field.name.to_string()
        } else {
            format!("{}.{}", prefix, field.name)
        };
        let requirement = if field.required { "required" } else { "optional" };
        match &field.kind {
            FieldKind::Text => {
                out.push_str(&format!("- {}: text ({})\n", path, requirement));
            }
            FieldKind::Integer { min, max } => {
                if *max == i64::MAX {
                    out.push_str(&format!("- {}: integer >= {} ({})\n", path, min, requirement));
                } else {
                    out.push_str(&format!(
                        "- {}: integer between {} and {} ({})\n",
                        path, min, max, requirement
                    ));
                }
            }
            FieldKind::Keyword(allowed) => {
                out.push_str(&format!(
                    "- {}: exactly one of {} ({})\n",
                    path,
                    allowed.join("|"),
                    requirement
                ));
            }
            FieldKind::Objects(nested) => {
                out.push_str(&format!("- {}: array of objects ({})\n", path, requirement));
                describe_fields(out, nested, &path);
            }
        }
    }
}

fn template_object(out: &mut String, fields: &[FieldSpec], depth: usize) {
    let pad = "  ".repeat(depth);
    let inner = "  ".repeat(depth + 1);
    out.push_str("{\n");
    for (i, field) in fields.iter().enumerate() {
        out.push_str(&format!("{}\"{}\": ", inner, field.name));
        match &field.kind {
            FieldKind::Text => {
                if field.required {
                    out.push_str("\"<text>\"");
                } else {
                    out.push_str("\"<text, may be omitted>\"");
                }
            }
            FieldKind::Integer { min, max } => {
                if *max == i64::MAX {
                    out.push_str(&format!("<integer >= {}>", min));
                } else {
                    out.push_str(&format!("<integer {}-{}>", min, max));
                }
            }
            FieldKind::Keyword(allowed) => {
                out.push_str(&format!("\"<{}>\"", allowed.join("|")));
            }
            FieldKind::Objects(nested) => {
                out.push_str("[\n");
                out.push_str(&"  ".repeat(depth + 2));
                template_object(out, nested, depth + 2);
                out.push('\n');
                out.push_str(&format!("{}]", inner));
            }
        }
        if i + 1 < fields.len() {
            out.push(',');
        }
        out.push('\n');
    }
    out.push_str(&format!("{}}}", pad));
}
