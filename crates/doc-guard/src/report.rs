//! Assembles the validation report for one invocation and records it on the
//! audit trail.

use audit_log::{AuditEventType, AuditSource, AuditTrail};
use content_security::{sanitize, validate_parsed_entries, SecurityValidationResult};
use doc_validator::DocumentTraverser;
use serde::Serialize;
use serde_json::Value;

const COMPONENT: &str = "doc-guard";

/// A raw document and the path it was read from.
pub struct DocumentInput {
    pub path: String,
    pub json: Value,
}

/// Everything supplied for one run.
#[derive(Default)]
pub struct Inputs {
    pub document: Option<DocumentInput>,
    pub instructions: Vec<String>,
    pub entries: Option<Value>,
}

impl Inputs {
    pub fn is_empty(&self) -> bool {
        self.document.is_none() && self.instructions.is_empty() && self.entries.is_none()
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InstructionReport {
    #[serde(flatten)]
    pub result: SecurityValidationResult,
    /// Sanitized instructions, in input order.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sanitized: Option<Vec<String>>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Report {
    pub is_valid: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub document: Option<SecurityValidationResult>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub instructions: Option<InstructionReport>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub entries: Option<SecurityValidationResult>,
}

/// Validate every supplied input.
pub fn build(traverser: &DocumentTraverser, inputs: &Inputs, emit_sanitized: bool) -> Report {
    let document = inputs
        .document
        .as_ref()
        .map(|doc| traverser.validate(&doc.json));

    let instructions = (!inputs.instructions.is_empty()).then(|| {
        let labels: Vec<String> = (0..inputs.instructions.len())
            .map(|i| format!("instructions[{i}]"))
            .collect();
        let result = traverser.validator().validate_fragments(
            labels
                .iter()
                .map(String::as_str)
                .zip(inputs.instructions.iter().map(String::as_str)),
        );
        InstructionReport {
            result,
            sanitized: emit_sanitized
                .then(|| inputs.instructions.iter().map(|text| sanitize(text)).collect()),
        }
    });

    let entries = inputs
        .entries
        .as_ref()
        .map(|entries| validate_parsed_entries(traverser.validator(), entries));

    let is_valid = document.as_ref().map_or(true, |r| r.is_valid)
        && instructions.as_ref().map_or(true, |r| r.result.is_valid)
        && entries.as_ref().map_or(true, |r| r.is_valid);

    Report {
        is_valid,
        document,
        instructions,
        entries,
    }
}

/// Record one outcome per validated input on `trail`.
pub fn record_audit(trail: &mut AuditTrail, inputs: &Inputs, report: &Report) {
    if let (Some(doc), Some(result)) = (&inputs.document, &report.document) {
        let mut source = AuditSource::new(COMPONENT).with_input_path(&doc.path);
        if let Some(id) = doc.json.get("documentId").and_then(Value::as_str) {
            source = source.with_document_id(id);
        }
        let details = serde_json::json!({
            "tabs": doc.json.get("tabs").and_then(Value::as_array).map_or(0, Vec::len),
        });
        trail.record_outcome(AuditEventType::DocumentValidated, source, details, &result.errors);
    }

    if let Some(report) = &report.instructions {
        trail.record_outcome(
            AuditEventType::FragmentValidated,
            AuditSource::new(COMPONENT),
            serde_json::json!({ "fragments": inputs.instructions.len() }),
            &report.result.errors,
        );
    }

    if let (Some(entries), Some(result)) = (&inputs.entries, &report.entries) {
        trail.record_outcome(
            AuditEventType::EntriesValidated,
            AuditSource::new(COMPONENT),
            serde_json::json!({ "entries": entries.as_array().map_or(0, Vec::len) }),
            &result.errors,
        );
    }
}
