use serde::{Deserialize, Serialize};

/// One line of the validation audit trail.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuditEntry {
    pub id: uuid::Uuid,
    pub timestamp: chrono::DateTime<chrono::Utc>,
    pub event_type: AuditEventType,
    pub source: AuditSource,
    pub details: serde_json::Value,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub findings: Option<FindingsRecord>,
}

impl AuditEntry {
    /// Create an entry stamped with a fresh UUID v4 and the current UTC time.
    /// `findings` starts out empty.
    pub fn new(
        event_type: AuditEventType,
        source: AuditSource,
        details: serde_json::Value,
    ) -> Self {
        Self {
            id: uuid::Uuid::new_v4(),
            timestamp: chrono::Utc::now(),
            event_type,
            source,
            details,
            findings: None,
        }
    }

    /// Attach the outcome of a validation, builder-style.
    pub fn with_findings(mut self, findings: FindingsRecord) -> Self {
        self.findings = Some(findings);
        self
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AuditEventType {
    /// A whole document tree was walked.
    DocumentValidated,
    /// A standalone instruction fragment was checked.
    FragmentValidated,
    /// Model-produced entries were checked before persistence.
    EntriesValidated,
    /// At least one injection category matched.
    PromptInjectionDetected,
}

/// Where the validated input came from.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AuditSource {
    pub component: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub input_path: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub document_id: Option<String>,
}

impl AuditSource {
    pub fn new(component: impl Into<String>) -> Self {
        Self {
            component: component.into(),
            ..Self::default()
        }
    }

    pub fn with_input_path(mut self, path: impl Into<String>) -> Self {
        self.input_path = Some(path.into());
        self
    }

    pub fn with_document_id(mut self, id: impl Into<String>) -> Self {
        self.document_id = Some(id.into());
        self
    }
}

/// Snapshot of a validation result as recorded for operators.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FindingsRecord {
    pub is_valid: bool,
    pub error_count: usize,
    pub errors: Vec<String>,
}

impl FindingsRecord {
    pub fn from_errors(errors: Vec<String>) -> Self {
        Self {
            is_valid: errors.is_empty(),
            error_count: errors.len(),
            errors,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn event_types_serialize_snake_case() {
        let json = serde_json::to_string(&AuditEventType::PromptInjectionDetected).unwrap();
        assert_eq!(json, "\"prompt_injection_detected\"");
    }

    #[test]
    fn empty_optionals_are_omitted() {
        let entry = AuditEntry::new(
            AuditEventType::DocumentValidated,
            AuditSource::new("doc-guard"),
            serde_json::json!({}),
        );
        let json = serde_json::to_value(&entry).unwrap();
        assert!(json.get("findings").is_none());
        assert!(json["source"].get("input_path").is_none());
        assert_eq!(json["event_type"], "document_validated");
    }

    #[test]
    fn findings_record_counts_errors() {
        let record = FindingsRecord::from_errors(vec!["a".into(), "b".into()]);
        assert!(!record.is_valid);
        assert_eq!(record.error_count, 2);
        assert!(FindingsRecord::from_errors(Vec::new()).is_valid);
    }

    #[test]
    fn source_builders_fill_fields() {
        let source = AuditSource::new("doc-guard")
            .with_input_path("doc.json")
            .with_document_id("doc-1");
        assert_eq!(source.input_path.as_deref(), Some("doc.json"));
        assert_eq!(source.document_id.as_deref(), Some("doc-1"));
    }
}
