//! Per-run audit trail.
//!
//! Outcomes are collected in memory while inputs are validated and written
//! to the JSON-lines file in one append when the run is done, so a run that
//! fails halfway leaves no partial batch behind.

use std::path::{Path, PathBuf};

use tokio::io::AsyncWriteExt;

use crate::entry::{AuditEntry, AuditEventType, AuditSource, FindingsRecord};

#[derive(Debug, thiserror::Error)]
pub enum AuditWriteError {
    #[error("failed to encode audit entry {id}: {source}")]
    Encode {
        id: uuid::Uuid,
        source: serde_json::Error,
    },

    #[error("failed to prepare audit log {}: {source}", path.display())]
    Prepare {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to append to audit log {}: {source}", path.display())]
    Append {
        path: PathBuf,
        source: std::io::Error,
    },
}

/// Validation outcomes pending for one audit log file.
#[derive(Debug)]
pub struct AuditTrail {
    path: PathBuf,
    entries: Vec<AuditEntry>,
}

impl AuditTrail {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            entries: Vec::new(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn entries(&self) -> &[AuditEntry] {
        &self.entries
    }

    /// Record the outcome of validating one input.
    ///
    /// A flagged outcome is preceded by a
    /// [`AuditEventType::PromptInjectionDetected`] entry that carries the same
    /// findings and names the kind of input in its details.
    pub fn record_outcome(
        &mut self,
        event_type: AuditEventType,
        source: AuditSource,
        details: serde_json::Value,
        errors: &[String],
    ) {
        let findings = FindingsRecord::from_errors(errors.to_vec());
        if !findings.is_valid {
            self.entries.push(
                AuditEntry::new(
                    AuditEventType::PromptInjectionDetected,
                    source.clone(),
                    serde_json::json!({ "input": event_type }),
                )
                .with_findings(findings.clone()),
            );
        }
        self.entries
            .push(AuditEntry::new(event_type, source, details).with_findings(findings));
    }

    /// Render every pending entry as newline-terminated JSON.
    pub fn encode_lines(&self) -> Result<Vec<u8>, AuditWriteError> {
        let mut buf = Vec::new();
        for entry in &self.entries {
            serde_json::to_writer(&mut buf, entry).map_err(|source| AuditWriteError::Encode {
                id: entry.id,
                source,
            })?;
            buf.push(b'\n');
        }
        Ok(buf)
    }

    /// Append the pending entries to the log file, creating it and any
    /// missing parent directories.  Returns the number of entries written.
    pub async fn commit(self) -> Result<usize, AuditWriteError> {
        if self.entries.is_empty() {
            return Ok(0);
        }

        let buf = self.encode_lines()?;
        let path = self.path;

        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            if let Err(source) = tokio::fs::create_dir_all(parent).await {
                return Err(AuditWriteError::Prepare { path, source });
            }
        }

        let mut file = match tokio::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(&path)
            .await
        {
            Ok(file) => file,
            Err(source) => return Err(AuditWriteError::Prepare { path, source }),
        };

        let written = async {
            file.write_all(&buf).await?;
            file.flush().await
        }
        .await;

        match written {
            Ok(()) => Ok(self.entries.len()),
            Err(source) => Err(AuditWriteError::Append { path, source }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn source() -> AuditSource {
        AuditSource::new("test").with_input_path("doc.json")
    }

    #[test]
    fn clean_outcome_records_a_single_entry() {
        let mut trail = AuditTrail::new("audit.jsonl");
        trail.record_outcome(
            AuditEventType::FragmentValidated,
            source(),
            serde_json::json!({ "fragments": 2 }),
            &[],
        );

        let entries = trail.entries();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].event_type, AuditEventType::FragmentValidated);
        assert!(entries[0].findings.as_ref().unwrap().is_valid);
        assert_eq!(entries[0].details["fragments"], 2);
    }

    #[test]
    fn flagged_outcome_is_preceded_by_a_detection() {
        let mut trail = AuditTrail::new("audit.jsonl");
        trail.record_outcome(
            AuditEventType::DocumentValidated,
            source(),
            serde_json::json!({ "tabs": 1 }),
            &["body: Potential jailbreak attempt: Jailbreak Attempt".to_string()],
        );

        let kinds: Vec<AuditEventType> = trail.entries().iter().map(|e| e.event_type).collect();
        assert_eq!(
            kinds,
            vec![
                AuditEventType::PromptInjectionDetected,
                AuditEventType::DocumentValidated,
            ]
        );
        let detection = &trail.entries()[0];
        assert_eq!(detection.details["input"], "document_validated");
        assert_eq!(detection.findings.as_ref().unwrap().error_count, 1);
        assert_eq!(detection.source.input_path.as_deref(), Some("doc.json"));
    }

    #[test]
    fn encoded_lines_are_one_object_each() {
        let mut trail = AuditTrail::new("audit.jsonl");
        trail.record_outcome(
            AuditEventType::EntriesValidated,
            source(),
            serde_json::json!({}),
            &["entries[0].title: x".to_string()],
        );

        let buf = trail.encode_lines().unwrap();
        let text = String::from_utf8(buf).unwrap();
        assert!(text.ends_with('\n'));
        let parsed: Vec<AuditEntry> = text
            .lines()
            .map(|line| serde_json::from_str(line).unwrap())
            .collect();
        assert_eq!(parsed.len(), 2);
        assert_eq!(parsed[1].event_type, AuditEventType::EntriesValidated);
    }

    #[tokio::test]
    async fn commit_creates_directories_and_appends() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested/audit.jsonl");

        for _ in 0..2 {
            let mut trail = AuditTrail::new(&path);
            trail.record_outcome(
                AuditEventType::FragmentValidated,
                source(),
                serde_json::json!({}),
                &[],
            );
            assert_eq!(trail.commit().await.unwrap(), 1);
        }

        let contents = tokio::fs::read_to_string(&path).await.unwrap();
        assert_eq!(contents.lines().count(), 2);
    }

    #[tokio::test]
    async fn empty_trail_touches_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("audit.jsonl");

        assert_eq!(AuditTrail::new(&path).commit().await.unwrap(), 0);
        assert!(!path.exists());
    }

    #[tokio::test]
    async fn unwritable_location_reports_the_path() {
        let dir = tempfile::tempdir().unwrap();
        let blocker = dir.path().join("file");
        std::fs::write(&blocker, "").unwrap();
        let path = blocker.join("audit.jsonl");

        let mut trail = AuditTrail::new(&path);
        trail.record_outcome(
            AuditEventType::FragmentValidated,
            source(),
            serde_json::json!({}),
            &[],
        );
        let err = trail.commit().await.unwrap_err();
        assert!(matches!(err, AuditWriteError::Prepare { .. }), "unexpected error: {err}");
        assert!(err.to_string().contains("audit.jsonl"));
    }
}
