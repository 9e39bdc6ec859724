//! Append-only JSON-lines audit trail of validation outcomes.
//!
//! Every document, fragment, or entry batch screened before reaching a model
//! can be recorded as one newline-terminated JSON object, giving operators a
//! replayable history of what was checked and what was flagged.
//!
//! # Quick start
//!
//! ```rust,no_run
//! use audit_log::{AuditEventType, AuditSource, AuditTrail};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let mut trail = AuditTrail::new("audit.jsonl");
//! trail.record_outcome(
//!     AuditEventType::DocumentValidated,
//!     AuditSource::new("doc-guard").with_input_path("doc.json"),
//!     serde_json::json!({ "tabs": 1 }),
//!     &[],
//! );
//! let written = trail.commit().await?;
//! assert_eq!(written, 1);
//! # Ok(())
//! # }
//! ```

pub mod entry;
pub mod trail;

pub use entry::{AuditEntry, AuditEventType, AuditSource, FindingsRecord};
pub use trail::{AuditTrail, AuditWriteError};
