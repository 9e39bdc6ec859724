use serde::Deserialize;
use std::path::{Path, PathBuf};

#[derive(Debug, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub logging: LoggingConfig,
    #[serde(default)]
    pub validation: ValidationConfig,
}

#[derive(Debug, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,
    /// No audit trail is written when unset.
    #[serde(default)]
    pub audit_log_path: Option<PathBuf>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            audit_log_path: None,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct ValidationConfig {
    /// Exit with a failure status when anything is flagged.
    #[serde(default = "default_true")]
    pub fail_on_findings: bool,
    /// Include sanitized instruction text in the report.
    #[serde(default = "default_true")]
    pub emit_sanitized: bool,
}

impl Default for ValidationConfig {
    fn default() -> Self {
        Self {
            fail_on_findings: default_true(),
            emit_sanitized: default_true(),
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_true() -> bool {
    true
}

/// Load configuration from a YAML file.
///
/// Returns `Ok(None)` when the file does not exist so the caller can fall
/// back to [`Config::default`] and report it once logging is up.
pub fn load(path: &Path) -> anyhow::Result<Option<Config>> {
    if !path.exists() {
        return Ok(None);
    }

    let contents = std::fs::read_to_string(path)
        .map_err(|e| anyhow::anyhow!("failed to read config file {}: {e}", path.display()))?;

    parse(&contents)
        .map(Some)
        .map_err(|e| anyhow::anyhow!("failed to parse config file {}: {e}", path.display()))
}

fn parse(yaml: &str) -> Result<Config, serde_yml::Error> {
    serde_yml::from_str(yaml)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_mapping_uses_defaults() {
        let config = parse("{}").unwrap();
        assert_eq!(config.logging.level, "info");
        assert!(config.logging.audit_log_path.is_none());
        assert!(config.validation.fail_on_findings);
        assert!(config.validation.emit_sanitized);
    }

    #[test]
    fn full_config_overrides_defaults() {
        let yaml = r#"
logging:
  level: debug
  audit_log_path: /var/log/doc-guard/audit.jsonl
validation:
  fail_on_findings: false
  emit_sanitized: false
"#;
        let config = parse(yaml).unwrap();
        assert_eq!(config.logging.level, "debug");
        assert_eq!(
            config.logging.audit_log_path,
            Some(PathBuf::from("/var/log/doc-guard/audit.jsonl"))
        );
        assert!(!config.validation.fail_on_findings);
        assert!(!config.validation.emit_sanitized);
    }

    #[test]
    fn missing_file_is_reported_as_absent() {
        let config = load(Path::new("/does/not/exist/doc-guard.yaml")).unwrap();
        assert!(config.is_none());
        assert_eq!(config.unwrap_or_default().logging.level, "info");
    }

    #[test]
    fn existing_file_is_loaded() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("doc-guard.yaml");
        std::fs::write(&path, "logging:\n  level: warn\n").unwrap();

        let config = load(&path).unwrap().expect("config file exists");
        assert_eq!(config.logging.level, "warn");
        assert!(config.validation.fail_on_findings);
    }

    #[test]
    fn malformed_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("doc-guard.yaml");
        std::fs::write(&path, "logging: [unterminated").unwrap();

        let err = load(&path).unwrap_err();
        assert!(
            err.to_string().contains("failed to parse config file"),
            "unexpected error: {err}"
        );
    }
}
