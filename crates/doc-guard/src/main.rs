mod cli;
mod config;
mod report;

use std::path::Path;
use std::process::ExitCode;

use anyhow::{bail, Context, Result};
use clap::Parser;
use serde_json::Value;
use tracing::{info, warn};

use audit_log::AuditTrail;
use doc_validator::DocumentTraverser;

use crate::cli::Cli;
use crate::report::{DocumentInput, Inputs};

/// Exit status used when validation flags something and findings are fatal.
const EXIT_FINDINGS: u8 = 2;

fn read_json(path: &Path) -> Result<Value> {
    let contents = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    serde_json::from_str(&contents)
        .with_context(|| format!("failed to parse JSON in {}", path.display()))
}

#[tokio::main]
async fn main() -> Result<ExitCode> {
    // 1. Parse CLI args.
    let cli = Cli::parse();

    // 2. Load config, then merge CLI overrides.  A missing file is only
    //    reported once the subscriber is installed.
    let loaded = config::load(&cli.config)?;
    let config_found = loaded.is_some();
    let mut cfg = loaded.unwrap_or_default();

    if let Some(ref audit_log) = cli.audit_log {
        cfg.logging.audit_log_path = Some(audit_log.clone());
    }
    if cli.allow_findings {
        cfg.validation.fail_on_findings = false;
    }

    // 3. Init tracing-subscriber with JSON format.  Stdout carries the
    //    report, so logs go to stderr.
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&cfg.logging.level));

    tracing_subscriber::fmt()
        .json()
        .with_env_filter(env_filter)
        .with_target(true)
        .with_writer(std::io::stderr)
        .init();

    if !config_found {
        warn!(
            path = %cli.config.display(),
            "configuration file not found; using defaults"
        );
    }

    // 4. Gather inputs.
    let inputs = Inputs {
        document: cli
            .document
            .as_deref()
            .map(|path| -> Result<DocumentInput> {
                Ok(DocumentInput {
                    path: path.display().to_string(),
                    json: read_json(path).context("failed to load document")?,
                })
            })
            .transpose()?,
        instructions: cli.instructions.clone(),
        entries: cli
            .entries
            .as_deref()
            .map(|path| read_json(path).context("failed to load entries"))
            .transpose()?,
    };

    if inputs.is_empty() {
        bail!("nothing to validate: pass --document, --instruction, or --entries");
    }

    info!(
        config_file = %cli.config.display(),
        document = ?cli.document,
        instructions = inputs.instructions.len(),
        entries = ?cli.entries,
        "doc-guard starting"
    );

    // 5. Validate.
    let traverser = DocumentTraverser::new().context("failed to build document traverser")?;
    let report = report::build(&traverser, &inputs, cfg.validation.emit_sanitized);

    println!(
        "{}",
        serde_json::to_string_pretty(&report).context("failed to serialize report")?
    );

    // 6. Audit trail.
    if let Some(ref path) = cfg.logging.audit_log_path {
        let mut trail = AuditTrail::new(path);
        report::record_audit(&mut trail, &inputs, &report);
        let written = trail.commit().await.context("failed to write audit log")?;
        info!(path = %path.display(), entries = written, "audit trail written");
    }

    // 7. Exit status.
    if report.is_valid {
        info!("validation passed");
        return Ok(ExitCode::SUCCESS);
    }

    warn!(
        fail_on_findings = cfg.validation.fail_on_findings,
        "prompt injection detected"
    );
    if cfg.validation.fail_on_findings {
        Ok(ExitCode::from(EXIT_FINDINGS))
    } else {
        Ok(ExitCode::SUCCESS)
    }
}
