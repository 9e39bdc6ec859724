use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "doc-guard",
    version,
    about = "Screen documents and instructions for prompt injection before they reach a model"
)]
pub struct Cli {
    /// Path to the configuration file
    #[arg(short, long, default_value = "doc-guard.yaml")]
    pub config: PathBuf,

    /// Document JSON file to validate
    #[arg(short, long)]
    pub document: Option<PathBuf>,

    /// Freeform instruction to validate (repeatable)
    #[arg(short, long = "instruction")]
    pub instructions: Vec<String>,

    /// JSON file holding an array of model-produced entries
    #[arg(short, long)]
    pub entries: Option<PathBuf>,

    /// Audit log path (overrides config file setting)
    #[arg(long)]
    pub audit_log: Option<PathBuf>,

    /// Exit successfully even when findings are reported
    #[arg(long)]
    pub allow_findings: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_repeated_instructions() {
        let cli = Cli::parse_from([
            "doc-guard",
            "--document",
            "doc.json",
            "-i",
            "Summarize",
            "--instruction",
            "Use bullet points",
        ]);
        assert_eq!(cli.document, Some(PathBuf::from("doc.json")));
        assert_eq!(cli.instructions, vec!["Summarize", "Use bullet points"]);
        assert_eq!(cli.config, PathBuf::from("doc-guard.yaml"));
        assert!(!cli.allow_findings);
    }

    #[test]
    fn verify_command() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }
}
