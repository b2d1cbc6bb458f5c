use std::path::PathBuf;

use anyhow::{Result, bail};
use clap::Args;
use survey_rules::{Severity, has_findings_at, lint};

use super::{load_survey, print_json};

#[derive(Args, Debug, Clone)]
pub struct LintArgs {
    #[arg(long = "survey", value_name = "survey.json")]
    pub survey: PathBuf,
    #[arg(long = "json", default_value_t = false)]
    pub json: bool,
    /// Treat warnings and errors as failures
    #[arg(long = "strict", default_value_t = false)]
    pub strict: bool,
}

pub fn run(args: &LintArgs) -> Result<()> {
    let survey = load_survey(&args.survey)?;
    let findings = lint(&survey);

    if args.json {
        print_json(&findings)?;
    } else if findings.is_empty() {
        println!("no findings");
    } else {
        for finding in &findings {
            println!(
                "{:<7} {:<24} {}: {}",
                severity_label(finding.severity),
                finding.code,
                finding.subject,
                finding.message
            );
        }
    }

    if args.strict && has_findings_at(&findings, Severity::Warning) {
        let failing = findings
            .iter()
            .filter(|finding| finding.severity >= Severity::Warning)
            .count();
        bail!("survey-lint: {failing} finding(s) at warning or above (--strict)");
    }
    Ok(())
}

fn severity_label(severity: Severity) -> &'static str {
    match severity {
        Severity::Info => "info",
        Severity::Warning => "warning",
        Severity::Error => "error",
    }
}
