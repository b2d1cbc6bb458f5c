use anyhow::Result;
use clap::Args;
use serde::Serialize;
use survey_rules::{
    EvalOptions, ProgressSummary, question_numbers_with, resolve_visibility_with,
};

use super::{SnapshotArgs, print_json};

#[derive(Args, Debug, Clone)]
pub struct VisibilityArgs {
    #[command(flatten)]
    pub input: SnapshotArgs,
    #[arg(long = "json", default_value_t = false)]
    pub json: bool,
}

#[derive(Debug, Serialize)]
struct VisibilityReport<'a> {
    questions: Vec<QuestionState<'a>>,
    progress: ProgressSummary,
}

#[derive(Debug, Serialize)]
struct QuestionState<'a> {
    id: &'a str,
    visible: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    number: Option<usize>,
}

pub fn run(args: &VisibilityArgs, options: &EvalOptions) -> Result<()> {
    let (survey, responses) = args.input.load()?;
    let visibility = resolve_visibility_with(&survey, &responses, options);
    let numbers = question_numbers_with(&survey, &responses, options);
    let report = VisibilityReport {
        questions: survey
            .questions
            .iter()
            .map(|question| QuestionState {
                id: &question.id,
                visible: visibility.get(&question.id).copied().unwrap_or(false),
                number: numbers.get(&question.id).copied(),
            })
            .collect(),
        progress: ProgressSummary::compute_with(&survey, &responses, options),
    };

    if args.json {
        return print_json(&report);
    }
    for state in &report.questions {
        let status = match (state.visible, state.number) {
            (true, Some(number)) => format!("visible  {number}."),
            (true, None) => "visible".to_string(),
            (false, _) => "hidden".to_string(),
        };
        println!("{:<24} {status}", state.id);
    }
    let progress = &report.progress;
    println!(
        "progress: {}/{} answered ({:.1}%)",
        progress.answered, progress.visible, progress.percent
    );
    Ok(())
}
