use anyhow::{Context, Result, bail};
use clap::Args;
use serde::Serialize;
use survey_rules::{
    EvalOptions, NextQuestion, Survey, Transition, next_visible_index_with, resolve_navigation,
};

use super::{SnapshotArgs, print_json, question_label};

#[derive(Args, Debug, Clone)]
pub struct NextArgs {
    #[command(flatten)]
    pub input: SnapshotArgs,
    /// Current question, by id or 0-based index
    #[arg(long = "current", value_name = "INDEX|ID")]
    pub current: String,
    /// Skip the visibility scan and report the branching result only
    #[arg(long = "raw", default_value_t = false)]
    pub raw: bool,
    #[arg(long = "json", default_value_t = false)]
    pub json: bool,
}

#[derive(Debug, Serialize)]
struct NextReport<'a> {
    current: usize,
    next: NextQuestion,
    #[serde(skip_serializing_if = "Option::is_none")]
    next_id: Option<&'a str>,
    transition: Transition,
}

pub fn run(args: &NextArgs, options: &EvalOptions) -> Result<()> {
    let (survey, responses) = args.input.load()?;
    let current = resolve_current(&survey, &args.current)?;
    let response = responses.get(&survey.questions[current].id);
    let step = resolve_navigation(&survey.questions, current, response, options);
    let next = match step.next {
        NextQuestion::Index(index) if !args.raw => next_visible_index_with(
            &survey.questions,
            &survey.groups,
            &responses,
            index,
            options,
        )
        .into(),
        other => other,
    };
    let report = NextReport {
        current,
        next,
        next_id: next
            .index()
            .and_then(|index| survey.questions.get(index))
            .map(|question| question.id.as_str()),
        transition: step.transition,
    };

    if args.json {
        return print_json(&report);
    }
    match report.next {
        NextQuestion::Index(index) => println!("next: {}", question_label(&survey, index)),
        NextQuestion::End => println!("next: END"),
    }
    println!("reason: {}", describe(&report.transition));
    Ok(())
}

/// Accepts a question id first, then a 0-based index.
pub(crate) fn resolve_current(survey: &Survey, current: &str) -> Result<usize> {
    if let Some(index) = survey.question_index(current) {
        return Ok(index);
    }
    let index: usize = current
        .parse()
        .with_context(|| format!("'{current}' is neither a question id nor an index"))?;
    if index >= survey.questions.len() {
        bail!(
            "question index {index} is out of range (survey has {} questions)",
            survey.questions.len()
        );
    }
    Ok(index)
}

fn describe(transition: &Transition) -> String {
    match transition {
        Transition::Linear => "no rule fired; default order".to_string(),
        Transition::End { rule_id } => format!("rule '{rule_id}' ends the survey"),
        Transition::Goto { rule_id, target_id } => {
            format!("rule '{rule_id}' jumps to {target_id}")
        }
        Transition::Unresolved { rule_id } => {
            format!("rule '{rule_id}' fired but its target did not resolve; default order")
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn survey() -> Survey {
        Survey::from_value(json!({
            "questions": [
                { "id": "intro", "type": "notice", "order": 0 },
                { "id": "7", "type": "text", "order": 1 },
                { "id": "last", "type": "text", "order": 2 }
            ]
        }))
        .expect("survey")
    }

    #[test]
    fn current_prefers_ids_over_indices() {
        let survey = survey();
        assert_eq!(resolve_current(&survey, "last").expect("id"), 2);
        assert_eq!(resolve_current(&survey, "7").expect("numeric id"), 1);
        assert_eq!(resolve_current(&survey, "0").expect("index"), 0);
    }

    #[test]
    fn current_rejects_unknown_values() {
        let survey = survey();
        let err = resolve_current(&survey, "nope").expect_err("unknown id");
        assert!(err.to_string().contains("neither a question id"));
        assert!(resolve_current(&survey, "3").is_err());
    }
}
