use anyhow::Result;
use clap::Args;
use serde::Serialize;
use survey_rules::{EvalOptions, walk};

use super::{SnapshotArgs, print_json, question_label};

#[derive(Args, Debug, Clone)]
pub struct WalkArgs {
    #[command(flatten)]
    pub input: SnapshotArgs,
    #[arg(long = "json", default_value_t = false)]
    pub json: bool,
}

#[derive(Debug, Serialize)]
struct WalkReport<'a> {
    path: Vec<&'a str>,
    visited: Vec<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    loop_at: Option<&'a str>,
}

pub fn run(args: &WalkArgs, options: &EvalOptions) -> Result<()> {
    let (survey, responses) = args.input.load()?;
    let path = walk(&survey, &responses, options);
    let id_at = |index: usize| survey.questions[index].id.as_str();

    if args.json {
        return print_json(&WalkReport {
            path: path.visited.iter().map(|index| id_at(*index)).collect(),
            visited: path.visited.clone(),
            loop_at: path.loop_at.map(id_at),
        });
    }
    for (step, index) in path.visited.iter().enumerate() {
        println!("{:>3}. {}", step + 1, question_label(&survey, *index));
    }
    match path.loop_at {
        Some(index) => println!("loop: navigation returns to {}", question_label(&survey, index)),
        None => println!("END"),
    }
    Ok(())
}
