pub mod lint;
pub mod next;
pub mod schema;
pub mod visibility;
pub mod walk;

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Args;
use serde::Serialize;
use survey_rules::{Responses, Survey};

/// Survey document plus the response snapshot to evaluate it against.
#[derive(Args, Debug, Clone)]
pub struct SnapshotArgs {
    #[arg(long = "survey", value_name = "survey.json")]
    pub survey: PathBuf,
    /// Response snapshot; omitted means nothing answered yet
    #[arg(long = "responses", value_name = "responses.json")]
    pub responses: Option<PathBuf>,
}

impl SnapshotArgs {
    pub fn load(&self) -> Result<(Survey, Responses)> {
        let survey = load_survey(&self.survey)?;
        let responses = match &self.responses {
            Some(path) => Responses::from_path(path)
                .with_context(|| format!("failed to load responses {}", path.display()))?,
            None => Responses::new(),
        };
        Ok((survey, responses))
    }
}

pub fn load_survey(path: &Path) -> Result<Survey> {
    Survey::from_path(path).with_context(|| format!("failed to load survey {}", path.display()))
}

pub(crate) fn print_json<T: Serialize>(value: &T) -> Result<()> {
    let rendered = serde_json::to_string_pretty(value).context("failed to render JSON output")?;
    println!("{rendered}");
    Ok(())
}

/// `Q3 (#2)` style label used by the text outputs.
pub(crate) fn question_label(survey: &Survey, index: usize) -> String {
    match survey.questions.get(index) {
        Some(question) => format!("{} (#{index})", question.id),
        None => format!("#{index}"),
    }
}
