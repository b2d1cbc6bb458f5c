use crate::error::SurveyError;
use crate::spec::group::QuestionGroup;
use crate::spec::question::Question;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::path::Path;

/// Questions and groups of one survey, as supplied by the editor.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize, JsonSchema)]
pub struct Survey {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    pub questions: Vec<Question>,
    #[serde(default)]
    pub groups: Vec<QuestionGroup>,
}

impl Survey {
    pub fn new(questions: Vec<Question>, groups: Vec<QuestionGroup>) -> Self {
        Self {
            id: None,
            title: None,
            questions,
            groups,
        }
    }

    /// Parses a survey document and orders questions by their `order` field.
    pub fn from_json_str(raw: &str) -> Result<Self, SurveyError> {
        let survey: Survey = serde_json::from_str(raw)?;
        Ok(survey.ordered())
    }

    pub fn from_value(value: Value) -> Result<Self, SurveyError> {
        let survey: Survey = serde_json::from_value(value)?;
        Ok(survey.ordered())
    }

    pub fn from_path(path: &Path) -> Result<Self, SurveyError> {
        let raw = std::fs::read_to_string(path).map_err(|source| SurveyError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json_str(&raw)
    }

    fn ordered(mut self) -> Self {
        self.questions.sort_by_key(|question| question.order);
        self
    }

    pub fn question(&self, id: &str) -> Option<&Question> {
        self.questions.iter().find(|question| question.id == id)
    }

    pub fn question_index(&self, id: &str) -> Option<usize> {
        question_index(&self.questions, id)
    }

    pub fn group(&self, id: &str) -> Option<&QuestionGroup> {
        self.groups.iter().find(|group| group.id == id)
    }
}

pub(crate) fn question_index(questions: &[Question], id: &str) -> Option<usize> {
    questions.iter().position(|question| question.id == id)
}
