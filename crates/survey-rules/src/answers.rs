use schemars::JsonSchema;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;
use std::path::Path;

use crate::error::SurveyError;

/// Radio/select answer where the respondent typed a free-form "other" value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct OtherChoice {
    pub selected_value: String,
    #[serde(default)]
    pub other_value: String,
    pub has_other: bool,
}

/// One element of a checkbox answer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(untagged)]
pub enum ChoiceItem {
    Value(String),
    Other(OtherChoice),
}

impl ChoiceItem {
    pub fn value(&self) -> &str {
        match self {
            ChoiceItem::Value(value) => value,
            ChoiceItem::Other(other) => &other.selected_value,
        }
    }
}

/// Value held by one table cell: option id, option ids, or typed text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(untagged)]
pub enum CellValue {
    Text(String),
    Selections(Vec<String>),
    Unsupported(Value),
}

impl CellValue {
    /// Non-empty values held by the cell, in stored order.
    pub fn values(&self) -> Vec<&str> {
        match self {
            CellValue::Text(text) if !text.trim().is_empty() => vec![text.as_str()],
            CellValue::Text(_) | CellValue::Unsupported(_) => Vec::new(),
            CellValue::Selections(values) => values
                .iter()
                .map(String::as_str)
                .filter(|value| !value.is_empty())
                .collect(),
        }
    }

    pub fn is_answered(&self) -> bool {
        !self.values().is_empty()
    }
}

/// Cell id to cell value for one table question.
pub type TableResponse = BTreeMap<String, CellValue>;

/// Response to one question; the shape depends on the question type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(untagged)]
pub enum ResponseValue {
    Text(String),
    Other(OtherChoice),
    Multi(Vec<ChoiceItem>),
    Table(TableResponse),
    /// Anything the engine cannot interpret; evaluates as "no data".
    Unsupported(Value),
}

impl ResponseValue {
    pub fn text(value: impl Into<String>) -> Self {
        ResponseValue::Text(value.into())
    }

    pub fn multi<I, S>(values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        ResponseValue::Multi(
            values
                .into_iter()
                .map(|value| ChoiceItem::Value(value.into()))
                .collect(),
        )
    }

    /// Selected values with "other" wrappers unwrapped; empty strings are skipped.
    pub fn choice_values(&self) -> Vec<&str> {
        match self {
            ResponseValue::Text(text) if !text.trim().is_empty() => vec![text.as_str()],
            ResponseValue::Other(other) if !other.selected_value.is_empty() => {
                vec![other.selected_value.as_str()]
            }
            ResponseValue::Multi(items) => items
                .iter()
                .map(ChoiceItem::value)
                .filter(|value| !value.is_empty())
                .collect(),
            ResponseValue::Text(_)
            | ResponseValue::Other(_)
            | ResponseValue::Table(_)
            | ResponseValue::Unsupported(_) => Vec::new(),
        }
    }

    pub fn is_answered(&self) -> bool {
        match self {
            ResponseValue::Table(cells) => cells.values().any(CellValue::is_answered),
            ResponseValue::Unsupported(_) => false,
            _ => !self.choice_values().is_empty(),
        }
    }

    pub fn as_table(&self) -> Option<&TableResponse> {
        match self {
            ResponseValue::Table(cells) => Some(cells),
            _ => None,
        }
    }
}

/// Read-only snapshot of the responses collected so far, keyed by question id.
#[derive(Debug, Clone, PartialEq, Default, Serialize, JsonSchema)]
#[serde(transparent)]
pub struct Responses(BTreeMap<String, ResponseValue>);

impl<'de> Deserialize<'de> for Responses {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = BTreeMap::<String, Option<ResponseValue>>::deserialize(deserializer)?;
        Ok(raw
            .into_iter()
            .filter_map(|(id, value)| value.map(|value| (id, value)))
            .collect())
    }
}

impl Responses {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_value(value: Value) -> Result<Self, SurveyError> {
        Ok(serde_json::from_value(value)?)
    }

    pub fn from_path(path: &Path) -> Result<Self, SurveyError> {
        let raw = std::fs::read_to_string(path).map_err(|source| SurveyError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(serde_json::from_str(&raw)?)
    }

    pub fn with(mut self, question_id: impl Into<String>, value: ResponseValue) -> Self {
        self.0.insert(question_id.into(), value);
        self
    }

    pub fn get(&self, question_id: &str) -> Option<&ResponseValue> {
        self.0.get(question_id)
    }

    pub fn is_answered(&self, question_id: &str) -> bool {
        self.get(question_id).is_some_and(ResponseValue::is_answered)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &ResponseValue)> {
        self.0.iter()
    }
}

impl FromIterator<(String, ResponseValue)> for Responses {
    fn from_iter<T: IntoIterator<Item = (String, ResponseValue)>>(iter: T) -> Self {
        Self(iter.into_iter().collect())
    }
}
