use crate::spec::condition::ConditionGroup;
use crate::spec::table::{TableColumn, TableRow};
use crate::spec::validation::TableValidationRule;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Widget families a question can use.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum QuestionType {
    Notice,
    Text,
    Textarea,
    Radio,
    Checkbox,
    Select,
    Multiselect,
    Table,
}

impl QuestionType {
    /// Notices display content only and never collect a response.
    pub fn collects_response(self) -> bool {
        !matches!(self, QuestionType::Notice)
    }
}

/// Definition of a single question inside a survey.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct Question {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: QuestionType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub group_id: Option<String>,
    #[serde(default)]
    pub order: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display_condition: Option<ConditionGroup>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub table_rows_data: Vec<TableRow>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub table_columns: Vec<TableColumn>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub table_validation_rules: Vec<TableValidationRule>,
}

impl Question {
    pub fn is_table(&self) -> bool {
        self.kind == QuestionType::Table
    }

    /// Row grid of a table question; empty for every other type.
    pub fn table_rows(&self) -> &[TableRow] {
        if self.is_table() {
            &self.table_rows_data
        } else {
            &[]
        }
    }
}
