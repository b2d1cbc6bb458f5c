use crate::spec::table::TableCheck;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Semantic kind of a table validation rule; overrides the stored check type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "kebab-case")]
pub enum RuleType {
    /// Exactly the listed rows are hit, no others.
    ExclusiveCheck,
    AnyOf,
    AllOf,
    NoneOf,
    RequiredCombination,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum RuleAction {
    Goto,
    End,
}

/// Branching rule evaluated when leaving a table question.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct TableValidationRule {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: RuleType,
    pub conditions: TableCheck,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub additional_conditions: Option<TableCheck>,
    pub action: RuleAction,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target_question_id: Option<String>,
    /// Option value to question id, for branches picked by the respondent's selection.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target_question_map: Option<BTreeMap<String, String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error_message: Option<String>,
}
