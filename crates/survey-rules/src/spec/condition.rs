use crate::spec::table::TableCheck;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// How the enabled conditions of a group are combined.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "UPPERCASE")]
pub enum LogicType {
    #[default]
    And,
    Or,
    /// None of the conditions may hold.
    Not,
}

/// Display condition attached to a question or a group.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct ConditionGroup {
    #[serde(default)]
    pub conditions: Vec<Condition>,
    #[serde(default)]
    pub logic_type: LogicType,
}

impl ConditionGroup {
    pub fn new(logic_type: LogicType, conditions: Vec<Condition>) -> Self {
        Self {
            conditions,
            logic_type,
        }
    }

    pub fn enabled_conditions(&self) -> impl Iterator<Item = &Condition> {
        self.conditions.iter().filter(|condition| condition.enabled)
    }
}

/// One predicate over an earlier question's response.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct Condition {
    #[serde(default)]
    pub id: String,
    #[serde(default = "enabled_by_default")]
    pub enabled: bool,
    pub source_question_id: String,
    #[serde(flatten)]
    pub kind: ConditionKind,
}

fn enabled_by_default() -> bool {
    true
}

impl Condition {
    pub fn value_match(
        id: impl Into<String>,
        source_question_id: impl Into<String>,
        required_values: Vec<String>,
    ) -> Self {
        Self {
            id: id.into(),
            enabled: true,
            source_question_id: source_question_id.into(),
            kind: ConditionKind::ValueMatch { required_values },
        }
    }

    pub fn table_cell_check(
        id: impl Into<String>,
        source_question_id: impl Into<String>,
        table_conditions: TableCheck,
        additional_conditions: Option<TableCheck>,
    ) -> Self {
        Self {
            id: id.into(),
            enabled: true,
            source_question_id: source_question_id.into(),
            kind: ConditionKind::TableCellCheck {
                table_conditions: Some(table_conditions),
                additional_conditions,
            },
        }
    }

    pub fn disabled(mut self) -> Self {
        self.enabled = false;
        self
    }
}

/// Condition variants, tagged by `conditionType` on the wire.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(tag = "conditionType", rename_all = "kebab-case")]
pub enum ConditionKind {
    /// The source response must include one of `required_values`; empty means any answer.
    ValueMatch {
        #[serde(
            rename = "requiredValues",
            default,
            skip_serializing_if = "Vec::is_empty"
        )]
        required_values: Vec<String>,
    },
    /// Cell-level checks against a table source question.
    TableCellCheck {
        #[serde(
            rename = "tableConditions",
            default,
            skip_serializing_if = "Option::is_none"
        )]
        table_conditions: Option<TableCheck>,
        #[serde(
            rename = "additionalConditions",
            default,
            skip_serializing_if = "Option::is_none"
        )]
        additional_conditions: Option<TableCheck>,
    },
}
