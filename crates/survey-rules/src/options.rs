use serde::{Deserialize, Serialize};

/// How a row is judged when a table check names no column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColumnPolicy {
    /// The row is hit when any interactive column is hit.
    #[default]
    Any,
    /// The row is hit only when every interactive column is hit.
    All,
}

/// Evaluation knobs shared by every evaluator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct EvalOptions {
    pub unscoped_columns: ColumnPolicy,
}

impl EvalOptions {
    pub fn with_unscoped_columns(mut self, policy: ColumnPolicy) -> Self {
        self.unscoped_columns = policy;
        self
    }
}
