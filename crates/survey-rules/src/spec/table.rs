use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Widget rendered inside one table cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum CellKind {
    #[default]
    Text,
    Image,
    Checkbox,
    Radio,
    Select,
    Input,
}

impl CellKind {
    /// Whether respondents can put a value into this cell.
    pub fn is_interactive(self) -> bool {
        matches!(
            self,
            CellKind::Checkbox | CellKind::Radio | CellKind::Select | CellKind::Input
        )
    }
}

/// Selectable option of a checkbox, radio or select cell.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct CellOption {
    pub id: String,
    #[serde(default)]
    pub label: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct TableCell {
    pub id: String,
    #[serde(rename = "type", default)]
    pub kind: CellKind,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub content: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub checkbox_options: Vec<CellOption>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub radio_options: Vec<CellOption>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub select_options: Vec<CellOption>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rowspan: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub colspan: Option<u32>,
    #[serde(default)]
    pub is_hidden: bool,
}

impl TableCell {
    /// Options matching the cell's own widget.
    pub fn options(&self) -> &[CellOption] {
        match self.kind {
            CellKind::Checkbox => &self.checkbox_options,
            CellKind::Radio => &self.radio_options,
            CellKind::Select => &self.select_options,
            CellKind::Text | CellKind::Image | CellKind::Input => &[],
        }
    }

    pub fn option(&self, id: &str) -> Option<&CellOption> {
        self.options().iter().find(|option| option.id == id)
    }

    /// Number of rows the cell covers, never less than one.
    pub fn row_span(&self) -> usize {
        self.rowspan.map_or(1, |span| span.max(1) as usize)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct TableRow {
    pub id: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub label: String,
    #[serde(default)]
    pub cells: Vec<TableCell>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct TableColumn {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub label: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub width: Option<u32>,
}

/// How per-row hits are combined, or which widget a validation rule inspects.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum CheckType {
    #[default]
    Any,
    All,
    None,
    Checkbox,
    Radio,
    Select,
    Input,
}

/// Row combinator applied to the per-row hits of a check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Combinator {
    Any,
    All,
    None,
}

impl CheckType {
    pub fn combinator(self) -> Option<Combinator> {
        match self {
            CheckType::Any => Some(Combinator::Any),
            CheckType::All => Some(Combinator::All),
            CheckType::None => Some(Combinator::None),
            CheckType::Checkbox | CheckType::Radio | CheckType::Select | CheckType::Input => None,
        }
    }

    /// Widget filter carried by validation-rule checks.
    pub fn widget(self) -> Option<CellKind> {
        match self {
            CheckType::Checkbox => Some(CellKind::Checkbox),
            CheckType::Radio => Some(CellKind::Radio),
            CheckType::Select => Some(CellKind::Select),
            CheckType::Input => Some(CellKind::Input),
            CheckType::Any | CheckType::All | CheckType::None => None,
        }
    }
}

/// Row-scoped predicate over the cells of one table question.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct TableCheck {
    #[serde(default)]
    pub row_ids: Vec<String>,
    #[serde(default)]
    pub check_type: CheckType,
    /// `None` inspects every interactive column of the row.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cell_column_index: Option<usize>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub expected_values: Vec<String>,
}

impl TableCheck {
    pub fn rows<I, S>(check_type: CheckType, row_ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            row_ids: row_ids.into_iter().map(Into::into).collect(),
            check_type,
            cell_column_index: None,
            expected_values: Vec::new(),
        }
    }

    pub fn at_column(mut self, index: usize) -> Self {
        self.cell_column_index = Some(index);
        self
    }

    pub fn expecting<I, S>(mut self, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.expected_values = values.into_iter().map(Into::into).collect();
        self
    }
}
