#![allow(missing_docs)]
//! Display conditions, table validation rules and branching navigation for
//! in-progress survey responses. Every entry point is a pure function over
//! the survey definition and a response snapshot.

pub mod answers;
pub mod conditions;
pub mod error;
pub mod lint;
pub mod merge;
pub mod navigation;
pub mod options;
pub mod progress;
pub mod spec;
pub mod table_check;
pub mod validation;
pub mod visibility;

pub use answers::{CellValue, ChoiceItem, OtherChoice, ResponseValue, Responses, TableResponse};
pub use conditions::{
    evaluate_condition, evaluate_condition_with, evaluate_display_condition, evaluate_group,
    evaluate_group_with,
};
pub use error::SurveyError;
pub use lint::{LintFinding, Severity, has_findings_at, lint};
pub use merge::{RowMergeInfo, merged_row_ids, resolve_cell, row_merge_info};
pub use navigation::{
    NavigationStep, NextQuestion, SurveyPath, Transition, advance, advance_with,
    first_visible_index, get_next_question_index, get_next_question_index_with,
    resolve_navigation, walk,
};
pub use options::{ColumnPolicy, EvalOptions};
pub use progress::{ProgressSummary, question_numbers, question_numbers_with};
pub use spec::{
    CellKind, CellOption, CheckType, Condition, ConditionGroup, ConditionKind, LogicType,
    Question, QuestionGroup, QuestionType, RuleAction, RuleType, Survey, TableCell, TableCheck,
    TableColumn, TableRow, TableValidationRule,
};
pub use table_check::{table_cell_satisfied, table_cell_satisfied_with};
pub use validation::{evaluate_table_validation, evaluate_table_validation_with};
pub use visibility::{
    VisibilityMap, next_visible_index, next_visible_index_with, resolve_visibility,
    resolve_visibility_with, should_display_question, should_display_question_with,
    visible_questions, visible_questions_with,
};
