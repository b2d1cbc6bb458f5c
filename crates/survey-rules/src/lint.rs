//! Authoring-time checks for rule configuration.
//!
//! The evaluators degrade silently on broken references; this pass reports
//! the same problems to the survey author instead.

use std::collections::HashSet;

use serde::Serialize;

use crate::spec::condition::{Condition, ConditionGroup, ConditionKind};
use crate::spec::question::Question;
use crate::spec::survey::Survey;
use crate::spec::table::TableCheck;
use crate::spec::validation::{RuleAction, TableValidationRule};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    Info,
    Warning,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LintFinding {
    pub code: &'static str,
    pub severity: Severity,
    pub subject: String,
    pub message: String,
}

/// Checks every display condition and validation rule of `survey`, in document order.
pub fn lint(survey: &Survey) -> Vec<LintFinding> {
    let mut linter = Linter {
        survey,
        findings: Vec::new(),
    };
    for (position, question) in survey.questions.iter().enumerate() {
        linter.question(position, question);
    }
    for group in &survey.groups {
        let subject = format!("group:{}", group.id);
        if let Some(parent) = &group.parent_group_id
            && survey.group(parent).is_none()
        {
            linter.push(
                "unknown_group",
                Severity::Error,
                &subject,
                format!("parent group '{parent}' does not exist"),
            );
        }
        if in_cycle(survey, &group.id) {
            linter.push(
                "group_cycle",
                Severity::Error,
                &subject,
                "parent group chain loops back to this group".to_string(),
            );
        }
        if let Some(condition) = &group.display_condition {
            linter.condition_group(&subject, None, condition);
        }
    }
    linter.findings
}

/// True when the highest severity in `findings` is at least `threshold`.
pub fn has_findings_at(findings: &[LintFinding], threshold: Severity) -> bool {
    findings.iter().any(|finding| finding.severity >= threshold)
}

fn in_cycle(survey: &Survey, start: &str) -> bool {
    let mut visited = HashSet::new();
    let mut current = survey
        .group(start)
        .and_then(|group| group.parent_group_id.as_deref());
    while let Some(id) = current {
        if id == start {
            return true;
        }
        if !visited.insert(id) {
            return false;
        }
        current = survey
            .group(id)
            .and_then(|group| group.parent_group_id.as_deref());
    }
    false
}

struct Linter<'a> {
    survey: &'a Survey,
    findings: Vec<LintFinding>,
}

impl Linter<'_> {
    fn push(&mut self, code: &'static str, severity: Severity, subject: &str, message: String) {
        self.findings.push(LintFinding {
            code,
            severity,
            subject: subject.to_string(),
            message,
        });
    }

    fn question(&mut self, position: usize, question: &Question) {
        let subject = format!("question:{}", question.id);
        if let Some(group_id) = &question.group_id
            && self.survey.group(group_id).is_none()
        {
            self.push(
                "unknown_group",
                Severity::Error,
                &subject,
                format!("group '{group_id}' does not exist"),
            );
        }
        if let Some(condition) = &question.display_condition {
            self.condition_group(&subject, Some(position), condition);
        }
        if question.table_validation_rules.is_empty() {
            return;
        }
        if !question.is_table() {
            self.push(
                "rules_on_non_table",
                Severity::Warning,
                &subject,
                "validation rules only apply to table questions".to_string(),
            );
            return;
        }
        for rule in &question.table_validation_rules {
            self.rule(position, question, rule);
        }
    }

    fn condition_group(&mut self, owner: &str, position: Option<usize>, group: &ConditionGroup) {
        for condition in &group.conditions {
            self.condition(owner, position, condition);
        }
    }

    fn condition(&mut self, owner: &str, position: Option<usize>, condition: &Condition) {
        let subject = format!("{owner}/condition:{}", condition.id);
        let source_id = &condition.source_question_id;
        let Some(source_position) = self.survey.question_index(source_id) else {
            self.push(
                "unknown_source_question",
                Severity::Error,
                &subject,
                format!("source question '{source_id}' does not exist"),
            );
            return;
        };
        if let Some(position) = position
            && source_position >= position
        {
            self.push(
                "forward_source_question",
                Severity::Warning,
                &subject,
                format!("source question '{source_id}' is not answered before this question"),
            );
        }

        let ConditionKind::TableCellCheck {
            table_conditions,
            additional_conditions,
        } = &condition.kind
        else {
            return;
        };
        let survey = self.survey;
        let source = &survey.questions[source_position];
        if !source.is_table() {
            self.push(
                "source_not_table",
                Severity::Error,
                &subject,
                format!("source question '{source_id}' is not a table"),
            );
            return;
        }
        match table_conditions {
            Some(check) => self.table_check(&subject, source, check),
            None => self.push(
                "missing_table_check",
                Severity::Error,
                &subject,
                "table-cell-check condition has no tableConditions".to_string(),
            ),
        }
        if let Some(check) = additional_conditions {
            self.table_check(&subject, source, check);
        }
    }

    fn table_check(&mut self, subject: &str, table: &Question, check: &TableCheck) {
        let rows = table.table_rows();
        for row_id in &check.row_ids {
            if !rows.iter().any(|row| &row.id == row_id) {
                self.push(
                    "unknown_row",
                    Severity::Error,
                    subject,
                    format!("row '{row_id}' is not part of table '{}'", table.id),
                );
            }
        }
        match check.cell_column_index {
            Some(col) => {
                let short_row = rows
                    .iter()
                    .filter(|row| check.row_ids.contains(&row.id))
                    .find(|row| row.cells.len() <= col);
                if let Some(row) = short_row {
                    self.push(
                        "column_out_of_range",
                        Severity::Error,
                        subject,
                        format!("column {col} does not exist in row '{}'", row.id),
                    );
                }
            }
            None => self.push(
                "unscoped_column",
                Severity::Info,
                subject,
                "no column selected; a row counts when any interactive column matches"
                    .to_string(),
            ),
        }
    }

    fn rule(&mut self, position: usize, question: &Question, rule: &TableValidationRule) {
        let subject = format!("question:{}/rule:{}", question.id, rule.id);
        self.table_check(&subject, question, &rule.conditions);
        if let Some(check) = &rule.additional_conditions {
            self.table_check(&subject, question, check);
        }
        if rule.action != RuleAction::Goto {
            return;
        }

        let targets: Vec<&str> = match &rule.target_question_map {
            Some(map) if !map.is_empty() => map.values().map(String::as_str).collect(),
            _ => rule.target_question_id.as_deref().into_iter().collect(),
        };
        if targets.is_empty() {
            self.push(
                "goto_without_target",
                Severity::Error,
                &subject,
                "goto rule has neither targetQuestionId nor targetQuestionMap".to_string(),
            );
        }
        for target in targets {
            match self.survey.question_index(target) {
                None => self.push(
                    "dangling_target",
                    Severity::Error,
                    &subject,
                    format!("target question '{target}' does not exist"),
                ),
                Some(index) if index <= position => self.push(
                    "backward_target",
                    Severity::Warning,
                    &subject,
                    format!("target question '{target}' comes at or before this question"),
                ),
                Some(_) => {}
            }
        }
    }
}
