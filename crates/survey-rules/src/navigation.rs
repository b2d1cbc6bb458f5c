use serde::Serialize;
use tracing::debug;

use crate::answers::{ResponseValue, Responses, TableResponse};
use crate::options::EvalOptions;
use crate::spec::question::Question;
use crate::spec::survey::{Survey, question_index};
use crate::spec::validation::{RuleAction, TableValidationRule};
use crate::table_check::TableScope;
use crate::validation::evaluate_table_validation_with;
use crate::visibility::next_visible_index_with;

/// Where the respondent goes after the current question.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "index", rename_all = "snake_case")]
pub enum NextQuestion {
    Index(usize),
    /// Submit now; no question follows.
    End,
}

impl NextQuestion {
    pub fn index(self) -> Option<usize> {
        match self {
            NextQuestion::Index(index) => Some(index),
            NextQuestion::End => None,
        }
    }

    /// Index form used by callers that signal the end with `-1`.
    pub fn as_signed(self) -> i64 {
        match self {
            NextQuestion::Index(index) => index as i64,
            NextQuestion::End => -1,
        }
    }
}

impl From<Option<usize>> for NextQuestion {
    fn from(index: Option<usize>) -> Self {
        index.map_or(NextQuestion::End, NextQuestion::Index)
    }
}

/// Why navigation moved where it did.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Transition {
    /// No rule fired; default order.
    Linear,
    End { rule_id: String },
    Goto { rule_id: String, target_id: String },
    /// A goto rule fired but its target could not be resolved; default order.
    Unresolved { rule_id: String },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NavigationStep {
    pub next: NextQuestion,
    pub transition: Transition,
}

impl NavigationStep {
    fn linear(questions: &[Question], current_index: usize, transition: Transition) -> Self {
        let next = current_index
            .checked_add(1)
            .filter(|next| *next < questions.len());
        Self {
            next: next.into(),
            transition,
        }
    }
}

/// Next question index before visibility is applied.
///
/// Only table questions branch: their validation rules can end the survey or
/// jump to another question. Everything else advances by one. Hidden questions
/// are not skipped here; see [`advance`].
pub fn get_next_question_index(
    questions: &[Question],
    current_index: usize,
    current_response: Option<&ResponseValue>,
) -> NextQuestion {
    get_next_question_index_with(
        questions,
        current_index,
        current_response,
        &EvalOptions::default(),
    )
}

pub fn get_next_question_index_with(
    questions: &[Question],
    current_index: usize,
    current_response: Option<&ResponseValue>,
    options: &EvalOptions,
) -> NextQuestion {
    resolve_navigation(questions, current_index, current_response, options).next
}

/// Navigation outcome together with the rule, if any, that decided it.
pub fn resolve_navigation(
    questions: &[Question],
    current_index: usize,
    current_response: Option<&ResponseValue>,
    options: &EvalOptions,
) -> NavigationStep {
    let Some(question) = questions.get(current_index) else {
        return NavigationStep::linear(questions, current_index, Transition::Linear);
    };
    let Some(rule) = evaluate_table_validation_with(question, current_response, options) else {
        return NavigationStep::linear(questions, current_index, Transition::Linear);
    };

    match rule.action {
        RuleAction::End => NavigationStep {
            next: NextQuestion::End,
            transition: Transition::End {
                rule_id: rule.id.clone(),
            },
        },
        RuleAction::Goto => {
            let empty = TableResponse::new();
            let cells = current_response
                .and_then(ResponseValue::as_table)
                .unwrap_or(&empty);
            let scope = TableScope::new(question.table_rows(), cells, options);
            let target = goto_target(&scope, rule).and_then(|target_id| {
                let index = question_index(questions, target_id);
                if index.is_none() {
                    debug!(rule = %rule.id, target = target_id, "goto target question not found");
                }
                index.map(|index| (index, target_id))
            });

            match target {
                Some((index, target_id)) => NavigationStep {
                    next: NextQuestion::Index(index),
                    transition: Transition::Goto {
                        rule_id: rule.id.clone(),
                        target_id: target_id.to_string(),
                    },
                },
                None => NavigationStep::linear(
                    questions,
                    current_index,
                    Transition::Unresolved {
                        rule_id: rule.id.clone(),
                    },
                ),
            }
        }
    }
}

/// Target question id of a goto rule.
///
/// With a non-empty `targetQuestionMap`, the selection inside the rule's
/// `additionalConditions` rows (or its primary rows when there are none) is
/// looked up in the map, first match wins; option ids are tried before their
/// `value`. No match yields `None` even when a fixed target is also set.
fn goto_target<'r>(scope: &TableScope<'_>, rule: &'r TableValidationRule) -> Option<&'r str> {
    match rule.target_question_map.as_ref().filter(|map| !map.is_empty()) {
        Some(map) => {
            let selection_scope = rule
                .additional_conditions
                .as_ref()
                .unwrap_or(&rule.conditions);
            let target = scope
                .selected_values(selection_scope)
                .into_iter()
                .find_map(|value| map.get(value))
                .map(String::as_str);
            if target.is_none() {
                debug!(rule = %rule.id, "no target map key matches the selection");
            }
            target
        }
        None => rule.target_question_id.as_deref(),
    }
}

/// Next visible question after `current`, following branching rules first.
pub fn advance(survey: &Survey, responses: &Responses, current: usize) -> NextQuestion {
    advance_with(survey, responses, current, &EvalOptions::default())
}

pub fn advance_with(
    survey: &Survey,
    responses: &Responses,
    current: usize,
    options: &EvalOptions,
) -> NextQuestion {
    let response = survey
        .questions
        .get(current)
        .and_then(|question| responses.get(&question.id));
    match get_next_question_index_with(&survey.questions, current, response, options) {
        NextQuestion::End => NextQuestion::End,
        NextQuestion::Index(index) => {
            next_visible_index_with(&survey.questions, &survey.groups, responses, index, options)
                .into()
        }
    }
}

/// Initial state: the first visible question, or the end when none is visible.
pub fn first_visible_index(survey: &Survey, responses: &Responses) -> NextQuestion {
    next_visible_index_with(
        &survey.questions,
        &survey.groups,
        responses,
        0,
        &EvalOptions::default(),
    )
    .into()
}

/// Sequence of question indices a respondent with `responses` would see.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SurveyPath {
    pub visited: Vec<usize>,
    /// Index that would have been revisited, when a goto loop cut the walk short.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub loop_at: Option<usize>,
}

/// Walks the survey from its first visible question until the end.
pub fn walk(survey: &Survey, responses: &Responses, options: &EvalOptions) -> SurveyPath {
    let mut visited = Vec::new();
    let mut current = next_visible_index_with(
        &survey.questions,
        &survey.groups,
        responses,
        0,
        options,
    );

    while let Some(index) = current {
        if visited.contains(&index) {
            debug!(index, "navigation revisits a question; stopping walk");
            return SurveyPath {
                visited,
                loop_at: Some(index),
            };
        }
        visited.push(index);
        current = advance_with(survey, responses, index, options).index();
    }

    SurveyPath {
        visited,
        loop_at: None,
    }
}
