use tracing::{debug, trace};

use crate::answers::{ResponseValue, Responses};
use crate::options::EvalOptions;
use crate::spec::condition::{Condition, ConditionGroup, ConditionKind, LogicType};
use crate::spec::question::Question;
use crate::spec::table::{Combinator, TableCheck};
use crate::table_check::TableScope;

/// Evaluates one condition against the response snapshot. Never panics; unresolved data is `false`.
pub fn evaluate_condition(
    condition: &Condition,
    responses: &Responses,
    questions: &[Question],
) -> bool {
    evaluate_condition_with(condition, responses, questions, &EvalOptions::default())
}

pub fn evaluate_condition_with(
    condition: &Condition,
    responses: &Responses,
    questions: &[Question],
    options: &EvalOptions,
) -> bool {
    if !condition.enabled {
        return false;
    }
    let Some(source) = questions
        .iter()
        .find(|question| question.id == condition.source_question_id)
    else {
        debug!(
            condition = %condition.id,
            source = %condition.source_question_id,
            "condition source question not found"
        );
        return false;
    };
    let Some(response) = responses.get(&source.id) else {
        return false;
    };

    let result = match &condition.kind {
        ConditionKind::ValueMatch { required_values } => value_matches(response, required_values),
        ConditionKind::TableCellCheck {
            table_conditions,
            additional_conditions,
        } => {
            let Some(primary) = table_conditions else {
                return false;
            };
            let Some(cells) = response.as_table() else {
                return false;
            };
            let scope = TableScope::new(source.table_rows(), cells, options);
            let stored =
                |check: &TableCheck| check.check_type.combinator().unwrap_or(Combinator::Any);
            scope.satisfied(primary, stored(primary))
                && additional_conditions
                    .as_ref()
                    .is_none_or(|extra| scope.satisfied(extra, stored(extra)))
        }
    };
    trace!(condition = %condition.id, result, "condition evaluated");
    result
}

fn value_matches(response: &ResponseValue, required_values: &[String]) -> bool {
    if required_values.is_empty() {
        return response.is_answered();
    }
    response
        .choice_values()
        .iter()
        .any(|value| required_values.iter().any(|required| required == value))
}

/// Combines the enabled conditions of a group; an empty group always holds.
pub fn evaluate_group(
    group: &ConditionGroup,
    responses: &Responses,
    questions: &[Question],
) -> bool {
    evaluate_group_with(group, responses, questions, &EvalOptions::default())
}

pub fn evaluate_group_with(
    group: &ConditionGroup,
    responses: &Responses,
    questions: &[Question],
    options: &EvalOptions,
) -> bool {
    let mut enabled = group.enabled_conditions().peekable();
    if enabled.peek().is_none() {
        return true;
    }
    let mut results =
        enabled.map(|condition| evaluate_condition_with(condition, responses, questions, options));

    match group.logic_type {
        LogicType::And => results.all(|holds| holds),
        LogicType::Or => results.any(|holds| holds),
        LogicType::Not => !results.any(|holds| holds),
    }
}

/// A missing display condition places no restriction.
pub fn evaluate_display_condition(
    group: Option<&ConditionGroup>,
    responses: &Responses,
    questions: &[Question],
    options: &EvalOptions,
) -> bool {
    group.is_none_or(|group| evaluate_group_with(group, responses, questions, options))
}
