use tracing::debug;

use crate::answers::{ResponseValue, TableResponse};
use crate::options::EvalOptions;
use crate::spec::question::Question;
use crate::spec::table::Combinator;
use crate::spec::validation::{RuleType, TableValidationRule};
use crate::table_check::TableScope;

/// Returns the first validation rule of a table question that fires for `response`.
///
/// Rules are tried in order and later rules are not evaluated once one fires.
/// Non-table questions never fire. A missing or non-table response is treated as
/// an empty table, so `none-of` rules can fire before anything is selected.
pub fn evaluate_table_validation<'q>(
    question: &'q Question,
    response: Option<&ResponseValue>,
) -> Option<&'q TableValidationRule> {
    evaluate_table_validation_with(question, response, &EvalOptions::default())
}

pub fn evaluate_table_validation_with<'q>(
    question: &'q Question,
    response: Option<&ResponseValue>,
    options: &EvalOptions,
) -> Option<&'q TableValidationRule> {
    if !question.is_table() {
        return None;
    }
    let empty = TableResponse::new();
    let cells = response.and_then(ResponseValue::as_table).unwrap_or(&empty);
    let scope = TableScope::new(question.table_rows(), cells, options);

    let fired = question
        .table_validation_rules
        .iter()
        .find(|rule| rule_fires(&scope, rule));
    if let Some(rule) = fired {
        debug!(question = %question.id, rule = %rule.id, action = ?rule.action, "validation rule fired");
    }
    fired
}

fn rule_fires(scope: &TableScope<'_>, rule: &TableValidationRule) -> bool {
    let primary = match rule.kind {
        RuleType::AnyOf => scope.satisfied(&rule.conditions, Combinator::Any),
        RuleType::AllOf | RuleType::RequiredCombination => {
            scope.satisfied(&rule.conditions, Combinator::All)
        }
        RuleType::NoneOf => scope.satisfied(&rule.conditions, Combinator::None),
        RuleType::ExclusiveCheck => scope.exclusive(&rule.conditions),
    };

    primary
        && rule.additional_conditions.as_ref().is_none_or(|extra| {
            let combinator = extra.check_type.combinator().unwrap_or(Combinator::Any);
            scope.satisfied(extra, combinator)
        })
}
