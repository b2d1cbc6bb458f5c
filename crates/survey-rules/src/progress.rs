use std::collections::BTreeMap;

use serde::Serialize;

use crate::answers::Responses;
use crate::options::EvalOptions;
use crate::spec::survey::Survey;
use crate::visibility::visible_questions_with;

/// Answered share of the currently visible questions.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ProgressSummary {
    pub visible: usize,
    pub answered: usize,
    pub percent: f64,
}

impl ProgressSummary {
    pub fn compute(survey: &Survey, responses: &Responses) -> Self {
        Self::compute_with(survey, responses, &EvalOptions::default())
    }

    pub fn compute_with(survey: &Survey, responses: &Responses, options: &EvalOptions) -> Self {
        let answerable: Vec<_> = visible_questions_with(survey, responses, options)
            .into_iter()
            .filter(|question| question.kind.collects_response())
            .collect();
        let answered = answerable
            .iter()
            .filter(|question| responses.is_answered(&question.id))
            .count();
        let visible = answerable.len();
        let percent = if visible == 0 {
            100.0
        } else {
            (answered as f64 / visible as f64 * 1000.0).round() / 10.0
        };

        Self {
            visible,
            answered,
            percent,
        }
    }
}

/// 1-based display numbers for visible questions; notices are not numbered.
pub fn question_numbers(survey: &Survey, responses: &Responses) -> BTreeMap<String, usize> {
    question_numbers_with(survey, responses, &EvalOptions::default())
}

pub fn question_numbers_with(
    survey: &Survey,
    responses: &Responses,
    options: &EvalOptions,
) -> BTreeMap<String, usize> {
    visible_questions_with(survey, responses, options)
        .into_iter()
        .filter(|question| question.kind.collects_response())
        .enumerate()
        .map(|(position, question)| (question.id.clone(), position + 1))
        .collect()
}
