use std::collections::{BTreeMap, HashSet};

use tracing::debug;

use crate::answers::Responses;
use crate::conditions::evaluate_display_condition;
use crate::options::EvalOptions;
use crate::spec::group::QuestionGroup;
use crate::spec::question::Question;
use crate::spec::survey::Survey;

pub type VisibilityMap = BTreeMap<String, bool>;

/// A question is shown only when its own condition and every ancestor group's condition hold.
pub fn should_display_question(
    question: &Question,
    responses: &Responses,
    questions: &[Question],
    groups: &[QuestionGroup],
) -> bool {
    should_display_question_with(
        question,
        responses,
        questions,
        groups,
        &EvalOptions::default(),
    )
}

pub fn should_display_question_with(
    question: &Question,
    responses: &Responses,
    questions: &[Question],
    groups: &[QuestionGroup],
    options: &EvalOptions,
) -> bool {
    if !evaluate_display_condition(
        question.display_condition.as_ref(),
        responses,
        questions,
        options,
    ) {
        return false;
    }

    group_chain(question.group_id.as_deref(), groups)
        .into_iter()
        .all(|group| {
            evaluate_display_condition(group.display_condition.as_ref(), responses, questions, options)
        })
}

/// Groups from `start` up through its ancestors.
///
/// Stops at an unknown parent id or the first repeated group; the ancestors
/// beyond that point place no restriction.
pub fn group_chain<'a>(start: Option<&str>, groups: &'a [QuestionGroup]) -> Vec<&'a QuestionGroup> {
    let mut chain = Vec::new();
    let mut visited = HashSet::new();
    let mut current = start;

    while let Some(group_id) = current {
        if !visited.insert(group_id) {
            debug!(group = group_id, "group parent chain loops; stopping walk");
            break;
        }
        let Some(group) = groups.iter().find(|group| group.id == group_id) else {
            debug!(group = group_id, "group not found; stopping walk");
            break;
        };
        chain.push(group);
        current = group.parent_group_id.as_deref();
    }

    chain
}

/// Index of the first visible question at or after `from`.
pub fn next_visible_index(
    questions: &[Question],
    groups: &[QuestionGroup],
    responses: &Responses,
    from: usize,
) -> Option<usize> {
    next_visible_index_with(questions, groups, responses, from, &EvalOptions::default())
}

pub fn next_visible_index_with(
    questions: &[Question],
    groups: &[QuestionGroup],
    responses: &Responses,
    from: usize,
    options: &EvalOptions,
) -> Option<usize> {
    questions
        .iter()
        .enumerate()
        .skip(from)
        .find(|(_, question)| {
            should_display_question_with(question, responses, questions, groups, options)
        })
        .map(|(index, _)| index)
}

pub fn resolve_visibility(survey: &Survey, responses: &Responses) -> VisibilityMap {
    resolve_visibility_with(survey, responses, &EvalOptions::default())
}

pub fn resolve_visibility_with(
    survey: &Survey,
    responses: &Responses,
    options: &EvalOptions,
) -> VisibilityMap {
    survey
        .questions
        .iter()
        .map(|question| {
            let visible = should_display_question_with(
                question,
                responses,
                &survey.questions,
                &survey.groups,
                options,
            );
            (question.id.clone(), visible)
        })
        .collect()
}

/// Currently visible questions in survey order.
pub fn visible_questions<'a>(survey: &'a Survey, responses: &Responses) -> Vec<&'a Question> {
    visible_questions_with(survey, responses, &EvalOptions::default())
}

pub fn visible_questions_with<'a>(
    survey: &'a Survey,
    responses: &Responses,
    options: &EvalOptions,
) -> Vec<&'a Question> {
    survey
        .questions
        .iter()
        .filter(|question| {
            should_display_question_with(
                question,
                responses,
                &survey.questions,
                &survey.groups,
                options,
            )
        })
        .collect()
}
