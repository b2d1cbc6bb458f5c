use serde_json::{Value, json};

use survey_rules::{
    EvalOptions, NextQuestion, ResponseValue, Responses, Survey, Transition, advance,
    first_visible_index, get_next_question_index, resolve_navigation, walk,
};

fn grid(rules: Value) -> Value {
    json!({
        "id": "Q3",
        "type": "table",
        "order": 3,
        "tableRowsData": [
            { "id": "r1", "cells": [
                { "id": "label-r1", "content": "Tea" },
                { "id": "cellForR1", "type": "checkbox",
                  "checkboxOptions": [{ "id": "opt1", "label": "Yes" }] },
                { "id": "kind-r1", "type": "select",
                  "selectOptions": [
                    { "id": "s-green", "label": "Green", "value": "green" },
                    { "id": "s-black", "label": "Black", "value": "black" }
                  ] }
            ]},
            { "id": "r2", "cells": [
                { "id": "label-r2", "content": "Coffee" },
                { "id": "cellForR2", "type": "checkbox",
                  "checkboxOptions": [{ "id": "opt1", "label": "Yes" }] },
                { "id": "kind-r2", "type": "select", "selectOptions": [] }
            ]}
        ],
        "tableValidationRules": rules
    })
}

fn survey(rules: Value) -> Survey {
    Survey::from_value(json!({
        "questions": [
            { "id": "Q1", "type": "radio", "order": 1 },
            { "id": "Q2", "type": "text", "order": 2 },
            grid(rules),
            { "id": "Q4", "type": "text", "order": 4 },
            { "id": "Q5", "type": "text", "order": 5 },
            { "id": "Q6", "type": "text", "order": 6 }
        ]
    }))
    .expect("survey fixture")
}

fn table(value: Value) -> ResponseValue {
    serde_json::from_value(value).expect("table response")
}

fn end_on_exclusive_r1() -> Value {
    json!([{
        "id": "only-tea",
        "type": "exclusive-check",
        "conditions": { "rowIds": ["r1"], "checkType": "checkbox", "cellColumnIndex": 1 },
        "action": "end"
    }])
}

fn mapped_goto() -> Value {
    json!([{
        "id": "by-kind",
        "type": "any-of",
        "conditions": { "rowIds": ["r1"], "checkType": "checkbox", "cellColumnIndex": 1 },
        "additionalConditions": { "rowIds": ["r1"], "checkType": "select", "cellColumnIndex": 2 },
        "action": "goto",
        "targetQuestionMap": { "green": "Q5", "s-black": "Q6" }
    }])
}

#[test]
fn exclusive_end_rule_terminates_survey() {
    let survey = survey(end_on_exclusive_r1());
    let response = table(json!({ "cellForR1": ["opt1"] }));
    let next = get_next_question_index(&survey.questions, 2, Some(&response));
    assert_eq!(next, NextQuestion::End);
    assert_eq!(next.as_signed(), -1);
}

#[test]
fn exclusive_end_rule_does_not_fire_with_extra_rows() {
    let survey = survey(end_on_exclusive_r1());
    let response = table(json!({ "cellForR1": ["opt1"], "cellForR2": ["opt1"] }));
    assert_eq!(
        get_next_question_index(&survey.questions, 2, Some(&response)),
        NextQuestion::Index(3)
    );
}

#[test]
fn non_table_questions_advance_linearly() {
    let survey = survey(end_on_exclusive_r1());
    let stray = table(json!({ "cellForR1": ["opt1"] }));
    assert_eq!(
        get_next_question_index(&survey.questions, 0, Some(&stray)),
        NextQuestion::Index(1)
    );
    assert_eq!(
        get_next_question_index(&survey.questions, 5, None),
        NextQuestion::End
    );
    assert_eq!(
        get_next_question_index(&survey.questions, 42, None),
        NextQuestion::End
    );
    assert_eq!(
        get_next_question_index(&survey.questions, usize::MAX, None),
        NextQuestion::End
    );
}

#[test]
fn mapped_goto_follows_selected_option() {
    let survey = survey(mapped_goto());

    let green = table(json!({ "cellForR1": ["opt1"], "kind-r1": "s-green" }));
    assert_eq!(
        get_next_question_index(&survey.questions, 2, Some(&green)),
        NextQuestion::Index(4)
    );

    let black = table(json!({ "cellForR1": ["opt1"], "kind-r1": "s-black" }));
    assert_eq!(
        get_next_question_index(&survey.questions, 2, Some(&black)),
        NextQuestion::Index(5)
    );
}

#[test]
fn mapped_goto_prefers_additional_selection_over_primary() {
    let mut rules = mapped_goto();
    rules[0]["targetQuestionMap"] = json!({ "opt1": "Q4", "s-black": "Q6" });
    let survey = survey(rules);
    let response = table(json!({ "cellForR1": ["opt1"], "kind-r1": "s-black" }));

    let step = resolve_navigation(&survey.questions, 2, Some(&response), &EvalOptions::default());
    assert_eq!(step.next, NextQuestion::Index(5));
    assert_eq!(
        step.transition,
        Transition::Goto {
            rule_id: "by-kind".into(),
            target_id: "Q6".into()
        }
    );
}

#[test]
fn mapped_goto_without_matching_key_falls_back_to_linear() {
    let mut rules = mapped_goto();
    rules[0]["targetQuestionMap"] = json!({ "oolong": "Q5" });
    let survey = survey(rules);
    let response = table(json!({ "cellForR1": ["opt1"], "kind-r1": "s-green" }));

    let step = resolve_navigation(&survey.questions, 2, Some(&response), &EvalOptions::default());
    assert_eq!(step.next, NextQuestion::Index(3));
    assert_eq!(
        step.transition,
        Transition::Unresolved {
            rule_id: "by-kind".into()
        }
    );
}

#[test]
fn mapped_goto_without_additional_conditions_reads_primary_rows() {
    let survey = survey(json!([{
        "id": "by-kind",
        "type": "any-of",
        "conditions": { "rowIds": ["r1"], "checkType": "select", "cellColumnIndex": 2 },
        "action": "goto",
        "targetQuestionMap": { "black": "Q6" }
    }]));
    let response = table(json!({ "kind-r1": "s-black" }));
    assert_eq!(
        get_next_question_index(&survey.questions, 2, Some(&response)),
        NextQuestion::Index(5)
    );
}

#[test]
fn fixed_goto_and_dangling_target() {
    let rule = |target: &str| {
        json!([{
            "id": "jump",
            "type": "any-of",
            "conditions": { "rowIds": ["r2"], "checkType": "checkbox", "cellColumnIndex": 1 },
            "action": "goto",
            "targetQuestionId": target
        }])
    };
    let response = table(json!({ "cellForR2": ["opt1"] }));

    let jumping = survey(rule("Q6"));
    let step = resolve_navigation(&jumping.questions, 2, Some(&response), &EvalOptions::default());
    assert_eq!(step.next, NextQuestion::Index(5));
    assert_eq!(
        step.transition,
        Transition::Goto {
            rule_id: "jump".into(),
            target_id: "Q6".into()
        }
    );

    let dangling = survey(rule("Q404"));
    assert_eq!(
        get_next_question_index(&dangling.questions, 2, Some(&response)),
        NextQuestion::Index(3)
    );
}

#[test]
fn advance_skips_hidden_questions_after_branching() {
    let survey = Survey::from_value(json!({
        "questions": [
            { "id": "Q1", "type": "radio", "order": 1 },
            { "id": "Q2", "type": "text", "order": 2, "displayCondition": {
                "logicType": "AND",
                "conditions": [{ "id": "c", "sourceQuestionId": "Q1",
                                  "conditionType": "value-match", "requiredValues": ["yes"] }]
            }},
            { "id": "Q3", "type": "text", "order": 3 }
        ]
    }))
    .expect("survey");

    let no = Responses::new().with("Q1", ResponseValue::text("no"));
    assert_eq!(advance(&survey, &no, 0), NextQuestion::Index(2));
    assert_eq!(advance(&survey, &no, 2), NextQuestion::End);

    let yes = Responses::new().with("Q1", ResponseValue::text("yes"));
    assert_eq!(advance(&survey, &yes, 0), NextQuestion::Index(1));
    assert_eq!(first_visible_index(&survey, &yes), NextQuestion::Index(0));
}

#[test]
fn walk_follows_branches_and_stops_on_loops() {
    let ended = survey(end_on_exclusive_r1());
    let responses = Responses::new().with("Q3", table(json!({ "cellForR1": ["opt1"] })));
    let path = walk(&ended, &responses, &EvalOptions::default());
    assert_eq!(path.visited, vec![0, 1, 2]);
    assert_eq!(path.loop_at, None);

    let looping = survey(json!([{
        "id": "again",
        "type": "none-of",
        "conditions": { "rowIds": ["r2"], "checkType": "checkbox", "cellColumnIndex": 1 },
        "action": "goto",
        "targetQuestionId": "Q1"
    }]));
    let path = walk(&looping, &Responses::new(), &EvalOptions::default());
    assert_eq!(path.visited, vec![0, 1, 2]);
    assert_eq!(path.loop_at, Some(0));
}
