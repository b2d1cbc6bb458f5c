use std::fs;
use std::path::Path;

use assert_cmd::Command;
use predicates::prelude::*;
use serde_json::{Value, json};
use tempfile::TempDir;

fn survey_doc() -> Value {
    json!({
        "id": "tea-survey",
        "questions": [
            { "id": "Q1", "type": "radio", "order": 1 },
            { "id": "Q2", "type": "text", "order": 2, "displayCondition": {
                "logicType": "AND",
                "conditions": [{ "id": "likes-tea", "sourceQuestionId": "Q1",
                                  "conditionType": "value-match", "requiredValues": ["yes"] }]
            }},
            { "id": "Q3", "type": "table", "order": 3,
              "tableRowsData": [
                { "id": "r1", "cells": [
                    { "id": "r1-label", "content": "Green" },
                    { "id": "cellForR1", "type": "checkbox", "checkboxOptions": [{ "id": "opt1" }] }
                ]},
                { "id": "r2", "cells": [
                    { "id": "r2-label", "content": "Black" },
                    { "id": "cellForR2", "type": "checkbox", "checkboxOptions": [{ "id": "opt1" }] }
                ]}
              ],
              "tableValidationRules": [{
                "id": "only-green",
                "type": "exclusive-check",
                "conditions": { "rowIds": ["r1"], "checkType": "checkbox", "cellColumnIndex": 1 },
                "action": "end"
              }]
            },
            { "id": "Q4", "type": "text", "order": 4 }
        ]
    })
}

fn write_json(dir: &Path, name: &str, value: &Value) {
    fs::write(dir.join(name), serde_json::to_vec_pretty(value).expect("json")).expect("write");
}

fn workspace(responses: Value) -> TempDir {
    let dir = TempDir::new().expect("tempdir");
    write_json(dir.path(), "survey.json", &survey_doc());
    write_json(dir.path(), "responses.json", &responses);
    dir
}

fn survey_rules(dir: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("survey-rules").expect("binary");
    cmd.current_dir(dir.path()).env_remove("RUST_LOG");
    cmd
}

#[test]
fn visibility_reports_hidden_questions_and_progress() {
    let dir = workspace(json!({ "Q1": "no" }));
    survey_rules(&dir)
        .args(["visibility", "--survey", "survey.json", "--responses", "responses.json"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Q2").and(predicate::str::contains("hidden")))
        .stdout(predicate::str::contains("progress: 1/3 answered (33.3%)"));
}

#[test]
fn visibility_json_output() {
    let dir = workspace(json!({ "Q1": "yes" }));
    let output = survey_rules(&dir)
        .args(["visibility", "--survey", "survey.json", "--responses", "responses.json", "--json"])
        .output()
        .expect("run");
    assert!(output.status.success());

    let report: Value = serde_json::from_slice(&output.stdout).expect("json report");
    assert_eq!(report["questions"][1], json!({ "id": "Q2", "visible": true, "number": 2 }));
    assert_eq!(report["progress"]["visible"], json!(4));
}

#[test]
fn next_ends_on_exclusive_selection() {
    let dir = workspace(json!({ "Q3": { "cellForR1": ["opt1"] } }));
    survey_rules(&dir)
        .args(["next", "--survey", "survey.json", "--responses", "responses.json", "--current", "Q3"])
        .assert()
        .success()
        .stdout(predicate::str::contains("next: END"))
        .stdout(predicate::str::contains("rule 'only-green' ends the survey"));
}

#[test]
fn next_skips_hidden_questions_unless_raw() {
    let dir = workspace(json!({ "Q1": "no" }));
    let run = |raw: bool| {
        let mut cmd = survey_rules(&dir);
        cmd.args([
            "next", "--survey", "survey.json", "--responses", "responses.json", "--current", "0",
            "--json",
        ]);
        if raw {
            cmd.arg("--raw");
        }
        let output = cmd.output().expect("run");
        assert!(output.status.success());
        serde_json::from_slice::<Value>(&output.stdout).expect("json")
    };

    let scanned = run(false);
    assert_eq!(scanned["next"], json!({ "kind": "index", "index": 2 }));
    assert_eq!(scanned["next_id"], json!("Q3"));
    assert_eq!(scanned["transition"], json!({ "kind": "linear" }));

    assert_eq!(run(true)["next"], json!({ "kind": "index", "index": 1 }));
}

#[test]
fn next_rejects_unknown_current_question() {
    let dir = workspace(json!({}));
    survey_rules(&dir)
        .args(["next", "--survey", "survey.json", "--current", "Q99"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("neither a question id nor an index"));
}

#[test]
fn walk_prints_path_until_end() {
    let dir = workspace(json!({ "Q1": "yes", "Q3": { "cellForR1": ["opt1"] } }));
    survey_rules(&dir)
        .args(["walk", "--survey", "survey.json", "--responses", "responses.json"])
        .assert()
        .success()
        .stdout(predicate::str::contains("3. Q3 (#2)"))
        .stdout(predicate::str::contains("Q4").not())
        .stdout(predicate::str::contains("END"));
}

#[test]
fn lint_strict_fails_on_warnings() {
    let dir = TempDir::new().expect("tempdir");
    let mut survey = survey_doc();
    survey["questions"][0]["displayCondition"] = json!({
        "conditions": [{ "id": "late", "sourceQuestionId": "Q4",
                          "conditionType": "value-match", "requiredValues": [] }]
    });
    write_json(dir.path(), "survey.json", &survey);

    survey_rules(&dir)
        .args(["lint", "--survey", "survey.json"])
        .assert()
        .success()
        .stdout(predicate::str::contains("forward_source_question"));

    survey_rules(&dir)
        .args(["lint", "--survey", "survey.json", "--strict"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("1 finding(s) at warning or above"));
}

#[test]
fn lint_clean_survey() {
    let dir = workspace(json!({}));
    survey_rules(&dir)
        .args(["lint", "--survey", "survey.json", "--strict"])
        .assert()
        .success()
        .stdout(predicate::str::contains("no findings"));
}

#[test]
fn missing_survey_names_the_file() {
    let dir = TempDir::new().expect("tempdir");
    survey_rules(&dir)
        .args(["walk", "--survey", "absent.json"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("failed to load survey absent.json"));
}

#[test]
fn config_selects_column_policy_and_rejects_garbage() {
    let dir = workspace(json!({}));
    fs::write(dir.path().join("survey-rules.toml"), "[engine]\nunscoped_columns = \"all\"\n")
        .expect("config");
    survey_rules(&dir)
        .args(["lint", "--survey", "survey.json"])
        .assert()
        .success();

    fs::write(dir.path().join("broken.toml"), "[engine]\nunscoped_columns = 3\n").expect("config");
    survey_rules(&dir)
        .args(["--config", "broken.toml", "lint", "--survey", "survey.json"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid config broken.toml"));
}

#[test]
fn schema_describes_survey_documents() {
    let dir = TempDir::new().expect("tempdir");
    survey_rules(&dir)
        .arg("schema")
        .assert()
        .success()
        .stdout(predicate::str::contains("\"questions\""))
        .stdout(predicate::str::contains("tableValidationRules"));
}
