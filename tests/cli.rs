//! CLI integration tests using assert_cmd.

use std::fs;
use std::path::PathBuf;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

const TWO_QUESTIONS: &str = "\
questions:
  - question: 2+2?
    options: ['3', '4']
    correct: 1
  - question: Capital of Poland?
    options: [Warsaw, Krakow]
    correct: 0
";

/// Runs the binary with a throwaway HOME so no user config is picked up.
fn study_quiz(home: &TempDir) -> Command {
    #[allow(deprecated)]
    let mut cmd = Command::cargo_bin("study-quiz").unwrap();
    cmd.env("HOME", home.path()).env_remove("RUST_LOG");
    cmd
}

fn write_set(dir: &TempDir, content: &str) -> PathBuf {
    let path = dir.path().join("set.yaml");
    fs::write(&path, content).unwrap();
    path
}

#[test]
fn check_valid_set() {
    let dir = TempDir::new().unwrap();
    let file = write_set(&dir, TWO_QUESTIONS);

    study_quiz(&dir)
        .arg("check")
        .arg(&file)
        .assert()
        .success()
        .stdout(predicate::str::contains("OK: 2 questions"))
        .stdout(predicate::str::contains("1. 2+2? (2 options)"));
}

#[test]
fn check_sample_file() {
    let dir = TempDir::new().unwrap();
    study_quiz(&dir)
        .arg("check")
        .arg(concat!(env!("CARGO_MANIFEST_DIR"), "/demos/sample.yaml"))
        .assert()
        .success()
        .stdout(predicate::str::contains("OK: 3 questions"));
}

#[test]
fn check_reports_first_violation() {
    let dir = TempDir::new().unwrap();
    let file = write_set(
        &dir,
        "questions:\n  - question: ok?\n    options: [a, b]\n    correct: 0\n  - question: bad\n    options: [only]\n    correct: 0\n",
    );

    study_quiz(&dir)
        .arg("check")
        .arg(&file)
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("question 2: needs at least 2 options"));
}

#[test]
fn check_missing_questions_list() {
    let dir = TempDir::new().unwrap();
    let file = write_set(&dir, "title: nothing here\n");

    study_quiz(&dir)
        .arg("check")
        .arg(&file)
        .assert()
        .failure()
        .stderr(predicate::str::contains("missing or invalid questions list"));
}

#[test]
fn check_nonexistent_file() {
    let dir = TempDir::new().unwrap();
    study_quiz(&dir)
        .arg("check")
        .arg(dir.path().join("nope.yaml"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("failed to read"));
}

#[test]
fn grade_partial_answers() {
    let dir = TempDir::new().unwrap();
    let file = write_set(&dir, TWO_QUESTIONS);

    study_quiz(&dir)
        .arg("grade")
        .arg(&file)
        .arg("--answers")
        .arg("1,1")
        .assert()
        .success()
        .stdout(predicate::str::contains("Score: 1 / 2"))
        .stdout(predicate::str::contains("Percentage: 50.0%"))
        .stdout(predicate::str::contains("Grade: Fail (2.0)"));
}

#[test]
fn grade_all_correct() {
    let dir = TempDir::new().unwrap();
    let file = write_set(&dir, TWO_QUESTIONS);

    study_quiz(&dir)
        .arg("grade")
        .arg(&file)
        .arg("--answers")
        .arg("1,0")
        .assert()
        .success()
        .stdout(predicate::str::contains("Score: 2 / 2"))
        .stdout(predicate::str::contains("Percentage: 100.0%"))
        .stdout(predicate::str::contains("Very good (5.0)"));
}

#[test]
fn grade_counts_unanswered() {
    let dir = TempDir::new().unwrap();
    let file = write_set(&dir, TWO_QUESTIONS);

    study_quiz(&dir)
        .arg("grade")
        .arg(&file)
        .arg("--answers")
        .arg("1,-")
        .assert()
        .success()
        .stdout(predicate::str::contains("Score: 1 / 2"))
        .stdout(predicate::str::contains("Unanswered: 1"));
}

#[test]
fn grade_score_only() {
    let dir = TempDir::new().unwrap();
    let file = write_set(&dir, TWO_QUESTIONS);

    study_quiz(&dir)
        .arg("grade")
        .arg(&file)
        .arg("--answers")
        .arg("1,0")
        .arg("--score-only")
        .assert()
        .success()
        .stdout(predicate::str::contains("Score: 2 / 2"))
        .stdout(predicate::str::contains("Grade:").not());
}

#[test]
fn grade_uses_config_file() {
    let dir = TempDir::new().unwrap();
    let file = write_set(&dir, TWO_QUESTIONS);
    let config = dir.path().join("config.toml");
    fs::write(&config, "grading = \"score-only\"\n").unwrap();

    study_quiz(&dir)
        .arg("grade")
        .arg(&file)
        .arg("--answers")
        .arg("1,0")
        .arg("--config")
        .arg(&config)
        .assert()
        .success()
        .stdout(predicate::str::contains("Grade:").not());
}

#[test]
fn grade_rejects_too_many_answers() {
    let dir = TempDir::new().unwrap();
    let file = write_set(&dir, TWO_QUESTIONS);

    study_quiz(&dir)
        .arg("grade")
        .arg(&file)
        .arg("--answers")
        .arg("1,0,0")
        .assert()
        .failure()
        .stderr(predicate::str::contains("3 answers given for 2 questions"));
}

#[test]
fn grade_rejects_out_of_range_option() {
    let dir = TempDir::new().unwrap();
    let file = write_set(&dir, TWO_QUESTIONS);

    study_quiz(&dir)
        .arg("grade")
        .arg(&file)
        .arg("--answers")
        .arg("9")
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("answer 1: option 9 is out of range"));
}

#[test]
fn missing_config_file_is_an_error() {
    let dir = TempDir::new().unwrap();
    let file = write_set(&dir, TWO_QUESTIONS);

    study_quiz(&dir)
        .arg("check")
        .arg(&file)
        .arg("--config")
        .arg(dir.path().join("absent.toml"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("config file not found"));
}
