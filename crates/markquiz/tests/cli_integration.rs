/*
 * cli_integration.rs
 * Copyright (c) 2025 Posit, PBC
 *
 * End-to-end tests driving the markquiz binary.
 */

use pretty_assertions::assert_eq;
use std::io::Write;
use std::path::Path;
use std::process::{Command, Output, Stdio};
use tempfile::TempDir;

const BASIC_QUIZ: &str = "#1 2+2=?\n[ ] 3\n[x] 4\n#n Pick primes\n[x] 2\n[x] 3\n[ ] 4\n#_ Capital of France?\n[Paris]\n";

fn markquiz(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_markquiz"))
        .args(args)
        .env("RUST_LOG", "off")
        .output()
        .expect("Failed to run markquiz")
}

fn write_file(dir: &TempDir, name: &str, content: &str) -> String {
    let path = dir.path().join(name);
    std::fs::write(&path, content).expect("Failed to write test file");
    path_str(&path)
}

fn path_str(path: &Path) -> String {
    path.to_str().expect("non-UTF-8 temp path").to_string()
}

fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).to_string()
}

fn stderr(output: &Output) -> String {
    String::from_utf8_lossy(&output.stderr).to_string()
}

// ============================================================================
// parse
// ============================================================================

#[test]
fn test_parse_text() {
    let dir = TempDir::new().unwrap();
    let quiz = write_file(&dir, "basic.quiz", BASIC_QUIZ);

    let output = markquiz(&["parse", &quiz]);
    assert!(output.status.success(), "{}", stderr(&output));
    assert_eq!(
        stdout(&output),
        "1. [single-choice] 2+2=?\n   [ ] 3\n   [x] 4\n\
         2. [multiple-choice] Pick primes\n   [x] 2\n   [x] 3\n   [ ] 4\n\
         3. [free-text] Capital of France?\n   [Paris]\n"
    );
}

#[test]
fn test_parse_json() {
    let dir = TempDir::new().unwrap();
    let quiz = write_file(&dir, "stray.quiz", "#1 Pick one\n[x] A\nBADLINE\n[ ] B\n");

    let output = markquiz(&["parse", &quiz, "--format", "json"]);
    assert!(output.status.success(), "{}", stderr(&output));

    let json: serde_json::Value = serde_json::from_str(&stdout(&output)).unwrap();
    assert_eq!(json["questions"].as_array().unwrap().len(), 1);
    assert_eq!(json["questions"][0]["answers"].as_array().unwrap().len(), 2);
    assert_eq!(json["diagnostics"][0]["code"], "MQ-1-6");
    assert_eq!(json["diagnostics"][0]["line"], 3);
}

#[test]
fn test_parse_from_stdin() {
    let mut child = Command::new(env!("CARGO_BIN_EXE_markquiz"))
        .args(["parse", "-"])
        .env("RUST_LOG", "off")
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .expect("Failed to run markquiz");
    child
        .stdin
        .take()
        .unwrap()
        .write_all(b"#1 From stdin\n[x] yes\n")
        .unwrap();

    let output = child.wait_with_output().unwrap();
    assert!(output.status.success(), "{}", stderr(&output));
    assert_eq!(stdout(&output), "1. [single-choice] From stdin\n   [x] yes\n");
}

#[test]
fn test_parse_uses_configured_line_break() {
    let dir = TempDir::new().unwrap();
    let quiz = write_file(&dir, "multi.quiz", "#1 First\nsecond\n[x] a\n");
    let config = write_file(&dir, "markquiz.yml", "display:\n  line_break: \" | \"\n");

    let output = markquiz(&["--config", &config, "parse", &quiz]);
    assert!(output.status.success(), "{}", stderr(&output));
    assert_eq!(stdout(&output), "1. [single-choice] First | second\n   [x] a\n");
}

#[test]
fn test_parse_missing_file() {
    let output = markquiz(&["parse", "/nonexistent/quiz.quiz"]);

    assert!(!output.status.success());
    assert!(stderr(&output).contains("Failed to read quiz"));
}

// ============================================================================
// check
// ============================================================================

#[test]
fn test_check_clean_quiz() {
    let dir = TempDir::new().unwrap();
    let quiz = write_file(&dir, "basic.quiz", BASIC_QUIZ);

    let output = markquiz(&["check", &quiz, "--deny-warnings"]);
    assert!(output.status.success(), "{}", stderr(&output));
    assert_eq!(stderr(&output), "");
}

#[test]
fn test_check_warnings() {
    let dir = TempDir::new().unwrap();
    let quiz = write_file(&dir, "broken.quiz", "#1 Pick one\n[x] A\nBADLINE\n[ ] B\n#1 Lonely\n");

    let output = markquiz(&["check", &quiz]);
    assert!(output.status.success(), "{}", stderr(&output));
    let err = stderr(&output);
    assert!(err.contains("[MQ-1-6] Stray line between answers"), "{}", err);
    assert!(err.contains("[MQ-1-3] Question without answers"), "{}", err);

    let output = markquiz(&["check", &quiz, "--deny-warnings"]);
    assert!(!output.status.success());
    assert!(stderr(&output).contains("2 warning(s) found"));
}

#[test]
fn test_check_json() {
    let dir = TempDir::new().unwrap();
    let quiz = write_file(&dir, "unknown.quiz", "#? Mystery\n[x] a\n");

    let output = markquiz(&["check", &quiz, "--json"]);
    assert!(output.status.success(), "{}", stderr(&output));

    let json: serde_json::Value = serde_json::from_str(&stdout(&output)).unwrap();
    assert_eq!(json[0]["code"], "MQ-1-1");
    assert_eq!(json[0]["kind"], "warning");
}

#[test]
fn test_check_mismatched_responses_fails() {
    let dir = TempDir::new().unwrap();
    let quiz = write_file(&dir, "basic.quiz", BASIC_QUIZ);
    let responses = write_file(&dir, "responses.json", r#"[{"text": "4"}, null, null]"#);

    let output = markquiz(&["check", &quiz, "--responses", &responses]);
    assert!(!output.status.success());
    let err = stderr(&output);
    assert!(err.contains("[MQ-2-1] Question 1 cannot be graded"), "{}", err);
    assert!(err.contains("1 error(s) found"), "{}", err);
}

#[test]
fn test_check_validates_config() {
    let dir = TempDir::new().unwrap();
    let quiz = write_file(&dir, "basic.quiz", BASIC_QUIZ);
    let good = write_file(&dir, "good.yml", "grading:\n  strict: true\n");
    let bad = write_file(&dir, "bad.yml", "grading:\n  strictness: 3\n");

    let output = markquiz(&["--config", &good, "check", &quiz]);
    assert!(output.status.success(), "{}", stderr(&output));

    let output = markquiz(&["--config", &bad, "check", &quiz]);
    assert!(!output.status.success());
    assert!(stderr(&output).contains("Failed to load config"), "{}", stderr(&output));
}

// ============================================================================
// grade
// ============================================================================

#[test]
fn test_grade_json_responses() {
    let dir = TempDir::new().unwrap();
    let quiz = write_file(&dir, "basic.quiz", BASIC_QUIZ);
    let responses = write_file(
        &dir,
        "responses.json",
        r#"[{"single": 1}, {"multiple": [0, 2]}, {"text": "Paris"}]"#,
    );

    let output = markquiz(&["grade", &quiz, "--responses", &responses]);
    assert!(output.status.success(), "{}", stderr(&output));
    assert_eq!(
        stdout(&output),
        "Your score is 2 out of 3\nYou missed the following questions\n- Pick primes\n"
    );
}

#[test]
fn test_grade_yaml_responses_as_json() {
    let dir = TempDir::new().unwrap();
    let quiz = write_file(&dir, "basic.quiz", BASIC_QUIZ);
    let responses = write_file(
        &dir,
        "responses.yaml",
        "- single: 1\n- multiple: [0, 1]\n- text: Paris\n",
    );

    let output = markquiz(&["grade", &quiz, "-r", &responses, "--json"]);
    assert!(output.status.success(), "{}", stderr(&output));

    let json: serde_json::Value = serde_json::from_str(&stdout(&output)).unwrap();
    assert_eq!(json["score"], 3);
    assert_eq!(json["total"], 3);
    assert_eq!(json["missed_prompts"], serde_json::json!([]));
}

#[test]
fn test_grade_missing_responses_count_as_untouched() {
    let dir = TempDir::new().unwrap();
    let quiz = write_file(&dir, "basic.quiz", BASIC_QUIZ);
    let responses = write_file(&dir, "responses.json", "[]");

    let output = markquiz(&["grade", &quiz, "--responses", &responses]);
    assert!(output.status.success(), "{}", stderr(&output));
    assert!(stdout(&output).starts_with("Your score is 0 out of 3\n"));
}

#[test]
fn test_grade_strict_fails_on_unknown_marker() {
    let dir = TempDir::new().unwrap();
    let quiz = write_file(&dir, "unknown.quiz", "#? Mystery\n[x] a\n#1 Known\n[x] b\n");
    let responses = write_file(&dir, "responses.json", r#"[null, {"single": 0}]"#);

    let lenient = markquiz(&["grade", &quiz, "--responses", &responses]);
    assert!(lenient.status.success(), "{}", stderr(&lenient));
    assert_eq!(
        stdout(&lenient),
        "Your score is 1 out of 2\nYou missed the following questions\n- Mystery\n"
    );

    let strict = markquiz(&["grade", &quiz, "--responses", &responses, "--strict"]);
    assert!(!strict.status.success());
    assert!(stderr(&strict).contains("Failed to grade"));

    let config = write_file(&dir, "strict.yml", "grading:\n  strict: true\n");
    let from_config = markquiz(&["--config", &config, "grade", &quiz, "--responses", &responses]);
    assert!(!from_config.status.success());
}

#[test]
fn test_grade_invalid_responses() {
    let dir = TempDir::new().unwrap();
    let quiz = write_file(&dir, "basic.quiz", BASIC_QUIZ);
    let responses = write_file(&dir, "responses.json", r#"{"not": "a list"}"#);

    let output = markquiz(&["grade", &quiz, "--responses", &responses]);
    assert!(!output.status.success());
    assert!(stderr(&output).contains("Invalid JSON responses"));
}
