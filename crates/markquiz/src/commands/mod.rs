/*
 * mod.rs
 * Copyright (c) 2025 Posit, PBC
 */

//! Command implementations for the markquiz CLI
//!
//! Each command module handles the CLI interface and delegates to
//! markquiz-core for the actual work. Helpers shared by the commands live
//! here.

pub mod check;
pub mod grade;
pub mod parse;

use std::io::{IsTerminal, Read};
use std::path::Path;

use anyhow::{Context, Result};
use markquiz_core::{Quiz, QuizConfig, Response};
use markquiz_error_reporting::DiagnosticMessage;

/// Load the configuration file, or the defaults when none was given.
pub fn load_config(path: Option<&Path>) -> Result<QuizConfig> {
    match path {
        Some(path) => QuizConfig::load(path)
            .with_context(|| format!("Failed to load config: {}", path.display())),
        None => Ok(QuizConfig::default()),
    }
}

/// Read and parse a quiz; `-` reads stdin.
pub fn read_quiz(input: &str) -> Result<Quiz> {
    let (source, filename) = if input == "-" {
        let mut source = String::new();
        std::io::stdin()
            .read_to_string(&mut source)
            .context("Failed to read quiz from stdin")?;
        (source, "<stdin>".to_string())
    } else {
        let source = std::fs::read_to_string(input)
            .with_context(|| format!("Failed to read quiz: {}", input))?;
        (source, input.to_string())
    };

    let quiz = Quiz::parse_with_filename(&source, &filename);
    tracing::debug!(
        input = %filename,
        questions = quiz.questions.len(),
        diagnostics = quiz.diagnostics.len(),
        "parsed quiz"
    );
    Ok(quiz)
}

/// Read a responses file: a JSON array, or YAML when the extension says so.
/// `null` entries stand for unanswered questions.
pub fn read_responses(path: &Path) -> Result<Vec<Option<Response>>> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read responses: {}", path.display()))?;

    let is_yaml = matches!(
        path.extension().and_then(|ext| ext.to_str()),
        Some("yml" | "yaml")
    );
    let responses = if is_yaml {
        serde_yaml::from_str(&content)
            .with_context(|| format!("Invalid YAML responses: {}", path.display()))?
    } else {
        serde_json::from_str(&content)
            .with_context(|| format!("Invalid JSON responses: {}", path.display()))?
    };
    Ok(responses)
}

/// Print diagnostics to stderr, with source snippets when possible.
pub fn print_diagnostics(quiz: &Quiz, diagnostics: &[DiagnosticMessage]) {
    let color = std::io::stderr().is_terminal();
    for diagnostic in diagnostics {
        let text = if color {
            diagnostic.to_ansi_text(Some(&quiz.source_context))
        } else {
            diagnostic.to_text(Some(&quiz.source_context))
        };
        eprintln!("{}", text);
    }
}
