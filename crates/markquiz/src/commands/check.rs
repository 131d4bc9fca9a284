/*
 * check.rs
 * Copyright (c) 2025 Posit, PBC
 *
 * Check command implementation
 */

//! `markquiz check`: report markup problems.
//!
//! Collects the parser's diagnostics, the authoring lints and, when a
//! responses file is given, the responses that do not fit their questions.
//! Fails when any error was found, or any warning with `--deny-warnings`.

use std::path::PathBuf;

use anyhow::Result;
use markquiz_error_reporting::{DiagnosticKind, DiagnosticMessage};
use tracing::info;

use super::{print_diagnostics, read_quiz, read_responses};

/// Arguments for the check command
#[derive(Debug)]
pub struct CheckArgs {
    pub input: String,
    pub responses: Option<PathBuf>,
    pub deny_warnings: bool,
    pub json: bool,
}

/// Execute the check command
pub fn execute(args: CheckArgs) -> Result<()> {
    let quiz = read_quiz(&args.input)?;

    let mut diagnostics = quiz.diagnostics.clone();
    diagnostics.extend(quiz.lint());
    if let Some(path) = &args.responses {
        let responses = read_responses(path)?;
        diagnostics.extend(quiz.check_responses(&responses));
    }

    if args.json {
        let json: Vec<_> = diagnostics.iter().map(DiagnosticMessage::to_json).collect();
        println!("{}", serde_json::to_string_pretty(&json)?);
    } else {
        print_diagnostics(&quiz, &diagnostics);
    }

    let errors = count(&diagnostics, DiagnosticKind::Error);
    let warnings = count(&diagnostics, DiagnosticKind::Warning);
    info!(
        questions = quiz.questions.len(),
        errors, warnings, "checked {}", args.input
    );

    if errors > 0 {
        anyhow::bail!("{} error(s) found in {}", errors, args.input);
    }
    if args.deny_warnings && warnings > 0 {
        anyhow::bail!("{} warning(s) found in {}", warnings, args.input);
    }
    Ok(())
}

fn count(diagnostics: &[DiagnosticMessage], kind: DiagnosticKind) -> usize {
    diagnostics.iter().filter(|d| d.kind == kind).count()
}
