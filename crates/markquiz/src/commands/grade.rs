/*
 * grade.rs
 * Copyright (c) 2025 Posit, PBC
 *
 * Grade command implementation
 */

//! `markquiz grade`: score a responses file against a quiz.

use std::path::PathBuf;

use anyhow::{Context, Result};
use markquiz_core::{QuizConfig, QuizResult, process_text};

use super::{read_quiz, read_responses};

/// Arguments for the grade command
#[derive(Debug)]
pub struct GradeArgs {
    pub input: String,
    pub responses: PathBuf,
    pub json: bool,
    pub config: QuizConfig,
}

/// Execute the grade command
pub fn execute(args: GradeArgs) -> Result<()> {
    let quiz = read_quiz(&args.input)?;
    let responses = read_responses(&args.responses)?;

    if responses.len() > quiz.questions.len() {
        tracing::warn!(
            responses = responses.len(),
            questions = quiz.questions.len(),
            "ignoring extra responses"
        );
    }

    let result = args
        .config
        .grade(&quiz.questions, &responses)
        .with_context(|| format!("Failed to grade {}", args.input))?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&result)?);
    } else {
        print!("{}", format_result(&result, &args.config.display.line_break));
    }
    Ok(())
}

fn format_result(result: &QuizResult, line_break: &str) -> String {
    let mut out = format!("{}\n", result.score_line());
    if let Some(heading) = result.missed_heading() {
        out.push_str(&format!("{}\n", heading));
        for prompt in &result.missed_prompts {
            out.push_str(&format!("- {}\n", process_text(prompt, line_break)));
        }
    }
    out
}
