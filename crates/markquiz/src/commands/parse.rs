/*
 * parse.rs
 * Copyright (c) 2025 Posit, PBC
 *
 * Parse command implementation
 */

//! `markquiz parse`: print the parsed questions.
//!
//! Text output lists each question with its type and answers; JSON output is
//! [`Quiz::to_json`](markquiz_core::Quiz::to_json). Markup diagnostics go to
//! stderr in text mode and into the document in JSON mode.

use anyhow::Result;
use markquiz_core::{Answer, Question, QuizConfig, TypeTag, process_text};

use super::{print_diagnostics, read_quiz};
use crate::OutputFormat;

/// Arguments for the parse command
#[derive(Debug)]
pub struct ParseArgs {
    pub input: String,
    pub format: OutputFormat,
    pub config: QuizConfig,
}

/// Execute the parse command
pub fn execute(args: ParseArgs) -> Result<()> {
    let quiz = read_quiz(&args.input)?;

    match args.format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&quiz.to_json())?);
        }
        OutputFormat::Text => {
            print_diagnostics(&quiz, &quiz.diagnostics);
            for (index, question) in quiz.questions.iter().enumerate() {
                print!("{}", format_question(index, question, &args.config.display.line_break));
            }
        }
    }

    Ok(())
}

fn type_label(tag: &TypeTag) -> String {
    match tag {
        TypeTag::Known(question_type) => question_type.to_string(),
        TypeTag::Unknown(marker) => format!("unknown marker {:?}", marker),
    }
}

fn format_question(index: usize, question: &Question, line_break: &str) -> String {
    let mut out = format!(
        "{}. [{}] {}\n",
        index + 1,
        type_label(&question.tag),
        process_text(&question.prompt, line_break)
    );
    for answer in &question.answers {
        let line = match answer {
            Answer::Choice { text, is_correct } => {
                let mark = if *is_correct { 'x' } else { ' ' };
                format!("[{}] {}", mark, process_text(text, line_break))
            }
            Answer::FreeText { expected, .. } => format!("[{}]", expected),
            Answer::Raw { text } => process_text(text, line_break),
        };
        out.push_str(&format!("   {}\n", line));
    }
    out
}
