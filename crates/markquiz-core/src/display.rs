/*
 * display.rs
 * Copyright (c) 2025 Posit, PBC
 */

//! Text helpers for renderers.
//!
//! Building the interactive widget is up to the caller. These helpers cover
//! the text a renderer shows: prompts and answers with their line breaks
//! converted, and the score summary.

use crate::model::{Answer, Question, QuizResult};
use serde::{Deserialize, Serialize};

/// How question and answer text is prepared for display.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DisplayOptions {
    /// Replacement for every newline in prompt and answer text.
    pub line_break: String,
}

impl Default for DisplayOptions {
    fn default() -> Self {
        Self {
            line_break: "<br>".to_string(),
        }
    }
}

/// Replace every newline in `text` with `line_break`.
pub fn process_text(text: &str, line_break: &str) -> String {
    text.replace('\n', line_break)
}

impl Question {
    pub fn display_prompt(&self, options: &DisplayOptions) -> String {
        process_text(&self.prompt, &options.line_break)
    }
}

impl Answer {
    pub fn display_text(&self, options: &DisplayOptions) -> String {
        process_text(self.text(), &options.line_break)
    }
}

impl QuizResult {
    pub fn score_line(&self) -> String {
        format!("Your score is {} out of {}", self.score, self.total)
    }

    /// Heading above the missed prompts, shown only when something was missed.
    pub fn missed_heading(&self) -> Option<&'static str> {
        if self.missed_prompts.is_empty() {
            None
        } else {
            Some("You missed the following questions")
        }
    }
}
