/*
 * answer.rs
 * Copyright (c) 2025 Posit, PBC
 */

//! Answer block parsing.
//!
//! An answer block is the trimmed text of an answer line plus its nested
//! continuation lines. Positions below are character positions, so
//! non-ASCII answer text is handled the same as ASCII.

use crate::error::AnswerError;
use crate::model::{Answer, QuestionType};

/// Parse one trimmed answer block for a question of `question_type`.
pub fn parse_answer(question_type: QuestionType, block: &str) -> Result<Answer, AnswerError> {
    match question_type {
        QuestionType::SingleChoice | QuestionType::MultipleChoice => parse_choice(block),
        QuestionType::FreeText => parse_free_text(block),
    }
}

/// `[x] text` / `[ ] text`: position 1 holds the marker, position 2 the
/// closing bracket, and the answer text starts at position 3.
fn parse_choice(block: &str) -> Result<Answer, AnswerError> {
    let chars: Vec<char> = block.chars().collect();
    if chars.len() < 3 {
        return Err(AnswerError::TooShort { len: chars.len() });
    }
    if chars[0] != '[' || chars[2] != ']' {
        return Err(AnswerError::MissingChoiceMarker);
    }

    Ok(Answer::Choice {
        text: text_after_marker(block),
        is_correct: chars[1] == 'x',
    })
}

/// The expected value is everything between the first `[` and the first `]`.
fn parse_free_text(block: &str) -> Result<Answer, AnswerError> {
    let len = block.chars().count();
    if len < 3 {
        return Err(AnswerError::TooShort { len });
    }

    let expected = match (block.find('['), block.find(']')) {
        (Some(open), Some(close)) if open < close => &block[open + 1..close],
        _ => return Err(AnswerError::MissingBrackets),
    };

    Ok(Answer::FreeText {
        expected: expected.to_string(),
        label: text_after_marker(block),
    })
}

fn text_after_marker(block: &str) -> String {
    block.chars().skip(3).collect::<String>().trim().to_string()
}
