/*
 * classify.rs
 * Copyright (c) 2025 Posit, PBC
 */

//! Line classification.
//!
//! Every raw line is judged on its trimmed text: `#` starts a question, `[`
//! starts an answer, whitespace-only lines are blank and anything else
//! continues whatever came before. Indentation only matters relative to the
//! indentation of the enclosing question line (the block indent).

/// What a raw line is, relative to the current block.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LineClass<'a> {
    QuestionStart {
        /// Leading spaces of the question line; becomes the block indent.
        indent: usize,
        /// Character right after `#`, if any.
        marker: Option<char>,
        /// Remaining trimmed text: the first prompt fragment.
        rest: &'a str,
    },
    AnswerStart {
        /// The line de-indented by the block indent.
        text: &'a str,
    },
    Continuation {
        /// The line de-indented by the block indent.
        text: &'a str,
        /// Indented deeper than the block.
        nested: bool,
    },
    Blank,
}

/// Classify `line` inside a block whose question line had `block_indent`
/// leading spaces.
pub fn classify_line(line: &str, block_indent: usize) -> LineClass<'_> {
    let trimmed = line.trim();

    if trimmed.is_empty() {
        return LineClass::Blank;
    }

    if let Some(after_hash) = trimmed.strip_prefix('#') {
        let mut chars = after_hash.chars();
        let marker = chars.next();
        return LineClass::QuestionStart {
            indent: count_indent(line),
            marker,
            rest: chars.as_str(),
        };
    }

    let text = remove_indent(line, block_indent);
    if trimmed.starts_with('[') {
        LineClass::AnswerStart { text }
    } else {
        LineClass::Continuation {
            text,
            nested: count_indent(line) > block_indent,
        }
    }
}

/// Number of leading space characters. Tabs are not indentation.
pub fn count_indent(line: &str) -> usize {
    line.bytes().take_while(|b| *b == b' ').count()
}

/// Strip `count` leading spaces when the line has at least that many;
/// under-indented lines are returned unchanged.
pub fn remove_indent(line: &str, count: usize) -> &str {
    if count_indent(line) >= count {
        &line[count..]
    } else {
        line
    }
}
