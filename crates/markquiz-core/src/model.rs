/*
 * model.rs
 * Copyright (c) 2025 Posit, PBC
 */

//! The parsed quiz model.
//!
//! Questions and answers are plain immutable values: the parser creates them
//! once and nothing mutates them afterwards. What the user submitted is kept
//! apart in [`Response`], and the outcome of grading in [`QuizResult`].

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;

/// The closed set of question kinds the grader understands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QuestionType {
    /// `#1`: exactly one answer may be selected.
    SingleChoice,
    /// `#n`: check all that apply.
    MultipleChoice,
    /// `#_`: the user types the answer.
    FreeText,
}

impl QuestionType {
    pub const ALL: [QuestionType; 3] = [
        QuestionType::SingleChoice,
        QuestionType::MultipleChoice,
        QuestionType::FreeText,
    ];

    pub fn from_marker(marker: char) -> Option<Self> {
        match marker {
            '1' => Some(QuestionType::SingleChoice),
            'n' => Some(QuestionType::MultipleChoice),
            '_' => Some(QuestionType::FreeText),
            _ => None,
        }
    }

    pub fn marker(self) -> char {
        match self {
            QuestionType::SingleChoice => '1',
            QuestionType::MultipleChoice => 'n',
            QuestionType::FreeText => '_',
        }
    }

    /// Description of the response this type is graded against.
    pub fn expected_response(self) -> &'static str {
        match self {
            QuestionType::SingleChoice => "a single selected index",
            QuestionType::MultipleChoice => "a set of selected indices",
            QuestionType::FreeText => "submitted text",
        }
    }
}

impl fmt::Display for QuestionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            QuestionType::SingleChoice => "single-choice",
            QuestionType::MultipleChoice => "multiple-choice",
            QuestionType::FreeText => "free-text",
        };
        f.write_str(name)
    }
}

/// The type marker found after `#`.
///
/// Unknown markers are kept so the question can still be parsed and shown;
/// grading it fails with [`crate::QuizError::UnsupportedQuestionType`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TypeTag {
    Known(QuestionType),
    /// The raw marker text; empty when the line was a bare `#`.
    Unknown(String),
}

impl TypeTag {
    pub fn from_marker(marker: Option<char>) -> Self {
        match marker {
            Some(c) => match QuestionType::from_marker(c) {
                Some(question_type) => TypeTag::Known(question_type),
                None => TypeTag::Unknown(c.to_string()),
            },
            None => TypeTag::Unknown(String::new()),
        }
    }

    pub fn question_type(&self) -> Option<QuestionType> {
        match self {
            TypeTag::Known(question_type) => Some(*question_type),
            TypeTag::Unknown(_) => None,
        }
    }

    pub fn marker(&self) -> String {
        match self {
            TypeTag::Known(question_type) => question_type.marker().to_string(),
            TypeTag::Unknown(marker) => marker.clone(),
        }
    }
}

/// One answer of a question, shaped by the question's type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Answer {
    /// `[x] text` or `[ ] text`
    Choice { text: String, is_correct: bool },
    /// `[expected]`; `label` is the visible text after the marker.
    FreeText { expected: String, label: String },
    /// Answer block of a question with an unknown type marker, kept verbatim.
    Raw { text: String },
}

impl Answer {
    pub fn is_correct(&self) -> bool {
        matches!(self, Answer::Choice { is_correct: true, .. })
    }

    /// The text a renderer shows next to the input.
    pub fn text(&self) -> &str {
        match self {
            Answer::Choice { text, .. } => text,
            Answer::FreeText { label, .. } => label,
            Answer::Raw { text } => text,
        }
    }
}

/// A parsed question block.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Question {
    pub tag: TypeTag,
    /// Trimmed, de-indented prompt; may span several lines.
    pub prompt: String,
    pub answers: Vec<Answer>,
}

impl Question {
    pub fn new(tag: TypeTag, prompt: impl Into<String>, answers: Vec<Answer>) -> Self {
        Self {
            tag,
            prompt: prompt.into(),
            answers,
        }
    }

    pub fn question_type(&self) -> Option<QuestionType> {
        self.tag.question_type()
    }

    /// Indices of the answers marked `[x]`.
    pub fn correct_indices(&self) -> BTreeSet<usize> {
        self.answers
            .iter()
            .enumerate()
            .filter(|(_, answer)| answer.is_correct())
            .map(|(index, _)| index)
            .collect()
    }
}

/// What the user submitted for one question.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Response {
    /// Index of the selected answer, if any.
    Single(Option<usize>),
    /// Indices of every checked answer.
    Multiple(BTreeSet<usize>),
    Text(String),
}

impl Response {
    /// The response of an untouched input for the given question type.
    pub fn empty(question_type: QuestionType) -> Self {
        match question_type {
            QuestionType::SingleChoice => Response::Single(None),
            QuestionType::MultipleChoice => Response::Multiple(BTreeSet::new()),
            QuestionType::FreeText => Response::Text(String::new()),
        }
    }

    pub fn multiple(indices: impl IntoIterator<Item = usize>) -> Self {
        Response::Multiple(indices.into_iter().collect())
    }

    pub fn text(text: impl Into<String>) -> Self {
        Response::Text(text.into())
    }

    pub(crate) fn shape(&self) -> &'static str {
        match self {
            Response::Single(_) => "a single selection",
            Response::Multiple(_) => "a set of selections",
            Response::Text(_) => "text",
        }
    }
}

/// Outcome of grading one question.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnswerCheck {
    pub correct: bool,
}

/// Outcome of grading a whole quiz.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuizResult {
    pub score: usize,
    pub total: usize,
    /// Prompts of the incorrectly answered questions, in quiz order.
    pub missed_prompts: Vec<String>,
}
