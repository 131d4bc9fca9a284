/*
 * error.rs
 * Copyright (c) 2025 Posit, PBC
 */

//! Error types for quiz parsing, grading and configuration.

use crate::model::QuestionType;
use std::path::PathBuf;
use thiserror::Error;

/// Errors surfaced by grading dispatch.
///
/// Parsing never returns an error: recoverable markup problems are reported
/// as diagnostics on [`crate::Quiz`] instead.
#[derive(Debug, Error)]
pub enum QuizError {
    /// A question used a type marker with no grading rule.
    #[error("Unsupported question type marker '{marker}'")]
    UnsupportedQuestionType { marker: String },

    /// The response shape does not fit the question type.
    #[error("Response mismatch: {question_type} question expects {expected}, got {found}")]
    ResponseMismatch {
        question_type: QuestionType,
        expected: &'static str,
        found: &'static str,
    },
}

/// Why a single answer block could not be parsed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AnswerError {
    #[error("answer is too short ({len} characters, need at least 3)")]
    TooShort { len: usize },

    #[error("answer must start with a one-character marker such as `[x]` or `[ ]`")]
    MissingChoiceMarker,

    #[error("answer must contain the expected text inside `[` and `]`")]
    MissingBrackets,
}

/// Errors loading a [`crate::QuizConfig`].
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file {}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid quiz configuration: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

/// Result type for quiz operations.
pub type Result<T, E = QuizError> = std::result::Result<T, E>;
