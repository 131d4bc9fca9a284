/*
 * lib.rs
 * Copyright (c) 2025 Posit, PBC
 */

//! Parser and grading evaluator for quiz markup.
//!
//! Quiz markup is a small, indentation-sensitive plain-text format:
//!
//! ```text
//! #1 2+2=?
//! [ ] 3
//! [x] 4
//! #n Pick primes
//! [x] 2
//! [x] 3
//! [ ] 4
//! #_ Capital of France?
//! [Paris]
//! ```
//!
//! - `#1` starts a single-choice question, `#n` a multiple-choice question
//!   and `#_` a free-text question.
//! - `[x]` / `[ ]` mark correct / incorrect choices.
//! - For free-text questions the expected answer sits inside the brackets.
//!
//! # Architecture
//!
//! Parsing is a single forward scan: [`classify`] decides what each raw line
//! is, [`parser`] groups lines into question blocks, and [`answer`] turns each
//! answer block into an [`Answer`]. Grading ([`grading`]) is a pure function
//! of a [`Question`] and a caller-supplied [`Response`]. Rendering the quiz is
//! left to the caller; [`display`] only offers the text helpers a renderer
//! needs.
//!
//! # Example
//!
//! ```rust
//! use markquiz_core::{Response, grade_quiz, parse_quiz};
//!
//! let questions = parse_quiz("#1 2+2=?\n[ ] 3\n[x] 4\n");
//! let result = grade_quiz(&questions, &[Some(Response::Single(Some(1)))]);
//! assert_eq!(result.score_line(), "Your score is 1 out of 1");
//! ```

pub mod answer;
pub mod classify;
pub mod config;
pub mod diagnostics;
pub mod display;
pub mod error;
pub mod grading;
pub mod model;
pub mod parser;

// Re-export main types at crate root
pub use answer::parse_answer;
pub use classify::{LineClass, classify_line, count_indent, remove_indent};
pub use config::{GradingOptions, QuizConfig};
pub use diagnostics::DiagnosticCollector;
pub use display::{DisplayOptions, process_text};
pub use error::{AnswerError, ConfigError, QuizError, Result};
pub use grading::{check_answer, grade_quiz, grade_quiz_strict};
pub use model::{Answer, AnswerCheck, Question, QuestionType, QuizResult, Response, TypeTag};
pub use parser::{Quiz, parse_quiz};
