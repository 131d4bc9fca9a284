/*
 * config.rs
 * Copyright (c) 2025 Posit, PBC
 */

//! Quiz configuration.
//!
//! Loaded from YAML; every field has a default so an empty file is valid:
//!
//! ```yaml
//! display:
//!   line_break: "<br>"
//! grading:
//!   strict: false
//! ```

use crate::display::DisplayOptions;
use crate::error::{ConfigError, Result};
use crate::grading::{grade_quiz, grade_quiz_strict};
use crate::model::{Question, QuizResult, Response};
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct QuizConfig {
    pub display: DisplayOptions,
    pub grading: GradingOptions,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GradingOptions {
    /// Fail grading on questions that cannot be graded instead of counting
    /// them as missed.
    pub strict: bool,
}

impl QuizConfig {
    pub fn from_yaml_str(yaml: &str) -> Result<Self, ConfigError> {
        if yaml.trim().is_empty() {
            return Ok(Self::default());
        }
        Ok(serde_yaml::from_str(yaml)?)
    }

    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let yaml = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        tracing::debug!(path = %path.display(), "loaded quiz config");
        Self::from_yaml_str(&yaml)
    }

    /// Grade with the configured strictness.
    pub fn grade(&self, questions: &[Question], responses: &[Option<Response>]) -> Result<QuizResult> {
        if self.grading.strict {
            grade_quiz_strict(questions, responses)
        } else {
            Ok(grade_quiz(questions, responses))
        }
    }
}
