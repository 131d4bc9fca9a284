/*
 * diagnostics.rs
 * Copyright (c) 2025 Posit, PBC
 */

//! Collection of markup diagnostics.
//!
//! The parser never fails; everything it recovers from ends up here with the
//! location of the offending line.

use markquiz_error_reporting::DiagnosticMessage;

/// Error codes reported while parsing and linting quiz markup.
pub mod codes {
    pub const UNKNOWN_QUESTION_TYPE: &str = "MQ-1-1";
    pub const MALFORMED_ANSWER: &str = "MQ-1-2";
    pub const QUESTION_WITHOUT_ANSWERS: &str = "MQ-1-3";
    pub const AMBIGUOUS_SINGLE_CHOICE: &str = "MQ-1-4";
    pub const ANSWER_OUTSIDE_QUESTION: &str = "MQ-1-5";
    pub const STRAY_LINE: &str = "MQ-1-6";
    pub const RESPONSE_MISMATCH: &str = "MQ-2-1";
}

/// Collector for diagnostic messages.
#[derive(Debug, Default)]
pub struct DiagnosticCollector {
    diagnostics: Vec<DiagnosticMessage>,
}

impl DiagnosticCollector {
    pub fn new() -> Self {
        Self {
            diagnostics: Vec::new(),
        }
    }

    pub fn add(&mut self, diagnostic: DiagnosticMessage) {
        self.diagnostics.push(diagnostic);
    }

    /// Consume the collector and return the diagnostics, sorted by source location.
    pub fn into_diagnostics(mut self) -> Vec<DiagnosticMessage> {
        self.diagnostics
            .sort_by_key(|diag| diag.location.as_ref().map_or(0, |loc| loc.start_offset()));
        self.diagnostics
    }
}
