//! Builder API for diagnostic messages.

use crate::diagnostic::{DetailItem, DetailKind, DiagnosticKind, DiagnosticMessage};
use markquiz_source_map::SourceInfo;

/// Builder for [`DiagnosticMessage`].
#[derive(Debug, Clone)]
pub struct DiagnosticMessageBuilder {
    message: DiagnosticMessage,
}

impl DiagnosticMessageBuilder {
    fn new(kind: DiagnosticKind, title: impl Into<String>) -> Self {
        Self {
            message: DiagnosticMessage::new(kind, title),
        }
    }

    pub fn error(title: impl Into<String>) -> Self {
        Self::new(DiagnosticKind::Error, title)
    }

    pub fn warning(title: impl Into<String>) -> Self {
        Self::new(DiagnosticKind::Warning, title)
    }

    pub fn with_code(mut self, code: impl Into<String>) -> Self {
        self.message.code = Some(code.into());
        self
    }

    /// The "what went wrong" statement, phrased with "must" or "can't".
    pub fn problem(mut self, problem: impl Into<String>) -> Self {
        self.message.problem = Some(problem.into());
        self
    }

    pub fn add_detail(self, content: impl Into<String>) -> Self {
        self.push_detail(DetailKind::Error, content)
    }

    pub fn add_info(self, content: impl Into<String>) -> Self {
        self.push_detail(DetailKind::Info, content)
    }

    pub fn add_hint(mut self, hint: impl Into<String>) -> Self {
        self.message.hints.push(hint.into());
        self
    }

    pub fn with_location(mut self, location: SourceInfo) -> Self {
        self.message.location = Some(location);
        self
    }

    pub fn build(self) -> DiagnosticMessage {
        self.message
    }

    fn push_detail(mut self, kind: DetailKind, content: impl Into<String>) -> Self {
        self.message.details.push(DetailItem {
            kind,
            content: content.into(),
        });
        self
    }
}
