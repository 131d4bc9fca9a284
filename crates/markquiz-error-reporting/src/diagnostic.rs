//! Core diagnostic message types.
//!
//! This module defines the structures for representing diagnostic messages
//! (errors, warnings, info) and renders them as text or JSON.

use markquiz_source_map::{SourceContext, SourceInfo};
use serde::{Deserialize, Serialize};

/// The kind of diagnostic message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DiagnosticKind {
    /// An error that prevents completion
    Error,
    /// A warning that doesn't prevent completion but indicates a problem
    Warning,
}

impl DiagnosticKind {
    fn label(self) -> &'static str {
        match self {
            DiagnosticKind::Error => "Error",
            DiagnosticKind::Warning => "Warning",
        }
    }
}

/// How detail items should be presented (tidyverse x/i bullet style).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DetailKind {
    /// Error detail (✖ bullet)
    Error,
    /// Info detail (ℹ bullet)
    Info,
}

impl DetailKind {
    fn bullet(self) -> &'static str {
        match self {
            DetailKind::Error => "✖",
            DetailKind::Info => "ℹ",
        }
    }
}

/// A detail item in a diagnostic message.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DetailItem {
    pub kind: DetailKind,
    pub content: String,
}

/// A diagnostic message.
///
/// Structure:
/// 1. **Code**: Optional error code (e.g., "MQ-1-2") for searchability
/// 2. **Title**: Brief error message
/// 3. **Kind**: Error, Warning, Info
/// 4. **Problem**: What went wrong (the "must" or "can't" statement)
/// 5. **Details**: Specific information, one bullet each
/// 6. **Hints**: Optional guidance for fixing (ends with ?)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DiagnosticMessage {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,

    pub title: String,

    pub kind: DiagnosticKind,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub problem: Option<String>,

    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub details: Vec<DetailItem>,

    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub hints: Vec<String>,

    /// Source location for this diagnostic
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<SourceInfo>,
}

impl DiagnosticMessage {
    /// Create a new diagnostic message with just a title and kind.
    ///
    /// Prefer [`crate::DiagnosticMessageBuilder`] for anything with details.
    pub fn new(kind: DiagnosticKind, title: impl Into<String>) -> Self {
        Self {
            code: None,
            title: title.into(),
            kind,
            problem: None,
            details: Vec::new(),
            hints: Vec::new(),
            location: None,
        }
    }

    pub fn error(title: impl Into<String>) -> Self {
        Self::new(DiagnosticKind::Error, title)
    }

    pub fn warning(title: impl Into<String>) -> Self {
        Self::new(DiagnosticKind::Warning, title)
    }

    /// Set the error code.
    ///
    /// Error codes follow the format `MQ-<subsystem>-<number>` (e.g., "MQ-1-1").
    pub fn with_code(mut self, code: impl Into<String>) -> Self {
        self.code = Some(code.into());
        self
    }

    /// Get the documentation URL for this error, if it has a known error code.
    pub fn docs_url(&self) -> Option<&str> {
        self.code
            .as_ref()
            .and_then(|code| crate::catalog::get_docs_url(code))
    }

    pub fn is_error(&self) -> bool {
        self.kind == DiagnosticKind::Error
    }

    /// Render this diagnostic as plain text.
    ///
    /// When the diagnostic has a location and `ctx` can supply the source,
    /// the offending line is shown with ariadne; otherwise a tidyverse-style
    /// block is produced:
    ///
    /// ```text
    /// Warning [MQ-1-2]: Malformed answer
    /// Answer lines must start with `[x]` or `[ ]`
    /// ✖ Error detail
    /// ℹ Info detail
    /// ? Hint
    /// ```
    pub fn to_text(&self, ctx: Option<&SourceContext>) -> String {
        self.render_text(ctx, false)
    }

    /// Same as [`Self::to_text`] but with ANSI colors in the source snippet.
    pub fn to_ansi_text(&self, ctx: Option<&SourceContext>) -> String {
        self.render_text(ctx, true)
    }

    fn render_text(&self, ctx: Option<&SourceContext>, color: bool) -> String {
        let snippet = match (&self.location, ctx) {
            (Some(location), Some(ctx)) => self.render_ariadne_source_context(location, ctx, color),
            _ => None,
        };

        let mut lines = Vec::new();
        match snippet {
            Some(snippet) => {
                // ariadne already shows the title, code and problem
                lines.push(snippet.trim_end().to_string());
                lines.extend(
                    self.details
                        .iter()
                        .map(|d| format!("{} {}", d.kind.bullet(), d.content)),
                );
            }
            None => {
                lines.push(self.headline());
                if let Some(problem) = &self.problem {
                    lines.push(problem.clone());
                }
                lines.extend(
                    self.details
                        .iter()
                        .map(|d| format!("{} {}", d.kind.bullet(), d.content)),
                );
            }
        }
        lines.extend(self.hints.iter().map(|h| format!("? {}", h)));
        lines.join("\n")
    }

    fn headline(&self) -> String {
        match &self.code {
            Some(code) => format!("{} [{}]: {}", self.kind.label(), code, self.title),
            None => format!("{}: {}", self.kind.label(), self.title),
        }
    }

    /// Render this diagnostic message as a JSON value.
    pub fn to_json(&self) -> serde_json::Value {
        use serde_json::json;

        let mut obj = json!({
            "kind": self.kind,
            "title": self.title,
        });

        if let Some(code) = &self.code {
            obj["code"] = json!(code);
        }
        if let Some(url) = self.docs_url() {
            obj["docs_url"] = json!(url);
        }
        if let Some(subsystem) = self.code.as_deref().and_then(crate::catalog::get_subsystem) {
            obj["subsystem"] = json!(subsystem);
        }
        if let Some(problem) = &self.problem {
            obj["problem"] = json!(problem);
        }
        if !self.details.is_empty() {
            obj["details"] = json!(self.details);
        }
        if !self.hints.is_empty() {
            obj["hints"] = json!(self.hints);
        }
        if let Some(location) = &self.location {
            obj["location"] = json!(location);
            obj["line"] = json!(location.line_number());
        }

        obj
    }

    /// Render the source snippet with ariadne.
    ///
    /// Returns `None` when the location does not fit the source text, so the
    /// caller falls back to the plain layout.
    fn render_ariadne_source_context(
        &self,
        location: &SourceInfo,
        ctx: &SourceContext,
        color: bool,
    ) -> Option<String> {
        use ariadne::{Color, Config, Label, Report, ReportKind, Source};

        let file = ctx.get_file(location.file_id)?;
        let content = ctx.file_content(location.file_id)?;
        let path = file.path.clone();

        // ariadne spans count characters, locations count bytes
        let start = char_index(&content, location.start_offset())?;
        let end = char_index(&content, location.end_offset())?;

        let (report_kind, main_color) = match self.kind {
            DiagnosticKind::Error => (ReportKind::Error, Color::Red),
            DiagnosticKind::Warning => (ReportKind::Warning, Color::Yellow),
        };

        let mut report = Report::build(report_kind, path.clone(), start)
            .with_config(Config::default().with_color(color));

        report = match &self.code {
            Some(code) => report.with_message(format!("[{}] {}", code, self.title)),
            None => report.with_message(&self.title),
        };

        let main_message = self.problem.as_deref().unwrap_or(&self.title);
        report = report.with_label(
            Label::new((path.clone(), start..end))
                .with_message(main_message)
                .with_color(main_color),
        );

        let mut output = Vec::new();
        report
            .finish()
            .write((path, Source::from(content.as_str())), &mut output)
            .ok()?;

        String::from_utf8(output).ok()
    }
}

/// Character index of byte `offset` in `content`, if it is a char boundary.
fn char_index(content: &str, offset: usize) -> Option<usize> {
    content.get(..offset).map(|prefix| prefix.chars().count())
}
