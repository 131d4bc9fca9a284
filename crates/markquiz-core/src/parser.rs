/*
 * parser.rs
 * Copyright (c) 2025 Posit, PBC
 */

//! Quiz markup parser.
//!
//! A single forward scan over the source lines. Each `#` line opens a block;
//! the block collects prompt lines until its first answer line, then answer
//! blocks until the next `#` line or the end of input. The scan never fails:
//! malformed pieces are dropped and reported as diagnostics.

use crate::answer::parse_answer;
use crate::classify::{LineClass, classify_line};
use crate::diagnostics::{DiagnosticCollector, codes};
use crate::error::QuizError;
use crate::grading::{check_answer, grade_quiz};
use crate::model::{Answer, Question, QuestionType, QuizResult, Response, TypeTag};
use markquiz_error_reporting::{DiagnosticMessage, DiagnosticMessageBuilder};
use markquiz_source_map::{FileId, SourceContext, SourceInfo};
use serde::Serialize;
use tracing::{debug, trace};

/// A parsed quiz together with everything the parser had to recover from.
#[derive(Debug, Clone)]
pub struct Quiz {
    /// Questions in source order.
    pub questions: Vec<Question>,

    /// Recovered markup problems, sorted by source position.
    pub diagnostics: Vec<DiagnosticMessage>,

    /// Source registry for rendering diagnostics.
    pub source_context: SourceContext,

    /// Location of each question's `#` line, parallel to `questions`.
    question_locations: Vec<SourceInfo>,
}

/// Parse quiz markup into its questions, discarding diagnostics.
pub fn parse_quiz(source: &str) -> Vec<Question> {
    Quiz::parse(source).questions
}

impl Quiz {
    /// Parse quiz markup.
    pub fn parse(source: &str) -> Self {
        Self::parse_with_filename(source, "<quiz>")
    }

    /// Parse quiz markup with a filename for diagnostics.
    pub fn parse_with_filename(source: &str, filename: &str) -> Self {
        let mut ctx = ParserContext::new(filename, source);
        let mut block: Option<BlockBuilder> = None;

        for line in source_lines(source) {
            let block_indent = block.as_ref().map_or(0, |b| b.indent);
            let class = classify_line(line.text, block_indent);
            trace!(row = line.row, ?class, "classified line");

            match class {
                LineClass::QuestionStart {
                    indent,
                    marker,
                    rest,
                } => {
                    if let Some(done) = block.take() {
                        ctx.finish_block(done);
                    }
                    let location = ctx.line_location(&line);
                    let tag = TypeTag::from_marker(marker);
                    if let TypeTag::Unknown(marker) = &tag {
                        ctx.diagnostics.add(unknown_marker(marker, location.clone()));
                    }
                    block = Some(BlockBuilder::new(tag, indent, rest, location));
                }
                LineClass::AnswerStart { text } => {
                    let location = ctx.line_location(&line);
                    match block.as_mut() {
                        Some(b) => b.start_answer(text, location, &mut ctx.diagnostics),
                        None => ctx.diagnostics.add(answer_outside_question(location)),
                    }
                }
                LineClass::Continuation { text, nested } => {
                    if let Some(b) = block.as_mut() {
                        let location = ctx.line_location(&line);
                        b.continue_with(text, nested, location, &mut ctx.diagnostics);
                    }
                }
                LineClass::Blank => {
                    if let Some(b) = block.as_mut() {
                        b.blank();
                    }
                }
            }
        }

        if let Some(done) = block.take() {
            ctx.finish_block(done);
        }

        ctx.into_quiz()
    }

    /// JSON form of the quiz: the questions plus the diagnostics.
    ///
    /// Each question carries the 1-based line of its `#` line.
    pub fn to_json(&self) -> serde_json::Value {
        let questions: Vec<QuestionJson<'_>> = self
            .questions
            .iter()
            .zip(&self.question_locations)
            .map(|(question, location)| QuestionJson {
                question,
                line: location.line_number(),
            })
            .collect();

        serde_json::json!({
            "questions": questions,
            "diagnostics": self.diagnostics.iter().map(DiagnosticMessage::to_json).collect::<Vec<_>>(),
        })
    }

    /// Location of the `#` line that opened question `index`.
    pub fn question_location(&self, index: usize) -> Option<&SourceInfo> {
        self.question_locations.get(index)
    }

    /// Authoring checks the parser does not enforce.
    ///
    /// Reports questions without answers and single-choice questions that do
    /// not mark exactly one correct answer. The parsed questions are not
    /// affected; grading treats such questions mechanically.
    pub fn lint(&self) -> Vec<DiagnosticMessage> {
        let mut collector = DiagnosticCollector::new();

        for (question, location) in self.questions.iter().zip(&self.question_locations) {
            if question.answers.is_empty() {
                collector.add(
                    DiagnosticMessageBuilder::warning("Question without answers")
                        .with_code(codes::QUESTION_WITHOUT_ANSWERS)
                        .problem("This question can never be answered correctly")
                        .add_hint("Add answer lines starting with `[` below the prompt?")
                        .with_location(location.clone())
                        .build(),
                );
                continue;
            }

            if question.question_type() == Some(QuestionType::SingleChoice) {
                let correct = question.correct_indices().len();
                if correct != 1 {
                    collector.add(
                        DiagnosticMessageBuilder::warning("Ambiguous single-choice question")
                            .with_code(codes::AMBIGUOUS_SINGLE_CHOICE)
                            .problem("A single-choice question must mark exactly one answer with `[x]`")
                            .add_detail(format!("Found {} answers marked `[x]`", correct))
                            .with_location(location.clone())
                            .build(),
                    );
                }
            }
        }

        collector.into_diagnostics()
    }

    /// Grade this quiz leniently; see [`grade_quiz`].
    pub fn grade(&self, responses: &[Option<Response>]) -> QuizResult {
        grade_quiz(&self.questions, responses)
    }

    /// Report every question the supplied responses cannot grade.
    ///
    /// Covers responses whose shape does not fit the question type and
    /// questions with an unknown type marker. Extra responses past the last
    /// question are reported last, without a location.
    pub fn check_responses(&self, responses: &[Option<Response>]) -> Vec<DiagnosticMessage> {
        let mut collector = DiagnosticCollector::new();

        for (index, (question, location)) in
            self.questions.iter().zip(&self.question_locations).enumerate()
        {
            let response = responses.get(index).and_then(Option::as_ref);
            let err = match (question.question_type(), response) {
                (None, _) => Some(QuizError::UnsupportedQuestionType {
                    marker: question.tag.marker(),
                }),
                (Some(_), Some(response)) => check_answer(question, response).err(),
                (Some(_), None) => None,
            };

            if let Some(err) = err {
                collector.add(
                    DiagnosticMessageBuilder::error(format!("Question {} cannot be graded", index + 1))
                        .with_code(codes::RESPONSE_MISMATCH)
                        .problem(err.to_string())
                        .add_info("Lenient grading counts this question as missed")
                        .with_location(location.clone())
                        .build(),
                );
            }
        }

        let mut diagnostics = collector.into_diagnostics();
        if responses.len() > self.questions.len() {
            diagnostics.push(
                DiagnosticMessageBuilder::warning("More responses than questions")
                    .with_code(codes::RESPONSE_MISMATCH)
                    .add_detail(format!(
                        "Got {} responses for {} questions; the extra responses are ignored",
                        responses.len(),
                        self.questions.len()
                    ))
                    .build(),
            );
        }
        diagnostics
    }
}

/// A question in [`Quiz::to_json`] output.
#[derive(Serialize)]
struct QuestionJson<'a> {
    #[serde(flatten)]
    question: &'a Question,
    line: usize,
}

/// Parser state shared across blocks.
#[derive(Debug)]
struct ParserContext {
    source_context: SourceContext,
    file_id: FileId,
    diagnostics: DiagnosticCollector,
    questions: Vec<Question>,
    question_locations: Vec<SourceInfo>,
}

impl ParserContext {
    fn new(filename: &str, source: &str) -> Self {
        let mut source_context = SourceContext::new();
        let file_id = source_context.add_file(filename, Some(source.to_string()));
        Self {
            source_context,
            file_id,
            diagnostics: DiagnosticCollector::new(),
            questions: Vec::new(),
            question_locations: Vec::new(),
        }
    }

    fn line_location(&self, line: &SourceLine<'_>) -> SourceInfo {
        SourceInfo::for_line(self.file_id, line.row, line.offset, line.text)
    }

    fn finish_block(&mut self, block: BlockBuilder) {
        let (question, location) = block.finish(&mut self.diagnostics);
        debug!(
            line = location.line_number(),
            marker = %question.tag.marker(),
            answers = question.answers.len(),
            "parsed question"
        );
        self.questions.push(question);
        self.question_locations.push(location);
    }

    fn into_quiz(self) -> Quiz {
        Quiz {
            questions: self.questions,
            diagnostics: self.diagnostics.into_diagnostics(),
            source_context: self.source_context,
            question_locations: self.question_locations,
        }
    }
}

/// One raw line with its position in the source.
#[derive(Debug, Clone, Copy)]
struct SourceLine<'a> {
    row: usize,
    /// Byte offset of the first character.
    offset: usize,
    /// Line text without the line terminator.
    text: &'a str,
}

fn source_lines(source: &str) -> impl Iterator<Item = SourceLine<'_>> {
    let mut offset = 0;
    source.split('\n').enumerate().map(move |(row, raw)| {
        let line = SourceLine {
            row,
            offset,
            text: raw.strip_suffix('\r').unwrap_or(raw),
        };
        offset += raw.len() + 1;
        line
    })
}

/// An answer whose continuation lines may still follow.
#[derive(Debug)]
struct PendingAnswer {
    lines: Vec<String>,
    location: SourceInfo,
}

/// Accumulates one question block.
#[derive(Debug)]
struct BlockBuilder {
    tag: TypeTag,
    indent: usize,
    location: SourceInfo,
    prompt: Vec<String>,
    /// Set once the first answer line was seen; prompt accumulation is over.
    in_answers: bool,
    answers: Vec<Answer>,
    pending: Option<PendingAnswer>,
}

impl BlockBuilder {
    fn new(tag: TypeTag, indent: usize, first_fragment: &str, location: SourceInfo) -> Self {
        Self {
            tag,
            indent,
            location,
            prompt: vec![first_fragment.to_string()],
            in_answers: false,
            answers: Vec::new(),
            pending: None,
        }
    }

    fn start_answer(
        &mut self,
        text: &str,
        location: SourceInfo,
        diagnostics: &mut DiagnosticCollector,
    ) {
        self.flush_answer(diagnostics);
        self.in_answers = true;
        self.pending = Some(PendingAnswer {
            lines: vec![text.to_string()],
            location,
        });
    }

    fn continue_with(
        &mut self,
        text: &str,
        nested: bool,
        location: SourceInfo,
        diagnostics: &mut DiagnosticCollector,
    ) {
        if !self.in_answers {
            self.prompt.push(text.to_string());
            return;
        }

        match self.pending.as_mut() {
            Some(pending) if nested => pending.lines.push(text.to_string()),
            _ => diagnostics.add(stray_line(location)),
        }
    }

    /// Blank lines belong to the prompt; between answers they are ignored.
    fn blank(&mut self) {
        if !self.in_answers {
            self.prompt.push(String::new());
        }
    }

    fn flush_answer(&mut self, diagnostics: &mut DiagnosticCollector) {
        let Some(pending) = self.pending.take() else {
            return;
        };
        let joined = pending.lines.join("\n");
        let block = joined.trim();

        match &self.tag {
            TypeTag::Known(question_type) => match parse_answer(*question_type, block) {
                Ok(answer) => self.answers.push(answer),
                Err(err) => {
                    tracing::warn!(line = pending.location.line_number(), %err, "skipping malformed answer");
                    diagnostics.add(
                        DiagnosticMessageBuilder::warning("Malformed answer")
                            .with_code(codes::MALFORMED_ANSWER)
                            .problem(err.to_string())
                            .add_info("The answer was skipped")
                            .with_location(pending.location)
                            .build(),
                    );
                }
            },
            TypeTag::Unknown(_) => self.answers.push(Answer::Raw {
                text: block.to_string(),
            }),
        }
    }

    fn finish(mut self, diagnostics: &mut DiagnosticCollector) -> (Question, SourceInfo) {
        self.flush_answer(diagnostics);
        let prompt = self.prompt.join("\n").trim().to_string();
        (Question::new(self.tag, prompt, self.answers), self.location)
    }
}

fn unknown_marker(marker: &str, location: SourceInfo) -> DiagnosticMessage {
    let title = if marker.is_empty() {
        "Missing question type marker".to_string()
    } else {
        format!("Unknown question type marker `{}`", marker)
    };
    DiagnosticMessageBuilder::warning(title)
        .with_code(codes::UNKNOWN_QUESTION_TYPE)
        .problem("Question type markers must be `1`, `n` or `_`")
        .add_info("The question is kept but cannot be graded")
        .with_location(location)
        .build()
}

fn answer_outside_question(location: SourceInfo) -> DiagnosticMessage {
    DiagnosticMessageBuilder::warning("Answer outside of a question")
        .with_code(codes::ANSWER_OUTSIDE_QUESTION)
        .problem("Answer lines must follow a `#` question line")
        .add_info("The line was ignored")
        .with_location(location)
        .build()
}

fn stray_line(location: SourceInfo) -> DiagnosticMessage {
    DiagnosticMessageBuilder::warning("Stray line between answers")
        .with_code(codes::STRAY_LINE)
        .problem("Lines continuing an answer must be indented deeper than the question")
        .add_info("The line was ignored")
        .add_hint("Indent the line to continue the answer above?")
        .with_location(location)
        .build()
}
