/*
 * grading.rs
 * Copyright (c) 2025 Posit, PBC
 */

//! Grading evaluator.
//!
//! Each question type has one pure grading rule. [`check_answer`] dispatches
//! on the question's type tag; [`grade_quiz`] and [`grade_quiz_strict`] fold
//! the per-question results into a [`QuizResult`].

use crate::error::{QuizError, Result};
use crate::model::{Answer, AnswerCheck, Question, QuestionType, QuizResult, Response};
use std::borrow::Cow;
use std::collections::BTreeSet;

/// Grade one question against the submitted response.
///
/// Fails for questions with an unknown type marker and for responses whose
/// shape does not fit the question type. Questions without answers are never
/// correct.
pub fn check_answer(question: &Question, response: &Response) -> Result<AnswerCheck> {
    let question_type = question
        .question_type()
        .ok_or_else(|| QuizError::UnsupportedQuestionType {
            marker: question.tag.marker(),
        })?;

    let correct = match (question_type, response) {
        (QuestionType::SingleChoice, Response::Single(selected)) => {
            grade_single_choice(&question.answers, *selected)
        }
        (QuestionType::MultipleChoice, Response::Multiple(selected)) => {
            grade_multiple_choice(question, selected)
        }
        (QuestionType::FreeText, Response::Text(submitted)) => {
            grade_free_text(&question.answers, submitted)
        }
        (question_type, response) => {
            return Err(QuizError::ResponseMismatch {
                question_type,
                expected: question_type.expected_response(),
                found: response.shape(),
            });
        }
    };

    Ok(AnswerCheck { correct })
}

/// Correct iff the selected answer is marked correct. An out-of-range
/// selection is simply wrong.
fn grade_single_choice(answers: &[Answer], selected: Option<usize>) -> bool {
    selected
        .and_then(|index| answers.get(index))
        .is_some_and(Answer::is_correct)
}

/// Correct iff the selection is exactly the set of correct answers.
fn grade_multiple_choice(question: &Question, selected: &BTreeSet<usize>) -> bool {
    !question.answers.is_empty() && *selected == question.correct_indices()
}

/// Exact, case-sensitive comparison against the first answer's expected
/// value; a free-text question has a single input.
fn grade_free_text(answers: &[Answer], submitted: &str) -> bool {
    match answers.first() {
        Some(Answer::FreeText { expected, .. }) => expected == submitted,
        _ => false,
    }
}

/// The response for question `index`, or the untouched-input response of
/// its type when none was supplied.
fn response_for<'a>(
    question: &Question,
    responses: &'a [Option<Response>],
    index: usize,
) -> Option<Cow<'a, Response>> {
    match responses.get(index) {
        Some(Some(response)) => Some(Cow::Borrowed(response)),
        _ => question
            .question_type()
            .map(|question_type| Cow::Owned(Response::empty(question_type))),
    }
}

fn check_at(question: &Question, responses: &[Option<Response>], index: usize) -> Result<bool> {
    match response_for(question, responses, index) {
        Some(response) => Ok(check_answer(question, &response)?.correct),
        None => Err(QuizError::UnsupportedQuestionType {
            marker: question.tag.marker(),
        }),
    }
}

fn tally(result: &mut QuizResult, question: &Question, correct: bool) {
    if correct {
        result.score += 1;
    } else {
        result.missed_prompts.push(question.prompt.clone());
    }
}

/// Grade every question in order.
///
/// `responses[i]` answers `questions[i]`; missing entries count as untouched
/// inputs. Questions that cannot be graded (unknown type marker, mismatched
/// response) are counted as missed and logged.
pub fn grade_quiz(questions: &[Question], responses: &[Option<Response>]) -> QuizResult {
    let mut result = QuizResult {
        total: questions.len(),
        ..QuizResult::default()
    };

    for (index, question) in questions.iter().enumerate() {
        let correct = match check_at(question, responses, index) {
            Ok(correct) => correct,
            Err(err) => {
                tracing::warn!(question = index + 1, %err, "counting ungradable question as missed");
                false
            }
        };
        tally(&mut result, question, correct);
    }

    result
}

/// Like [`grade_quiz`] but fails on the first question that cannot be graded.
pub fn grade_quiz_strict(
    questions: &[Question],
    responses: &[Option<Response>],
) -> Result<QuizResult> {
    let mut result = QuizResult {
        total: questions.len(),
        ..QuizResult::default()
    };

    for (index, question) in questions.iter().enumerate() {
        let correct = check_at(question, responses, index)?;
        tally(&mut result, question, correct);
    }

    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::TypeTag;

    fn choice(text: &str, is_correct: bool) -> Answer {
        Answer::Choice {
            text: text.to_string(),
            is_correct,
        }
    }

    fn single(answers: Vec<Answer>) -> Question {
        Question::new(TypeTag::Known(QuestionType::SingleChoice), "single", answers)
    }

    fn multiple(answers: Vec<Answer>) -> Question {
        Question::new(TypeTag::Known(QuestionType::MultipleChoice), "multiple", answers)
    }

    fn free_text(expected: &str) -> Question {
        Question::new(
            TypeTag::Known(QuestionType::FreeText),
            "free",
            vec![Answer::FreeText {
                expected: expected.to_string(),
                label: String::new(),
            }],
        )
    }

    fn is_correct(question: &Question, response: Response) -> bool {
        check_answer(question, &response).unwrap().correct
    }

    // ========================================================================
    // Single choice
    // ========================================================================

    #[test]
    fn test_single_choice() {
        let question = single(vec![choice("3", false), choice("4", true), choice("5", false)]);

        assert!(is_correct(&question, Response::Single(Some(1))));
        assert!(!is_correct(&question, Response::Single(Some(0))));
        assert!(!is_correct(&question, Response::Single(Some(2))));
        assert!(!is_correct(&question, Response::Single(None)));
        assert!(!is_correct(&question, Response::Single(Some(7))));
    }

    #[test]
    fn test_single_choice_without_correct_answer() {
        let question = single(vec![choice("a", false), choice("b", false)]);

        assert!(!is_correct(&question, Response::Single(Some(0))));
        assert!(!is_correct(&question, Response::Single(Some(1))));
        assert!(!is_correct(&question, Response::Single(None)));
    }

    #[test]
    fn test_single_choice_with_two_correct_answers() {
        let question = single(vec![choice("a", true), choice("b", true), choice("c", false)]);

        assert!(is_correct(&question, Response::Single(Some(0))));
        assert!(is_correct(&question, Response::Single(Some(1))));
        assert!(!is_correct(&question, Response::Single(Some(2))));
    }

    // ========================================================================
    // Multiple choice
    // ========================================================================

    #[test]
    fn test_multiple_choice_exact_set() {
        let question = multiple(vec![choice("2", true), choice("3", true), choice("4", false)]);

        assert!(is_correct(&question, Response::multiple([0, 1])));
        assert!(!is_correct(&question, Response::multiple([0])));
        assert!(!is_correct(&question, Response::multiple([0, 1, 2])));
        assert!(!is_correct(&question, Response::multiple([1, 2])));
        assert!(!is_correct(&question, Response::multiple([])));
    }

    #[test]
    fn test_multiple_choice_with_no_correct_answers() {
        let question = multiple(vec![choice("a", false), choice("b", false)]);

        assert!(is_correct(&question, Response::multiple([])));
        assert!(!is_correct(&question, Response::multiple([0])));
    }

    // ========================================================================
    // Free text
    // ========================================================================

    #[test]
    fn test_free_text_is_exact() {
        let question = free_text("Paris");

        assert!(is_correct(&question, Response::text("Paris")));
        assert!(!is_correct(&question, Response::text("paris")));
        assert!(!is_correct(&question, Response::text(" Paris")));
    }

    #[test]
    fn test_free_text_empty_expected() {
        let question = free_text("");

        assert!(is_correct(&question, Response::text("")));
        assert!(!is_correct(&question, Response::text("anything")));
    }

    // ========================================================================
    // Edge cases
    // ========================================================================

    #[test]
    fn test_questions_without_answers_are_never_correct() {
        assert!(!is_correct(&single(vec![]), Response::Single(None)));
        assert!(!is_correct(&multiple(vec![]), Response::multiple([])));
        let empty_free_text =
            Question::new(TypeTag::Known(QuestionType::FreeText), "free", vec![]);
        assert!(!is_correct(&empty_free_text, Response::text("")));
    }

    #[test]
    fn test_unknown_type_fails_dispatch() {
        let question = Question::new(TypeTag::Unknown("?".into()), "mystery", vec![]);
        let err = check_answer(&question, &Response::Single(Some(0))).unwrap_err();

        assert!(matches!(err, QuizError::UnsupportedQuestionType { ref marker } if marker == "?"));
    }

    #[test]
    fn test_response_mismatch() {
        let question = single(vec![choice("a", true)]);
        let err = check_answer(&question, &Response::text("a")).unwrap_err();

        assert!(matches!(
            err,
            QuizError::ResponseMismatch {
                question_type: QuestionType::SingleChoice,
                ..
            }
        ));
    }

    // ========================================================================
    // Quiz grading
    // ========================================================================

    #[test]
    fn test_grade_quiz_tallies_in_order() {
        let questions = vec![
            single(vec![choice("a", true), choice("b", false)]),
            multiple(vec![choice("a", true), choice("b", true)]),
            free_text("Paris"),
        ];
        let responses = vec![
            Some(Response::Single(Some(1))),
            Some(Response::multiple([0, 1])),
            Some(Response::text("London")),
        ];

        let result = grade_quiz(&questions, &responses);
        assert_eq!(result.score, 1);
        assert_eq!(result.total, 3);
        assert_eq!(result.missed_prompts, vec!["single", "free"]);
    }

    #[test]
    fn test_missing_responses_are_untouched_inputs() {
        let questions = vec![free_text(""), single(vec![choice("a", true)])];

        let result = grade_quiz(&questions, &[]);
        assert_eq!(result.score, 1);
        assert_eq!(result.missed_prompts, vec!["single"]);
    }

    #[test]
    fn test_grade_quiz_is_lenient_and_strict_is_not() {
        let questions = vec![
            Question::new(TypeTag::Unknown("?".into()), "mystery", vec![]),
            single(vec![choice("a", true)]),
        ];
        let responses = vec![None, Some(Response::Single(Some(0)))];

        let result = grade_quiz(&questions, &responses);
        assert_eq!(result.score, 1);
        assert_eq!(result.missed_prompts, vec!["mystery"]);

        assert!(grade_quiz_strict(&questions, &responses).is_err());
        assert_eq!(
            grade_quiz_strict(&questions[1..], &responses[1..]).unwrap(),
            QuizResult {
                score: 1,
                total: 1,
                missed_prompts: vec![],
            }
        );
    }

    #[test]
    fn test_empty_quiz() {
        assert_eq!(grade_quiz(&[], &[]), QuizResult::default());
    }
}
