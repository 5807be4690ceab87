// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Pure validation over request payloads and machine state.
//!
//! Validators return `Result` for single checks; request handlers that
//! want all findings at once collect them into a [`ValidationResult`].

use crate::machine::StateMachine;
use crate::question::QuestionSet;
use thiserror::Error;

/// Maximum nickname length in code points.
pub const NICKNAME_MAX: usize = 20;

/// Characters never allowed in nicknames (markup and quote injection).
const NICKNAME_FORBIDDEN: &[char] = &['<', '>', '&', '"', '\''];

/// Illustrative profanity screen; matched as lowercase substrings.
const PROFANITY: &[&str] = &["fuck", "shit", "bitch", "cunt"];

/// Reactions participants may send.
pub const EMOJI_ALLOWED: &[&str] = &["👍", "👏", "😂", "😮", "❤️", "🎉"];

/// A single validation failure.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("nickname must not be empty")]
    EmptyNickname,

    #[error("nickname exceeds {NICKNAME_MAX} characters")]
    NicknameTooLong,

    #[error("nickname contains a forbidden character")]
    ForbiddenCharacter,

    #[error("nickname contains a control character")]
    ControlCharacter,

    #[error("nickname is not allowed")]
    ProfaneNickname,

    #[error("emoji is not in the allowed set")]
    UnknownEmoji,

    #[error("session id is not a valid UUID")]
    MalformedSessionId,

    #[error("unknown state: {0}")]
    UnknownState(String),

    #[error("unknown action: {0}")]
    UnknownAction(String),

    #[error("question number {n} out of range 1..={max}")]
    QuestionNumberOutOfRange { n: u32, max: u32 },

    #[error("answer index {index} out of range 1..={choices}")]
    AnswerIndexOutOfRange { index: u32, choices: u32 },

    #[error("machine is in {phase} with no current question")]
    InconsistentQuestion { phase: String },
}

/// Aggregate of validation findings for one request.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationResult {
    pub errors: Vec<ValidationError>,
}

impl ValidationResult {
    pub fn ok() -> Self {
        Self::default()
    }

    pub fn push(&mut self, error: ValidationError) {
        self.errors.push(error);
    }

    pub fn valid(&self) -> bool {
        self.errors.is_empty()
    }

    /// The first finding, for request contexts that surface one error.
    pub fn into_result(mut self) -> Result<(), ValidationError> {
        if self.errors.is_empty() {
            Ok(())
        } else {
            Err(self.errors.remove(0))
        }
    }
}

/// Validate and normalize a nickname. Returns the trimmed value.
pub fn nickname(raw: &str) -> Result<String, ValidationError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::EmptyNickname);
    }
    if trimmed.chars().count() > NICKNAME_MAX {
        return Err(ValidationError::NicknameTooLong);
    }
    for c in trimmed.chars() {
        if NICKNAME_FORBIDDEN.contains(&c) {
            return Err(ValidationError::ForbiddenCharacter);
        }
        if c.is_control() && !matches!(c, '\t' | '\n' | '\r') {
            return Err(ValidationError::ControlCharacter);
        }
    }
    let lower = trimmed.to_lowercase();
    if PROFANITY.iter().any(|word| lower.contains(word)) {
        return Err(ValidationError::ProfaneNickname);
    }
    Ok(trimmed.to_string())
}

/// Check an emoji against the allow-list.
pub fn emoji(value: &str) -> Result<(), ValidationError> {
    if EMOJI_ALLOWED.contains(&value) {
        Ok(())
    } else {
        Err(ValidationError::UnknownEmoji)
    }
}

/// Client-supplied session ids must be UUID-shaped.
pub fn session_id(value: &str) -> Result<(), ValidationError> {
    uuid::Uuid::parse_str(value)
        .map(|_| ())
        .map_err(|_| ValidationError::MalformedSessionId)
}

/// Shape-check an answer submission against the question set.
pub fn answer(question_number: u32, answer_index: u32, questions: &QuestionSet) -> ValidationResult {
    let mut result = ValidationResult::ok();
    let Some(question) = questions.get(question_number) else {
        result.push(ValidationError::QuestionNumberOutOfRange {
            n: question_number,
            max: questions.len(),
        });
        return result;
    };
    let choices = question.choices.len() as u32;
    if answer_index == 0 || answer_index > choices {
        result.push(ValidationError::AnswerIndexOutOfRange {
            index: answer_index,
            choices,
        });
    }
    result
}

/// System consistency: question-bound phases need a question in `[1, N]`.
pub fn machine_consistency(machine: &StateMachine) -> ValidationResult {
    let mut result = ValidationResult::ok();
    let q = machine.current_question();
    if machine.phase().is_question_bound() && (q == 0 || q > machine.total_questions()) {
        result.push(ValidationError::InconsistentQuestion {
            phase: machine.phase().to_string(),
        });
    }
    result
}

#[cfg(test)]
#[path = "validate_tests.rs"]
mod tests;
