// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Config-loaded quiz questions, immutable at runtime.

use serde::{Deserialize, Serialize};

/// Presentation kind of a question.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum QuestionKind {
    Text,
    Image,
}

fn default_point() -> u32 {
    1
}

/// A single multiple-choice question.
///
/// `correct` is a 1-based index into `choices`; the same convention is
/// used on the wire, so answer indices are never re-based anywhere.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Question {
    #[serde(rename = "type")]
    pub kind: QuestionKind,
    pub text: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    pub choices: Vec<String>,
    pub correct: u32,
    #[serde(default = "default_point")]
    pub point: u32,
}

impl Question {
    /// Whether a 1-based answer index hits the correct choice.
    pub fn is_correct(&self, answer_index: u32) -> bool {
        answer_index == self.correct
    }

    /// Public payload: everything except the answer key.
    pub fn view(&self) -> QuestionView {
        QuestionView {
            kind: self.kind,
            text: self.text.clone(),
            image: self.image.clone(),
            choices: self.choices.clone(),
        }
    }
}

/// What participants and the screen are allowed to see.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuestionView {
    #[serde(rename = "type")]
    pub kind: QuestionKind,
    pub text: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    pub choices: Vec<String>,
}

/// The ordered question list, addressed 1-based.
#[derive(Debug, Clone)]
pub struct QuestionSet {
    questions: Vec<Question>,
}

impl QuestionSet {
    pub fn new(questions: Vec<Question>) -> Self {
        Self { questions }
    }

    /// Look up question `n` (1-based). `0` is "no question yet".
    pub fn get(&self, n: u32) -> Option<&Question> {
        if n == 0 {
            return None;
        }
        self.questions.get(n as usize - 1)
    }

    pub fn len(&self) -> u32 {
        self.questions.len() as u32
    }

    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }
}

#[cfg(test)]
#[path = "question_tests.rs"]
mod tests;
