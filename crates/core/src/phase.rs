// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Event phases: the discrete modes a running quiz moves through.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A discrete mode of the event, from lobby to wrap-up.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventPhase {
    Waiting,
    Started,
    TitleDisplay,
    TeamAssignment,
    QuestionActive,
    CountdownActive,
    AnswerStats,
    AnswerReveal,
    Results,
    Celebration,
    Finished,
}

/// All defined phases, in narrative order.
pub const ALL_PHASES: &[EventPhase] = &[
    EventPhase::Waiting,
    EventPhase::Started,
    EventPhase::TitleDisplay,
    EventPhase::TeamAssignment,
    EventPhase::QuestionActive,
    EventPhase::CountdownActive,
    EventPhase::AnswerStats,
    EventPhase::AnswerReveal,
    EventPhase::Results,
    EventPhase::Celebration,
    EventPhase::Finished,
];

impl EventPhase {
    /// Wire / config name of this phase.
    pub fn as_str(&self) -> &'static str {
        match self {
            EventPhase::Waiting => "waiting",
            EventPhase::Started => "started",
            EventPhase::TitleDisplay => "title_display",
            EventPhase::TeamAssignment => "team_assignment",
            EventPhase::QuestionActive => "question_active",
            EventPhase::CountdownActive => "countdown_active",
            EventPhase::AnswerStats => "answer_stats",
            EventPhase::AnswerReveal => "answer_reveal",
            EventPhase::Results => "results",
            EventPhase::Celebration => "celebration",
            EventPhase::Finished => "finished",
        }
    }

    /// Human-readable label for operator UIs.
    pub fn label(&self) -> &'static str {
        match self {
            EventPhase::Waiting => "Waiting",
            EventPhase::Started => "Started",
            EventPhase::TitleDisplay => "Title display",
            EventPhase::TeamAssignment => "Team assignment",
            EventPhase::QuestionActive => "Question active",
            EventPhase::CountdownActive => "Countdown",
            EventPhase::AnswerStats => "Answer stats",
            EventPhase::AnswerReveal => "Answer reveal",
            EventPhase::Results => "Results",
            EventPhase::Celebration => "Celebration",
            EventPhase::Finished => "Finished",
        }
    }

    /// Phases that only make sense with a current question in `[1, N]`.
    pub fn is_question_bound(&self) -> bool {
        matches!(
            self,
            EventPhase::QuestionActive
                | EventPhase::CountdownActive
                | EventPhase::AnswerStats
                | EventPhase::AnswerReveal
        )
    }

    /// The answer window: submissions are accepted only here.
    pub fn accepts_answers(&self) -> bool {
        matches!(self, EventPhase::QuestionActive | EventPhase::CountdownActive)
    }
}

impl fmt::Display for EventPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EventPhase {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ALL_PHASES
            .iter()
            .copied()
            .find(|p| p.as_str() == s)
            .ok_or(())
    }
}

#[cfg(test)]
#[path = "phase_tests.rs"]
mod tests;
