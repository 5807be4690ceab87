// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! The closed set of operator actions.
//!
//! Each action corresponds to one outgoing edge of the state machine;
//! [`crate::StateMachine::available_actions`] derives the legal set for
//! the current phase instead of hand-maintaining a table.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A named action the organizer can dispatch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OperatorAction {
    StartEvent,
    ShowTitle,
    AssignTeams,
    NextQuestion,
    CountdownAlert,
    ShowAnswerStats,
    RevealAnswer,
    ShowResults,
    Celebration,
}

/// Every defined action, for allow-list validation.
pub const ALL_ACTIONS: &[OperatorAction] = &[
    OperatorAction::StartEvent,
    OperatorAction::ShowTitle,
    OperatorAction::AssignTeams,
    OperatorAction::NextQuestion,
    OperatorAction::CountdownAlert,
    OperatorAction::ShowAnswerStats,
    OperatorAction::RevealAnswer,
    OperatorAction::ShowResults,
    OperatorAction::Celebration,
];

impl OperatorAction {
    pub fn as_str(&self) -> &'static str {
        match self {
            OperatorAction::StartEvent => "start_event",
            OperatorAction::ShowTitle => "show_title",
            OperatorAction::AssignTeams => "assign_teams",
            OperatorAction::NextQuestion => "next_question",
            OperatorAction::CountdownAlert => "countdown_alert",
            OperatorAction::ShowAnswerStats => "show_answer_stats",
            OperatorAction::RevealAnswer => "reveal_answer",
            OperatorAction::ShowResults => "show_results",
            OperatorAction::Celebration => "celebration",
        }
    }
}

impl fmt::Display for OperatorAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OperatorAction {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ALL_ACTIONS
            .iter()
            .copied()
            .find(|a| a.as_str() == s)
            .ok_or(())
    }
}

#[cfg(test)]
#[path = "action_tests.rs"]
mod tests;
