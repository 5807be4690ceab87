// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Realtime wire messages.
//!
//! Everything on the wire is an envelope `{"type": <string>, "data": <object>}`,
//! modeled as tagged enums. Outbound is [`ServerMessage`]; inbound from
//! participants is [`ClientFrame`], of which only `pong` is currently
//! recognized — unknown frames fail to decode and are dropped.

use crate::phase::EventPhase;
use crate::question::QuestionView;
use serde::{Deserialize, Serialize};

/// A team as shown in `team_assignment` broadcasts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TeamView {
    pub name: String,
    pub members: Vec<MemberView>,
}

/// A member inside a [`TeamView`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MemberView {
    pub nickname: String,
}

/// One row of the individual leaderboard.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RankedUser {
    pub nickname: String,
    pub score: u32,
    pub rank: u32,
}

/// One row of the team leaderboard.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RankedTeam {
    pub name: String,
    pub score: u32,
    pub rank: u32,
}

/// Server-to-client broadcast catalog.
///
/// `question_start` carries `correct` and `total_questions` only on the
/// organizer slice; both are skipped for participants and the screen.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "data", rename_all = "snake_case")]
pub enum ServerMessage {
    InitialSync {
        state: EventPhase,
        current_question: u32,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        question: Option<QuestionView>,
    },
    StateChanged {
        new_state: EventPhase,
        current_question: u32,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        jumped: Option<bool>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        question: Option<QuestionView>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        question_number: Option<u32>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        total_questions: Option<u32>,
    },
    TitleDisplay {
        title: String,
    },
    TeamAssignment {
        teams: Vec<TeamView>,
    },
    QuestionStart {
        question_number: u32,
        question: QuestionView,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        correct: Option<u32>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        total_questions: Option<u32>,
    },
    Countdown {
        seconds_left: u32,
    },
    QuestionEnd {},
    AnswerStats {
        total_participants: u32,
        choices_counts: Vec<u32>,
    },
    AnswerReveal {
        correct: u32,
    },
    FinalResults {
        results: Vec<RankedUser>,
        teams: Vec<RankedTeam>,
        team_mode: bool,
    },
    Celebration {},
    UserJoined {
        nickname: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        teamname: Option<String>,
        score: u32,
    },
    UserLeft {
        nickname: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        team_id: Option<i64>,
    },
    AnswerReceived {
        nickname: String,
        answer: u32,
    },
    Emoji {
        emoji: String,
        nickname: String,
    },
    TeamMemberAdded {
        team_id: i64,
        nickname: String,
    },
    Ping {
        ping_id: u64,
    },
    PingResult {
        nickname: String,
        result: Option<u64>,
    },
}

impl ServerMessage {
    /// Wire encoding of the envelope.
    pub fn encode(&self) -> String {
        serde_json::to_string(self).unwrap_or_else(|_| String::from("{}"))
    }

    /// The envelope's `type` string.
    pub fn kind(&self) -> &'static str {
        match self {
            ServerMessage::InitialSync { .. } => "initial_sync",
            ServerMessage::StateChanged { .. } => "state_changed",
            ServerMessage::TitleDisplay { .. } => "title_display",
            ServerMessage::TeamAssignment { .. } => "team_assignment",
            ServerMessage::QuestionStart { .. } => "question_start",
            ServerMessage::Countdown { .. } => "countdown",
            ServerMessage::QuestionEnd {} => "question_end",
            ServerMessage::AnswerStats { .. } => "answer_stats",
            ServerMessage::AnswerReveal { .. } => "answer_reveal",
            ServerMessage::FinalResults { .. } => "final_results",
            ServerMessage::Celebration {} => "celebration",
            ServerMessage::UserJoined { .. } => "user_joined",
            ServerMessage::UserLeft { .. } => "user_left",
            ServerMessage::AnswerReceived { .. } => "answer_received",
            ServerMessage::Emoji { .. } => "emoji",
            ServerMessage::TeamMemberAdded { .. } => "team_member_added",
            ServerMessage::Ping { .. } => "ping",
            ServerMessage::PingResult { .. } => "ping_result",
        }
    }
}

/// Client-to-server frames over the realtime channel.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "data", rename_all = "snake_case")]
pub enum ClientFrame {
    Pong { ping_id: u64 },
}

impl ClientFrame {
    /// Decode an inbound frame; unknown or malformed frames become `None`.
    pub fn decode(text: &str) -> Option<Self> {
        serde_json::from_str(text).ok()
    }
}

#[cfg(test)]
#[path = "message_tests.rs"]
mod tests;
