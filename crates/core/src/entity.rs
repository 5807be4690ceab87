// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Persisted entities: the event, participants, teams, answers, reactions.
//!
//! Users reference their team only by `team_id`; team membership is
//! materialized on read, so there is no object graph to keep in sync.

use serde::{Deserialize, Serialize};

/// Lifecycle status of the (single) current event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventStatus {
    Waiting,
    Started,
    Finished,
}

/// The one current quiz event in the process.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EventRecord {
    pub id: i64,
    pub title: String,
    pub status: EventStatus,
    /// 0 = no question started yet.
    pub question_number: u32,
    pub team_mode: bool,
    pub team_size: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub qrcode: Option<String>,
    pub created_ms: u64,
    pub updated_ms: u64,
}

/// A participant on a personal device.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: i64,
    /// Opaque, client-persisted session handle.
    pub session_id: String,
    pub nickname: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub team_id: Option<i64>,
    pub score: u32,
    pub connected: bool,
    pub created_ms: u64,
    pub updated_ms: u64,
}

/// A team of participants; members are derived from `User.team_id`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Team {
    pub id: i64,
    pub name: String,
    pub score: u32,
}

/// One participant's answer to one question.
///
/// Unique per `(user_id, question_number)`; a re-submission while the
/// window is open replaces this record. `answer_index` is 1-based, the
/// same convention as the wire.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Answer {
    pub user_id: i64,
    pub question_number: u32,
    pub answer_index: u32,
    pub is_correct: bool,
    pub answered_ms: u64,
}

/// An append-only emoji reaction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Reaction {
    pub user_id: i64,
    pub emoji: String,
    pub created_ms: u64,
}
