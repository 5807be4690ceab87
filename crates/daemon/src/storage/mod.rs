// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Repositories for persisted entities.
//!
//! Persistence is modeled as per-entity trait interfaces so the service
//! layer never sees a concrete store. [`MemoryStore`] is the in-process
//! implementation backing a single event; all five repositories share
//! one lock and every operation completes without I/O.

mod memory;

pub use memory::MemoryStore;

use quiz_core::{Answer, EventRecord, EventStatus, Reaction, Team, User};
use thiserror::Error;

/// Failures from the underlying store.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    #[error("{entity} {id} not found")]
    Missing { entity: &'static str, id: i64 },

    #[error("no current event")]
    NoCurrentEvent,

    #[error("session {0} already joined")]
    DuplicateSession(String),
}

/// Participant persistence.
pub trait UserRepo: Send + Sync {
    /// Create a user with a fresh id. Fails on a duplicate session id.
    fn create(&self, session_id: &str, nickname: &str, now_ms: u64) -> Result<User, StoreError>;
    fn get(&self, id: i64) -> Result<Option<User>, StoreError>;
    fn find_by_session(&self, session_id: &str) -> Result<Option<User>, StoreError>;
    /// All users, ascending id (insertion order).
    fn list(&self) -> Result<Vec<User>, StoreError>;
    fn count(&self) -> Result<u32, StoreError>;
    fn set_connected(&self, id: i64, connected: bool, now_ms: u64) -> Result<(), StoreError>;
    fn set_team(&self, id: i64, team_id: Option<i64>, now_ms: u64) -> Result<(), StoreError>;
    fn set_score(&self, id: i64, score: u32, now_ms: u64) -> Result<(), StoreError>;
    /// Disassociate every user from their team (full team rebuild).
    fn clear_teams(&self, now_ms: u64) -> Result<(), StoreError>;
    /// Hard delete; the caller cascades answers and reactions first.
    fn delete(&self, id: i64) -> Result<User, StoreError>;
}

/// Team persistence. Teams are rebuilt wholesale, so there is no update.
pub trait TeamRepo: Send + Sync {
    fn create(&self, name: &str) -> Result<Team, StoreError>;
    fn get(&self, id: i64) -> Result<Option<Team>, StoreError>;
    fn list(&self) -> Result<Vec<Team>, StoreError>;
    fn set_score(&self, id: i64, score: u32) -> Result<(), StoreError>;
    fn delete_all(&self) -> Result<(), StoreError>;
}

/// Answer persistence, unique per `(user_id, question_number)`.
pub trait AnswerRepo: Send + Sync {
    /// Insert or replace; replaying an identical answer is a no-op.
    fn upsert(&self, answer: Answer) -> Result<(), StoreError>;
    fn get(&self, user_id: i64, question_number: u32) -> Result<Option<Answer>, StoreError>;
    /// The whole answer log (scores are recomputed from it at read time).
    fn list(&self) -> Result<Vec<Answer>, StoreError>;
    fn for_user(&self, user_id: i64) -> Result<Vec<Answer>, StoreError>;
    fn for_question(&self, question_number: u32) -> Result<Vec<Answer>, StoreError>;
    fn delete_for_user(&self, user_id: i64) -> Result<(), StoreError>;
    fn count(&self) -> Result<u32, StoreError>;
}

/// The single current event.
pub trait EventRepo: Send + Sync {
    /// Replace the current event; the store assigns the id.
    fn put_current(&self, event: EventRecord) -> Result<EventRecord, StoreError>;
    fn current(&self) -> Result<Option<EventRecord>, StoreError>;
    fn set_status(&self, status: EventStatus, now_ms: u64) -> Result<(), StoreError>;
    fn set_question_number(&self, n: u32, now_ms: u64) -> Result<(), StoreError>;
}

/// Append-only emoji reactions.
pub trait ReactionRepo: Send + Sync {
    fn append(&self, reaction: Reaction) -> Result<(), StoreError>;
    fn delete_for_user(&self, user_id: i64) -> Result<(), StoreError>;
    fn count(&self) -> Result<u32, StoreError>;
}
