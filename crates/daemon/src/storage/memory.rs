// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! In-process store implementing all repositories behind one lock.

use std::collections::BTreeMap;

use parking_lot::Mutex;
use quiz_core::{Answer, EventRecord, EventStatus, Reaction, Team, User};

use super::{AnswerRepo, EventRepo, ReactionRepo, StoreError, TeamRepo, UserRepo};

#[derive(Default)]
struct Inner {
    users: BTreeMap<i64, User>,
    next_user_id: i64,
    teams: BTreeMap<i64, Team>,
    next_team_id: i64,
    answers: BTreeMap<(i64, u32), Answer>,
    event: Option<EventRecord>,
    next_event_id: i64,
    reactions: Vec<Reaction>,
}

/// Shared in-memory store. Cheap to construct; tests make fresh ones.
#[derive(Default)]
pub struct MemoryStore {
    inner: Mutex<Inner>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl UserRepo for MemoryStore {
    fn create(&self, session_id: &str, nickname: &str, now_ms: u64) -> Result<User, StoreError> {
        let mut inner = self.inner.lock();
        if inner.users.values().any(|u| u.session_id == session_id) {
            return Err(StoreError::DuplicateSession(session_id.to_string()));
        }
        inner.next_user_id += 1;
        let user = User {
            id: inner.next_user_id,
            session_id: session_id.to_string(),
            nickname: nickname.to_string(),
            team_id: None,
            score: 0,
            connected: true,
            created_ms: now_ms,
            updated_ms: now_ms,
        };
        inner.users.insert(user.id, user.clone());
        Ok(user)
    }

    fn get(&self, id: i64) -> Result<Option<User>, StoreError> {
        Ok(self.inner.lock().users.get(&id).cloned())
    }

    fn find_by_session(&self, session_id: &str) -> Result<Option<User>, StoreError> {
        Ok(self
            .inner
            .lock()
            .users
            .values()
            .find(|u| u.session_id == session_id)
            .cloned())
    }

    fn list(&self) -> Result<Vec<User>, StoreError> {
        Ok(self.inner.lock().users.values().cloned().collect())
    }

    fn count(&self) -> Result<u32, StoreError> {
        Ok(self.inner.lock().users.len() as u32)
    }

    fn set_connected(&self, id: i64, connected: bool, now_ms: u64) -> Result<(), StoreError> {
        let mut inner = self.inner.lock();
        let user = inner
            .users
            .get_mut(&id)
            .ok_or(StoreError::Missing { entity: "user", id })?;
        user.connected = connected;
        user.updated_ms = now_ms;
        Ok(())
    }

    fn set_team(&self, id: i64, team_id: Option<i64>, now_ms: u64) -> Result<(), StoreError> {
        let mut inner = self.inner.lock();
        let user = inner
            .users
            .get_mut(&id)
            .ok_or(StoreError::Missing { entity: "user", id })?;
        user.team_id = team_id;
        user.updated_ms = now_ms;
        Ok(())
    }

    fn set_score(&self, id: i64, score: u32, now_ms: u64) -> Result<(), StoreError> {
        let mut inner = self.inner.lock();
        let user = inner
            .users
            .get_mut(&id)
            .ok_or(StoreError::Missing { entity: "user", id })?;
        user.score = score;
        user.updated_ms = now_ms;
        Ok(())
    }

    fn clear_teams(&self, now_ms: u64) -> Result<(), StoreError> {
        let mut inner = self.inner.lock();
        for user in inner.users.values_mut() {
            user.team_id = None;
            user.updated_ms = now_ms;
        }
        Ok(())
    }

    fn delete(&self, id: i64) -> Result<User, StoreError> {
        self.inner
            .lock()
            .users
            .remove(&id)
            .ok_or(StoreError::Missing { entity: "user", id })
    }
}

impl TeamRepo for MemoryStore {
    fn create(&self, name: &str) -> Result<Team, StoreError> {
        let mut inner = self.inner.lock();
        inner.next_team_id += 1;
        let team = Team {
            id: inner.next_team_id,
            name: name.to_string(),
            score: 0,
        };
        inner.teams.insert(team.id, team.clone());
        Ok(team)
    }

    fn get(&self, id: i64) -> Result<Option<Team>, StoreError> {
        Ok(self.inner.lock().teams.get(&id).cloned())
    }

    fn list(&self) -> Result<Vec<Team>, StoreError> {
        Ok(self.inner.lock().teams.values().cloned().collect())
    }

    fn set_score(&self, id: i64, score: u32) -> Result<(), StoreError> {
        let mut inner = self.inner.lock();
        let team = inner
            .teams
            .get_mut(&id)
            .ok_or(StoreError::Missing { entity: "team", id })?;
        team.score = score;
        Ok(())
    }

    fn delete_all(&self) -> Result<(), StoreError> {
        self.inner.lock().teams.clear();
        Ok(())
    }
}

impl AnswerRepo for MemoryStore {
    fn upsert(&self, answer: Answer) -> Result<(), StoreError> {
        self.inner
            .lock()
            .answers
            .insert((answer.user_id, answer.question_number), answer);
        Ok(())
    }

    fn get(&self, user_id: i64, question_number: u32) -> Result<Option<Answer>, StoreError> {
        Ok(self
            .inner
            .lock()
            .answers
            .get(&(user_id, question_number))
            .cloned())
    }

    fn list(&self) -> Result<Vec<Answer>, StoreError> {
        Ok(self.inner.lock().answers.values().cloned().collect())
    }

    fn for_user(&self, user_id: i64) -> Result<Vec<Answer>, StoreError> {
        Ok(self
            .inner
            .lock()
            .answers
            .values()
            .filter(|a| a.user_id == user_id)
            .cloned()
            .collect())
    }

    fn for_question(&self, question_number: u32) -> Result<Vec<Answer>, StoreError> {
        Ok(self
            .inner
            .lock()
            .answers
            .values()
            .filter(|a| a.question_number == question_number)
            .cloned()
            .collect())
    }

    fn delete_for_user(&self, user_id: i64) -> Result<(), StoreError> {
        self.inner.lock().answers.retain(|_, a| a.user_id != user_id);
        Ok(())
    }

    fn count(&self) -> Result<u32, StoreError> {
        Ok(self.inner.lock().answers.len() as u32)
    }
}

impl EventRepo for MemoryStore {
    fn put_current(&self, mut event: EventRecord) -> Result<EventRecord, StoreError> {
        let mut inner = self.inner.lock();
        inner.next_event_id += 1;
        event.id = inner.next_event_id;
        inner.event = Some(event.clone());
        Ok(event)
    }

    fn current(&self) -> Result<Option<EventRecord>, StoreError> {
        Ok(self.inner.lock().event.clone())
    }

    fn set_status(&self, status: EventStatus, now_ms: u64) -> Result<(), StoreError> {
        let mut inner = self.inner.lock();
        let event = inner.event.as_mut().ok_or(StoreError::NoCurrentEvent)?;
        event.status = status;
        event.updated_ms = now_ms;
        Ok(())
    }

    fn set_question_number(&self, n: u32, now_ms: u64) -> Result<(), StoreError> {
        let mut inner = self.inner.lock();
        let event = inner.event.as_mut().ok_or(StoreError::NoCurrentEvent)?;
        event.question_number = n;
        event.updated_ms = now_ms;
        Ok(())
    }
}

impl ReactionRepo for MemoryStore {
    fn append(&self, reaction: Reaction) -> Result<(), StoreError> {
        self.inner.lock().reactions.push(reaction);
        Ok(())
    }

    fn delete_for_user(&self, user_id: i64) -> Result<(), StoreError> {
        self.inner.lock().reactions.retain(|r| r.user_id != user_id);
        Ok(())
    }

    fn count(&self) -> Result<u32, StoreError> {
        Ok(self.inner.lock().reactions.len() as u32)
    }
}

#[cfg(test)]
#[path = "memory_tests.rs"]
mod tests;
