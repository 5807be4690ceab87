// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! The state service: each operator action is a short saga that
//! validates the transition against the machine, persists side effects,
//! and broadcasts through the hub — in that order. If persistence
//! fails, the machine transition is rolled back and nothing is sent.
//! Broadcast delivery is the hub's best-effort problem, not ours.

pub mod results;

use std::sync::Arc;
use std::time::Duration;

use parking_lot::Mutex;
use quiz_core::{
    Answer, Clock, EventPhase, EventRecord, EventStatus, MemberView, NextOutcome, OperatorAction,
    QuestionSet, Reaction, ServerMessage, StateMachine, TeamView, TransitionError, User,
};
use quiz_core::{validate, phase::ALL_PHASES};
use serde::Serialize;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use crate::error::ApiError;
use crate::hub::{Hub, RoleCounts};
use crate::storage::{
    AnswerRepo, EventRepo, ReactionRepo, StoreError, TeamRepo, UserRepo,
};
use crate::teams::{Placement, TeamAssigner};

/// Seconds of countdown before a question closes.
const COUNTDOWN_SECONDS: u32 = 5;

/// Delay before celebration auto-advances to finished.
const CELEBRATION_HOLD: Duration = Duration::from_secs(5);

/// Nickname sentinel a client sends when it believes it has a session
/// but lost the id; without a resolvable session this is an expired one.
const REJOINING_SENTINEL: &str = "Rejoining...";

/// Repositories and singletons the service composes.
pub struct ServiceDeps {
    pub hub: Hub,
    pub users: Arc<dyn UserRepo>,
    pub teams: Arc<dyn TeamRepo>,
    pub answers: Arc<dyn AnswerRepo>,
    pub events: Arc<dyn EventRepo>,
    pub reactions: Arc<dyn ReactionRepo>,
    pub questions: Arc<QuestionSet>,
    pub clock: Arc<dyn Clock>,
}

/// Event-level settings from config.
#[derive(Debug, Clone)]
pub struct ServiceConfig {
    pub title: String,
    pub team_mode: bool,
    pub team_size: u32,
    pub qrcode: Option<String>,
    pub avoid_groups: Vec<String>,
    pub team_names: Vec<String>,
}

/// Result of a dispatched operator action.
#[derive(Debug, Clone, Serialize)]
pub struct ActionOutcome {
    pub message: String,
    pub state: EventPhase,
}

/// Result of a debug state jump.
#[derive(Debug, Clone, Serialize)]
pub struct JumpOutcome {
    pub message: String,
    pub new_state: EventPhase,
    pub current_question: u32,
}

/// Response body for a successful join.
#[derive(Debug, Clone, Serialize)]
pub struct JoinOutcome {
    pub user: User,
    pub session_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub assigned_team: Option<String>,
}

/// Public status snapshot.
#[derive(Debug, Clone, Serialize)]
pub struct StatusView {
    pub state: EventPhase,
    pub current_question: u32,
    pub total_questions: u32,
    pub participant_count: u32,
}

/// Organizer introspection snapshot.
#[derive(Debug, Clone, Serialize)]
pub struct DebugView {
    pub state: EventPhase,
    pub current_question: u32,
    pub total_questions: u32,
    pub consistent: bool,
    pub connections: RoleCounts,
    pub users: u32,
    pub answers: u32,
    pub reactions: u32,
    pub event: Option<EventRecord>,
}

/// One team with materialized members, for the organizer's team view.
#[derive(Debug, Clone, Serialize)]
pub struct TeamDetail {
    pub id: i64,
    pub name: String,
    pub score: u32,
    pub members: Vec<String>,
}

/// The orchestrator over machine, repositories, and hub.
pub struct StateService {
    machine: Arc<Mutex<StateMachine>>,
    hub: Hub,
    users: Arc<dyn UserRepo>,
    teams: Arc<dyn TeamRepo>,
    answers: Arc<dyn AnswerRepo>,
    events: Arc<dyn EventRepo>,
    reactions: Arc<dyn ReactionRepo>,
    questions: Arc<QuestionSet>,
    assigner: TeamAssigner,
    cfg: ServiceConfig,
    clock: Arc<dyn Clock>,
    /// Cancellation for the countdown / celebration auto-transition task.
    auto_task: Mutex<Option<CancellationToken>>,
    shutdown: CancellationToken,
}

impl StateService {
    pub fn new(deps: ServiceDeps, cfg: ServiceConfig, shutdown: CancellationToken) -> Self {
        let machine = StateMachine::new(deps.questions.len(), cfg.team_mode);
        let assigner = TeamAssigner::new(
            cfg.team_size,
            cfg.avoid_groups.clone(),
            cfg.team_names.clone(),
        );
        Self {
            machine: Arc::new(Mutex::new(machine)),
            hub: deps.hub,
            users: deps.users,
            teams: deps.teams,
            answers: deps.answers,
            events: deps.events,
            reactions: deps.reactions,
            questions: deps.questions,
            assigner,
            cfg,
            clock: deps.clock,
            auto_task: Mutex::new(None),
            shutdown,
        }
    }

    // ---- organizer actions ----

    /// Dispatch one operator action to its saga.
    pub async fn dispatch(&self, action: OperatorAction) -> Result<ActionOutcome, ApiError> {
        info!(action = %action, "operator action");
        match action {
            OperatorAction::StartEvent => self.start_event().await,
            OperatorAction::ShowTitle => self.show_title().await,
            OperatorAction::AssignTeams => self.assign_teams().await,
            OperatorAction::NextQuestion => self.next_question().await,
            OperatorAction::CountdownAlert => self.countdown_alert().await,
            OperatorAction::ShowAnswerStats => self.show_answer_stats().await,
            OperatorAction::RevealAnswer => self.reveal_answer().await,
            OperatorAction::ShowResults => self.show_results().await,
            OperatorAction::Celebration => self.celebration().await,
        }
    }

    /// Legal actions plus position, for the organizer console.
    pub fn available_actions(&self) -> (Vec<OperatorAction>, EventPhase, u32) {
        let machine = self.machine.lock();
        (
            machine.available_actions(),
            machine.phase(),
            machine.current_question(),
        )
    }

    /// Operator escape hatch: move the machine anywhere defined.
    pub async fn jump_state(
        &self,
        state: &str,
        question_number: Option<u32>,
    ) -> Result<JumpOutcome, ApiError> {
        let phase: EventPhase = state
            .parse()
            .map_err(|_| validate::ValidationError::UnknownState(state.to_string()))?;
        self.cancel_auto();

        let current_question = {
            let mut machine = self.machine.lock();
            let prev_question = machine.current_question();
            if let Some(n) = question_number {
                machine.set_current_question(n)?;
            }
            if let Err(err) = machine.jump_to(phase) {
                // a failed jump leaves the phase untouched; put the
                // question pointer back where it was
                let unchanged = machine.phase();
                machine.restore(unchanged, prev_question);
                return Err(err.into());
            }
            machine.current_question()
        };
        info!(state = %phase, question = current_question, "state jump");

        let now = self.clock.epoch_ms();
        if question_number.is_some() {
            self.persist_tolerating_no_event(self.events.set_question_number(current_question, now))?;
        }
        match phase {
            EventPhase::Finished => {
                self.persist_tolerating_no_event(self.events.set_status(EventStatus::Finished, now))?
            }
            EventPhase::Waiting => {
                self.persist_tolerating_no_event(self.events.set_status(EventStatus::Waiting, now))?
            }
            _ => {}
        }

        let question = if phase.is_question_bound() {
            self.questions.get(current_question).map(|q| q.view())
        } else {
            None
        };
        self.hub
            .broadcast(ServerMessage::StateChanged {
                new_state: phase,
                current_question,
                jumped: Some(true),
                question_number: question.is_some().then_some(current_question),
                question,
                total_questions: Some(self.questions.len()),
            })
            .await;

        Ok(JumpOutcome {
            message: format!("jumped to {phase}"),
            new_state: phase,
            current_question,
        })
    }

    async fn start_event(&self) -> Result<ActionOutcome, ApiError> {
        let prev = self.transition(EventPhase::Started)?;
        let now = self.clock.epoch_ms();
        let record = EventRecord {
            id: 0,
            title: self.cfg.title.clone(),
            status: EventStatus::Started,
            question_number: 0,
            team_mode: self.cfg.team_mode,
            team_size: self.cfg.team_size,
            qrcode: self.cfg.qrcode.clone(),
            created_ms: now,
            updated_ms: now,
        };
        if let Err(err) = self.events.put_current(record) {
            self.restore(prev);
            return Err(err.into());
        }
        self.hub.state_changed(EventPhase::Started, 0).await;
        Ok(self.outcome("event started"))
    }

    async fn show_title(&self) -> Result<ActionOutcome, ApiError> {
        self.transition(EventPhase::TitleDisplay)?;
        self.hub.title_display(&self.cfg.title).await;
        Ok(self.outcome("title displayed"))
    }

    /// Full team rebuild: teams are deleted and rebuilt wholesale.
    async fn assign_teams(&self) -> Result<ActionOutcome, ApiError> {
        let prev = self.transition(EventPhase::TeamAssignment)?;
        let now = self.clock.epoch_ms();
        let mut views: Vec<TeamView> = Vec::new();
        let persisted: Result<(), StoreError> = (|| {
            let users = self.users.list()?;
            let drafts = self.assigner.rebuild(&users, now);
            self.teams.delete_all()?;
            self.users.clear_teams(now)?;
            for draft in &drafts {
                let team = self.teams.create(&draft.name)?;
                let mut members = Vec::new();
                for id in &draft.member_ids {
                    self.users.set_team(*id, Some(team.id), now)?;
                    if let Some(user) = users.iter().find(|u| u.id == *id) {
                        members.push(MemberView {
                            nickname: user.nickname.clone(),
                        });
                    }
                }
                views.push(TeamView {
                    name: team.name,
                    members,
                });
            }
            Ok(())
        })();
        if let Err(err) = persisted {
            self.restore(prev);
            return Err(err.into());
        }
        self.hub.team_assignment(views).await;
        Ok(self.outcome("teams assigned"))
    }

    async fn next_question(&self) -> Result<ActionOutcome, ApiError> {
        let (prev, outcome) = {
            let mut machine = self.machine.lock();
            let prev = (machine.phase(), machine.current_question());
            let outcome = machine.next_question()?;
            (prev, outcome)
        };
        match outcome {
            NextOutcome::Question(n) => {
                let now = self.clock.epoch_ms();
                if let Err(err) = self
                    .persist_tolerating_no_event(self.events.set_question_number(n, now))
                {
                    self.restore(prev);
                    return Err(err);
                }
                let Some(question) = self.questions.get(n) else {
                    self.restore(prev);
                    return Err(ApiError::NotFound("question"));
                };
                self.hub
                    .question_start(n, question.view(), question.correct, self.questions.len())
                    .await;
                Ok(self.outcome(&format!("question {n} started")))
            }
            NextOutcome::Results => self.publish_results(prev).await,
        }
    }

    async fn countdown_alert(&self) -> Result<ActionOutcome, ApiError> {
        self.transition(EventPhase::CountdownActive)?;
        self.spawn_countdown();
        Ok(self.outcome("countdown started"))
    }

    /// Stats may be requested from `countdown_active` (manual path) or
    /// after the countdown auto-transition already parked the machine
    /// in `answer_stats`; only the first case transitions.
    async fn show_answer_stats(&self) -> Result<ActionOutcome, ApiError> {
        let (prev, question_number) = {
            let mut machine = self.machine.lock();
            let prev = (machine.phase(), machine.current_question());
            match machine.phase() {
                EventPhase::CountdownActive => {
                    machine.transition_to(EventPhase::AnswerStats)?;
                }
                EventPhase::AnswerStats => {}
                from => {
                    return Err(TransitionError::InvalidTransition {
                        from,
                        to: EventPhase::AnswerStats,
                    }
                    .into())
                }
            }
            (prev, machine.current_question())
        };
        self.cancel_auto();

        let question = self
            .questions
            .get(question_number)
            .ok_or(ApiError::NotFound("question"))?;
        let gathered: Result<(u32, Vec<u32>), StoreError> = (|| {
            let total = self.users.count()?;
            let answers = self.answers.for_question(question_number)?;
            Ok((total, results::choice_counts(&answers, question.choices.len())))
        })();
        let (total_participants, counts) = match gathered {
            Ok(data) => data,
            Err(err) => {
                self.restore(prev);
                return Err(err.into());
            }
        };
        self.hub.answer_stats(total_participants, counts).await;
        Ok(self.outcome("answer stats shown"))
    }

    async fn reveal_answer(&self) -> Result<ActionOutcome, ApiError> {
        self.transition(EventPhase::AnswerReveal)?;
        let question_number = self.machine.lock().current_question();
        let question = self
            .questions
            .get(question_number)
            .ok_or(ApiError::NotFound("question"))?;
        self.hub.answer_reveal(question.correct).await;
        Ok(self.outcome("answer revealed"))
    }

    async fn show_results(&self) -> Result<ActionOutcome, ApiError> {
        let prev = self.transition(EventPhase::Results)?;
        self.publish_results(prev).await
    }

    async fn celebration(&self) -> Result<ActionOutcome, ApiError> {
        self.transition(EventPhase::Celebration)?;
        self.hub.celebration().await;
        self.spawn_finish();
        Ok(self.outcome("celebration"))
    }

    /// Recompute scores from the answer log, persist, and publish.
    async fn publish_results(
        &self,
        prev: (EventPhase, u32),
    ) -> Result<ActionOutcome, ApiError> {
        let now = self.clock.epoch_ms();
        let gathered: Result<results::Standings, StoreError> = (|| {
            let users = self.users.list()?;
            let teams = self.teams.list()?;
            let answers = self.answers.list()?;
            let standings = results::standings(&users, &teams, &answers, &self.questions);
            for (id, score) in &standings.user_scores {
                self.users.set_score(*id, *score, now)?;
            }
            for (id, score) in &standings.team_scores {
                self.teams.set_score(*id, *score)?;
            }
            Ok(standings)
        })();
        let standings = match gathered {
            Ok(standings) => standings,
            Err(err) => {
                self.restore(prev);
                return Err(err.into());
            }
        };
        self.hub
            .final_results(standings.results, standings.teams, self.cfg.team_mode)
            .await;
        Ok(self.outcome("results published"))
    }

    // ---- participant operations ----

    /// Join or rejoin. An existing session reconnects; the rejoin
    /// sentinel without one is an expired session; anything else is a
    /// fresh participant, placed into a team when teams already exist.
    pub async fn join(
        &self,
        nickname_raw: &str,
        session: Option<&str>,
    ) -> Result<JoinOutcome, ApiError> {
        let now = self.clock.epoch_ms();
        if let Some(session_id) = session {
            validate::session_id(session_id)?;
            if let Some(user) = self.users.find_by_session(session_id)? {
                self.users.set_connected(user.id, true, now)?;
                let assigned_team = match user.team_id {
                    Some(team_id) => self.teams.get(team_id)?.map(|t| t.name),
                    None => None,
                };
                debug!(user = %user.nickname, "participant reconnected");
                return Ok(JoinOutcome {
                    session_id: user.session_id.clone(),
                    user: User {
                        connected: true,
                        ..user
                    },
                    assigned_team,
                });
            }
        }
        if nickname_raw == REJOINING_SENTINEL {
            return Err(ApiError::SessionExpired);
        }

        let nickname = validate::nickname(nickname_raw)?;
        let session_id = session
            .map(str::to_string)
            .unwrap_or_else(|| uuid::Uuid::new_v4().to_string());
        let mut user = self.users.create(&session_id, &nickname, now)?;

        let mut assigned: Option<(i64, String)> = None;
        if self.cfg.team_mode {
            let teams = self.teams_with_members()?;
            match self.assigner.place_late_joiner(&nickname, &teams) {
                Placement::Existing(team_id) => {
                    self.users.set_team(user.id, Some(team_id), now)?;
                    if let Some(team) = self.teams.get(team_id)? {
                        assigned = Some((team.id, team.name));
                    }
                }
                Placement::NewTeam(name) => {
                    let team = self.teams.create(&name)?;
                    self.users.set_team(user.id, Some(team.id), now)?;
                    assigned = Some((team.id, team.name));
                }
                Placement::NoTeams => {}
            }
        }
        if let Some((team_id, _)) = &assigned {
            user.team_id = Some(*team_id);
        }

        info!(user = %nickname, team = ?assigned, "participant joined");
        self.hub
            .user_joined(&nickname, assigned.as_ref().map(|(_, name)| name.clone()), 0)
            .await;
        if let Some((team_id, _)) = &assigned {
            self.hub.team_member_added(*team_id, &nickname).await;
        }
        Ok(JoinOutcome {
            user,
            session_id,
            assigned_team: assigned.map(|(_, name)| name),
        })
    }

    /// Accept an answer while the window is open; a re-submission
    /// replaces the earlier record.
    pub async fn submit_answer(
        &self,
        session: &str,
        question_number: u32,
        answer_index: u32,
    ) -> Result<(), ApiError> {
        let user = self
            .users
            .find_by_session(session)?
            .ok_or(ApiError::SessionExpired)?;
        validate::answer(question_number, answer_index, &self.questions).into_result()?;
        if !self.machine.lock().accepts_answer(question_number) {
            return Err(ApiError::NotAcceptingAnswers);
        }
        let question = self
            .questions
            .get(question_number)
            .ok_or(ApiError::NotFound("question"))?;
        // replaying the identical answer is a no-op write
        let existing = self.answers.get(user.id, question_number)?;
        if existing.map(|a| a.answer_index) != Some(answer_index) {
            self.answers.upsert(Answer {
                user_id: user.id,
                question_number,
                answer_index,
                is_correct: question.is_correct(answer_index),
                answered_ms: self.clock.epoch_ms(),
            })?;
        }
        self.hub.answer_received(&user.nickname, answer_index).await;
        Ok(())
    }

    /// Record a reaction and relay it to the organizer and screen.
    pub async fn send_emoji(&self, session: &str, emoji: &str) -> Result<(), ApiError> {
        let user = self
            .users
            .find_by_session(session)?
            .ok_or(ApiError::SessionExpired)?;
        validate::emoji(emoji)?;
        self.reactions.append(Reaction {
            user_id: user.id,
            emoji: emoji.to_string(),
            created_ms: self.clock.epoch_ms(),
        })?;
        self.hub.emoji(emoji, &user.nickname).await;
        Ok(())
    }

    /// Self-reset: delete the user and everything they produced.
    pub async fn reset_session(&self, session: &str) -> Result<(), ApiError> {
        let user = self
            .users
            .find_by_session(session)?
            .ok_or(ApiError::SessionExpired)?;
        self.answers.delete_for_user(user.id)?;
        self.reactions.delete_for_user(user.id)?;
        let user = self.users.delete(user.id)?;
        info!(user = %user.nickname, "participant reset");
        self.hub.user_left(&user.nickname, user.team_id).await;
        Ok(())
    }

    /// Flip the connected flag as realtime connections come and go.
    pub fn set_connected(&self, user_id: i64, connected: bool) {
        let now = self.clock.epoch_ms();
        if let Err(err) = self.users.set_connected(user_id, connected, now) {
            debug!(user_id, "connected flag not updated: {err}");
        }
    }

    // ---- snapshots ----

    /// The `initial_sync` frame for a freshly registered connection.
    pub fn snapshot_message(&self) -> ServerMessage {
        let (phase, current_question) = {
            let machine = self.machine.lock();
            (machine.phase(), machine.current_question())
        };
        let question = if phase.is_question_bound() {
            self.questions.get(current_question).map(|q| q.view())
        } else {
            None
        };
        ServerMessage::InitialSync {
            state: phase,
            current_question,
            question,
        }
    }

    /// Resolve a session to its user, for realtime connection setup.
    pub fn resolve_session(&self, session: &str) -> Result<User, ApiError> {
        self.users
            .find_by_session(session)?
            .ok_or(ApiError::SessionExpired)
    }

    pub fn status(&self) -> Result<StatusView, ApiError> {
        let machine = self.machine.lock();
        Ok(StatusView {
            state: machine.phase(),
            current_question: machine.current_question(),
            total_questions: machine.total_questions(),
            participant_count: self.users.count()?,
        })
    }

    pub async fn debug_view(&self) -> Result<DebugView, ApiError> {
        let (phase, current_question, total, consistent) = {
            let machine = self.machine.lock();
            (
                machine.phase(),
                machine.current_question(),
                machine.total_questions(),
                validate::machine_consistency(&machine).valid(),
            )
        };
        Ok(DebugView {
            state: phase,
            current_question,
            total_questions: total,
            consistent,
            connections: self.hub.counts().await,
            users: self.users.count()?,
            answers: self.answers.count()?,
            reactions: self.reactions.count()?,
            event: self.events.current()?,
        })
    }

    /// Teams with materialized members and read-time scores.
    pub fn team_details(&self) -> Result<Vec<TeamDetail>, ApiError> {
        let answers = self.answers.list()?;
        let teams = self.teams_with_members()?;
        Ok(teams
            .into_iter()
            .map(|(team, members)| TeamDetail {
                id: team.id,
                name: team.name,
                score: members
                    .iter()
                    .map(|m| results::score_of(m.id, &answers, &self.questions))
                    .sum(),
                members: members.into_iter().map(|m| m.nickname).collect(),
            })
            .collect())
    }

    /// `{value, label}` pairs for the jump-state picker.
    pub fn available_states(&self) -> (Vec<(&'static str, &'static str)>, EventPhase) {
        let phase = self.machine.lock().phase();
        (
            ALL_PHASES.iter().map(|p| (p.as_str(), p.label())).collect(),
            phase,
        )
    }

    /// Cancel any countdown / celebration auto-transition in flight.
    pub fn cancel_auto(&self) {
        if let Some(token) = self.auto_task.lock().take() {
            token.cancel();
        }
    }

    // ---- internals ----

    fn outcome(&self, message: &str) -> ActionOutcome {
        ActionOutcome {
            message: message.to_string(),
            state: self.machine.lock().phase(),
        }
    }

    fn transition(&self, to: EventPhase) -> Result<(EventPhase, u32), ApiError> {
        let mut machine = self.machine.lock();
        let prev = (machine.phase(), machine.current_question());
        machine.transition_to(to)?;
        Ok(prev)
    }

    fn restore(&self, prev: (EventPhase, u32)) {
        self.machine.lock().restore(prev.0, prev.1);
    }

    /// Event-record writes are skipped when no event exists yet (e.g.
    /// the operator jumped into the question flow before `start_event`).
    fn persist_tolerating_no_event(&self, result: Result<(), StoreError>) -> Result<(), ApiError> {
        match result {
            Ok(()) | Err(StoreError::NoCurrentEvent) => Ok(()),
            Err(err) => Err(err.into()),
        }
    }

    fn teams_with_members(
        &self,
    ) -> Result<Vec<(quiz_core::Team, Vec<User>)>, StoreError> {
        let teams = self.teams.list()?;
        let users = self.users.list()?;
        Ok(teams
            .into_iter()
            .map(|team| {
                let members: Vec<User> = users
                    .iter()
                    .filter(|u| u.team_id == Some(team.id))
                    .cloned()
                    .collect();
                (team, members)
            })
            .collect())
    }

    fn replace_auto_task(&self) -> CancellationToken {
        let token = self.shutdown.child_token();
        if let Some(old) = self.auto_task.lock().replace(token.clone()) {
            old.cancel();
        }
        token
    }

    /// Emit one countdown frame per second, then close the question and
    /// park the machine in `answer_stats`. Cancelled by jumps and by
    /// an early `show_answer_stats`.
    fn spawn_countdown(&self) {
        let token = self.replace_auto_task();
        let hub = self.hub.clone();
        let machine = Arc::clone(&self.machine);
        tokio::spawn(async move {
            for seconds_left in (1..=COUNTDOWN_SECONDS).rev() {
                if token.is_cancelled() {
                    return;
                }
                hub.countdown(seconds_left).await;
                tokio::select! {
                    _ = token.cancelled() => return,
                    _ = tokio::time::sleep(Duration::from_secs(1)) => {}
                }
            }
            hub.question_end().await;
            let moved = machine.lock().transition_to(EventPhase::AnswerStats).is_ok();
            if !moved {
                debug!("countdown ended after the machine had already moved on");
            }
        });
    }

    /// Hold the celebration, then finish the event.
    fn spawn_finish(&self) {
        let token = self.replace_auto_task();
        let hub = self.hub.clone();
        let machine = Arc::clone(&self.machine);
        let events = Arc::clone(&self.events);
        let clock = Arc::clone(&self.clock);
        tokio::spawn(async move {
            tokio::select! {
                _ = token.cancelled() => return,
                _ = tokio::time::sleep(CELEBRATION_HOLD) => {}
            }
            let (moved, current_question) = {
                let mut machine = machine.lock();
                let moved = machine.transition_to(EventPhase::Finished).is_ok();
                (moved, machine.current_question())
            };
            if !moved {
                return;
            }
            match events.set_status(EventStatus::Finished, clock.epoch_ms()) {
                Ok(()) | Err(StoreError::NoCurrentEvent) => {}
                Err(err) => warn!("event status not persisted: {err}"),
            }
            hub.state_changed(EventPhase::Finished, current_question).await;
        });
    }
}

#[cfg(test)]
#[path = "service_tests.rs"]
mod tests;
