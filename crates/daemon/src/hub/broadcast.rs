// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! High-level broadcasters: one thin wrapper per message type, each
//! targeting the audience that message is meant for.

use quiz_core::{
    EventPhase, QuestionView, RankedTeam, RankedUser, Role, ServerMessage, TeamView,
};

use super::Hub;

impl Hub {
    /// `title_display` → screen.
    pub async fn title_display(&self, title: &str) {
        self.broadcast_to_role(
            Role::Screen,
            ServerMessage::TitleDisplay {
                title: title.to_string(),
            },
        )
        .await;
    }

    /// `team_assignment` → organizer, screen.
    pub async fn team_assignment(&self, teams: Vec<TeamView>) {
        let msg = ServerMessage::TeamAssignment { teams };
        self.broadcast_to_role(Role::Organizer, msg.clone()).await;
        self.broadcast_to_role(Role::Screen, msg).await;
    }

    /// `question_start` → all, with the answer key only on the organizer slice.
    pub async fn question_start(
        &self,
        question_number: u32,
        question: QuestionView,
        correct: u32,
        total_questions: u32,
    ) {
        let public = ServerMessage::QuestionStart {
            question_number,
            question: question.clone(),
            correct: None,
            total_questions: None,
        };
        self.broadcast_to_role(Role::Participant, public.clone()).await;
        self.broadcast_to_role(Role::Screen, public).await;
        self.broadcast_to_role(
            Role::Organizer,
            ServerMessage::QuestionStart {
                question_number,
                question,
                correct: Some(correct),
                total_questions: Some(total_questions),
            },
        )
        .await;
    }

    /// `countdown` → screen.
    pub async fn countdown(&self, seconds_left: u32) {
        self.broadcast_to_role(Role::Screen, ServerMessage::Countdown { seconds_left })
            .await;
    }

    /// `question_end` → all.
    pub async fn question_end(&self) {
        self.broadcast(ServerMessage::QuestionEnd {}).await;
    }

    /// `answer_stats` → organizer, screen.
    pub async fn answer_stats(&self, total_participants: u32, choices_counts: Vec<u32>) {
        let msg = ServerMessage::AnswerStats {
            total_participants,
            choices_counts,
        };
        self.broadcast_to_role(Role::Organizer, msg.clone()).await;
        self.broadcast_to_role(Role::Screen, msg).await;
    }

    /// `answer_reveal` → all.
    pub async fn answer_reveal(&self, correct: u32) {
        self.broadcast(ServerMessage::AnswerReveal { correct }).await;
    }

    /// `final_results` → all.
    pub async fn final_results(
        &self,
        results: Vec<RankedUser>,
        teams: Vec<RankedTeam>,
        team_mode: bool,
    ) {
        self.broadcast(ServerMessage::FinalResults {
            results,
            teams,
            team_mode,
        })
        .await;
    }

    /// `celebration` → screen.
    pub async fn celebration(&self) {
        self.broadcast_to_role(Role::Screen, ServerMessage::Celebration {}).await;
    }

    /// `user_joined` → organizer, screen.
    pub async fn user_joined(&self, nickname: &str, teamname: Option<String>, score: u32) {
        let msg = ServerMessage::UserJoined {
            nickname: nickname.to_string(),
            teamname,
            score,
        };
        self.broadcast_to_role(Role::Organizer, msg.clone()).await;
        self.broadcast_to_role(Role::Screen, msg).await;
    }

    /// `user_left` → organizer, screen.
    pub async fn user_left(&self, nickname: &str, team_id: Option<i64>) {
        let msg = ServerMessage::UserLeft {
            nickname: nickname.to_string(),
            team_id,
        };
        self.broadcast_to_role(Role::Organizer, msg.clone()).await;
        self.broadcast_to_role(Role::Screen, msg).await;
    }

    /// `answer_received` → organizer.
    pub async fn answer_received(&self, nickname: &str, answer: u32) {
        self.broadcast_to_role(
            Role::Organizer,
            ServerMessage::AnswerReceived {
                nickname: nickname.to_string(),
                answer,
            },
        )
        .await;
    }

    /// `emoji` → organizer, screen.
    pub async fn emoji(&self, emoji: &str, nickname: &str) {
        let msg = ServerMessage::Emoji {
            emoji: emoji.to_string(),
            nickname: nickname.to_string(),
        };
        self.broadcast_to_role(Role::Organizer, msg.clone()).await;
        self.broadcast_to_role(Role::Screen, msg).await;
    }

    /// `team_member_added` → organizer, participant.
    pub async fn team_member_added(&self, team_id: i64, nickname: &str) {
        let msg = ServerMessage::TeamMemberAdded {
            team_id,
            nickname: nickname.to_string(),
        };
        self.broadcast_to_role(Role::Organizer, msg.clone()).await;
        self.broadcast_to_role(Role::Participant, msg).await;
    }

    /// Plain `state_changed` → all.
    pub async fn state_changed(&self, new_state: EventPhase, current_question: u32) {
        self.broadcast(ServerMessage::StateChanged {
            new_state,
            current_question,
            jumped: None,
            question: None,
            question_number: None,
            total_questions: None,
        })
        .await;
    }

    /// `ping_result` → organizer.
    pub async fn ping_result(&self, nickname: &str, result: Option<u64>) {
        self.broadcast_to_role(
            Role::Organizer,
            ServerMessage::PingResult {
                nickname: nickname.to_string(),
                result,
            },
        )
        .await;
    }
}
