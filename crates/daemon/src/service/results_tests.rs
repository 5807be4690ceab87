// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use quiz_core::{Question, QuestionKind};

fn questions() -> QuestionSet {
    QuestionSet::new(vec![
        Question {
            kind: QuestionKind::Text,
            text: "q1".into(),
            image: None,
            choices: vec!["a".into(), "b".into(), "c".into(), "d".into()],
            correct: 2,
            point: 1,
        },
        Question {
            kind: QuestionKind::Text,
            text: "q2".into(),
            image: None,
            choices: vec!["x".into(), "y".into(), "z".into()],
            correct: 3,
            point: 2,
        },
    ])
}

fn user(id: i64, nickname: &str, team_id: Option<i64>) -> User {
    User {
        id,
        session_id: format!("s{id}"),
        nickname: nickname.into(),
        team_id,
        score: 0,
        connected: true,
        created_ms: 0,
        updated_ms: 0,
    }
}

fn answer(user_id: i64, question_number: u32, answer_index: u32, is_correct: bool) -> Answer {
    Answer {
        user_id,
        question_number,
        answer_index,
        is_correct,
        answered_ms: 0,
    }
}

#[test]
fn score_sums_points_of_correct_answers() {
    let qs = questions();
    let answers = vec![
        answer(1, 1, 2, true),
        answer(1, 2, 3, true),
        answer(2, 1, 1, false),
    ];
    assert_eq!(score_of(1, &answers, &qs), 3);
    assert_eq!(score_of(2, &answers, &qs), 0);
    assert_eq!(score_of(9, &answers, &qs), 0);
}

#[test]
fn standings_rank_dense_with_ties_by_id() {
    let qs = questions();
    let users = vec![
        user(1, "ada", None),
        user(2, "bob", None),
        user(3, "cyd", None),
    ];
    // ada: both correct (3 pts), bob and cyd: one point each
    let answers = vec![
        answer(1, 1, 2, true),
        answer(1, 2, 3, true),
        answer(2, 1, 2, true),
        answer(3, 1, 2, true),
        answer(3, 2, 1, false),
    ];
    let standings = standings(&users, &[], &answers, &qs);
    assert_eq!(
        standings.results,
        vec![
            RankedUser { nickname: "ada".into(), score: 3, rank: 1 },
            RankedUser { nickname: "bob".into(), score: 1, rank: 2 },
            RankedUser { nickname: "cyd".into(), score: 1, rank: 2 },
        ]
    );
    assert_eq!(standings.user_scores, vec![(1, 3), (2, 1), (3, 1)]);
}

#[test]
fn team_scores_sum_member_scores() {
    let qs = questions();
    let users = vec![
        user(1, "ada", Some(1)),
        user(2, "bob", Some(1)),
        user(3, "cyd", Some(2)),
    ];
    let teams = vec![
        Team { id: 1, name: "Red".into(), score: 0 },
        Team { id: 2, name: "Blue".into(), score: 0 },
    ];
    let answers = vec![
        answer(1, 1, 2, true),
        answer(2, 2, 3, true),
        answer(3, 1, 2, true),
    ];
    let standings = standings(&users, &teams, &answers, &qs);
    assert_eq!(
        standings.teams,
        vec![
            RankedTeam { name: "Red".into(), score: 3, rank: 1 },
            RankedTeam { name: "Blue".into(), score: 1, rank: 2 },
        ]
    );
    assert_eq!(standings.team_scores, vec![(1, 3), (2, 1)]);
}

#[test]
fn every_correct_answerer_has_nonzero_score() {
    let qs = questions();
    let users: Vec<User> = (1..=4).map(|i| user(i, &format!("u{i}"), None)).collect();
    let answers = vec![
        answer(1, 1, 2, true),
        answer(2, 2, 3, true),
        answer(3, 1, 1, false),
    ];
    let standings = standings(&users, &[], &answers, &qs);
    for row in &standings.results {
        let answered_correctly = answers.iter().any(|a| {
            users
                .iter()
                .find(|u| u.nickname == row.nickname)
                .is_some_and(|u| a.user_id == u.id && a.is_correct)
        });
        assert_eq!(row.score > 0, answered_correctly, "{}", row.nickname);
    }
}

#[test]
fn choice_counts_bucket_one_based_indices() {
    let answers = vec![
        answer(1, 1, 2, true),
        answer(2, 1, 2, true),
        answer(3, 1, 1, false),
        answer(4, 1, 4, false),
    ];
    assert_eq!(choice_counts(&answers, 4), vec![1, 2, 0, 1]);
}

#[test]
fn choice_counts_ignore_out_of_range_rows() {
    let answers = vec![answer(1, 1, 9, false), answer(2, 1, 0, false)];
    assert_eq!(choice_counts(&answers, 3), vec![0, 0, 0]);
}
