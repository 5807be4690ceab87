// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Score and standings computation.
//!
//! Scores are recomputed from the answer log at read time — never
//! incrementally on ingestion — so answer changes and replays are free.
//! Ranks are dense (1, 2, 2, 3), ordered by score descending with ties
//! broken by ascending id.

use std::collections::HashMap;

use quiz_core::{Answer, QuestionSet, RankedTeam, RankedUser, Team, User};

/// Computed standings plus the per-entity scores to persist.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Standings {
    pub results: Vec<RankedUser>,
    pub teams: Vec<RankedTeam>,
    pub user_scores: Vec<(i64, u32)>,
    pub team_scores: Vec<(i64, u32)>,
}

/// Points a user has earned across the answer log.
pub fn score_of(user_id: i64, answers: &[Answer], questions: &QuestionSet) -> u32 {
    answers
        .iter()
        .filter(|a| a.user_id == user_id && a.is_correct)
        .map(|a| questions.get(a.question_number).map_or(0, |q| q.point))
        .sum()
}

/// Full standings over every participant and team.
pub fn standings(
    users: &[User],
    teams: &[Team],
    answers: &[Answer],
    questions: &QuestionSet,
) -> Standings {
    let mut scored: Vec<(i64, String, u32)> = users
        .iter()
        .map(|u| (u.id, u.nickname.clone(), score_of(u.id, answers, questions)))
        .collect();
    scored.sort_by(|a, b| b.2.cmp(&a.2).then(a.0.cmp(&b.0)));

    let user_scores: Vec<(i64, u32)> = scored.iter().map(|(id, _, s)| (*id, *s)).collect();
    let results = rank(&scored, |(_, nickname, score)| {
        (nickname.clone(), *score)
    })
    .into_iter()
    .map(|((nickname, score), rank)| RankedUser {
        nickname,
        score,
        rank,
    })
    .collect();

    let by_user: HashMap<i64, u32> = user_scores.iter().copied().collect();
    let mut team_rows: Vec<(i64, String, u32)> = teams
        .iter()
        .map(|t| {
            let total = users
                .iter()
                .filter(|u| u.team_id == Some(t.id))
                .map(|u| by_user.get(&u.id).copied().unwrap_or(0))
                .sum();
            (t.id, t.name.clone(), total)
        })
        .collect();
    team_rows.sort_by(|a, b| b.2.cmp(&a.2).then(a.0.cmp(&b.0)));

    let team_scores: Vec<(i64, u32)> = team_rows.iter().map(|(id, _, s)| (*id, *s)).collect();
    let ranked_teams = rank(&team_rows, |(_, name, score)| (name.clone(), *score))
        .into_iter()
        .map(|((name, score), rank)| RankedTeam { name, score, rank })
        .collect();

    Standings {
        results,
        teams: ranked_teams,
        user_scores,
        team_scores,
    }
}

/// Per-choice answer counts for one question (1-based indices).
pub fn choice_counts(answers: &[Answer], choices: usize) -> Vec<u32> {
    let mut counts = vec![0u32; choices];
    for answer in answers {
        let index = answer.answer_index as usize;
        if (1..=choices).contains(&index) {
            counts[index - 1] += 1;
        }
    }
    counts
}

/// Dense ranking over rows already sorted by descending score.
fn rank<T, O>(rows: &[(i64, String, u32)], project: O) -> Vec<(T, u32)>
where
    O: Fn(&(i64, String, u32)) -> T,
{
    let mut out = Vec::with_capacity(rows.len());
    let mut current_rank = 0;
    let mut last_score: Option<u32> = None;
    for row in rows {
        if last_score != Some(row.2) {
            current_rank += 1;
            last_score = Some(row.2);
        }
        out.push((project(row), current_rank));
    }
    out
}

#[cfg(test)]
#[path = "results_tests.rs"]
mod tests;
