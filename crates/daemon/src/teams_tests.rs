// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;

fn user(id: i64, nickname: &str) -> User {
    User {
        id,
        session_id: format!("sess-{id}"),
        nickname: nickname.into(),
        team_id: None,
        score: 0,
        connected: true,
        created_ms: 0,
        updated_ms: 0,
    }
}

fn team(id: i64, name: &str) -> Team {
    Team {
        id,
        name: name.into(),
        score: 0,
    }
}

#[test]
fn rebuild_partitions_into_ceil_teams() {
    let assigner = TeamAssigner::new(2, vec![], vec![]);
    let users: Vec<User> = (1..=5).map(|i| user(i, &format!("u{i}"))).collect();
    let drafts = assigner.rebuild(&users, 42);
    assert_eq!(drafts.len(), 3);
    let total: usize = drafts.iter().map(|d| d.member_ids.len()).sum();
    assert_eq!(total, 5);
    assert!(drafts.iter().all(|d| d.member_ids.len() <= 2));
}

#[test]
fn rebuild_is_deterministic_per_seed() {
    let assigner = TeamAssigner::new(2, vec![], vec![]);
    let users: Vec<User> = (1..=6).map(|i| user(i, &format!("u{i}"))).collect();
    assert_eq!(assigner.rebuild(&users, 7), assigner.rebuild(&users, 7));
}

#[test]
fn rebuild_assigns_every_user_exactly_once() {
    let assigner = TeamAssigner::new(3, vec!["sales".into()], vec![]);
    let users: Vec<User> = (1..=10)
        .map(|i| {
            let name = if i % 3 == 0 {
                format!("sales_{i}")
            } else {
                format!("u{i}")
            };
            user(i, &name)
        })
        .collect();
    let drafts = assigner.rebuild(&users, 99);
    let mut ids: Vec<i64> = drafts.iter().flat_map(|d| d.member_ids.clone()).collect();
    ids.sort_unstable();
    assert_eq!(ids, (1..=10).collect::<Vec<i64>>());
}

#[test]
fn separation_spreads_group_members_across_teams() {
    // 4 sales + 4 others into 4 teams of 2: with interleaving plus
    // modulo partitioning, no team may hold two sales members
    let assigner = TeamAssigner::new(2, vec!["sales".into()], vec![]);
    let users: Vec<User> = vec![
        user(1, "sales_a"),
        user(2, "sales_b"),
        user(3, "sales_c"),
        user(4, "sales_d"),
        user(5, "eng_a"),
        user(6, "eng_b"),
        user(7, "eng_c"),
        user(8, "eng_d"),
    ];
    for seed in [1, 17, 4096] {
        let drafts = assigner.rebuild(&users, seed);
        assert_eq!(drafts.len(), 4);
        for draft in &drafts {
            let sales = draft
                .member_ids
                .iter()
                .filter(|id| **id <= 4)
                .count();
            assert!(sales <= 1, "seed {seed}: two sales members in one team");
        }
    }
}

#[test]
fn rebuild_with_no_users_is_empty() {
    let assigner = TeamAssigner::new(2, vec![], vec![]);
    assert!(assigner.rebuild(&[], 1).is_empty());
}

#[test]
fn team_names_come_from_config_then_fall_back() {
    let assigner = TeamAssigner::new(2, vec![], vec!["Red".into(), "Blue".into()]);
    assert_eq!(assigner.team_name(0), "Red");
    assert_eq!(assigner.team_name(1), "Blue");
    assert_eq!(assigner.team_name(2), "Team 3");
}

#[test]
fn late_joiner_goes_to_least_filled_team() {
    let assigner = TeamAssigner::new(3, vec![], vec![]);
    let teams = vec![
        (team(1, "Red"), vec![user(1, "a"), user(2, "b")]),
        (team(2, "Blue"), vec![user(3, "c")]),
    ];
    assert_eq!(
        assigner.place_late_joiner("newbie", &teams),
        Placement::Existing(2)
    );
}

#[test]
fn late_joiner_skips_full_teams() {
    let assigner = TeamAssigner::new(2, vec![], vec![]);
    let teams = vec![
        (team(1, "Red"), vec![user(1, "a"), user(2, "b")]),
        (team(2, "Blue"), vec![user(3, "c")]),
    ];
    assert_eq!(
        assigner.place_late_joiner("newbie", &teams),
        Placement::Existing(2)
    );
}

#[test]
fn late_joiner_avoids_separation_conflicts() {
    // T1 is full, T2 contains a sales member: sales_frank opens T3
    let assigner = TeamAssigner::new(2, vec!["sales".into()], vec![]);
    let teams = vec![
        (team(1, "Red"), vec![user(1, "a"), user(2, "b")]),
        (team(2, "Blue"), vec![user(3, "sales_meg")]),
    ];
    assert_eq!(
        assigner.place_late_joiner("sales_frank", &teams),
        Placement::NewTeam("Team 3".into())
    );
}

#[test]
fn late_joiner_with_conflict_free_room_is_placed() {
    let assigner = TeamAssigner::new(2, vec!["sales".into()], vec![]);
    let teams = vec![
        (team(1, "Red"), vec![user(1, "a"), user(2, "b")]),
        (team(2, "Blue"), vec![user(3, "eng_meg")]),
    ];
    assert_eq!(
        assigner.place_late_joiner("sales_frank", &teams),
        Placement::Existing(2)
    );
}

#[test]
fn separation_is_case_insensitive() {
    let assigner = TeamAssigner::new(2, vec!["Sales".into()], vec![]);
    let teams = vec![(team(1, "Red"), vec![user(1, "SALES_meg")])];
    assert_eq!(
        assigner.place_late_joiner("saLes_frank", &teams),
        Placement::NewTeam("Team 2".into())
    );
}

#[test]
fn no_teams_means_no_placement() {
    let assigner = TeamAssigner::new(2, vec![], vec![]);
    assert_eq!(assigner.place_late_joiner("x", &[]), Placement::NoTeams);
}

#[test]
fn unmatched_joiner_ignores_group_members() {
    let assigner = TeamAssigner::new(2, vec!["sales".into()], vec![]);
    let teams = vec![(team(1, "Red"), vec![user(1, "sales_meg")])];
    assert_eq!(
        assigner.place_late_joiner("plain", &teams),
        Placement::Existing(1)
    );
}
