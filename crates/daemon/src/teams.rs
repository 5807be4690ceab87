// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Team assignment: full rebuilds and late-join placement.
//!
//! A rebuild shuffles participants with a wall-clock-seeded PRNG,
//! interleaves "avoid group" members so they spread across teams, and
//! partitions by modulo into ⌈|U|/team_size⌉ teams. Late joiners go to
//! the least-filled team that has room and no separation conflict.

use quiz_core::{Team, User};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;

/// Where a late joiner lands.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Placement {
    /// Join this existing team.
    Existing(i64),
    /// Every candidate team conflicts or is full; open a new one.
    NewTeam(String),
    /// No teams exist yet; assignment happens at the next full rebuild.
    NoTeams,
}

/// A team produced by a full rebuild, before persistence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TeamDraft {
    pub name: String,
    pub member_ids: Vec<i64>,
}

/// Deterministic partitioner configured from the event config.
#[derive(Debug, Clone)]
pub struct TeamAssigner {
    team_size: u32,
    /// Lowercased separation substrings, in config order.
    avoid_groups: Vec<String>,
    team_names: Vec<String>,
}

impl TeamAssigner {
    pub fn new(team_size: u32, avoid_groups: Vec<String>, team_names: Vec<String>) -> Self {
        Self {
            team_size: team_size.max(1),
            avoid_groups: avoid_groups.iter().map(|g| g.to_lowercase()).collect(),
            team_names,
        }
    }

    /// Display name for the team at `index`, falling back past the
    /// configured list.
    pub fn team_name(&self, index: usize) -> String {
        self.team_names
            .get(index)
            .cloned()
            .unwrap_or_else(|| format!("Team {}", index + 1))
    }

    /// Rebuild all teams from scratch.
    pub fn rebuild(&self, users: &[User], seed: u64) -> Vec<TeamDraft> {
        if users.is_empty() {
            return Vec::new();
        }
        let mut shuffled: Vec<&User> = users.iter().collect();
        let mut rng = StdRng::seed_from_u64(seed);
        shuffled.shuffle(&mut rng);

        let ordered = self.separate(shuffled);

        let team_count = users.len().div_ceil(self.team_size as usize);
        let mut drafts: Vec<TeamDraft> = (0..team_count)
            .map(|i| TeamDraft {
                name: self.team_name(i),
                member_ids: Vec::new(),
            })
            .collect();
        for (i, user) in ordered.into_iter().enumerate() {
            drafts[i % team_count].member_ids.push(user.id);
        }
        drafts
    }

    /// Place a late joiner: least-filled team with room and no
    /// separation conflict, else a new team, else nothing.
    pub fn place_late_joiner(&self, nickname: &str, teams: &[(Team, Vec<User>)]) -> Placement {
        if teams.is_empty() {
            return Placement::NoTeams;
        }
        let joiner_groups = self.groups_of(nickname);
        let candidate = teams
            .iter()
            .filter(|(_, members)| (members.len() as u32) < self.team_size)
            .filter(|(_, members)| {
                joiner_groups.iter().all(|g| {
                    !members
                        .iter()
                        .any(|m| self.groups_of(&m.nickname).contains(g))
                })
            })
            .min_by_key(|(team, members)| (members.len(), team.id));
        match candidate {
            Some((team, _)) => Placement::Existing(team.id),
            None => Placement::NewTeam(self.team_name(teams.len())),
        }
    }

    /// Interleave avoid-group buckets round-robin, unmatched users last.
    fn separate<'a>(&self, users: Vec<&'a User>) -> Vec<&'a User> {
        if self.avoid_groups.is_empty() {
            return users;
        }
        let mut buckets: Vec<Vec<&User>> = vec![Vec::new(); self.avoid_groups.len()];
        let mut unmatched: Vec<&User> = Vec::new();
        for user in users {
            match self.groups_of(&user.nickname).first() {
                Some(&g) => buckets[g].push(user),
                None => unmatched.push(user),
            }
        }
        let mut ordered = Vec::with_capacity(buckets.iter().map(Vec::len).sum::<usize>());
        let deepest = buckets.iter().map(Vec::len).max().unwrap_or(0);
        for i in 0..deepest {
            for bucket in &buckets {
                if let Some(user) = bucket.get(i) {
                    ordered.push(*user);
                }
            }
        }
        ordered.extend(unmatched);
        ordered
    }

    /// Indices of every avoid group the nickname matches.
    fn groups_of(&self, nickname: &str) -> Vec<usize> {
        let lower = nickname.to_lowercase();
        self.avoid_groups
            .iter()
            .enumerate()
            .filter(|(_, g)| lower.contains(g.as_str()))
            .map(|(i, _)| i)
            .collect()
    }
}

#[cfg(test)]
#[path = "teams_tests.rs"]
mod tests;
