// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Correlated latency probes over the realtime channel.
//!
//! Every interval the manager sends a fresh `ping` to each connected
//! participant and records the issue time. A matching `pong` resolves
//! the probe into an RTT; anything older than the timeout resolves to
//! `null`. A probe reaches exactly one terminal state, and each
//! terminal state publishes exactly one `ping_result` to the organizer.

use std::collections::HashMap;
use std::panic::AssertUnwindSafe;
use std::sync::Arc;
use std::time::Duration;

use futures_util::FutureExt;
use quiz_core::ServerMessage;
use tokio::sync::mpsc;
use tokio::time::Instant;
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, info};

use crate::hub::Hub;
use crate::storage::UserRepo;

/// Probe timing knobs.
#[derive(Debug, Clone)]
pub struct PingConfig {
    pub interval: Duration,
    pub timeout: Duration,
}

impl Default for PingConfig {
    fn default() -> Self {
        Self {
            interval: Duration::from_secs(5),
            timeout: Duration::from_secs(5),
        }
    }
}

struct PongReport {
    user_id: i64,
    ping_id: u64,
}

/// Handle to the probe task. Cheap to clone.
#[derive(Clone)]
pub struct PingManager {
    tx: mpsc::Sender<PongReport>,
}

impl PingManager {
    /// Spawn the probe task; it restarts with an empty probe map on panic.
    pub fn spawn(
        hub: Hub,
        users: Arc<dyn UserRepo>,
        config: PingConfig,
        cancel: CancellationToken,
    ) -> PingManager {
        let (tx, rx) = mpsc::channel(256);
        tokio::spawn(supervise(hub, users, config, rx, cancel));
        PingManager { tx }
    }

    /// Report an inbound `pong` from a participant's reader task.
    pub fn report_pong(&self, user_id: i64, ping_id: u64) {
        if self.tx.try_send(PongReport { user_id, ping_id }).is_err() {
            debug!(user_id, ping_id, "pong dropped: ping manager backlogged");
        }
    }
}

/// One outstanding probe per participant.
struct Probe {
    ping_id: u64,
    issued_at: Instant,
    nickname: String,
}

async fn supervise(
    hub: Hub,
    users: Arc<dyn UserRepo>,
    config: PingConfig,
    mut rx: mpsc::Receiver<PongReport>,
    cancel: CancellationToken,
) {
    loop {
        let run = AssertUnwindSafe(serve(&hub, &users, &config, &mut rx, &cancel)).catch_unwind();
        match run.await {
            Ok(()) => break,
            Err(_) => error!("ping manager panicked; restarting with no outstanding probes"),
        }
    }
    info!("ping manager stopped");
}

async fn serve(
    hub: &Hub,
    users: &Arc<dyn UserRepo>,
    config: &PingConfig,
    rx: &mut mpsc::Receiver<PongReport>,
    cancel: &CancellationToken,
) {
    let mut probes: HashMap<i64, Probe> = HashMap::new();
    let mut next_ping_id: u64 = 0;
    let mut tick =
        tokio::time::interval_at(Instant::now() + config.interval, config.interval);
    tick.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Skip);

    loop {
        tokio::select! {
            _ = cancel.cancelled() => return,
            _ = tick.tick() => {
                sweep_timeouts(hub, &mut probes, config.timeout).await;
                issue_probes(hub, users, &mut probes, &mut next_ping_id).await;
            }
            report = rx.recv() => match report {
                None => return,
                Some(report) => resolve(hub, &mut probes, report).await,
            },
        }
    }
}

/// Expire probes past the timeout; each emits one `null` result.
async fn sweep_timeouts(hub: &Hub, probes: &mut HashMap<i64, Probe>, timeout: Duration) {
    let expired: Vec<i64> = probes
        .iter()
        .filter(|(_, p)| p.issued_at.elapsed() >= timeout)
        .map(|(user_id, _)| *user_id)
        .collect();
    for user_id in expired {
        if let Some(probe) = probes.remove(&user_id) {
            debug!(user_id, ping_id = probe.ping_id, "probe timed out");
            hub.ping_result(&probe.nickname, None).await;
        }
    }
}

/// Probe every connected participant, displacing stale probes.
async fn issue_probes(
    hub: &Hub,
    users: &Arc<dyn UserRepo>,
    probes: &mut HashMap<i64, Probe>,
    next_ping_id: &mut u64,
) {
    for conn in hub.participants().await {
        // a still-outstanding probe is displaced and counts as a timeout
        if let Some(old) = probes.remove(&conn.user_id) {
            debug!(user_id = conn.user_id, ping_id = old.ping_id, "probe displaced");
            hub.ping_result(&old.nickname, None).await;
        }
        let nickname = match users.get(conn.user_id) {
            Ok(Some(user)) => user.nickname,
            // connection for a deleted user; the hub will drop it shortly
            _ => continue,
        };
        *next_ping_id += 1;
        let ping_id = *next_ping_id;
        probes.insert(
            conn.user_id,
            Probe {
                ping_id,
                issued_at: Instant::now(),
                nickname,
            },
        );
        hub.send_to_user(conn.user_id, ServerMessage::Ping { ping_id }).await;
    }
}

/// Match a pong against the outstanding probe; stale pongs are dropped.
async fn resolve(hub: &Hub, probes: &mut HashMap<i64, Probe>, report: PongReport) {
    match probes.remove(&report.user_id) {
        Some(probe) if probe.ping_id == report.ping_id => {
            let rtt_ms = probe.issued_at.elapsed().as_millis() as u64;
            hub.ping_result(&probe.nickname, Some(rtt_ms)).await;
        }
        Some(probe) => {
            // a pong for some older probe; the outstanding one stays
            probes.insert(report.user_id, probe);
            debug!(
                user_id = report.user_id,
                ping_id = report.ping_id,
                "stale pong dropped"
            );
        }
        None => {
            debug!(
                user_id = report.user_id,
                ping_id = report.ping_id,
                "unknown pong dropped"
            );
        }
    }
}

#[cfg(test)]
#[path = "ping_tests.rs"]
mod tests;
