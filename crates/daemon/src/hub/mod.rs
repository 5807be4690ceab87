// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! The realtime hub: registry and fan-out for all live connections.
//!
//! All mutation flows through one command channel into a serializer
//! task, giving a total order over registrations and broadcasts. The
//! hub never waits on a slow consumer: per-connection outbound queues
//! are bounded, and an overflowing connection is closed instead of
//! blocking the producer. Transport failures stay in here — no request
//! handler ever sees them.

mod broadcast;

use std::collections::HashMap;
use std::panic::AssertUnwindSafe;
use std::time::Duration;

use futures_util::FutureExt;
use quiz_core::{Role, ServerMessage};
use serde::Serialize;
use tokio::sync::{mpsc, oneshot};
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, info, warn};

/// Registry-assigned connection id.
pub type ConnId = u64;

/// What the per-connection writer task receives from the hub.
#[derive(Debug, Clone, PartialEq)]
pub enum OutboundFrame {
    /// Serialize and write one envelope.
    Message(ServerMessage),
    /// Send a transport-level probe.
    Heartbeat,
    /// Send a close frame and stop writing.
    Close,
}

/// A new connection joining the registry.
pub struct Registration {
    pub role: Role,
    /// Stable participant id; 0 for organizer and screen connections.
    pub user_id: i64,
    pub session_id: String,
    /// The `initial_sync` frame, delivered before anything else.
    pub sync: ServerMessage,
    pub tx: mpsc::Sender<OutboundFrame>,
}

/// A live participant connection, as reported to the ping manager.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParticipantConn {
    pub user_id: i64,
    pub session_id: String,
}

/// Connection counts by role, for introspection.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct RoleCounts {
    pub participants: usize,
    pub organizers: usize,
    pub screens: usize,
}

/// Hub tuning knobs.
#[derive(Debug, Clone)]
pub struct HubConfig {
    pub heartbeat_interval: Duration,
    pub max_heartbeat_misses: u8,
}

impl Default for HubConfig {
    fn default() -> Self {
        Self {
            heartbeat_interval: Duration::from_secs(15),
            max_heartbeat_misses: 3,
        }
    }
}

enum Command {
    Register {
        registration: Registration,
        reply: oneshot::Sender<ConnId>,
    },
    Unregister {
        conn_id: ConnId,
    },
    Broadcast {
        msg: ServerMessage,
    },
    BroadcastRole {
        role: Role,
        msg: ServerMessage,
    },
    SendToUser {
        user_id: i64,
        msg: ServerMessage,
    },
    Participants {
        reply: oneshot::Sender<Vec<ParticipantConn>>,
    },
    Counts {
        reply: oneshot::Sender<RoleCounts>,
    },
    Stop,
}

/// Handle to the hub serializer. Cheap to clone.
#[derive(Clone)]
pub struct Hub {
    tx: mpsc::Sender<Command>,
}

impl Hub {
    /// Spawn the serializer task and return its handle.
    ///
    /// The task restarts with an empty registry if it ever panics;
    /// clients reconnect as their connections drop.
    pub fn spawn(config: HubConfig, cancel: CancellationToken) -> Hub {
        let (tx, rx) = mpsc::channel(256);
        tokio::spawn(supervise(config, rx, cancel));
        Hub { tx }
    }

    /// Register a connection. The `sync` frame is queued first.
    pub async fn register(&self, registration: Registration) -> Option<ConnId> {
        let (reply, rx) = oneshot::channel();
        self.tx
            .send(Command::Register { registration, reply })
            .await
            .ok()?;
        rx.await.ok()
    }

    pub async fn unregister(&self, conn_id: ConnId) {
        let _ = self.tx.send(Command::Unregister { conn_id }).await;
    }

    /// Fan out to every live connection.
    pub async fn broadcast(&self, msg: ServerMessage) {
        let _ = self.tx.send(Command::Broadcast { msg }).await;
    }

    /// Fan out to one role's connections.
    pub async fn broadcast_to_role(&self, role: Role, msg: ServerMessage) {
        let _ = self.tx.send(Command::BroadcastRole { role, msg }).await;
    }

    /// Deliver to every connection of one participant.
    pub async fn send_to_user(&self, user_id: i64, msg: ServerMessage) {
        let _ = self.tx.send(Command::SendToUser { user_id, msg }).await;
    }

    /// Snapshot of live participant connections.
    pub async fn participants(&self) -> Vec<ParticipantConn> {
        let (reply, rx) = oneshot::channel();
        if self.tx.send(Command::Participants { reply }).await.is_err() {
            return Vec::new();
        }
        rx.await.unwrap_or_default()
    }

    /// Connection counts by role.
    pub async fn counts(&self) -> RoleCounts {
        let (reply, rx) = oneshot::channel();
        if self.tx.send(Command::Counts { reply }).await.is_err() {
            return RoleCounts::default();
        }
        rx.await.unwrap_or_default()
    }

    /// Drain pending commands and close every connection.
    pub async fn stop(&self) {
        let _ = self.tx.send(Command::Stop).await;
    }
}

async fn supervise(config: HubConfig, mut rx: mpsc::Receiver<Command>, cancel: CancellationToken) {
    loop {
        let registry = Registry::new(config.clone());
        let run = AssertUnwindSafe(serve(registry, &mut rx, &cancel)).catch_unwind();
        match run.await {
            Ok(()) => break,
            Err(_) => {
                error!("hub serializer panicked; restarting with an empty registry");
            }
        }
    }
    info!("hub stopped");
}

async fn serve(mut registry: Registry, rx: &mut mpsc::Receiver<Command>, cancel: &CancellationToken) {
    let period = registry.config.heartbeat_interval;
    let mut heartbeat = tokio::time::interval_at(tokio::time::Instant::now() + period, period);
    heartbeat.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Skip);
    loop {
        tokio::select! {
            _ = cancel.cancelled() => {
                registry.close_all();
                return;
            }
            _ = heartbeat.tick() => registry.heartbeat_sweep(),
            cmd = rx.recv() => match cmd {
                None => {
                    registry.close_all();
                    return;
                }
                Some(Command::Stop) => {
                    registry.close_all();
                    return;
                }
                Some(cmd) => registry.handle(cmd),
            },
        }
    }
}

struct ConnEntry {
    id: ConnId,
    role: Role,
    user_id: i64,
    session_id: String,
    tx: mpsc::Sender<OutboundFrame>,
    heartbeat_misses: u8,
}

struct Registry {
    config: HubConfig,
    conns: HashMap<ConnId, ConnEntry>,
    next_id: ConnId,
}

impl Registry {
    fn new(config: HubConfig) -> Self {
        Self {
            config,
            conns: HashMap::new(),
            next_id: 0,
        }
    }

    fn handle(&mut self, cmd: Command) {
        match cmd {
            Command::Register { registration, reply } => {
                let id = self.register(registration);
                let _ = reply.send(id);
            }
            Command::Unregister { conn_id } => {
                if self.conns.remove(&conn_id).is_some() {
                    debug!(conn_id, "connection unregistered");
                }
            }
            Command::Broadcast { msg } => self.deliver(&msg, |_| true),
            Command::BroadcastRole { role, msg } => self.deliver(&msg, |c| c.role == role),
            Command::SendToUser { user_id, msg } => {
                self.deliver(&msg, |c| c.role == Role::Participant && c.user_id == user_id)
            }
            Command::Participants { reply } => {
                let list = self
                    .conns
                    .values()
                    .filter(|c| c.role == Role::Participant)
                    .map(|c| ParticipantConn {
                        user_id: c.user_id,
                        session_id: c.session_id.clone(),
                    })
                    .collect();
                let _ = reply.send(list);
            }
            Command::Counts { reply } => {
                let mut counts = RoleCounts::default();
                for conn in self.conns.values() {
                    match conn.role {
                        Role::Participant => counts.participants += 1,
                        Role::Organizer => counts.organizers += 1,
                        Role::Screen => counts.screens += 1,
                    }
                }
                let _ = reply.send(counts);
            }
            // handled by the serve loop
            Command::Stop => {}
        }
    }

    /// Insert a connection, displacing any live one with the same
    /// `(role, session_id)`.
    fn register(&mut self, registration: Registration) -> ConnId {
        let displaced: Vec<ConnId> = self
            .conns
            .values()
            .filter(|c| c.role == registration.role && c.session_id == registration.session_id)
            .map(|c| c.id)
            .collect();
        for id in displaced {
            debug!(conn_id = id, "displacing previous connection for session");
            self.close_conn(id);
        }

        self.next_id += 1;
        let entry = ConnEntry {
            id: self.next_id,
            role: registration.role,
            user_id: registration.user_id,
            session_id: registration.session_id,
            tx: registration.tx,
            heartbeat_misses: 0,
        };
        // initial_sync goes out before any broadcast can reach this conn
        if entry.tx.try_send(OutboundFrame::Message(registration.sync)).is_err() {
            warn!(conn_id = entry.id, "new connection rejected its sync frame");
        }
        debug!(conn_id = entry.id, role = %entry.role, "connection registered");
        let id = entry.id;
        self.conns.insert(id, entry);
        id
    }

    /// Best-effort fan-out; a full or closed queue closes that connection.
    fn deliver(&mut self, msg: &ServerMessage, filter: impl Fn(&ConnEntry) -> bool) {
        let mut dead: Vec<ConnId> = Vec::new();
        for conn in self.conns.values().filter(|c| filter(c)) {
            match conn.tx.try_send(OutboundFrame::Message(msg.clone())) {
                Ok(()) => {}
                Err(mpsc::error::TrySendError::Full(_)) => {
                    warn!(conn_id = conn.id, kind = msg.kind(), "outbound queue full; closing slow connection");
                    dead.push(conn.id);
                }
                Err(mpsc::error::TrySendError::Closed(_)) => dead.push(conn.id),
            }
        }
        for id in dead {
            self.close_conn(id);
        }
    }

    /// Probe every connection; three consecutive failures close it.
    fn heartbeat_sweep(&mut self) {
        let max = self.config.max_heartbeat_misses;
        let mut dead: Vec<ConnId> = Vec::new();
        for conn in self.conns.values_mut() {
            match conn.tx.try_send(OutboundFrame::Heartbeat) {
                Ok(()) => conn.heartbeat_misses = 0,
                Err(mpsc::error::TrySendError::Full(_)) => {
                    conn.heartbeat_misses += 1;
                    if conn.heartbeat_misses >= max {
                        warn!(conn_id = conn.id, "heartbeat failed {max} times; closing");
                        dead.push(conn.id);
                    }
                }
                Err(mpsc::error::TrySendError::Closed(_)) => dead.push(conn.id),
            }
        }
        for id in dead {
            self.close_conn(id);
        }
    }

    fn close_conn(&mut self, id: ConnId) {
        if let Some(entry) = self.conns.remove(&id) {
            let _ = entry.tx.try_send(OutboundFrame::Close);
        }
    }

    fn close_all(&mut self) {
        for (_, entry) in self.conns.drain() {
            let _ = entry.tx.try_send(OutboundFrame::Close);
        }
    }
}

#[cfg(test)]
#[path = "hub_tests.rs"]
mod tests;
