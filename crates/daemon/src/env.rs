// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Centralized environment variable access for the daemon crate.

use std::path::PathBuf;
use std::time::Duration;

fn duration_ms(var: &str, default: Duration) -> Duration {
    std::env::var(var)
        .ok()
        .and_then(|s| s.parse::<u64>().ok())
        .map(Duration::from_millis)
        .unwrap_or(default)
}

/// Path to the event config file (`QUIZD_CONFIG`, default `config.toml`).
/// The team-name list is read from `team.toml` next to it.
pub fn config_path() -> PathBuf {
    std::env::var("QUIZD_CONFIG")
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from("config.toml"))
}

/// Listen address (`QUIZD_ADDR`, default `0.0.0.0:8080`).
pub fn bind_addr() -> String {
    std::env::var("QUIZD_ADDR").unwrap_or_else(|_| String::from("0.0.0.0:8080"))
}

/// Interval between latency probes to each participant.
pub fn ping_interval() -> Duration {
    duration_ms("QUIZD_PING_INTERVAL_MS", Duration::from_secs(5))
}

/// How long an outstanding probe may wait for its pong.
pub fn ping_timeout() -> Duration {
    duration_ms("QUIZD_PING_TIMEOUT_MS", Duration::from_secs(5))
}

/// Period of the hub's per-connection heartbeat probe.
pub fn heartbeat_interval() -> Duration {
    duration_ms("QUIZD_HEARTBEAT_MS", Duration::from_secs(15))
}

/// Per-connection outbound queue depth; overflow closes the connection.
pub fn outbound_queue_depth() -> usize {
    std::env::var("QUIZD_QUEUE_DEPTH")
        .ok()
        .and_then(|s| s.parse::<usize>().ok())
        .unwrap_or(64)
}

/// Deadline for a single WebSocket write before the connection is closed.
pub fn write_deadline() -> Duration {
    duration_ms("QUIZD_WRITE_DEADLINE_MS", Duration::from_secs(5))
}

/// Server-side deadline for one HTTP request.
pub fn request_deadline() -> Duration {
    duration_ms("QUIZD_REQUEST_DEADLINE_MS", Duration::from_secs(10))
}
