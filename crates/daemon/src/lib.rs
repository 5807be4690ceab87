// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! quiz-daemon: the live quiz coordinator server.
//!
//! Composes the quiz-core domain into a running process: configuration,
//! repositories, the realtime hub, the ping manager, the state service
//! sagas, and the HTTP/WebSocket listener.

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

pub mod config;
pub mod env;
pub mod error;
pub mod hub;
pub mod listener;
pub mod ping;
pub mod service;
pub mod storage;
pub mod teams;

pub use config::Config;
pub use error::ApiError;
pub use hub::{Hub, HubConfig, OutboundFrame, Registration};
pub use ping::{PingConfig, PingManager};
pub use service::{ServiceConfig, StateService};
pub use storage::{
    AnswerRepo, EventRepo, MemoryStore, ReactionRepo, StoreError, TeamRepo, UserRepo,
};
pub use teams::TeamAssigner;
