// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! HTTP and WebSocket surface.
//!
//! One axum router serves the participant API, the organizer API, the
//! common status endpoints, and the three realtime upgrade endpoints.
//! Handlers stay thin: extract, call the state service, serialize.

pub mod admin;
pub mod participant;
pub mod status;
pub mod ws;

use std::sync::Arc;

use axum::http::HeaderMap;
use axum::routing::{get, post};
use axum::Router;
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;

use crate::env;
use crate::error::ApiError;
use crate::hub::Hub;
use crate::ping::PingManager;
use crate::service::StateService;

/// Shared handler context.
pub struct App {
    pub service: Arc<StateService>,
    pub hub: Hub,
    pub ping: PingManager,
}

/// Build the full route table.
pub fn router(app: Arc<App>) -> Router {
    Router::new()
        .route("/api/join", post(participant::join))
        .route("/api/answer", post(participant::answer))
        .route("/api/emoji", post(participant::emoji))
        .route("/api/reset-session", post(participant::reset_session))
        .route("/api/admin/action", post(admin::action))
        .route("/api/admin/actions", get(admin::actions))
        .route("/api/admin/jump-state", post(admin::jump_state))
        .route("/api/admin/available-states", get(admin::available_states))
        .route("/api/admin/teams", get(admin::teams))
        .route("/api/admin/debug", get(admin::debug))
        .route("/api/status", get(status::status))
        .route("/api/health", get(status::health))
        .route("/ws/participant", get(ws::participant))
        .route("/ws/admin", get(ws::organizer))
        .route("/ws/screen", get(ws::screen))
        .layer(TraceLayer::new_for_http())
        .layer(TimeoutLayer::new(env::request_deadline()))
        .with_state(app)
}

/// The participant session header, required on session-bound routes.
pub(crate) fn session_header(headers: &HeaderMap) -> Result<&str, ApiError> {
    optional_session_header(headers).ok_or(ApiError::MissingSession)
}

pub(crate) fn optional_session_header(headers: &HeaderMap) -> Option<&str> {
    headers
        .get("x-session-id")
        .and_then(|value| value.to_str().ok())
        .filter(|value| !value.is_empty())
}

#[cfg(test)]
#[path = "listener_tests.rs"]
mod tests;
