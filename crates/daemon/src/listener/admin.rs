// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Organizer endpoints: action dispatch, introspection, state jumps.
//!
//! The organizer auth gate sits in front of these routes and is not
//! part of this crate.

use std::sync::Arc;

use axum::extract::State;
use axum::Json;
use quiz_core::{OperatorAction, ValidationError};
use serde::Deserialize;
use serde_json::{json, Value};

use super::App;
use crate::error::ApiError;
use crate::service::{ActionOutcome, DebugView, JumpOutcome};

#[derive(Debug, Deserialize)]
pub(crate) struct ActionBody {
    action: String,
}

pub(crate) async fn action(
    State(app): State<Arc<App>>,
    Json(body): Json<ActionBody>,
) -> Result<Json<ActionOutcome>, ApiError> {
    let action: OperatorAction = body
        .action
        .parse()
        .map_err(|_| ValidationError::UnknownAction(body.action.clone()))?;
    Ok(Json(app.service.dispatch(action).await?))
}

pub(crate) async fn actions(State(app): State<Arc<App>>) -> Json<Value> {
    let (available_actions, current_state, current_question) = app.service.available_actions();
    Json(json!({
        "available_actions": available_actions,
        "current_state": current_state,
        "current_question": current_question,
    }))
}

#[derive(Debug, Deserialize)]
pub(crate) struct JumpBody {
    state: String,
    #[serde(default)]
    question_number: Option<u32>,
}

pub(crate) async fn jump_state(
    State(app): State<Arc<App>>,
    Json(body): Json<JumpBody>,
) -> Result<Json<JumpOutcome>, ApiError> {
    let outcome = app
        .service
        .jump_state(&body.state, body.question_number)
        .await?;
    Ok(Json(outcome))
}

pub(crate) async fn available_states(State(app): State<Arc<App>>) -> Json<Value> {
    let (states, current_state) = app.service.available_states();
    let available_states: Vec<Value> = states
        .iter()
        .map(|(value, label)| json!({ "value": value, "label": label }))
        .collect();
    Json(json!({
        "available_states": available_states,
        "current_state": current_state,
    }))
}

pub(crate) async fn teams(State(app): State<Arc<App>>) -> Result<Json<Value>, ApiError> {
    Ok(Json(json!({ "teams": app.service.team_details()? })))
}

pub(crate) async fn debug(State(app): State<Arc<App>>) -> Result<Json<DebugView>, ApiError> {
    Ok(Json(app.service.debug_view().await?))
}
