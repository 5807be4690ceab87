// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Participant endpoints: join, answer, emoji, reset.

use std::sync::Arc;

use axum::extract::State;
use axum::http::HeaderMap;
use axum::Json;
use serde::Deserialize;
use serde_json::{json, Value};

use super::{optional_session_header, session_header, App};
use crate::error::ApiError;
use crate::service::JoinOutcome;

#[derive(Debug, Deserialize)]
pub(crate) struct JoinBody {
    nickname: String,
}

pub(crate) async fn join(
    State(app): State<Arc<App>>,
    headers: HeaderMap,
    Json(body): Json<JoinBody>,
) -> Result<Json<JoinOutcome>, ApiError> {
    let session = optional_session_header(&headers);
    let outcome = app.service.join(&body.nickname, session).await?;
    Ok(Json(outcome))
}

#[derive(Debug, Deserialize)]
pub(crate) struct AnswerBody {
    question_number: u32,
    answer_index: u32,
}

pub(crate) async fn answer(
    State(app): State<Arc<App>>,
    headers: HeaderMap,
    Json(body): Json<AnswerBody>,
) -> Result<Json<Value>, ApiError> {
    let session = session_header(&headers)?;
    app.service
        .submit_answer(session, body.question_number, body.answer_index)
        .await?;
    Ok(Json(json!({})))
}

#[derive(Debug, Deserialize)]
pub(crate) struct EmojiBody {
    emoji: String,
}

pub(crate) async fn emoji(
    State(app): State<Arc<App>>,
    headers: HeaderMap,
    Json(body): Json<EmojiBody>,
) -> Result<Json<Value>, ApiError> {
    let session = session_header(&headers)?;
    app.service.send_emoji(session, &body.emoji).await?;
    Ok(Json(json!({})))
}

pub(crate) async fn reset_session(
    State(app): State<Arc<App>>,
    headers: HeaderMap,
) -> Result<Json<Value>, ApiError> {
    let session = session_header(&headers)?;
    app.service.reset_session(session).await?;
    Ok(Json(json!({ "status": "reset" })))
}
