// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Request-level error taxonomy and its HTTP mapping.
//!
//! Client-caused failures (validation, session, state, not-found,
//! conflict) map to 4xx and log at `info!` or below; store failures map
//! to 5xx and log at `error!`. Transport errors never surface here: the
//! hub absorbs them by closing the offending connection.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use quiz_core::machine::TransitionError;
use quiz_core::validate::ValidationError;
use thiserror::Error;
use tracing::{error, info};

use crate::storage::StoreError;

/// Errors surfaced to HTTP clients.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("Session expired")]
    SessionExpired,

    #[error("Missing X-Session-ID header")]
    MissingSession,

    #[error("Not currently accepting answers")]
    NotAcceptingAnswers,

    #[error(transparent)]
    State(#[from] TransitionError),

    #[error("{0} not found")]
    NotFound(&'static str),

    #[error(transparent)]
    Store(#[from] StoreError),
}

impl ApiError {
    /// Short machine code for the response body.
    pub fn code(&self) -> &'static str {
        match self {
            ApiError::Validation(_) => "ValidationError",
            ApiError::SessionExpired => "SessionExpired",
            ApiError::MissingSession => "SessionError",
            ApiError::NotAcceptingAnswers => "NotAcceptingAnswers",
            ApiError::State(_) => "StateError",
            ApiError::NotFound(_) => "NotFoundError",
            ApiError::Store(StoreError::DuplicateSession(_)) => "ConflictError",
            ApiError::Store(_) => "RepositoryError",
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::Validation(_) | ApiError::NotAcceptingAnswers | ApiError::State(_) => {
                StatusCode::BAD_REQUEST
            }
            ApiError::SessionExpired | ApiError::MissingSession => StatusCode::UNAUTHORIZED,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Store(StoreError::DuplicateSession(_)) => StatusCode::CONFLICT,
            ApiError::Store(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            error!(code = self.code(), "request failed: {self}");
        } else {
            info!(code = self.code(), "request rejected: {self}");
        }
        let body = Json(serde_json::json!({
            "error": self.code(),
            "message": self.to_string(),
        }));
        (status, body).into_response()
    }
}

#[cfg(test)]
#[path = "error_tests.rs"]
mod tests;
