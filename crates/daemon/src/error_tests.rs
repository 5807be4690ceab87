// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use quiz_core::EventPhase;

#[yare::parameterized(
    validation  = { ApiError::Validation(ValidationError::EmptyNickname), StatusCode::BAD_REQUEST, "ValidationError" },
    session     = { ApiError::SessionExpired, StatusCode::UNAUTHORIZED, "SessionExpired" },
    missing     = { ApiError::MissingSession, StatusCode::UNAUTHORIZED, "SessionError" },
    window      = { ApiError::NotAcceptingAnswers, StatusCode::BAD_REQUEST, "NotAcceptingAnswers" },
    not_found   = { ApiError::NotFound("user"), StatusCode::NOT_FOUND, "NotFoundError" },
    conflict    = { ApiError::Store(StoreError::DuplicateSession("s".into())), StatusCode::CONFLICT, "ConflictError" },
    store       = { ApiError::Store(StoreError::NoCurrentEvent), StatusCode::INTERNAL_SERVER_ERROR, "RepositoryError" },
)]
fn status_and_code_mapping(err: ApiError, status: StatusCode, code: &str) {
    assert_eq!(err.status(), status);
    assert_eq!(err.code(), code);
}

#[test]
fn illegal_transition_carries_the_attempted_transition() {
    let err = ApiError::State(TransitionError::InvalidTransition {
        from: EventPhase::AnswerReveal,
        to: EventPhase::Waiting,
    });
    assert_eq!(err.status(), StatusCode::BAD_REQUEST);
    assert!(err.to_string().contains("answer_reveal -> waiting"));
}
