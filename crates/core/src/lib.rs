// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! quiz-core: domain layer for the live quiz event coordinator.
//!
//! Everything in here is synchronous and runtime-free: entities, the
//! event state machine, the operator action set, the realtime message
//! catalog, and input validation. The daemon crate composes these into
//! the running server.

pub mod action;
pub mod clock;
pub mod entity;
pub mod machine;
pub mod message;
pub mod phase;
pub mod question;
pub mod role;
pub mod validate;

pub use action::OperatorAction;
pub use clock::{Clock, FakeClock, SystemClock};
pub use entity::{Answer, EventRecord, EventStatus, Reaction, Team, User};
pub use machine::{NextOutcome, StateMachine, TransitionError};
pub use message::{
    ClientFrame, MemberView, RankedTeam, RankedUser, ServerMessage, TeamView,
};
pub use phase::EventPhase;
pub use question::{Question, QuestionKind, QuestionSet, QuestionView};
pub use role::Role;
pub use validate::{ValidationError, ValidationResult};
