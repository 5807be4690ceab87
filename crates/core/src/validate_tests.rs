// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use crate::question::{Question, QuestionKind};

#[test]
fn nickname_is_trimmed() {
    assert_eq!(nickname("  ada  ").unwrap(), "ada");
}

#[yare::parameterized(
    empty          = { "" },
    only_spaces    = { "   " },
)]
fn empty_nicknames_rejected(raw: &str) {
    assert_eq!(nickname(raw), Err(ValidationError::EmptyNickname));
}

#[test]
fn nickname_length_is_counted_in_code_points() {
    let twenty = "あ".repeat(20);
    assert!(nickname(&twenty).is_ok());
    let twenty_one = "あ".repeat(21);
    assert_eq!(nickname(&twenty_one), Err(ValidationError::NicknameTooLong));
}

#[yare::parameterized(
    angle_open  = { "a<b" },
    angle_close = { "a>b" },
    ampersand   = { "a&b" },
    quote       = { "a\"b" },
    apostrophe  = { "a'b" },
)]
fn markup_characters_rejected(raw: &str) {
    assert_eq!(nickname(raw), Err(ValidationError::ForbiddenCharacter));
}

#[test]
fn control_characters_rejected() {
    assert_eq!(nickname("a\u{0007}b"), Err(ValidationError::ControlCharacter));
    assert_eq!(nickname("a\u{001b}b"), Err(ValidationError::ControlCharacter));
}

#[test]
fn profane_nickname_rejected_case_insensitively() {
    assert_eq!(nickname("ShItLord"), Err(ValidationError::ProfaneNickname));
}

#[test]
fn emoji_allow_list() {
    assert!(emoji("🎉").is_ok());
    assert_eq!(emoji("🔥"), Err(ValidationError::UnknownEmoji));
    assert_eq!(emoji(""), Err(ValidationError::UnknownEmoji));
}

#[test]
fn session_id_must_be_uuid_shaped() {
    assert!(session_id("0c9c1edd-2a2e-4efb-bd9a-3bb50e3290b9").is_ok());
    assert!(session_id("not-a-uuid").is_err());
    assert!(session_id("").is_err());
}

fn two_question_set() -> QuestionSet {
    QuestionSet::new(vec![
        Question {
            kind: QuestionKind::Text,
            text: "q1".into(),
            image: None,
            choices: vec!["a".into(), "b".into(), "c".into(), "d".into()],
            correct: 2,
            point: 1,
        },
        Question {
            kind: QuestionKind::Text,
            text: "q2".into(),
            image: None,
            choices: vec!["x".into(), "y".into(), "z".into()],
            correct: 3,
            point: 1,
        },
    ])
}

#[test]
fn answer_shape_checks() {
    let set = two_question_set();
    assert!(answer(1, 4, &set).valid());
    assert!(answer(2, 3, &set).valid());

    let out_of_range = answer(3, 1, &set);
    assert_eq!(
        out_of_range.errors,
        vec![ValidationError::QuestionNumberOutOfRange { n: 3, max: 2 }]
    );

    let bad_index = answer(2, 4, &set);
    assert_eq!(
        bad_index.errors,
        vec![ValidationError::AnswerIndexOutOfRange { index: 4, choices: 3 }]
    );

    let zero_index = answer(1, 0, &set);
    assert!(!zero_index.valid());
}

#[test]
fn first_error_is_surfaced_by_into_result() {
    let set = two_question_set();
    let err = answer(9, 9, &set).into_result().unwrap_err();
    assert_eq!(err, ValidationError::QuestionNumberOutOfRange { n: 9, max: 2 });
    assert!(answer(1, 1, &set).into_result().is_ok());
}

#[test]
fn machine_consistency_flags_question_bound_phase_without_question() {
    use crate::machine::StateMachine;
    use crate::phase::EventPhase;

    let mut m = StateMachine::new(2, false);
    assert!(machine_consistency(&m).valid());

    m.set_current_question(1).unwrap();
    m.jump_to(EventPhase::QuestionActive).unwrap();
    assert!(machine_consistency(&m).valid());
}
