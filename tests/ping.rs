// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Latency probes end to end: issue, resolve, time out, discard stale.

use crate::prelude::*;

fn spawn_ping(stage: &Stage) -> PingManager {
    PingManager::spawn(
        stage.hub.clone(),
        stage.store.clone(),
        PingConfig {
            interval: Duration::from_secs(5),
            timeout: Duration::from_secs(5),
        },
        stage.cancel.clone(),
    )
}

async fn expect_ping(client: &mut Client) -> u64 {
    loop {
        if let ServerMessage::Ping { ping_id } = client.next().await {
            return ping_id;
        }
    }
}

#[tokio::test(start_paused = true)]
async fn probe_resolves_to_an_rtt_for_a_responsive_participant() {
    let stage = Stage::questions(spec_questions(), false, 2);
    let joined = stage.join("ada").await;
    let mut participant = stage
        .connect(Role::Participant, joined.user.id, &joined.session_id)
        .await;
    let mut organizer = stage.connect(Role::Organizer, 0, "org-1").await;
    let ping = spawn_ping(&stage);

    let ping_id = expect_ping(&mut participant).await;
    ping.report_pong(joined.user.id, ping_id);

    loop {
        if let ServerMessage::PingResult { nickname, result } = organizer.next().await {
            assert_eq!(nickname, "ada");
            assert!(result.is_some());
            break;
        }
    }
}

#[tokio::test(start_paused = true)]
async fn silent_participant_yields_exactly_one_null_result() {
    let stage = Stage::questions(spec_questions(), false, 2);
    let joined = stage.join("U1").await;
    let mut participant = stage
        .connect(Role::Participant, joined.user.id, &joined.session_id)
        .await;
    let mut organizer = stage.connect(Role::Organizer, 0, "org-1").await;
    let ping = spawn_ping(&stage);

    let stale_id = expect_ping(&mut participant).await;

    // no pong: the next cycle resolves the probe to null, once
    loop {
        if let ServerMessage::PingResult { nickname, result } = organizer.next().await {
            assert_eq!(nickname, "U1");
            assert_eq!(result, None);
            break;
        }
    }

    // a pong for the dead probe is discarded silently: the next
    // ping_result the organizer sees is for the *fresh* probe
    ping.report_pong(joined.user.id, stale_id);
    let fresh_id = expect_ping(&mut participant).await;
    assert_ne!(fresh_id, stale_id);
    ping.report_pong(joined.user.id, fresh_id);
    loop {
        if let ServerMessage::PingResult { result, .. } = organizer.next().await {
            assert!(result.is_some(), "stale pong must not surface");
            break;
        }
    }
}

#[tokio::test(start_paused = true)]
async fn every_connected_participant_is_probed() {
    let stage = Stage::questions(spec_questions(), false, 2);
    let a = stage.join("ada").await;
    let b = stage.join("bee").await;
    let mut conn_a = stage
        .connect(Role::Participant, a.user.id, &a.session_id)
        .await;
    let mut conn_b = stage
        .connect(Role::Participant, b.user.id, &b.session_id)
        .await;
    let _ping = spawn_ping(&stage);

    let id_a = expect_ping(&mut conn_a).await;
    let id_b = expect_ping(&mut conn_b).await;
    assert_ne!(id_a, id_b, "probe ids are fresh per participant");
}
