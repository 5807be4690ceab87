// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Realtime upgrade endpoints and per-connection pumps.
//!
//! Each connection gets a bounded outbound queue registered with the
//! hub, a writer task that drains it to the socket under a per-write
//! deadline, and a reader loop that demultiplexes inbound frames
//! (currently only `pong`, which routes to the ping manager).

use std::sync::Arc;

use axum::body::Bytes;
use axum::extract::ws::{Message, WebSocket, WebSocketUpgrade};
use axum::extract::{Query, State};
use axum::response::{IntoResponse, Response};
use futures_util::{SinkExt, StreamExt};
use quiz_core::{ClientFrame, Role};
use serde::Deserialize;
use tokio::sync::mpsc;
use tracing::{debug, warn};

use super::App;
use crate::env;
use crate::error::ApiError;
use crate::hub::{OutboundFrame, Registration};

#[derive(Debug, Deserialize)]
pub(crate) struct WsQuery {
    #[serde(default)]
    session_id: Option<String>,
}

/// `GET /ws/participant?session_id=…` — requires a resolvable session.
pub(crate) async fn participant(
    State(app): State<Arc<App>>,
    Query(query): Query<WsQuery>,
    ws: WebSocketUpgrade,
) -> Response {
    let Some(session_id) = query.session_id.filter(|s| !s.is_empty()) else {
        return ApiError::MissingSession.into_response();
    };
    let user = match app.service.resolve_session(&session_id) {
        Ok(user) => user,
        Err(err) => return err.into_response(),
    };
    ws.on_upgrade(move |socket| {
        run_connection(app, socket, Role::Participant, user.id, session_id)
    })
}

/// `GET /ws/admin` — write-mostly organizer stream.
pub(crate) async fn organizer(State(app): State<Arc<App>>, ws: WebSocketUpgrade) -> Response {
    ws.on_upgrade(move |socket| {
        run_connection(
            app,
            socket,
            Role::Organizer,
            0,
            uuid::Uuid::new_v4().to_string(),
        )
    })
}

/// `GET /ws/screen` — write-mostly projection stream.
pub(crate) async fn screen(State(app): State<Arc<App>>, ws: WebSocketUpgrade) -> Response {
    ws.on_upgrade(move |socket| {
        run_connection(
            app,
            socket,
            Role::Screen,
            0,
            uuid::Uuid::new_v4().to_string(),
        )
    })
}

async fn run_connection(
    app: Arc<App>,
    socket: WebSocket,
    role: Role,
    user_id: i64,
    session_id: String,
) {
    let (out_tx, mut out_rx) = mpsc::channel(env::outbound_queue_depth());
    let sync = app.service.snapshot_message();
    let Some(conn_id) = app
        .hub
        .register(Registration {
            role,
            user_id,
            session_id,
            sync,
            tx: out_tx,
        })
        .await
    else {
        return;
    };
    if role == Role::Participant {
        app.service.set_connected(user_id, true);
    }

    let (mut sink, mut stream) = socket.split();

    // writer: drain the hub's queue to the wire, closing on a missed
    // deadline so a wedged socket cannot back up into the hub
    let deadline = env::write_deadline();
    let writer = tokio::spawn(async move {
        while let Some(frame) = out_rx.recv().await {
            let write = match frame {
                OutboundFrame::Message(msg) => sink.send(Message::Text(msg.encode().into())),
                OutboundFrame::Heartbeat => sink.send(Message::Ping(Bytes::new())),
                OutboundFrame::Close => {
                    let _ = sink.send(Message::Close(None)).await;
                    break;
                }
            };
            match tokio::time::timeout(deadline, write).await {
                Ok(Ok(())) => {}
                Ok(Err(err)) => {
                    debug!(conn_id, "write failed: {err}");
                    break;
                }
                Err(_) => {
                    warn!(conn_id, "write deadline exceeded; closing connection");
                    break;
                }
            }
        }
    });

    // reader: demux inbound frames until the peer goes away
    while let Some(frame) = stream.next().await {
        match frame {
            Ok(Message::Text(text)) => match ClientFrame::decode(text.as_str()) {
                Some(ClientFrame::Pong { ping_id }) if role == Role::Participant => {
                    app.ping.report_pong(user_id, ping_id);
                }
                Some(_) => {}
                None => debug!(conn_id, "unrecognized inbound frame dropped"),
            },
            Ok(Message::Close(_)) => break,
            Err(err) => {
                debug!(conn_id, "read error: {err}");
                break;
            }
            // transport pings/pongs and binary frames are not ours
            Ok(_) => {}
        }
    }

    app.hub.unregister(conn_id).await;
    if role == Role::Participant {
        app.service.set_connected(user_id, false);
    }
    debug!(conn_id, role = %role, "connection closed");
    let _ = writer.await;
}
