// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! quizd: the live quiz coordinator daemon.

use std::process::ExitCode;
use std::sync::Arc;

use quiz_core::{QuestionSet, SystemClock};
use quiz_daemon::listener::{self, App};
use quiz_daemon::service::{ServiceConfig, ServiceDeps};
use quiz_daemon::{config, env, Hub, HubConfig, MemoryStore, PingConfig, PingManager, StateService};
use tokio_util::sync::CancellationToken;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> ExitCode {
    let filter = EnvFilter::try_from_env("QUIZD_LOG").unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    // config first; everything downstream is shaped by it
    let config_path = env::config_path();
    let config = match config::load(&config_path) {
        Ok(config) => config,
        Err(err) => {
            error!("config: {err}");
            return ExitCode::from(1);
        }
    };
    let team_names = match config::load_team_names(&config_path) {
        Ok(names) => names,
        Err(err) => {
            error!("config: {err}");
            return ExitCode::from(1);
        }
    };
    info!(
        title = %config.event.title,
        questions = config.questions.len(),
        team_mode = config.event.team_mode,
        "config loaded"
    );

    let cancel = CancellationToken::new();
    let store = Arc::new(MemoryStore::new());
    let hub = Hub::spawn(
        HubConfig {
            heartbeat_interval: env::heartbeat_interval(),
            ..HubConfig::default()
        },
        cancel.clone(),
    );
    let questions = Arc::new(QuestionSet::new(config.questions.clone()));
    let service = Arc::new(StateService::new(
        ServiceDeps {
            hub: hub.clone(),
            users: store.clone(),
            teams: store.clone(),
            answers: store.clone(),
            events: store.clone(),
            reactions: store.clone(),
            questions,
            clock: Arc::new(SystemClock),
        },
        ServiceConfig {
            title: config.event.title.clone(),
            team_mode: config.event.team_mode,
            team_size: config.event.team_size,
            qrcode: config.event.qrcode.clone(),
            avoid_groups: config.team_separation.avoid_groups.clone(),
            team_names,
        },
        cancel.clone(),
    ));
    let ping = PingManager::spawn(
        hub.clone(),
        store.clone(),
        PingConfig {
            interval: env::ping_interval(),
            timeout: env::ping_timeout(),
        },
        cancel.clone(),
    );

    let router = listener::router(Arc::new(App {
        service,
        hub: hub.clone(),
        ping,
    }));

    let addr = env::bind_addr();
    let tcp = match tokio::net::TcpListener::bind(&addr).await {
        Ok(listener) => listener,
        Err(err) => {
            error!("bind {addr}: {err}");
            return ExitCode::from(2);
        }
    };
    info!(%addr, "listening");

    let result = axum::serve(tcp, router)
        .with_graceful_shutdown(async {
            shutdown_signal().await;
            info!("shutdown signal received");
        })
        .await;

    cancel.cancel();
    hub.stop().await;

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!("server error: {err}");
            ExitCode::from(2)
        }
    }
}

async fn shutdown_signal() {
    let ctrl_c = async {
        let _ = tokio::signal::ctrl_c().await;
    };
    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(_) => std::future::pending().await,
        }
    };
    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {}
        _ = terminate => {}
    }
}
