// SPDX-License-Identifier: Apache-2.0

use std::net::SocketAddr;
use std::sync::atomic::Ordering;

use factotum_ws_core::EnvLookup;
use factotum_ws_server::{
    build_router, validate_startup_config_contract, ApiConfig, AppState, Database,
    DatabaseConfig, DEFAULT_BIND,
};
use tokio::net::TcpListener;
use tracing::{info, warn};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

async fn wait_for_shutdown_signal() {
    #[cfg(unix)]
    {
        use tokio::signal::unix::{signal, SignalKind};
        match (
            signal(SignalKind::terminate()),
            signal(SignalKind::interrupt()),
        ) {
            (Ok(mut sigterm), Ok(mut sigint)) => {
                tokio::select! {
                    _ = sigterm.recv() => {}
                    _ = sigint.recv() => {}
                }
            }
            _ => {
                warn!("unix signal handlers unavailable, waiting for ctrl-c");
                let _ = tokio::signal::ctrl_c().await;
            }
        }
    }
    #[cfg(not(unix))]
    {
        let _ = tokio::signal::ctrl_c().await;
    }
}

fn init_tracing(log_json: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    if log_json {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer().json())
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer())
            .init();
    }
}

#[tokio::main]
async fn main() -> Result<(), String> {
    let env = EnvLookup::process();
    init_tracing(env.bool("LOG_JSON", true));

    let api = ApiConfig::from_env(&env);
    let db_cfg = DatabaseConfig::from_env(&env);
    validate_startup_config_contract(&api, &db_cfg).map_err(|e| e.to_string())?;
    info!(
        api = %serde_json::to_string(&api).unwrap_or_default(),
        database = %serde_json::to_string(&db_cfg).unwrap_or_default(),
        "effective configuration"
    );
    if !db_cfg.path.exists() {
        warn!(path = %db_cfg.path.display(), "database file not found; readyz will report not ready");
    }

    let bind_addr = env.string("BIND", DEFAULT_BIND);
    let drain = env.duration_ms("SHUTDOWN_DRAIN_MS", 5_000);
    let state = AppState::new(api, Database::new(db_cfg));
    let app = build_router(state.clone());

    let addr: SocketAddr = bind_addr
        .parse()
        .map_err(|e| format!("invalid bind addr {bind_addr}: {e}"))?;
    let socket = if addr.is_ipv4() {
        tokio::net::TcpSocket::new_v4().map_err(|e| format!("socket v4 failed: {e}"))?
    } else {
        tokio::net::TcpSocket::new_v6().map_err(|e| format!("socket v6 failed: {e}"))?
    };
    socket
        .set_reuseaddr(true)
        .map_err(|e| format!("set_reuseaddr failed: {e}"))?;
    socket.bind(addr).map_err(|e| format!("bind failed: {e}"))?;
    let listener: TcpListener = socket
        .listen(1024)
        .map_err(|e| format!("listen failed: {e}"))?;
    info!("factotum-ws-server listening on {bind_addr}");

    let ready = state.ready.clone();
    axum::serve(listener, app)
        .with_graceful_shutdown(async move {
            wait_for_shutdown_signal().await;
            ready.store(false, Ordering::Relaxed);
            info!(drain_ms = drain.as_millis() as u64, "shutdown requested, draining");
            tokio::time::sleep(drain).await;
        })
        .await
        .map_err(|e| format!("server failed: {e}"))
}
