//! `cookie-server`: binary entry point.
//!
//! Startup sequence:
//! 1. Load and validate [`Config`] from environment variables.
//! 2. Initialise tracing.
//! 3. Build the shared key store and jar defaults.
//! 4. Build the Axum router and serve it over TLS or plain HTTP.

mod config;
mod error;
mod protocol;
mod server;
mod telemetry;

use anyhow::{Context, Result};
use tracing::info;

use config::Config;
use server::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // -----------------------------------------------------------------------
    // 1. Configuration
    // -----------------------------------------------------------------------
    let cfg = Config::from_env().map_err(|e| {
        // Tracing is not yet up; write to stderr directly.
        eprintln!("ERROR: configuration invalid: {e:#}");
        e
    })?;

    // -----------------------------------------------------------------------
    // 2. Telemetry
    // -----------------------------------------------------------------------
    telemetry::init(&cfg.log_level)?;
    info!(
        version = env!("CARGO_PKG_VERSION"),
        port = cfg.port,
        tls = cfg.tls_enabled(),
        "cookie-server starting"
    );

    // -----------------------------------------------------------------------
    // 3. Keys
    // -----------------------------------------------------------------------
    let key_store = cfg.key_store()?;
    info!(
        encryption = key_store.has_encryption_keys(),
        signing = key_store.has_signing_keys(),
        "key store ready"
    );
    let state = AppState::new(cfg.jar_options(key_store));

    // -----------------------------------------------------------------------
    // 4. HTTP server
    // -----------------------------------------------------------------------
    let router = server::router::build(state, cfg.request_timeout());

    let addr: std::net::SocketAddr = ([0, 0, 0, 0], cfg.port).into();
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;
    info!(addr = %addr, "listening");

    match (&cfg.tls_cert_path, &cfg.tls_key_path) {
        (Some(cert), Some(key)) => {
            let tls = server::tls::load_server_config(cert, key)?;
            server::tls::serve(listener, tls, router).await
        }
        _ => axum::serve(listener, router)
            .await
            .context("HTTP server failed"),
    }
}
