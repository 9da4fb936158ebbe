//! # HTTP Site - Entry Point
//! src/main.rs
//!
//! Levanta la aplicación de muestra. SIGINT/SIGTERM solo activan el token
//! de apagado; el loop termina la conexión en curso y sale.

use http_site::commands;
use http_site::config::Config;
use http_site::server::Shutdown;
use http_site::{logging, Site};
use std::thread;
use tracing::{error, info, warn};

fn main() {
    let config = Config::new();
    logging::init(&config.log_level);

    if let Err(e) = config.validate() {
        error!(error = %e, "invalid configuration");
        std::process::exit(1);
    }
    config.print_summary();

    let mut site = Site::from_config(&config);
    if let Err(e) = commands::register_samples(&mut site) {
        error!(error = %e, "unable to register routes");
        std::process::exit(1);
    }

    let shutdown = Shutdown::new();
    spawn_signal_listener(shutdown.clone());

    if let Err(e) = site.serve_until(shutdown) {
        error!(error = %e, "fatal error");
        std::process::exit(1);
    }
}

/// Hilo dedicado a esperar señales de terminación
fn spawn_signal_listener(shutdown: Shutdown) {
    let spawned = thread::Builder::new()
        .name("signals".to_string())
        .spawn(move || {
            let runtime = match tokio::runtime::Builder::new_current_thread().enable_all().build() {
                Ok(runtime) => runtime,
                Err(e) => {
                    warn!(error = %e, "signal runtime unavailable, shutdown only by kill");
                    return;
                }
            };
            runtime.block_on(wait_for_signal());
            shutdown.trigger();
        });

    if let Err(e) = spawned {
        warn!(error = %e, "unable to spawn signal listener");
    }
}

#[cfg(unix)]
async fn wait_for_signal() {
    use tokio::signal::unix::{signal, SignalKind};

    let mut terminate = match signal(SignalKind::terminate()) {
        Ok(stream) => stream,
        Err(e) => {
            warn!(error = %e, "unable to listen for SIGTERM");
            let _ = tokio::signal::ctrl_c().await;
            info!("received SIGINT");
            return;
        }
    };

    tokio::select! {
        _ = tokio::signal::ctrl_c() => info!("received SIGINT"),
        _ = terminate.recv() => info!("received SIGTERM"),
    }
}

#[cfg(not(unix))]
async fn wait_for_signal() {
    let _ = tokio::signal::ctrl_c().await;
    info!("received Ctrl+C");
}
