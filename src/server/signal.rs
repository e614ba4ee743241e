// Signal handling module
//
// Supported signals:
// - SIGTERM: Graceful shutdown
// - SIGINT:  Graceful shutdown (Ctrl+C)

use std::sync::atomic::Ordering;
use std::sync::Arc;

use crate::config::AppState;
use crate::logger;

/// Start the signal handler task (Unix).
///
/// SIGTERM and SIGINT both mark shutdown as requested and wake the
/// accept loop; the loop owns the rest of the shutdown sequence.
#[cfg(unix)]
pub fn start_signal_handler(state: Arc<AppState>) {
    use tokio::signal::unix::{signal, SignalKind};

    tokio::spawn(async move {
        let mut sigterm = match signal(SignalKind::terminate()) {
            Ok(s) => s,
            Err(e) => {
                logger::log_error(&format!("Failed to register SIGTERM handler: {e}"));
                return;
            }
        };
        let mut sigint = match signal(SignalKind::interrupt()) {
            Ok(s) => s,
            Err(e) => {
                logger::log_error(&format!("Failed to register SIGINT handler: {e}"));
                return;
            }
        };

        let name = tokio::select! {
            _ = sigterm.recv() => "SIGTERM",
            _ = sigint.recv() => "SIGINT",
        };

        logger::log_shutdown_started(name);
        state.shutdown_requested.store(true, Ordering::SeqCst);
        // notify_one stores a permit, so the wakeup is kept even when the
        // accept loop has not registered a waiter yet
        state.shutdown.notify_one();
    });
}

/// Windows fallback - only handles Ctrl+C
#[cfg(not(unix))]
pub fn start_signal_handler(state: Arc<AppState>) {
    tokio::spawn(async move {
        if let Ok(()) = tokio::signal::ctrl_c().await {
            logger::log_shutdown_started("Ctrl+C");
            state.shutdown_requested.store(true, Ordering::SeqCst);
            state.shutdown.notify_one();
        }
    });
}
