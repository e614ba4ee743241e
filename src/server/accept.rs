// Accept loop module
// Accepts connections until shutdown is signalled, then drains in-flight
// connections within a bounded grace period

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use tokio::net::TcpListener;

use super::connection::accept_connection;
use crate::config::AppState;
use crate::logger;

/// Run the accept loop until the shutdown signal fires.
///
/// On shutdown the listener is dropped first (no new connections), then
/// in-flight connections get `performance.shutdown_grace` seconds to
/// finish before the process exits anyway.
pub async fn run_accept_loop(
    listener: TcpListener,
    state: Arc<AppState>,
    active_connections: Arc<AtomicUsize>,
) -> Result<(), Box<dyn std::error::Error>> {
    loop {
        // Sticky flag: shutdown stays observed across loop iterations
        if state.shutdown_requested.load(Ordering::SeqCst) {
            break;
        }

        tokio::select! {
            accept_result = listener.accept() => {
                match accept_result {
                    Ok((stream, peer_addr)) => {
                        accept_connection(stream, peer_addr, &state, &active_connections);
                    }
                    Err(e) => {
                        logger::log_error(&format!("Failed to accept connection: {e}"));
                    }
                }
            }

            _ = state.shutdown.notified() => {
                break;
            }
        }
    }

    // Stop accepting before draining
    drop(listener);
    drain_connections(&state, &active_connections).await;
    logger::log_shutdown_complete();

    Ok(())
}

/// Wait for in-flight connections to finish, up to the grace period.
async fn drain_connections(state: &Arc<AppState>, active_connections: &Arc<AtomicUsize>) {
    let in_flight = active_connections.load(Ordering::SeqCst);
    if in_flight == 0 {
        return;
    }

    let grace_secs = state.config.performance.shutdown_grace;
    logger::log_shutdown_waiting(in_flight, grace_secs);

    let deadline = tokio::time::Instant::now() + std::time::Duration::from_secs(grace_secs);
    loop {
        if active_connections.load(Ordering::SeqCst) == 0 {
            return;
        }
        if tokio::time::Instant::now() >= deadline {
            logger::log_shutdown_forced(active_connections.load(Ordering::SeqCst));
            return;
        }
        tokio::time::sleep(std::time::Duration::from_millis(50)).await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{AppState, Config};
    use crate::server::listener::create_listener;

    #[tokio::test]
    async fn test_shutdown_before_loop_registers_waiter_still_stops() {
        let config = Config::load_from("does-not-exist").expect("defaults");
        let state = Arc::new(AppState::new(&config));
        let listener =
            create_listener("127.0.0.1:0".parse().expect("addr")).expect("bind");
        let active_connections = Arc::new(AtomicUsize::new(0));

        // Shutdown delivered before the loop ever polls the Notify; the
        // stored permit must wake the first poll instead of being lost
        state.shutdown.notify_one();

        let local = tokio::task::LocalSet::new();
        let result = tokio::time::timeout(
            std::time::Duration::from_secs(5),
            local.run_until(run_accept_loop(listener, state, active_connections)),
        )
        .await;

        assert!(
            result.is_ok(),
            "accept loop did not stop on a shutdown signal sent before its first poll"
        );
    }

    #[tokio::test]
    async fn test_shutdown_requested_flag_stops_loop() {
        let config = Config::load_from("does-not-exist").expect("defaults");
        let state = Arc::new(AppState::new(&config));
        let listener =
            create_listener("127.0.0.1:0".parse().expect("addr")).expect("bind");
        let active_connections = Arc::new(AtomicUsize::new(0));

        state.shutdown_requested.store(true, Ordering::SeqCst);

        let local = tokio::task::LocalSet::new();
        let result = tokio::time::timeout(
            std::time::Duration::from_secs(5),
            local.run_until(run_accept_loop(listener, state, active_connections)),
        )
        .await;

        assert!(result.is_ok(), "accept loop ignored the sticky shutdown flag");
    }
}
