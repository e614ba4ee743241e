// Server module entry point
// Listener setup, per-connection handling, accept loop, and signal handling

pub mod accept;
pub mod connection;
pub mod listener;
pub mod signal;

// Re-export commonly used functions
pub use accept::run_accept_loop;
pub use listener::create_listener;
