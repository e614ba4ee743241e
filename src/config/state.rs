// Application state module
// Holds the per-process server state shared across connection tasks

use std::sync::atomic::AtomicBool;
use std::sync::Arc;
use tokio::sync::Notify;

use super::types::Config;
use crate::content::ContentPaths;
use crate::logger::AccessLogFormat;

/// Application state
///
/// Built once in `main` and shared via `Arc`; there is no other
/// process-global server state.
pub struct AppState {
    pub config: Config,
    pub content: ContentPaths,

    /// Shutdown signal delivered by the signal handler to the accept loop
    pub shutdown: Arc<Notify>,
    /// Set once shutdown has been requested
    pub shutdown_requested: Arc<AtomicBool>,

    // Cached config values for fast access without locks
    pub cached_access_log: AtomicBool,
    pub access_log_format: AccessLogFormat,
}

impl AppState {
    pub fn new(config: &Config) -> Self {
        Self {
            config: config.clone(),
            content: ContentPaths::default(),
            shutdown: Arc::new(Notify::new()),
            shutdown_requested: Arc::new(AtomicBool::new(false)),
            cached_access_log: AtomicBool::new(config.logging.access_log),
            access_log_format: AccessLogFormat::parse(&config.logging.access_log_format),
        }
    }

    /// Same state but with content loaders pointed at custom locations
    #[cfg(test)]
    pub fn with_content(config: &Config, content: ContentPaths) -> Self {
        Self {
            content,
            ..Self::new(config)
        }
    }
}
