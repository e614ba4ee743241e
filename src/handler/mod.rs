//! Request handler module
//!
//! Responsible for request routing dispatch and the content routes.

pub mod content_routes;
pub mod router;

// Re-export main entry point
pub use router::handle_request;
