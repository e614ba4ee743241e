//! HTTP protocol layer module
//!
//! Provides response builders decoupled from the content routes.

pub mod response;

// Re-export commonly used builders
pub use response::{build_404_response, build_500_response, build_json_response};
