//! Content route implementations
//!
//! Each route reads a fresh snapshot of the on-disk content and emits a
//! JSON response. Failures stay request-scoped: a missing file is a 404,
//! anything else is a 500, and the process keeps serving.

use http_body_util::Full;
use hyper::body::Bytes;
use hyper::Response;
use std::sync::Arc;

use crate::config::AppState;
use crate::content::{announcements, version};
use crate::http;
use crate::logger;

/// Serve the version-info document
///
/// Backs both `/get-info` and `/get-latest-version`; the two routes are
/// deliberately identical.
pub async fn serve_version_info(state: &Arc<AppState>) -> Response<Full<Bytes>> {
    match version::load(&state.content.info_file).await {
        Ok(Some(body)) => http::build_json_response(body),
        Ok(None) => {
            logger::log_warning("info.json not found");
            http::build_404_response("info.json not found")
        }
        Err(e) => {
            logger::log_error(&e.to_string());
            http::build_500_response("Internal Server Error")
        }
    }
}

/// Serve the announcement list as a JSON array
///
/// An absent announcements directory is an empty list, not an error.
pub async fn serve_announcements(state: &Arc<AppState>) -> Response<Full<Bytes>> {
    let list = match announcements::load_all(&state.content.announcements_dir).await {
        Ok(list) => list,
        Err(e) => {
            logger::log_error(&format!("Failed to list announcements: {e}"));
            return http::build_500_response("Internal Server Error");
        }
    };

    match serde_json::to_string(&list) {
        Ok(body) => http::build_json_response(body),
        Err(e) => {
            logger::log_error(&format!("Failed to serialize announcements: {e}"));
            http::build_500_response("Internal Server Error")
        }
    }
}
