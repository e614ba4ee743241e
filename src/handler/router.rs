//! Request routing dispatch module
//!
//! Entry point for HTTP request processing: method validation, exact-path
//! dispatch to the content routes, catch-all 404, and access logging.

use http_body_util::Full;
use hyper::body::{Body, Bytes};
use hyper::{Method, Request, Response, Version};
use std::convert::Infallible;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Instant;

use crate::config::AppState;
use crate::handler::content_routes;
use crate::http;
use crate::logger::{self, AccessLogEntry};

/// Main entry point for HTTP request handling
pub async fn handle_request(
    req: Request<hyper::body::Incoming>,
    state: Arc<AppState>,
    remote_addr: SocketAddr,
) -> Result<Response<Full<Bytes>>, Infallible> {
    let started = Instant::now();
    let access_log = state
        .cached_access_log
        .load(std::sync::atomic::Ordering::Relaxed);

    let mut entry = AccessLogEntry::new(
        remote_addr.ip().to_string(),
        req.method().to_string(),
        req.uri().path().to_string(),
    );
    entry.query = req.uri().query().map(ToString::to_string);
    entry.http_version = version_label(req.version()).to_string();
    entry.referer = header_value(&req, "referer");
    entry.user_agent = header_value(&req, "user-agent");

    // The request body is never consumed; the three routes and the
    // catch-all are all dispatched on method and path alone.
    let response = if *req.method() == Method::GET {
        dispatch(req.uri().path(), &state).await
    } else {
        logger::log_warning(&format!(
            "Unsupported method: {} {}",
            req.method(),
            req.uri().path()
        ));
        http::build_404_response("Not Found")
    };

    if access_log {
        entry.status = response.status().as_u16();
        entry.body_bytes = usize::try_from(
            response.body().size_hint().exact().unwrap_or(0),
        )
        .unwrap_or(usize::MAX);
        entry.request_time_us =
            u64::try_from(started.elapsed().as_micros()).unwrap_or(u64::MAX);
        logger::log_access(&entry, state.access_log_format);
    }

    Ok(response)
}

/// Dispatch a GET request by exact path match
async fn dispatch(path: &str, state: &Arc<AppState>) -> Response<Full<Bytes>> {
    match path {
        // Duplicate routes, same document
        "/get-info" | "/get-latest-version" => content_routes::serve_version_info(state).await,
        "/get-announcement" => content_routes::serve_announcements(state).await,
        _ => {
            logger::log_warning(&format!("404 Not Found: {path}"));
            http::build_404_response("Not Found")
        }
    }
}

fn header_value(req: &Request<hyper::body::Incoming>, name: &str) -> Option<String> {
    req.headers()
        .get(name)
        .and_then(|v| v.to_str().ok())
        .map(ToString::to_string)
}

fn version_label(version: Version) -> &'static str {
    match version {
        Version::HTTP_10 => "1.0",
        Version::HTTP_2 => "2",
        _ => "1.1",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::content::ContentPaths;

    fn state_for(dir: &tempfile::TempDir) -> Arc<AppState> {
        let config = Config::load_from("does-not-exist").expect("defaults");
        let content = ContentPaths {
            info_file: dir.path().join("info.json"),
            announcements_dir: dir.path().join("announces"),
        };
        Arc::new(AppState::with_content(&config, content))
    }

    #[tokio::test]
    async fn test_version_routes_are_identical() {
        let dir = tempfile::tempdir().expect("tempdir");
        std::fs::write(dir.path().join("info.json"), r#"{"version":"2.3.4"}"#)
            .expect("write fixture");
        let state = state_for(&dir);

        let info = dispatch("/get-info", &state).await;
        let latest = dispatch("/get-latest-version", &state).await;
        assert_eq!(info.status(), 200);
        assert_eq!(latest.status(), 200);
    }

    #[tokio::test]
    async fn test_unknown_path_is_404() {
        let dir = tempfile::tempdir().expect("tempdir");
        let state = state_for(&dir);

        let resp = dispatch("/unknown", &state).await;
        assert_eq!(resp.status(), 404);

        // Near-miss paths do not prefix-match
        let resp = dispatch("/get-info/extra", &state).await;
        assert_eq!(resp.status(), 404);
    }

    #[test]
    fn test_version_label() {
        assert_eq!(version_label(Version::HTTP_10), "1.0");
        assert_eq!(version_label(Version::HTTP_11), "1.1");
        assert_eq!(version_label(Version::HTTP_2), "2");
    }
}
