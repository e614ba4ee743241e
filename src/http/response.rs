//! HTTP response building module
//!
//! Builders for the three response shapes the server produces: a JSON
//! body, a plain-text 404, and a plain-text 500.

use http_body_util::Full;
use hyper::body::Bytes;
use hyper::Response;

/// Build 200 response with a JSON body
///
/// The body is taken as already-serialized JSON and sent as-is.
pub fn build_json_response(body: String) -> Response<Full<Bytes>> {
    let content_length = body.len();
    Response::builder()
        .status(200)
        .header("Content-Type", "application/json")
        .header("Content-Length", content_length)
        .body(Full::new(Bytes::from(body)))
        .unwrap_or_else(|e| {
            log_build_error("200", &e);
            Response::new(Full::new(Bytes::new()))
        })
}

/// Build 404 Not Found response
///
/// Plain-text body, no Content-Type header (matches the original wire
/// behavior for error bodies).
pub fn build_404_response(message: &str) -> Response<Full<Bytes>> {
    Response::builder()
        .status(404)
        .body(Full::new(Bytes::from(message.to_string())))
        .unwrap_or_else(|e| {
            log_build_error("404", &e);
            Response::new(Full::new(Bytes::from("Not Found")))
        })
}

/// Build 500 Internal Server Error response
pub fn build_500_response(message: &str) -> Response<Full<Bytes>> {
    Response::builder()
        .status(500)
        .header("Content-Type", "text/plain")
        .body(Full::new(Bytes::from(message.to_string())))
        .unwrap_or_else(|e| {
            log_build_error("500", &e);
            Response::new(Full::new(Bytes::from("Internal Server Error")))
        })
}

/// Log response build error
fn log_build_error(status: &str, error: &hyper::http::Error) {
    crate::logger::log_error(&format!("Failed to build {status} response: {error}"));
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_json_response_headers() {
        let resp = build_json_response(r#"{"ok":true}"#.to_string());
        assert_eq!(resp.status(), 200);
        assert_eq!(
            resp.headers().get("Content-Type").unwrap(),
            "application/json"
        );
        assert_eq!(resp.headers().get("Content-Length").unwrap(), "11");
    }

    #[test]
    fn test_404_has_no_content_type() {
        let resp = build_404_response("info.json not found");
        assert_eq!(resp.status(), 404);
        assert!(resp.headers().get("Content-Type").is_none());
    }

    #[test]
    fn test_500_is_plain_text() {
        let resp = build_500_response("boom");
        assert_eq!(resp.status(), 500);
        assert_eq!(resp.headers().get("Content-Type").unwrap(), "text/plain");
    }
}
