//! Per-request access logging.
//!
//! Wraps the gate from the outside: every request, authorized or not, gets
//! one span with method, path and request id, and one event with status and
//! latency when the response is produced.

use axum::body::Body;
use axum::http::Request;
use tracing::Span;

/// Span for `TraceLayer::make_span_with`.
pub fn make_request_span(request: &Request<Body>) -> Span {
    let request_id = request
        .headers()
        .get("x-request-id")
        .and_then(|v| v.to_str().ok())
        .unwrap_or("unknown");

    tracing::info_span!(
        "request",
        method = %request.method(),
        path = %request.uri().path(),
        request_id = %request_id,
    )
}
