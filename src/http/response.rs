//! Response handling and transformation.
//!
//! # Responsibilities
//! - Answer CORS preflight requests locally
//! - Relay upstream responses (status, reason, headers, streamed body)
//! - Stamp permissive CORS headers on everything leaving the proxy
//!
//! # Design Decisions
//! - Upstream bodies are wrapped, never collected
//! - CORS headers are written last so they override upstream values
//! - Hop-by-hop headers stripped automatically

use axum::{
    body::Body,
    http::{header, HeaderMap, HeaderValue, Response, StatusCode},
};
use hyper::body::Incoming;

use crate::http::headers::strip_hop_by_hop;

/// Methods advertised to browsers.
pub const ALLOWED_METHODS: &str = "GET, POST, DELETE, OPTIONS";

/// Overwrite the CORS headers on an outgoing response.
pub fn apply_cors(headers: &mut HeaderMap) {
    headers.insert(
        header::ACCESS_CONTROL_ALLOW_ORIGIN,
        HeaderValue::from_static("*"),
    );
    headers.insert(
        header::ACCESS_CONTROL_ALLOW_METHODS,
        HeaderValue::from_static(ALLOWED_METHODS),
    );
    headers.insert(
        header::ACCESS_CONTROL_ALLOW_HEADERS,
        HeaderValue::from_static("*"),
    );
}

/// 204 answer to an `OPTIONS` request. Never touches an upstream.
pub fn preflight() -> Response<Body> {
    let mut response = Response::new(Body::empty());
    *response.status_mut() = StatusCode::NO_CONTENT;
    apply_cors(response.headers_mut());
    response
}

/// Hand an upstream response back to the caller.
///
/// Status, extensions (including the HTTP/1 reason phrase) and end-to-end
/// headers are kept as received; the body is streamed through as-is.
pub fn relay(upstream: Response<Incoming>) -> Response<Body> {
    let (mut parts, body) = upstream.into_parts();
    strip_hop_by_hop(&mut parts.headers);
    apply_cors(&mut parts.headers);
    Response::from_parts(parts, Body::new(body))
}
