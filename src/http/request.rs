//! Outbound request construction.
//!
//! # Responsibilities
//! - Build the upstream URI from scheme, resolved host, rewritten path and query
//! - Copy inbound headers, then pin `Host` and `Referer`
//! - Forward the body untouched, except for GET/HEAD which never carry one
//!
//! # Design Decisions
//! - The inbound body is moved, never buffered
//! - Outbound requests always go out as HTTP/1.1 regardless of inbound version

use axum::{
    body::Body,
    http::{header, request::Parts, HeaderValue, Method, Request, Uri},
};

use crate::config::UpstreamConfig;
use crate::error::{ProxyError, ProxyResult};
use crate::http::headers::strip_hop_by_hop;
use crate::routing::ResolvedRoute;

/// Header carrying the per-request correlation id.
pub const X_REQUEST_ID: &str = "x-request-id";

/// Compose `{scheme}://{host}{path}{?query}` for the upstream.
pub fn target_uri(scheme: &str, route: &ResolvedRoute, query: Option<&str>) -> ProxyResult<Uri> {
    let path = if route.path.is_empty() { "/" } else { route.path.as_str() };
    let uri = match query.filter(|q| !q.is_empty()) {
        Some(q) => format!("{scheme}://{}{path}?{q}", route.host),
        None => format!("{scheme}://{}{path}", route.host),
    };
    uri.parse().map_err(|e: axum::http::uri::InvalidUri| ProxyError::InvalidTarget {
        target: route.host.clone(),
        reason: e.to_string(),
    })
}

/// Whether requests with this method are forwarded without a body.
pub fn drops_body(method: &Method) -> bool {
    *method == Method::GET || *method == Method::HEAD
}

/// Derive the upstream request from the inbound one.
pub fn build_outbound(
    parts: Parts,
    body: Body,
    route: &ResolvedRoute,
    upstream: &UpstreamConfig,
) -> ProxyResult<Request<Body>> {
    let uri = target_uri(&upstream.scheme, route, parts.uri.query())?;

    let invalid = |reason: String| ProxyError::InvalidTarget {
        target: route.host.clone(),
        reason,
    };
    let host = HeaderValue::from_str(&route.host).map_err(|e| invalid(e.to_string()))?;
    let referer = HeaderValue::from_str(&upstream.referer).map_err(|e| invalid(e.to_string()))?;

    let mut headers = parts.headers;
    strip_hop_by_hop(&mut headers);
    headers.insert(header::HOST, host);
    headers.insert(header::REFERER, referer);

    let body = if drops_body(&parts.method) {
        headers.remove(header::CONTENT_LENGTH);
        Body::empty()
    } else {
        body
    };

    let mut request = Request::new(body);
    *request.method_mut() = parts.method;
    *request.uri_mut() = uri;
    *request.headers_mut() = headers;
    Ok(request)
}
