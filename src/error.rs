//! Request-level error taxonomy and its HTTP mapping.
//!
//! Every variant is terminal for the request and is rendered as a JSON body
//! with `Content-Type: application/json` and the CORS headers attached.

use axum::{
    body::Body,
    http::{header, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
};
use serde_json::json;

use crate::http::response::apply_cors;

/// Hint returned alongside `RoutingDisabled`.
pub const DISABLED_HINT: &str = "Check PIXIV_PROXY_ENABLE_* settings";

#[derive(Debug, thiserror::Error)]
pub enum ProxyError {
    /// No enabled route claims the request path.
    #[error("Service not enabled")]
    RoutingDisabled,

    /// The upstream call failed at the network layer.
    #[error("{message}")]
    UpstreamTransport { target: String, message: String },

    /// The outbound request could not be assembled for the selected host.
    #[error("invalid upstream request for {target}: {reason}")]
    InvalidTarget { target: String, reason: String },
}

pub type ProxyResult<T> = Result<T, ProxyError>;

impl ProxyError {
    /// Build a transport failure, flattening the error's source chain into the message.
    pub fn upstream(target: impl Into<String>, err: &(dyn std::error::Error + 'static)) -> Self {
        let mut message = err.to_string();
        let mut source = err.source();
        while let Some(cause) = source {
            message.push_str(": ");
            message.push_str(&cause.to_string());
            source = cause.source();
        }
        ProxyError::UpstreamTransport {
            target: target.into(),
            message,
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            ProxyError::RoutingDisabled => StatusCode::FORBIDDEN,
            ProxyError::UpstreamTransport { .. } | ProxyError::InvalidTarget { .. } => {
                StatusCode::BAD_GATEWAY
            }
        }
    }

    fn body(&self) -> serde_json::Value {
        match self {
            ProxyError::RoutingDisabled => json!({
                "error": self.to_string(),
                "hint": DISABLED_HINT,
            }),
            ProxyError::UpstreamTransport { target, .. }
            | ProxyError::InvalidTarget { target, .. } => json!({
                "error": self.to_string(),
                "target": target,
            }),
        }
    }
}

impl IntoResponse for ProxyError {
    fn into_response(self) -> Response {
        let mut response = Response::new(Body::from(self.body().to_string()));
        *response.status_mut() = self.status();
        let headers = response.headers_mut();
        headers.insert(
            header::CONTENT_TYPE,
            HeaderValue::from_static("application/json"),
        );
        apply_cors(headers);
        response
    }
}
