//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation of values that serde/env parsing accepts blindly
//! - Upstream hosts must be usable as a URI authority and `Host` header
//! - Mount prefix must be a single anchored path prefix
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Pure function: &ProxyConfig → Result<(), Vec<ValidationError>>

use std::net::SocketAddr;

use axum::http::{uri::Authority, HeaderValue};

use crate::config::schema::ProxyConfig;

/// A single semantic problem in the configuration.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{field}: {message}")]
pub struct ValidationError {
    pub field: &'static str,
    pub message: String,
}

impl ValidationError {
    fn new(field: &'static str, message: impl Into<String>) -> Self {
        Self {
            field,
            message: message.into(),
        }
    }
}

/// Validate a fully assembled configuration.
pub fn validate_config(config: &ProxyConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if config.listener.bind_address.parse::<SocketAddr>().is_err() {
        errors.push(ValidationError::new(
            "listener.bind_address",
            format!("{:?} is not a socket address", config.listener.bind_address),
        ));
    }

    let prefix = &config.mount_prefix;
    if !prefix.is_empty() && (!prefix.starts_with('/') || prefix.ends_with('/')) {
        errors.push(ValidationError::new(
            "mount_prefix",
            format!("{prefix:?} must start with '/' and must not end with '/'"),
        ));
    }

    let upstream = &config.upstream;
    if upstream.scheme != "https" && upstream.scheme != "http" {
        errors.push(ValidationError::new(
            "upstream.scheme",
            format!("{:?} is not one of \"http\", \"https\"", upstream.scheme),
        ));
    }

    for (field, host) in [
        ("upstream.api_host", &upstream.api_host),
        ("upstream.oauth_host", &upstream.oauth_host),
        ("upstream.image_host", &upstream.image_host),
    ] {
        if host.is_empty() || host.parse::<Authority>().is_err() {
            errors.push(ValidationError::new(
                field,
                format!("{host:?} is not a valid host"),
            ));
        }
    }

    if HeaderValue::from_str(&upstream.referer).is_err() {
        errors.push(ValidationError::new(
            "upstream.referer",
            "not a valid header value",
        ));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
