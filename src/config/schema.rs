//! Configuration schema definitions.
//!
//! This module defines the complete configuration structure for the proxy.
//! All types derive `Serialize` so the effective config can be dumped at startup.

use serde::Serialize;

/// Default upstream serving the app API.
pub const DEFAULT_API_HOST: &str = "app-api.pixiv.net";

/// Default upstream serving OAuth token exchange.
pub const DEFAULT_OAUTH_HOST: &str = "oauth.secure.pixiv.net";

/// Default upstream serving images.
pub const DEFAULT_IMAGE_HOST: &str = "i.pximg.net";

/// Referer sent on every outbound request.
pub const DEFAULT_REFERER: &str = "https://app-api.pixiv.net/";

/// Root configuration for the proxy.
#[derive(Debug, Clone, Serialize)]
pub struct ProxyConfig {
    /// Listener configuration (bind address).
    pub listener: ListenerConfig,

    /// Path prefix under which the proxy is mounted, stripped before routing.
    pub mount_prefix: String,

    /// Upstream hosts and outbound request settings.
    pub upstream: UpstreamConfig,

    /// Which routes are enabled.
    pub features: FeatureFlags,

    /// Observability settings.
    pub observability: ObservabilityConfig,
}

impl ProxyConfig {
    /// Single-line JSON rendering of the effective configuration.
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }
}

impl Default for ProxyConfig {
    fn default() -> Self {
        Self {
            listener: ListenerConfig::default(),
            mount_prefix: "/api".to_string(),
            upstream: UpstreamConfig::default(),
            features: FeatureFlags::default(),
            observability: ObservabilityConfig::default(),
        }
    }
}

/// Listener configuration.
#[derive(Debug, Clone, Serialize)]
pub struct ListenerConfig {
    /// Bind address (e.g., "0.0.0.0:8080").
    pub bind_address: String,
}

impl Default for ListenerConfig {
    fn default() -> Self {
        Self {
            bind_address: "0.0.0.0:8080".to_string(),
        }
    }
}

/// Upstream targets.
#[derive(Debug, Clone, Serialize)]
pub struct UpstreamConfig {
    /// URI scheme used to reach every upstream ("https" in production).
    pub scheme: String,

    /// Host for everything not claimed by a more specific route.
    pub api_host: String,

    /// Host for `/oauth/*` and `/auth/*`.
    pub oauth_host: String,

    /// Host for `/image/*`.
    pub image_host: String,

    /// Value written into the outbound `Referer` header.
    pub referer: String,
}

impl Default for UpstreamConfig {
    fn default() -> Self {
        Self {
            scheme: "https".to_string(),
            api_host: DEFAULT_API_HOST.to_string(),
            oauth_host: DEFAULT_OAUTH_HOST.to_string(),
            image_host: DEFAULT_IMAGE_HOST.to_string(),
            referer: DEFAULT_REFERER.to_string(),
        }
    }
}

/// Route toggles. All enabled by default.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct FeatureFlags {
    pub api_proxy: bool,
    pub image_proxy: bool,
    pub oauth_proxy: bool,
}

impl FeatureFlags {
    /// Every route switched off; all non-preflight requests are rejected.
    pub fn none() -> Self {
        Self {
            api_proxy: false,
            image_proxy: false,
            oauth_proxy: false,
        }
    }

    /// True when at least one route can forward.
    pub fn any_enabled(&self) -> bool {
        self.api_proxy || self.image_proxy || self.oauth_proxy
    }
}

impl Default for FeatureFlags {
    fn default() -> Self {
        Self {
            api_proxy: true,
            image_proxy: true,
            oauth_proxy: true,
        }
    }
}

/// Observability configuration.
#[derive(Debug, Clone, Serialize)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
        }
    }
}
