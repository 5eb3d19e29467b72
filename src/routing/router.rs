//! Route lookup and path rewriting.
//!
//! # Responsibilities
//! - Strip the mount prefix the proxy is exposed under
//! - Classify the remaining path (OAuth, image, API) in fixed order
//! - Rewrite the path for the selected upstream
//!
//! # Design Decisions
//! - Immutable after construction (shared across requests without locks)
//! - Disabled routes are never compiled into the table
//! - First match wins; no match is an explicit `RoutingDisabled`

use crate::config::ProxyConfig;
use crate::error::ProxyError;
use crate::routing::matcher::{AnyPath, Matcher, PathPrefixMatcher};

/// Routing outcome for a forwarded request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RouteKind {
    OAuth,
    Image,
    Api,
}

impl RouteKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            RouteKind::OAuth => "oauth",
            RouteKind::Image => "image",
            RouteKind::Api => "api",
        }
    }
}

impl std::fmt::Display for RouteKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The upstream host and rewritten path selected for a request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedRoute {
    pub kind: RouteKind,
    pub host: String,
    pub path: String,
}

#[derive(Debug)]
struct Route {
    kind: RouteKind,
    host: String,
    matcher: Box<dyn Matcher>,
    /// Substrings removed from the path, in order, first occurrence each.
    remove: &'static [&'static str],
}

impl Route {
    fn rewrite(&self, path: &str) -> String {
        self.remove
            .iter()
            .fold(path.to_string(), |acc, pat| acc.replacen(pat, "", 1))
    }
}

/// Compiled, read-only route table.
#[derive(Debug)]
pub struct Router {
    mount_prefix: String,
    routes: Vec<Route>,
}

impl Router {
    /// Compile the route table from configuration.
    pub fn from_config(config: &ProxyConfig) -> Self {
        let features = config.features;
        let upstream = &config.upstream;
        let mut routes = Vec::with_capacity(3);

        if features.oauth_proxy {
            // `/oauth` and `/auth` are removed wherever they first occur,
            // not only at the start of the path.
            routes.push(Route {
                kind: RouteKind::OAuth,
                host: upstream.oauth_host.clone(),
                matcher: Box::new(PathPrefixMatcher::new(["/oauth/", "/auth/"])),
                remove: &["/oauth", "/auth"],
            });
        }
        if features.image_proxy {
            routes.push(Route {
                kind: RouteKind::Image,
                host: upstream.image_host.clone(),
                matcher: Box::new(PathPrefixMatcher::new(["/image/"])),
                remove: &["/image"],
            });
        }
        if features.api_proxy {
            routes.push(Route {
                kind: RouteKind::Api,
                host: upstream.api_host.clone(),
                matcher: Box::new(AnyPath),
                remove: &[],
            });
        }

        Self {
            mount_prefix: config.mount_prefix.clone(),
            routes,
        }
    }

    /// Remove the mount prefix once, if present as a whole leading segment.
    pub fn strip_mount_prefix<'a>(&self, path: &'a str) -> &'a str {
        if self.mount_prefix.is_empty() {
            return path;
        }
        match path.strip_prefix(self.mount_prefix.as_str()) {
            Some(rest) if rest.is_empty() || rest.starts_with('/') => rest,
            _ => path,
        }
    }

    /// Resolve the upstream host and rewritten path for an inbound path.
    pub fn resolve(&self, path: &str) -> Result<ResolvedRoute, ProxyError> {
        let path = self.strip_mount_prefix(path);
        self.routes
            .iter()
            .find(|route| route.matcher.matches(path))
            .map(|route| ResolvedRoute {
                kind: route.kind,
                host: route.host.clone(),
                path: route.rewrite(path),
            })
            .ok_or(ProxyError::RoutingDisabled)
    }

    /// Number of enabled routes.
    pub fn len(&self) -> usize {
        self.routes.len()
    }

    /// True when every route is disabled and all requests will be rejected.
    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }
}
