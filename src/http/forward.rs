//! The router-forwarder: classify, rewrite, forward, relay.
//!
//! ```text
//! OPTIONS? ──yes──▶ 204 preflight
//!    │no
//!    ▼
//! strip mount prefix → classify ──none──▶ 403 RoutingDisabled
//!    │
//!    ▼
//! build outbound → forward ──transport error──▶ 502 UpstreamTransport
//!    │
//!    ▼
//! relay (status, headers, streamed body) + CORS
//! ```
//!
//! No retries and no timeouts are applied here; the upstream call is the only
//! suspension point and affects only its own request.

use axum::{
    body::Body,
    http::{Method, Request, Response},
    response::IntoResponse,
};
use hyper_rustls::{HttpsConnector, HttpsConnectorBuilder};
use hyper_util::{
    client::legacy::{connect::HttpConnector, Client},
    rt::TokioExecutor,
};

use crate::config::{ProxyConfig, UpstreamConfig};
use crate::error::{ProxyError, ProxyResult};
use crate::http::request::build_outbound;
use crate::http::response;
use crate::routing::{ResolvedRoute, Router};

/// HTTPS-capable upstream client streaming axum bodies.
pub type UpstreamClient = Client<HttpsConnector<HttpConnector>, Body>;

/// Build the upstream client. Accepts both `https` and `http` targets.
pub fn upstream_client() -> UpstreamClient {
    // An already installed provider is fine.
    static RUSTLS_INIT: std::sync::Once = std::sync::Once::new();
    RUSTLS_INIT.call_once(|| {
        let _ = rustls::crypto::ring::default_provider().install_default();
    });

    let mut http_connector = HttpConnector::new();
    http_connector.enforce_http(false);
    http_connector.set_nodelay(true);

    let https_connector = HttpsConnectorBuilder::new()
        .with_webpki_roots()
        .https_or_http()
        .enable_http1()
        .wrap_connector(http_connector);

    Client::builder(TokioExecutor::new()).build(https_connector)
}

/// Stateless request handler shared by every connection.
pub struct Forwarder {
    router: Router,
    upstream: UpstreamConfig,
    client: UpstreamClient,
}

impl Forwarder {
    /// Create a forwarder from an already validated configuration.
    pub fn new(config: &ProxyConfig) -> Self {
        Self::with_client(config, upstream_client())
    }

    pub fn with_client(config: &ProxyConfig, client: UpstreamClient) -> Self {
        Self {
            router: Router::from_config(config),
            upstream: config.upstream.clone(),
            client,
        }
    }

    pub fn router(&self) -> &Router {
        &self.router
    }

    /// Handle one inbound request end to end. Never fails: errors become responses.
    pub async fn handle(&self, request: Request<Body>) -> Response<Body> {
        if *request.method() == Method::OPTIONS {
            tracing::debug!(path = %request.uri().path(), "Answering CORS preflight");
            return response::preflight();
        }

        let route = match self.router.resolve(request.uri().path()) {
            Ok(route) => route,
            Err(err) => {
                tracing::warn!(
                    method = %request.method(),
                    path = %request.uri().path(),
                    "No enabled route for request"
                );
                return err.into_response();
            }
        };

        tracing::debug!(
            method = %request.method(),
            route = %route.kind,
            target = %route.host,
            path = %route.path,
            "Route resolved"
        );

        match self.forward(request, &route).await {
            Ok(upstream) => {
                tracing::debug!(
                    route = %route.kind,
                    target = %route.host,
                    status = upstream.status().as_u16(),
                    "Relaying upstream response"
                );
                response::relay(upstream)
            }
            Err(err) => {
                tracing::error!(
                    route = %route.kind,
                    target = %route.host,
                    error = %err,
                    "Upstream request failed"
                );
                err.into_response()
            }
        }
    }

    async fn forward(
        &self,
        request: Request<Body>,
        route: &ResolvedRoute,
    ) -> ProxyResult<Response<hyper::body::Incoming>> {
        let (parts, body) = request.into_parts();
        let outbound = build_outbound(parts, body, route, &self.upstream)?;

        self.client
            .request(outbound)
            .await
            .map_err(|e| ProxyError::upstream(route.host.as_str(), &e))
    }
}
