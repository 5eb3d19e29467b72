//! Shared utilities for integration testing.

use std::net::SocketAddr;
use std::time::Duration;

use axum::{
    body::Body,
    http::{header, Request},
    response::{IntoResponse, Response},
    Json, Router,
};
use pixiv_proxy::lifecycle::Shutdown;
use pixiv_proxy::{HttpServer, ProxyConfig};
use serde_json::json;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;

/// Value every echo upstream puts in `Access-Control-Allow-Origin`.
pub const UPSTREAM_ORIGIN: &str = "https://www.pixiv.net";

/// Start an upstream that answers every request with a JSON description of it.
pub async fn start_echo_upstream() -> SocketAddr {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let app = Router::new().fallback(echo);

    tokio::spawn(async move {
        let _ = axum::serve(listener, app).await;
    });
    addr
}

async fn echo(request: Request<Body>) -> Response {
    let (parts, body) = request.into_parts();
    let bytes = axum::body::to_bytes(body, usize::MAX).await.unwrap();
    let header = |name: &str| {
        parts
            .headers
            .get(name)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string)
    };

    let payload = json!({
        "method": parts.method.as_str(),
        "path": parts.uri.path(),
        "query": parts.uri.query(),
        "host": header("host"),
        "referer": header("referer"),
        "request_id": header("x-request-id"),
        "content_length": header("content-length"),
        "body": String::from_utf8_lossy(&bytes),
    });

    (
        [
            (header::ACCESS_CONTROL_ALLOW_ORIGIN, UPSTREAM_ORIGIN),
            (header::HeaderName::from_static("x-upstream"), "echo"),
        ],
        Json(payload),
    )
        .into_response()
}

/// Start an upstream that reads the request head and replies with `response`
/// written in `chunk_size` pieces, then closes the connection.
pub async fn start_raw_upstream(response: Vec<u8>, chunk_size: usize) -> SocketAddr {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let response = std::sync::Arc::new(response);

    tokio::spawn(async move {
        while let Ok((mut socket, _)) = listener.accept().await {
            let response = response.clone();
            tokio::spawn(async move {
                let mut head = Vec::new();
                let mut buf = [0u8; 1024];
                while !head.windows(4).any(|w| w == b"\r\n\r\n") {
                    match socket.read(&mut buf).await {
                        Ok(0) | Err(_) => return,
                        Ok(n) => head.extend_from_slice(&buf[..n]),
                    }
                }
                for chunk in response.chunks(chunk_size) {
                    if socket.write_all(chunk).await.is_err() {
                        return;
                    }
                    tokio::time::sleep(Duration::from_millis(1)).await;
                }
                let _ = socket.shutdown().await;
            });
        }
    });
    addr
}

/// Config pointing every upstream at local plain-HTTP servers.
pub fn local_config(api: SocketAddr, oauth: SocketAddr, image: SocketAddr) -> ProxyConfig {
    let mut config = ProxyConfig::default();
    config.listener.bind_address = "127.0.0.1:0".into();
    config.upstream.scheme = "http".into();
    config.upstream.api_host = api.to_string();
    config.upstream.oauth_host = oauth.to_string();
    config.upstream.image_host = image.to_string();
    config
}

/// Run the proxy on an ephemeral port. Keep the returned `Shutdown` alive for
/// as long as the proxy should serve.
pub async fn start_proxy(config: ProxyConfig) -> (SocketAddr, Shutdown) {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let shutdown = Shutdown::new();
    let server_shutdown = shutdown.subscribe();
    let server = HttpServer::new(config);

    tokio::spawn(async move {
        let _ = server.run(listener, server_shutdown).await;
    });
    (addr, shutdown)
}

pub fn client() -> reqwest::Client {
    reqwest::Client::builder()
        .pool_max_idle_per_host(0)
        .no_proxy()
        .build()
        .unwrap()
}

/// Send a hand-written HTTP/1.1 request to `addr` and return everything read
/// until the server closes the connection.
pub async fn raw_exchange(addr: SocketAddr, request: &str) -> String {
    let mut socket = tokio::net::TcpStream::connect(addr).await.unwrap();
    socket.write_all(request.as_bytes()).await.unwrap();

    let mut response = Vec::new();
    tokio::time::timeout(Duration::from_secs(5), socket.read_to_end(&mut response))
        .await
        .expect("Proxy did not close the connection")
        .unwrap();
    String::from_utf8_lossy(&response).into_owned()
}
