//! Pixiv reverse proxy.
//!
//! ```text
//!                        ┌───────────────────────────────────────────┐
//!   Client Request       │                pixiv-proxy                │
//!   ─────────────────────┼─▶ server ─▶ forwarder ─▶ router            │
//!                        │                 │     (oauth│image│api)    │
//!                        │                 ▼                          │
//!   Client Response      │   response ◀── upstream client (HTTPS) ◀──┼── app-api.pixiv.net
//!   ◀────────────────────┼── + CORS                                  │   oauth.secure.pixiv.net
//!                        │                                           │   i.pximg.net
//!                        └───────────────────────────────────────────┘
//! ```

use clap::Parser;
use tokio::net::TcpListener;

use pixiv_proxy::config::{loader, validation::validate_config, ConfigError};
use pixiv_proxy::lifecycle::signals::wait_for_termination;
use pixiv_proxy::observability::logging;
use pixiv_proxy::{HttpServer, ProxyConfig, Shutdown};

/// Command line overrides. Environment variables (`PIXIV_PROXY_*`) are read first.
#[derive(Parser, Debug)]
#[command(name = "pixiv-proxy")]
#[command(about = "Reverse proxy for the Pixiv API, OAuth and image hosts", long_about = None)]
struct Cli {
    /// Address to listen on
    #[arg(short, long)]
    bind: Option<String>,

    /// Path prefix stripped from every request before routing
    #[arg(long)]
    mount_prefix: Option<String>,

    /// Log level when RUST_LOG is unset
    #[arg(long)]
    log_level: Option<String>,

    /// Reject generic API requests
    #[arg(long)]
    disable_api_proxy: bool,

    /// Route /image/* to the API host instead of the image host
    #[arg(long)]
    disable_image_proxy: bool,

    /// Route /oauth/* and /auth/* to the API host instead of the OAuth host
    #[arg(long)]
    disable_oauth_proxy: bool,
}

impl Cli {
    fn apply(self, mut config: ProxyConfig) -> ProxyConfig {
        if let Some(bind) = self.bind {
            config.listener.bind_address = bind;
        }
        if let Some(prefix) = self.mount_prefix {
            config.mount_prefix = prefix;
        }
        if let Some(level) = self.log_level {
            config.observability.log_level = level;
        }
        config.features.api_proxy &= !self.disable_api_proxy;
        config.features.image_proxy &= !self.disable_image_proxy;
        config.features.oauth_proxy &= !self.disable_oauth_proxy;
        config
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let config = loader::overlay(ProxyConfig::default(), |name| std::env::var(name).ok())?;
    let config = cli.apply(config);
    validate_config(&config).map_err(ConfigError::Validation)?;

    logging::init(&config.observability.log_level)?;

    tracing::info!("pixiv-proxy v{} starting", env!("CARGO_PKG_VERSION"));
    tracing::info!(
        bind_address = %config.listener.bind_address,
        mount_prefix = %config.mount_prefix,
        api_host = %config.upstream.api_host,
        oauth_host = %config.upstream.oauth_host,
        image_host = %config.upstream.image_host,
        api_proxy = config.features.api_proxy,
        image_proxy = config.features.image_proxy,
        oauth_proxy = config.features.oauth_proxy,
        "Configuration loaded"
    );
    tracing::debug!(config = %config.to_json()?, "Effective configuration");

    let listener = TcpListener::bind(&config.listener.bind_address).await?;

    let shutdown = Shutdown::new();
    let server_shutdown = shutdown.subscribe();
    tokio::spawn(async move {
        match wait_for_termination().await {
            Ok(()) => shutdown.trigger(),
            Err(e) => {
                tracing::error!(error = %e, "Failed to listen for shutdown signals");
                // Keep the sender alive so the server is not stopped by a closed channel.
                std::future::pending::<()>().await;
            }
        }
    });

    let server = HttpServer::new(config);
    server.run(listener, server_shutdown).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}
