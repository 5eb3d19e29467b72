//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! ProxyConfig::default()
//!     → loader.rs (PIXIV_PROXY_* environment overlay)
//!     → CLI flags (main.rs)
//!     → validation.rs (semantic checks)
//!     → ProxyConfig (validated, immutable)
//!     → handed to HttpServer / Forwarder at construction
//! ```
//!
//! # Design Decisions
//! - Config is immutable once loaded; changes require a restart
//! - All fields have defaults so an empty environment is a valid setup
//! - Validation returns every problem at once, not just the first

pub mod loader;
pub mod schema;
pub mod validation;

pub use loader::{overlay, ConfigError};
pub use schema::{FeatureFlags, ListenerConfig, ObservabilityConfig, ProxyConfig, UpstreamConfig};
