//! HTTP protocol handling subsystem.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → server.rs (Axum setup, request ID, tracing)
//!     → forward.rs (preflight / classify / forward / relay)
//!         → routing (upstream host + rewritten path)
//!         → request.rs (outbound request)
//!         → upstream over HTTPS
//!     → response.rs (relay, CORS)
//!     → Send to client
//! ```

pub mod forward;
pub mod headers;
pub mod request;
pub mod response;
pub mod server;

pub use forward::Forwarder;
pub use request::X_REQUEST_ID;
pub use server::HttpServer;
