//! Observability subsystem.
//!
//! # Design Decisions
//! - Structured logging through `tracing`
//! - Request ID flows through the request span and on to the upstream
//! - `RUST_LOG` wins over the configured level when set

pub mod logging;
