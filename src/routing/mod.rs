//! Routing subsystem.
//!
//! # Data Flow
//! ```text
//! Inbound path
//!     → router.rs (strip mount prefix)
//!     → matcher.rs (evaluate route conditions in order)
//!     → Return: ResolvedRoute { host, rewritten path } or RoutingDisabled
//!
//! Route Compilation (at startup):
//!     FeatureFlags + UpstreamConfig
//!     → keep enabled routes in fixed order (oauth, image, api)
//!     → freeze as immutable Router
//! ```
//!
//! # Design Decisions
//! - Routes compiled at startup, immutable at runtime
//! - Deterministic: same input always resolves to the same route
//! - First match wins

pub mod matcher;
pub mod router;

pub use router::{ResolvedRoute, RouteKind, Router};
